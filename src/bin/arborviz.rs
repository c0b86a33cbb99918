use anyhow::Result;
use rustyline::{DefaultEditor, error::ReadlineError};

use arbor::api::{Output, Session};
use arbor::config::Settings;
use arbor::debugger::set_debug_level;

fn main() -> Result<()> {
    let settings = Settings::load(std::env::args().skip(1))?;
    set_debug_level(settings.debug);

    let mut session = Session::new(&settings)?;

    if let Some(script) = &settings.exec {
        for line in script.split(';').map(str::trim).filter(|l| !l.is_empty()) {
            println!("arbor> {line}");
            if !run_line(&mut session, line) {
                break;
            }
        }
        return Ok(());
    }

    println!("arbor B+ tree visualizer");
    println!("Type 'help' for commands, Ctrl+D to exit");
    if let Ok(Output::Text(tree)) = session.execute("show") {
        println!("{tree}");
    }

    let mut editor = DefaultEditor::new()?;

    loop {
        match editor.readline("arbor> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line)?;

                if !run_line(&mut session, line) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

/// Runs one command; `false` once the session asks to quit.
fn run_line(session: &mut Session, line: &str) -> bool {
    match session.execute(line) {
        Ok(Output::Text(text)) => {
            println!("{text}");
            true
        }
        Ok(Output::Quit) => false,
        Err(e) => {
            eprintln!("error: {e}");
            true
        }
    }
}
