use std::time::{Duration, Instant};

/// Nested timeline of named build phases.
pub struct PhaseTracker {
    phases: Vec<Phase>,
    current: Option<usize>,
}

struct Phase {
    name: String,
    start: Instant,
    end: Option<Instant>,
    parent: Option<usize>,
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            current: None,
        }
    }

    pub fn begin(&mut self, name: impl Into<String>) {
        let idx = self.phases.len();
        self.phases.push(Phase {
            name: name.into(),
            start: Instant::now(),
            end: None,
            parent: self.current,
        });
        self.current = Some(idx);
    }

    pub fn end(&mut self) {
        if let Some(idx) = self.current {
            self.phases[idx].end = Some(Instant::now());
            self.current = self.phases[idx].parent;
        }
    }

    /// Phase names with their nesting depth, in start order.
    pub fn entries(&self) -> Vec<(usize, &str, Duration)> {
        self.phases
            .iter()
            .enumerate()
            .map(|(idx, p)| {
                let duration = p.end.map(|e| e.duration_since(p.start)).unwrap_or_default();
                (self.depth(idx), p.name.as_str(), duration)
            })
            .collect()
    }

    pub fn report(&self) -> String {
        let mut output = String::new();
        output.push_str("\n=== Build Timeline ===\n");

        for (depth, name, duration) in self.entries() {
            output.push_str(&format!(
                "{}{}  {:.3}ms\n",
                "  ".repeat(depth),
                name,
                duration.as_secs_f64() * 1000.0
            ));
        }

        output
    }

    fn depth(&self, idx: usize) -> usize {
        let mut depth = 0;
        let mut cursor = self.phases[idx].parent;
        while let Some(parent) = cursor {
            depth += 1;
            cursor = self.phases[parent].parent;
        }
        depth
    }
}

thread_local! {
    static PHASE_TRACKER: std::cell::RefCell<PhaseTracker> = std::cell::RefCell::new(PhaseTracker::new());
}

pub fn begin_phase(name: impl Into<String>) {
    PHASE_TRACKER.with(|t| t.borrow_mut().begin(name));
}

pub fn end_phase() {
    PHASE_TRACKER.with(|t| t.borrow_mut().end());
}

pub fn get_report() -> String {
    PHASE_TRACKER.with(|t| t.borrow().report())
}

pub fn reset() {
    PHASE_TRACKER.with(|t| *t.borrow_mut() = PhaseTracker::new());
}

#[macro_export]
macro_rules! db_phase {
    ($name:expr, $body:block) => {{
        $crate::debugger::phases::begin_phase($name);
        let result = $body;
        $crate::debugger::phases::end_phase();
        result
    }};
}
