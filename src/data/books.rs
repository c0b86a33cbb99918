use maplit::hashmap;

use crate::common::{record::Record, value::Value};

const TITLES: [&str; 21] = [
    "The Great Gatsby",
    "Of Mice and Men",
    "Animal Farm",
    "To Kill a Mockingbird",
    "Pride and Prejudice",
    "Jane Eyre",
    "War and Peace",
    "The Old Man and the Sea",
    "Wuthering Heights",
    "Crime and Punishment",
    "The Catcher in the Rye",
    "Lord of the Flies",
    "The Pearl",
    "One Hundred Years of Solitude",
    "Brave New World",
    "Fahrenheit 451",
    "The Outsiders",
    "1984",
    "The Scarlet Letter",
    "Moby Dick",
    "Great Expectations",
];

const PUBLISHERS: [i64; 21] = [
    4, 8, 8, 9, 9, 9, 13, 16, 16, 20, 21, 21, 21, 25, 34, 35, 36, 37, 37, 46, 46,
];

const PAGES: [i64; 21] = [
    100, 150, 235, 342, 478, 521, 689, 127, 394, 612, 285, 456, 173, 598, 334, 267, 150, 235, 342,
    478, 521,
];

/// Shortens long titles so leaf tuples stay narrow.
fn abbreviate(title: &str, keep: usize) -> String {
    if title.chars().count() > 10 {
        let head: String = title.chars().take(keep).collect();
        format!("{head}...")
    } else {
        title.to_string()
    }
}

pub fn by_publisher() -> Vec<Record> {
    PUBLISHERS
        .iter()
        .zip(TITLES)
        .map(|(publisher, title)| {
            hashmap! {
                String::from("publisher") => Value::Int64(*publisher),
                String::from("title") => Value::String(abbreviate(title, 13)),
            }
        })
        .collect()
}

pub fn page_counts() -> Vec<Record> {
    PAGES
        .iter()
        .map(|pages| hashmap! { String::from("pages") => Value::Int64(*pages) })
        .collect()
}

pub fn pages_and_titles() -> Vec<Record> {
    PAGES
        .iter()
        .zip(TITLES)
        .map(|(pages, title)| {
            hashmap! {
                String::from("pages") => Value::Int64(*pages),
                String::from("title") => Value::String(abbreviate(title, 15)),
            }
        })
        .collect()
}

pub fn ids_and_titles() -> Vec<Record> {
    TITLES
        .iter()
        .zip(1..)
        .map(|(title, id)| {
            hashmap! {
                String::from("id") => Value::Int64(id),
                String::from("title") => Value::String(abbreviate(title, 13)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_titles_are_abbreviated() {
        assert_eq!(abbreviate("Jane Eyre", 13), "Jane Eyre");
        assert_eq!(abbreviate("The Great Gatsby", 13), "The Great Gat...");
    }

    #[test]
    fn publishers_repeat() {
        let rows = by_publisher();
        let nines = rows
            .iter()
            .filter(|r| r.get("publisher") == Some(&Value::Int64(9)))
            .count();
        assert_eq!(nines, 3);
    }
}
