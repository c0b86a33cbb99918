//! Built-in sample datasets.

mod books;

use crate::common::record::Record;

/// A record set plus the index definition to build over it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub name: &'static str,
    pub description: &'static str,
    pub key_columns: Vec<String>,
    /// Shown on leaves next to the key; never affects tree shape.
    pub include_columns: Vec<String>,
    pub records: Vec<Record>,
}

pub fn names() -> &'static [&'static str] {
    &["publisher", "pages", "pages-title", "id-title"]
}

pub fn load(name: &str) -> Option<Dataset> {
    let dataset = match name {
        "publisher" => Dataset {
            name: "publisher",
            description: "books keyed by publisher id, with duplicate publishers",
            key_columns: columns(&["publisher"]),
            include_columns: Vec::new(),
            records: books::by_publisher(),
        },
        "pages" => Dataset {
            name: "pages",
            description: "page counts only, with repeated values",
            key_columns: columns(&["pages"]),
            include_columns: Vec::new(),
            records: books::page_counts(),
        },
        "pages-title" => Dataset {
            name: "pages-title",
            description: "composite key on (pages, title)",
            key_columns: columns(&["pages", "title"]),
            include_columns: Vec::new(),
            records: books::pages_and_titles(),
        },
        "id-title" => Dataset {
            name: "id-title",
            description: "unique ids with the title as an included column",
            key_columns: columns(&["id"]),
            include_columns: columns(&["title"]),
            records: books::ids_and_titles(),
        },
        _ => return None,
    };

    Some(dataset)
}

fn columns(list: &[&str]) -> Vec<String> {
    list.iter().map(|c| c.to_string()).collect()
}
