use std::sync::OnceLock;

use regex::Regex;

use crate::model::{TabItem, WindowStructure};

/// One piece of a field value: literal text, or an unresolved inline
/// `[mockup:<id>]` cross-reference token.
///
/// The parser never resolves the token; callers decide what a mockup id
/// means (a file stem, a database key, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum ValueSegment {
    Text(String),
    MockupRef { id: String },
}

// Format: [mockup:123] where 123 is the mockup id
fn mockup_link_regex() -> &'static Regex {
    static MOCKUP_LINK_REGEX: OnceLock<Regex> = OnceLock::new();
    MOCKUP_LINK_REGEX
        .get_or_init(|| Regex::new(r"\[mockup:([A-Za-z0-9_-]+)\]").expect("Invalid mockup regex"))
}

/// Splits a field value into literal text and cross-reference segments.
///
/// Text between tokens is emitted verbatim; an input without tokens yields
/// a single `Text` segment (or nothing for the empty string).
pub fn split_segments(text: &str) -> Vec<ValueSegment> {
    let regex = mockup_link_regex();
    let mut segments = vec![];
    let mut tail_start = 0;

    for captures in regex.captures_iter(text) {
        if let (Some(whole), Some(id)) = (captures.get(0), captures.get(1)) {
            if whole.start() > tail_start {
                segments.push(ValueSegment::Text(text[tail_start..whole.start()].to_string()));
            }
            segments.push(ValueSegment::MockupRef {
                id: id.as_str().to_string(),
            });
            tail_start = whole.end();
        }
    }

    if tail_start < text.len() {
        segments.push(ValueSegment::Text(text[tail_start..].to_string()));
    }
    segments
}

/// Collects every mockup id referenced from the materialized cells of a
/// structure, in encounter order, deduplicated.
pub fn referenced_ids(structure: &WindowStructure) -> Vec<String> {
    let mut ids = vec![];
    for tab in &structure.tabs {
        collect_tab_refs(tab, &mut ids);
    }
    ids
}

fn collect_tab_refs(tab: &TabItem, ids: &mut Vec<String>) {
    if let Some(content) = &tab.content {
        for row in &content.rows {
            for cell in row {
                for segment in split_segments(cell) {
                    if let ValueSegment::MockupRef { id } = segment
                        && !ids.contains(&id)
                    {
                        ids.push(id);
                    }
                }
            }
        }
    }
    for child in &tab.children {
        collect_tab_refs(child, ids);
    }
}
