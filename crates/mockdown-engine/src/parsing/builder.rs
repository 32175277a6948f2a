use std::collections::HashMap;

use crate::model::{Button, CellRef, DesignNote, NoteKind, TabContent, TabItem, WindowStructure};

use super::{
    buttons,
    classify::LineClass,
    records::{self, ID_FIELD, RecordTable},
};

/// Annotation slot state: an annotation line holds here until the next
/// field line consumes it into a cell note, or a heading discards it.
#[derive(Debug, Clone)]
enum PendingNote {
    Idle,
    Pending { kind: NoteKind, text: String },
}

/// Scratch tab in the arena. Indices stand in for the parent links the
/// finished tree cannot share while under construction.
#[derive(Debug)]
struct TabNode {
    title: String,
    level: usize,
    buttons: Vec<Button>,
    notes: Vec<DesignNote>,
    /// Field names in first-seen order, excluding "ID".
    headers: Vec<String>,
    children: Vec<usize>,
}

/// Phase 2 of parsing: consumes classified lines and assembles the window
/// tree, then pivots the accumulated record tables into grids on finish.
///
/// Only the single most recent tab at each heading level is remembered, so
/// a new tab at level L always attaches to the last tab seen at level L-1.
pub struct StructureBuilder {
    title: String,
    global_buttons: Vec<Button>,
    global_notes: Vec<DesignNote>,
    nodes: Vec<TabNode>,
    /// Indices of level-1 tabs, in declaration order.
    roots: Vec<usize>,
    last_at_level: HashMap<usize, usize>,
    current: Option<usize>,
    /// Record tables keyed by normalized tab id; same-titled tabs share
    /// (and reset) one table.
    records: HashMap<String, RecordTable>,
    pending: PendingNote,
    last_field: Option<String>,
}

impl StructureBuilder {
    pub fn new(title: String, global_buttons: Vec<Button>) -> Self {
        Self {
            title,
            global_buttons,
            global_notes: vec![],
            nodes: vec![],
            roots: vec![],
            last_at_level: HashMap::new(),
            current: None,
            records: HashMap::new(),
            pending: PendingNote::Idle,
            last_field: None,
        }
    }

    pub fn push(&mut self, line: &LineClass) {
        match line {
            LineClass::Annotation { kind, text } => self.push_annotation(*kind, text),
            LineClass::Heading { level, rest } => self.open_tab(*level, rest),
            LineClass::BareButton { label } => self.push_button(label),
            LineClass::Field { name, value } => self.push_field(name, value),
            LineClass::Other => {}
        }
    }

    pub fn finish(self) -> WindowStructure {
        let mut slots: Vec<Option<TabNode>> = self.nodes.into_iter().map(Some).collect();
        let mut tabs: Vec<TabItem> = self
            .roots
            .iter()
            .map(|&index| take_tab(&mut slots, index))
            .collect();

        // Grids materialize for top-level tabs and their direct children
        // only; deeper tabs keep their scan headers with no rows.
        for tab in &mut tabs {
            attach_grid(tab, &self.records);
            for child in &mut tab.children {
                attach_grid(child, &self.records);
            }
        }

        WindowStructure {
            title: self.title,
            tabs,
            global_buttons: self.global_buttons,
            global_design_notes: self.global_notes,
        }
    }

    /// An annotation associates with the next field line when a field
    /// context is open; otherwise it attaches immediately to the current
    /// tab, or globally when no tab is open yet.
    fn push_annotation(&mut self, kind: NoteKind, text: &str) {
        if self.last_field.is_some() {
            self.pending = PendingNote::Pending {
                kind,
                text: text.to_string(),
            };
            return;
        }

        let note = DesignNote::tab_scoped(kind, text);
        match self.current {
            Some(tab) => self.nodes[tab].notes.push(note),
            None => self.global_notes.push(note),
        }
    }

    fn open_tab(&mut self, level: usize, rest: &str) {
        // Annotations and field context never cross a heading boundary.
        self.pending = PendingNote::Idle;
        self.last_field = None;

        let (title, tab_buttons) = buttons::extract_title_and_buttons(rest);
        let index = self.nodes.len();
        self.nodes.push(TabNode {
            title: title.clone(),
            level,
            buttons: tab_buttons,
            notes: vec![],
            headers: vec![],
            children: vec![],
        });

        if level == 1 {
            self.roots.push(index);
        } else if level > 1
            && let Some(&parent) = self.last_at_level.get(&(level - 1))
        {
            self.nodes[parent].children.push(index);
        }

        self.last_at_level.insert(level, index);
        self.current = Some(index);
        // A same-titled earlier tab loses its accumulated records here.
        self.records.insert(tab_id(&title), RecordTable::default());
    }

    fn push_button(&mut self, label: &str) {
        let Some(tab) = self.current else {
            return;
        };
        let context = self.nodes[tab].title.clone();
        self.nodes[tab].buttons.push(Button {
            label: label.to_string(),
            context: Some(context),
        });
    }

    fn push_field(&mut self, name: &str, value: &str) {
        let Some(tab) = self.current else {
            return;
        };

        if name != ID_FIELD && !self.nodes[tab].headers.iter().any(|h| h == name) {
            self.nodes[tab].headers.push(name.to_string());
        }

        let table = self
            .records
            .entry(tab_id(&self.nodes[tab].title))
            .or_default();
        let key = if name == ID_FIELD {
            let key = records::record_key(value);
            table.start_record(&key);
            key
        } else {
            table.active_key().to_string()
        };
        table.set_field(&key, name, value);
        let row = table.position(&key);

        let pending = std::mem::replace(&mut self.pending, PendingNote::Idle);
        if let PendingNote::Pending { kind, text } = pending {
            let column = self.nodes[tab].headers.iter().position(|h| h == name);
            // An "ID" field has no scan-header position; the note is dropped.
            if let (Some(row), Some(column)) = (row, column) {
                let cell = CellRef {
                    row,
                    column,
                    header: name.to_string(),
                };
                self.nodes[tab]
                    .notes
                    .push(DesignNote::cell_scoped(kind, text, cell));
            }
        }

        self.last_field = Some(name.to_string());
    }
}

/// Normalized record-table key for a tab title: whitespace runs collapse to
/// underscores, lower-cased.
fn tab_id(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

fn take_tab(slots: &mut [Option<TabNode>], index: usize) -> TabItem {
    let node = slots[index]
        .take()
        .expect("tab arena node visited more than once");
    let children = node
        .children
        .iter()
        .map(|&child| take_tab(slots, child))
        .collect();

    let content = if node.headers.is_empty() {
        None
    } else {
        Some(TabContent {
            headers: node.headers,
            rows: vec![],
        })
    };

    TabItem {
        title: node.title,
        level: node.level,
        children,
        content,
        buttons: node.buttons,
        design_notes: node.notes,
    }
}

/// Pivots a tab's record table into its grid: "ID" becomes the first
/// header and each record one row, in `ID`-line insertion order.
fn attach_grid(tab: &mut TabItem, records: &HashMap<String, RecordTable>) {
    let Some(table) = records.get(&tab_id(&tab.title)) else {
        return;
    };
    if table.is_empty() {
        return;
    }

    let mut headers = tab.content.take().unwrap_or_default().headers;
    if !headers.iter().any(|h| h == ID_FIELD) {
        headers.insert(0, ID_FIELD.to_string());
    }
    let rows = table.rows(&headers);
    tab.content = Some(TabContent { headers, rows });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_id_collapses_whitespace_runs() {
        assert_eq!(tab_id("Order  Entry Form"), "order_entry_form");
        assert_eq!(tab_id("Plain"), "plain");
    }

    #[test]
    fn sibling_branch_children_attach_to_the_latest_parent() {
        // Single-slot level tracking: after `## B`, a `### ...` heading
        // attaches to B even if A also had level-2 children earlier.
        let mut builder = StructureBuilder::new("Win".to_string(), vec![]);
        builder.push(&LineClass::Heading {
            level: 1,
            rest: "A".to_string(),
        });
        builder.push(&LineClass::Heading {
            level: 2,
            rest: "A1".to_string(),
        });
        builder.push(&LineClass::Heading {
            level: 1,
            rest: "B".to_string(),
        });
        builder.push(&LineClass::Heading {
            level: 2,
            rest: "B1".to_string(),
        });
        let structure = builder.finish();

        assert_eq!(structure.tabs[0].children.len(), 1);
        assert_eq!(structure.tabs[0].children[0].title, "A1");
        assert_eq!(structure.tabs[1].children.len(), 1);
        assert_eq!(structure.tabs[1].children[0].title, "B1");
    }

    #[test]
    fn deep_heading_without_parent_stays_out_of_the_tree() {
        let mut builder = StructureBuilder::new("Win".to_string(), vec![]);
        builder.push(&LineClass::Heading {
            level: 2,
            rest: "Orphan".to_string(),
        });
        builder.push(&LineClass::Heading {
            level: 1,
            rest: "Top".to_string(),
        });
        let structure = builder.finish();

        assert_eq!(structure.tabs.len(), 1);
        assert_eq!(structure.tabs[0].title, "Top");
        assert!(structure.tabs[0].children.is_empty());
    }

    #[test]
    fn orphaned_tab_can_still_parent_later_headings() {
        let mut builder = StructureBuilder::new("Win".to_string(), vec![]);
        builder.push(&LineClass::Heading {
            level: 2,
            rest: "Orphan".to_string(),
        });
        builder.push(&LineClass::Heading {
            level: 3,
            rest: "Nested".to_string(),
        });
        let structure = builder.finish();

        // Both hang off an unreachable node; neither shows in the tree.
        assert!(structure.tabs.is_empty());
    }
}
