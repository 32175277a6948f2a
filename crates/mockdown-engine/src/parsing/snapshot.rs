use serde::Serialize;

use crate::model::{Button, DesignNote, TabItem, WindowStructure};

/// Serializable mirror of a parsed structure with the nondeterministic
/// note ids elided, for snapshot tests.
#[derive(Serialize)]
pub struct Snap {
    pub title: String,
    pub tabs: Vec<TabSnap>,
    pub global_buttons: Vec<ButtonSnap>,
    pub global_notes: Vec<NoteSnap>,
}

#[derive(Serialize)]
pub struct TabSnap {
    pub title: String,
    pub level: usize,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub buttons: Vec<ButtonSnap>,
    pub notes: Vec<NoteSnap>,
    pub children: Vec<TabSnap>,
}

#[derive(Serialize)]
pub struct ButtonSnap {
    pub label: String,
    pub context: Option<String>,
}

#[derive(Serialize)]
pub struct NoteSnap {
    pub kind: String,
    pub text: String,
    pub cell: Option<CellSnap>,
}

#[derive(Serialize)]
pub struct CellSnap {
    pub row: usize,
    pub column: usize,
    pub header: String,
}

pub fn normalize(structure: &WindowStructure) -> Snap {
    Snap {
        title: structure.title.clone(),
        tabs: structure.tabs.iter().map(tab_snap).collect(),
        global_buttons: structure.global_buttons.iter().map(button_snap).collect(),
        global_notes: structure
            .global_design_notes
            .iter()
            .map(note_snap)
            .collect(),
    }
}

fn tab_snap(tab: &TabItem) -> TabSnap {
    let (headers, rows) = match &tab.content {
        Some(content) => (content.headers.clone(), content.rows.clone()),
        None => (vec![], vec![]),
    };
    TabSnap {
        title: tab.title.clone(),
        level: tab.level,
        headers,
        rows,
        buttons: tab.buttons.iter().map(button_snap).collect(),
        notes: tab.design_notes.iter().map(note_snap).collect(),
        children: tab.children.iter().map(tab_snap).collect(),
    }
}

fn button_snap(button: &Button) -> ButtonSnap {
    ButtonSnap {
        label: button.label.clone(),
        context: button.context.clone(),
    }
}

fn note_snap(note: &DesignNote) -> NoteSnap {
    NoteSnap {
        kind: note.kind.label().to_lowercase(),
        text: note.text.clone(),
        cell: note.cell.as_ref().map(|cell| CellSnap {
            row: cell.row,
            column: cell.column,
            header: cell.header.clone(),
        }),
    }
}

/// Panics if a structure violates the parser's output invariants. Test
/// helper, called on every fixture before snapshotting.
pub fn invariants(structure: &WindowStructure) {
    for tab in &structure.tabs {
        tab_invariants(tab, 1);
    }
}

fn tab_invariants(tab: &TabItem, expected_level: usize) {
    assert_eq!(
        tab.level, expected_level,
        "tab {:?} level does not match its tree depth",
        tab.title
    );

    if let Some(content) = &tab.content {
        for (i, header) in content.headers.iter().enumerate() {
            assert!(
                !content.headers[i + 1..].contains(header),
                "duplicate header {header:?} in tab {:?}",
                tab.title
            );
        }
        if let Some(id_pos) = content.headers.iter().position(|h| h == "ID") {
            assert_eq!(id_pos, 0, "ID header not first in tab {:?}", tab.title);
        }
        for row in &content.rows {
            assert_eq!(
                row.len(),
                content.headers.len(),
                "ragged row in tab {:?}",
                tab.title
            );
        }
    }

    for note in &tab.design_notes {
        if let Some(cell) = &note.cell {
            let headers = tab
                .content
                .as_ref()
                .map(|content| content.headers.as_slice())
                .unwrap_or(&[]);
            assert!(
                headers.iter().any(|h| h == &cell.header),
                "cell note references unknown header {:?} in tab {:?}",
                cell.header,
                tab.title
            );
        }
    }

    for child in &tab.children {
        tab_invariants(child, expected_level + 1);
    }
}
