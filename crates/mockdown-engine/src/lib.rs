pub mod io;
pub mod model;
pub mod parsing;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use model::{
    Button, CellRef, DesignNote, MockupFile, NoteId, NoteKind, TabContent, TabItem,
    WindowStructure,
};
pub use parsing::{FormatError, parse};
