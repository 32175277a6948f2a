pub mod mockup_file;
pub mod window;

pub use mockup_file::MockupFile;
pub use window::{
    Button, CellRef, DesignNote, NoteId, NoteKind, TabContent, TabItem, WindowStructure,
};
