pub mod builder;
pub mod buttons;
pub mod classify;
pub mod crossref;
pub mod records;
pub mod snapshot;

use crate::model::WindowStructure;

use builder::StructureBuilder;
use classify::MarkupLineClassifier;

/// The only caller-visible parse failure: input that is structurally
/// unusable. Everything else degrades permissively (unrecognized lines are
/// skipped).
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("markup has no content")]
    Empty,
    #[error("markup must start with a window title line (`# Window Title`)")]
    MissingTitle,
}

/// Parses window-mockup markup into a [`WindowStructure`] tree.
///
/// Single linear scan over the non-blank lines: the first line must be a
/// level-0 title (`# ...`, optionally trailed by `[Button]` declarations);
/// every following line is classified independently and fed to the stateful
/// [`StructureBuilder`], which materializes record grids on finish.
pub fn parse(markup: &str) -> Result<WindowStructure, FormatError> {
    let mut lines = markup.lines().filter(|line| !line.trim().is_empty());

    let title_line = lines.next().ok_or(FormatError::Empty)?;
    let title_text = title_line
        .strip_prefix("# ")
        .ok_or(FormatError::MissingTitle)?;
    let (title, global_buttons) = buttons::extract_title_and_buttons(title_text.trim());

    let classifier = MarkupLineClassifier;
    let mut builder = StructureBuilder::new(title, global_buttons);
    for line in lines {
        builder.push(&classifier.classify(line));
    }

    Ok(builder.finish())
}
