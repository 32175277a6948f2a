use crate::model::NoteKind;

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of parsing: each line is classified independently,
/// without reference to the open tab or record state. Whether a button or
/// field line actually takes effect is the builder's decision.
#[derive(Debug, Clone, PartialEq)]
pub enum LineClass {
    /// `> [!NOTE]` / `> [!TIP]` / `> [!WARNING]` annotation line.
    Annotation { kind: NoteKind, text: String },
    /// Heading line; `level` is the leading hash count minus one, so `##`
    /// opens a level-1 (top) tab.
    Heading { level: usize, rest: String },
    /// A line that is nothing but one bracketed label.
    BareButton { label: String },
    /// `- name: value` bullet field line, split on the first colon.
    Field { name: String, value: String },
    /// Anything else; skipped by the builder.
    Other,
}

/// Annotation markers, checked before any other line shape.
const NOTE_MARKERS: [(&str, NoteKind); 3] = [
    ("> [!NOTE]", NoteKind::Note),
    ("> [!TIP]", NoteKind::Tip),
    ("> [!WARNING]", NoteKind::Warning),
];

/// Classifies individual lines of mockup markup.
pub struct MarkupLineClassifier;

impl MarkupLineClassifier {
    /// Classifies a line into a [`LineClass`], in the markup's priority
    /// order: annotation, heading, bare button, bullet field.
    pub fn classify(&self, line: &str) -> LineClass {
        for (marker, kind) in NOTE_MARKERS {
            if let Some(rest) = line.strip_prefix(marker) {
                return LineClass::Annotation {
                    kind,
                    text: rest.trim().to_string(),
                };
            }
        }

        if line.starts_with('#') {
            let hashes = line.chars().take_while(|&c| c == '#').count();
            return LineClass::Heading {
                level: hashes - 1,
                rest: line[hashes..].trim().to_string(),
            };
        }

        let trimmed = line.trim();
        if trimmed.len() > 2 && trimmed.starts_with('[') && trimmed.ends_with(']') {
            return LineClass::BareButton {
                label: trimmed[1..trimmed.len() - 1].to_string(),
            };
        }

        if let Some(rest) = line.strip_prefix("- ") {
            return match rest.trim().split_once(':') {
                Some((name, value)) => LineClass::Field {
                    name: name.trim().to_string(),
                    value: value.trim().to_string(),
                },
                None => LineClass::Other,
            };
        }

        LineClass::Other
    }
}
