use std::sync::OnceLock;

use regex::Regex;

use crate::model::Button;

fn button_regex() -> &'static Regex {
    static BUTTON_REGEX: OnceLock<Regex> = OnceLock::new();
    BUTTON_REGEX.get_or_init(|| Regex::new(r"\[([^\]]+)\]").expect("Invalid button regex"))
}

/// Splits title text into the bare title and its `[Label]` button
/// declarations, in declaration order.
///
/// Works for both the window title line and tab headings; the buttons carry
/// no context at declaration time.
pub fn extract_title_and_buttons(text: &str) -> (String, Vec<Button>) {
    let regex = button_regex();

    let buttons = regex
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|label| Button {
            label: label.as_str().to_string(),
            context: None,
        })
        .collect();

    let title = regex.replace_all(text, "").trim().to_string();
    (title, buttons)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_without_buttons_passes_through() {
        let (title, buttons) = extract_title_and_buttons("Order Entry");
        assert_eq!(title, "Order Entry");
        assert!(buttons.is_empty());
    }

    #[test]
    fn trailing_buttons_are_stripped() {
        let (title, buttons) = extract_title_and_buttons("Orders [Save] [Delete]");
        assert_eq!(title, "Orders");
        let labels: Vec<_> = buttons.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Save", "Delete"]);
    }

    #[test]
    fn buttons_anywhere_in_the_text_are_collected() {
        let (title, buttons) = extract_title_and_buttons("[New] Orders [Close]");
        assert_eq!(title, "Orders");
        assert_eq!(buttons.len(), 2);
    }

    #[test]
    fn unclosed_bracket_stays_in_the_title() {
        let (title, buttons) = extract_title_and_buttons("Orders [Save");
        assert_eq!(title, "Orders [Save");
        assert!(buttons.is_empty());
    }
}
