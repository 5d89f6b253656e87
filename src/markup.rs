//! Textual normalization applied while turning raw segments into card fields.
//!
//! All functions are pure string transforms; the presentation stylesheet
//! defines what the `secondary` class looks like.

/// Keywords opening a secondary clause inside a translation list.
const SECONDARY_KEYWORDS: [&str; 3] = ["Also", "Example", "Info"];

/// Delimiter between the two halves of an example sentence pair.
pub const PAIR_DELIMITER: &str = " | ";

/// Convert literal newlines to line-break markup.
pub fn line_breaks(text: &str) -> String {
    text.replace('\n', "<br/>")
}

fn is_secondary(line: &str) -> bool {
    SECONDARY_KEYWORDS
        .iter()
        .any(|keyword| line.starts_with(keyword))
}

/// Wrap a newline-separated translation list as an ordered list.
///
/// Lines opening with a secondary keyword render with the `secondary` class
/// so supplementary clauses are visually distinguished from senses.
pub fn translation_list(text: &str) -> String {
    let mut out = String::from("<ol>");
    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if is_secondary(line) {
            out.push_str(&format!("<li class=\"secondary\">{line}</li>"));
        } else {
            out.push_str(&format!("<li>{line}</li>"));
        }
    }
    out.push_str("</ol>");
    out
}

/// Wrap newline-separated example pairs as an unordered list.
///
/// Each line holds a source and target half separated by [`PAIR_DELIMITER`];
/// the target half renders with the `secondary` class. Lines without the
/// delimiter pass through as plain items.
pub fn example_list(text: &str) -> String {
    let mut out = String::from("<ul>");
    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        match line.split_once(PAIR_DELIMITER) {
            Some((source, target)) => out.push_str(&format!(
                "<li>{source}<span class=\"secondary\">{PAIR_DELIMITER}{target}</span></li>"
            )),
            None => out.push_str(&format!("<li>{line}</li>")),
        }
    }
    out.push_str("</ul>");
    out
}

/// Media-reference markup for a pronunciation asset.
pub fn sound_reference(name: &str) -> String {
    format!("[sound:{name}.mp3]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newlines_become_breaks() {
        assert_eq!(line_breaks("a\nb\nc"), "a<br/>b<br/>c");
    }

    #[test]
    fn translation_secondary_clause_is_distinguished() {
        assert_eq!(
            translation_list("meaning one\nAlso used as noun"),
            "<ol><li>meaning one</li><li class=\"secondary\">Also used as noun</li></ol>"
        );
    }

    #[test]
    fn translation_list_skips_blank_lines() {
        assert_eq!(
            translation_list("one\n\ntwo"),
            "<ol><li>one</li><li>two</li></ol>"
        );
    }

    #[test]
    fn example_pairs_split_on_delimiter() {
        assert_eq!(
            example_list("Это дом. | This is a house."),
            "<ul><li>Это дом.<span class=\"secondary\"> | This is a house.</span></li></ul>"
        );
    }

    #[test]
    fn example_without_delimiter_is_plain() {
        assert_eq!(example_list("no pair here"), "<ul><li>no pair here</li></ul>");
    }

    #[test]
    fn sound_reference_names_the_asset() {
        assert_eq!(sound_reference("сло́во"), "[sound:сло́во.mp3]");
    }
}
