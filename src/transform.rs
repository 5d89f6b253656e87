//! Slice transformers: raw record segments to ordered card fields.
//!
//! A transformer reorders and normalizes segments for one template pairing.
//! It must never pad or truncate to hide an arity mismatch; the encoder's
//! validation gate is the only judge of row length.

use crate::markup;

/// Marker recorded in the last field of every produced row.
pub const SCHEMA_MARKER: &str = "deckforge/1";

/// Placeholder for the operator-editable notes field.
const NOTES_PLACEHOLDER: &str = "";

/// One required method, selected once at startup per task.
pub trait SliceTransformer {
    fn transform(&self, segments: &[String]) -> Vec<String>;
}

/// Pass segments through untouched.
pub struct IdentityTransformer;

impl SliceTransformer for IdentityTransformer {
    fn transform(&self, segments: &[String]) -> Vec<String> {
        segments.to_vec()
    }
}

/// Transformer for web-sourced records.
///
/// Input order: word, pronunciation, overview, tags, translations, examples.
/// Derives a sound reference from the pronunciation segment and appends the
/// notes placeholder and schema marker. Short or long inputs flow through
/// with the wrong arity so the encoder can reject them.
pub struct WebTransformer;

impl SliceTransformer for WebTransformer {
    fn transform(&self, segments: &[String]) -> Vec<String> {
        let mut row = Vec::with_capacity(segments.len() + 2);
        for (position, segment) in segments.iter().enumerate() {
            match position {
                0 => row.push(segment.clone()),
                1 => row.push(format!("{}{}", segment, markup::sound_reference(segment))),
                2 | 3 => row.push(markup::line_breaks(segment)),
                4 => row.push(markup::translation_list(segment)),
                5 => row.push(markup::example_list(segment)),
                _ => row.push(segment.clone()),
            }
        }
        row.push(NOTES_PLACEHOLDER.to_string());
        row.push(SCHEMA_MARKER.to_string());
        row
    }
}

/// Transformer for generation-sourced records.
///
/// Input order: word, generated definition text.
pub struct GenerationTransformer;

impl SliceTransformer for GenerationTransformer {
    fn transform(&self, segments: &[String]) -> Vec<String> {
        let mut row = Vec::with_capacity(segments.len() + 3);
        for (position, segment) in segments.iter().enumerate() {
            match position {
                0 => {
                    row.push(segment.clone());
                    row.push(markup::sound_reference(segment));
                }
                1 => row.push(markup::line_breaks(segment)),
                _ => row.push(segment.clone()),
            }
        }
        row.push(NOTES_PLACEHOLDER.to_string());
        row.push(SCHEMA_MARKER.to_string());
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    #[test]
    fn web_transform_produces_eight_fields() {
        let row = WebTransformer.transform(&segments(&[
            "слово",
            "сло́во",
            "noun\nneuter",
            "top 100",
            "meaning one\nAlso used as noun",
            "Это дом. | This is a house.",
        ]));
        assert_eq!(
            row,
            vec![
                "слово".to_string(),
                "сло́во[sound:сло́во.mp3]".to_string(),
                "noun<br/>neuter".to_string(),
                "top 100".to_string(),
                "<ol><li>meaning one</li><li class=\"secondary\">Also used as noun</li></ol>"
                    .to_string(),
                "<ul><li>Это дом.<span class=\"secondary\"> | This is a house.</span></li></ul>"
                    .to_string(),
                String::new(),
                SCHEMA_MARKER.to_string(),
            ]
        );
    }

    #[test]
    fn generation_transform_produces_five_fields() {
        let row = GenerationTransformer.transform(&segments(&["word", "sense a\nsense b"]));
        assert_eq!(
            row,
            vec![
                "word".to_string(),
                "[sound:word.mp3]".to_string(),
                "sense a<br/>sense b".to_string(),
                String::new(),
                SCHEMA_MARKER.to_string(),
            ]
        );
    }

    #[test]
    fn short_input_keeps_the_mismatch_visible() {
        let row = WebTransformer.transform(&segments(&["word", "wɔːrd"]));
        // 2 inputs + 2 appended fields; still short of the 8-field template.
        assert_eq!(row.len(), 4);
    }

    #[test]
    fn long_input_keeps_the_mismatch_visible() {
        let row = WebTransformer.transform(&segments(&["a", "b", "c", "d", "e", "f", "g"]));
        assert_eq!(row.len(), 9);
    }

    #[test]
    fn identity_transform_is_untouched() {
        let input = segments(&["a", "b"]);
        assert_eq!(IdentityTransformer.transform(&input), input);
    }
}
