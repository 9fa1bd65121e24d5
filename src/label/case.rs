//! Display-case transforms for label text.

use serde::{Deserialize, Serialize};

/// How a text field's value is cased when printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextCase {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

/// Apply a case transform to `text`.
///
/// `Capitalize` splits on single spaces and rejoins with single spaces, so
/// runs of spaces are not preserved and punctuation-led tokens keep their
/// first character as-is (e.g. `"(ana"` stays `"(ana"`).
pub fn apply_text_case(text: &str, mode: TextCase) -> String {
    match mode {
        TextCase::None => text.to_string(),
        TextCase::Uppercase => text.to_uppercase(),
        TextCase::Lowercase => text.to_lowercase(),
        TextCase::Capitalize => text
            .split(' ')
            .filter(|word| !word.is_empty())
            .map(capitalize_word)
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_accented_name() {
        assert_eq!(apply_text_case("juan pérez", TextCase::Capitalize), "Juan Pérez");
    }

    #[test]
    fn test_capitalize_lowers_the_rest() {
        assert_eq!(apply_text_case("ANA GÓMEZ", TextCase::Capitalize), "Ana Gómez");
    }

    #[test]
    fn test_capitalize_collapses_space_runs() {
        assert_eq!(apply_text_case("ana   gómez", TextCase::Capitalize), "Ana Gómez");
    }

    #[test]
    fn test_none_is_identity() {
        assert_eq!(apply_text_case("MiXeD  Case", TextCase::None), "MiXeD  Case");
    }

    #[test]
    fn test_upper_and_lower() {
        assert_eq!(apply_text_case("Ñandú", TextCase::Uppercase), "ÑANDÚ");
        assert_eq!(apply_text_case("Ñandú", TextCase::Lowercase), "ñandú");
    }

    #[test]
    fn test_idempotent_modes() {
        let samples = ["", "juan pérez", "ACME S.A.", "  spaced  out ", "straße"];
        for mode in [TextCase::None, TextCase::Uppercase, TextCase::Lowercase] {
            for text in samples {
                let once = apply_text_case(text, mode);
                assert_eq!(apply_text_case(&once, mode), once, "{:?} on {:?}", mode, text);
            }
        }
    }

    #[test]
    fn test_capitalize_idempotent_on_single_spaced_input() {
        let once = apply_text_case("maría del carmen", TextCase::Capitalize);
        assert_eq!(apply_text_case(&once, TextCase::Capitalize), once);
    }

    #[test]
    fn test_serde_names() {
        let mode: TextCase = serde_json::from_str("\"capitalize\"").unwrap();
        assert_eq!(mode, TextCase::Capitalize);
        assert_eq!(serde_json::to_string(&TextCase::Uppercase).unwrap(), "\"uppercase\"");
    }
}
