//! Invitation texts, keyed by a language tag.

use serde::{Deserialize, Serialize};

/// Language of the invitation message. Unknown tags fall back to English.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    #[default]
    En,
    De,
}

impl Language {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "de" => Language::De,
            _ => Language::En,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
        }
    }
}

impl From<String> for Language {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.tag().to_string()
    }
}

/// Render the message posted into a freshly opened pair conversation.
pub fn render_invitation(language: Language, first: &str, second: &str) -> String {
    match language {
        Language::De => format!(
            "{first} und {second}, ihr wurdet für einen gemeinsamen Kaffeeklatsch ausgelost.\n\
             Bitte sucht euch für diese Woche einen Zeitslot von 15-20 Minuten.\n\n\
             Euer Kaffeebot ☕"
        ),
        Language::En => format!(
            "{first} and {second}, you were selected for a shared coffee break.\n\
             Please schedule a meeting of 15-20 minutes this week.\n\n\
             Your coffee bot ☕"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EN: &str = "Name1 and Name2, you were selected for a shared coffee break.\n\
                      Please schedule a meeting of 15-20 minutes this week.\n\n\
                      Your coffee bot ☕";
    const DE: &str = "Name1 und Name2, ihr wurdet für einen gemeinsamen Kaffeeklatsch ausgelost.\n\
                      Bitte sucht euch für diese Woche einen Zeitslot von 15-20 Minuten.\n\n\
                      Euer Kaffeebot ☕";

    #[rstest]
    #[case::english("en", EN)]
    #[case::german("de", DE)]
    #[case::german_upper("DE", DE)]
    #[case::unknown("not_defined_language", EN)]
    #[case::empty("", EN)]
    fn invitation_text(#[case] tag: &str, #[case] expected: &str) {
        let message = render_invitation(Language::from_tag(tag), "Name1", "Name2");
        assert_eq!(message, expected);
    }

    #[test]
    fn language_deserializes_from_tag() {
        let language: Language = serde_json::from_str("\"de\"").unwrap();
        assert_eq!(language, Language::De);
        let language: Language = serde_json::from_str("\"fr\"").unwrap();
        assert_eq!(language, Language::En);
    }
}
