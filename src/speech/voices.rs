use serde::{Deserialize, Serialize};

/// A voice the speech engine should prefer for a given language
///
/// Entries are ordered by preference; an entry without a name accepts any
/// voice for that language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoicePreference {
    pub lang: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl VoicePreference {
    fn new(lang: &str, name: Option<&str>) -> Self {
        Self {
            lang: lang.to_string(),
            name: name.map(str::to_string),
        }
    }
}

/// Map a session language tag to the speech engine locale
pub fn speech_locale(language_tag: &str) -> &'static str {
    match language_tag {
        "pt_BR" => "pt-br",
        "es" => "es-es",
        _ => "en-us",
    }
}

/// Voice preference table for a session language tag
pub fn voices_for(language_tag: &str) -> Vec<VoicePreference> {
    match language_tag {
        "pt_BR" => vec![
            VoicePreference::new("pt-br", Some("Google português do Brasil")),
            VoicePreference::new("pt-br", Some("Luciana")),
            VoicePreference::new("pt-pt", Some("Joana")),
            VoicePreference::new("pt-br", None),
        ],
        "es" => vec![VoicePreference::new("es-es", None)],
        _ => vec![
            VoicePreference::new("en-us", Some("Samantha")),
            VoicePreference::new("en-us", Some("Alex")),
            VoicePreference::new("en-us", None),
        ],
    }
}
