use std::collections::HashMap;

use crate::sdk::settings::UserProfile;

/// Session store keys populated by the host
pub const KEY_LANGUAGE_TAG: &str = "languageTag";
pub const KEY_GIVEN_NAME: &str = "givenName";
pub const KEY_SURNAME: &str = "surname";
pub const KEY_EMAIL: &str = "email";
pub const KEY_PASS_INT: &str = "passInt";

/// Process-wide key-value session state
///
/// Externally populated and read-only from this crate's perspective: the
/// locale and user-profile fields it holds only select which speech locale,
/// voice table and profile go into the widget settings.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    values: HashMap<String, String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The session language tag, defaulting to English
    pub fn language_tag(&self) -> &str {
        self.get(KEY_LANGUAGE_TAG).unwrap_or("en")
    }

    pub fn user_profile(&self) -> UserProfile {
        UserProfile {
            given_name: self.get(KEY_GIVEN_NAME).map(str::to_string),
            surname: self.get(KEY_SURNAME).map(str::to_string),
            email: self.get(KEY_EMAIL).map(str::to_string),
            language_tag: self.get(KEY_LANGUAGE_TAG).map(str::to_string),
            pass_int: self.get(KEY_PASS_INT).map(str::to_string),
        }
    }
}
