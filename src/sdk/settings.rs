use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::SdkConfig;
use crate::speech::{speech_locale, voices_for, VoicePreference};
use crate::store::SessionStore;

/// Localized UI string tables keyed by language tag
///
/// The string content itself is supplied by the host; this crate only
/// routes the table into the settings payload.
pub type I18nTable = HashMap<String, HashMap<String, String>>;

/// Widget theme colors
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub branding: String,
    pub text: String,
    pub text_light: String,
    pub typing_indicator: String,
    pub bot_text: String,
    pub bot_message_background: String,
    pub actions_background: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            branding: "white".to_string(),
            text: "#292929".to_string(),
            text_light: "#737373".to_string(),
            typing_indicator: "#D47229".to_string(),
            bot_text: "white".to_string(),
            bot_message_background: "#D47229".to_string(),
            actions_background: "#232323".to_string(),
        }
    }
}

/// User identity fields forwarded to the assistant service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_int: Option<String>,
}

/// Wrapper matching the SDK's `initUserProfile: { profile: ... }` shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InitUserProfile {
    pub profile: UserProfile,
}

/// Delivery options for the initial hidden message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitMessageOptions {
    /// When the hidden message is sent ("expand" defers it to first open)
    pub send_at: String,
}

impl Default for InitMessageOptions {
    fn default() -> Self {
        Self {
            send_at: "expand".to_string(),
        }
    }
}

/// The settings record handed to the chat SDK
///
/// Other than the endpoint URI all fields are optional to the SDK, with one
/// exception per auth mode: client-auth-disabled requires `channelId`,
/// client-auth-enabled requires `clientAuthEnabled: true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSettings {
    #[serde(rename = "URI")]
    pub uri: String,
    pub channel_id: String,
    pub client_auth_enabled: bool,
    pub init_user_hidden_message: String,
    pub init_message_options: InitMessageOptions,
    pub display_actions_as_pills: bool,
    pub enable_attachment: bool,
    pub share_location: bool,
    pub enable_autocomplete: bool,
    pub enable_autocomplete_client_cache: bool,
    pub enable_clear_message: bool,
    pub enable_timestamp: bool,
    pub show_connection_status: bool,
    pub embedded_video: bool,
    pub locale: String,
    pub enable_bot_audio_response: bool,
    pub enable_speech: bool,
    pub speech_locale: String,
    pub enable_secure_connection: bool,
    pub init_bot_audio_muted: bool,
    pub open_chat_on_load: bool,
    pub skill_voices: Vec<VoicePreference>,
    pub conversation_begin_position: String,
    pub font: String,
    pub colors: ThemeColors,
    pub init_user_profile: InitUserProfile,
    pub i18n: I18nTable,
}

impl WidgetSettings {
    /// Assemble the settings payload for the locale and user profile held in
    /// the session store
    pub fn for_store(sdk: &SdkConfig, store: &SessionStore) -> Self {
        let language_tag = store.language_tag();
        let locale = speech_locale(language_tag);

        Self {
            uri: sdk.uri.clone(),
            channel_id: sdk.channel_id.clone(),
            client_auth_enabled: sdk.client_auth_enabled,
            init_user_hidden_message: sdk.init_user_hidden_message.clone(),
            init_message_options: InitMessageOptions::default(),
            display_actions_as_pills: false,
            enable_attachment: true,
            share_location: false,
            enable_autocomplete: true,
            enable_autocomplete_client_cache: true,
            enable_clear_message: false,
            enable_timestamp: true,
            show_connection_status: true,
            embedded_video: true,
            locale: locale.to_string(),
            enable_bot_audio_response: true,
            enable_speech: true,
            speech_locale: locale.to_string(),
            enable_secure_connection: true,
            init_bot_audio_muted: true,
            open_chat_on_load: true,
            skill_voices: voices_for(language_tag),
            conversation_begin_position: "bottom".to_string(),
            font: "14px \"Mier B\", -apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, \
                   Helvetica, Arial, sans-serif, \"Apple Color Emoji\", \"Segoe UI Emoji\", \
                   \"Segoe UI Symbol\""
                .to_string(),
            colors: ThemeColors::default(),
            init_user_profile: InitUserProfile {
                profile: store.user_profile(),
            },
            i18n: I18nTable::new(),
        }
    }

    /// Attach host-supplied localized string tables
    pub fn with_i18n(mut self, i18n: I18nTable) -> Self {
        self.i18n = i18n;
        self
    }
}
