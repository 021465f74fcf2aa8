use serde::{Deserialize, Serialize};

/// Who a message event is attributed to (wire names: "BOT", "USER", "AGENT")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageSource {
    Bot,
    User,
    Agent,
}

/// Message content carried by a widget message event
///
/// Only `text` and `footerText` are consumed here; the SDK attaches more
/// fields we pass over.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<String>,
}

impl MessagePayload {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            footer_text: None,
        }
    }
}

/// An inbound notification from the chat SDK carrying message content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotMessageEvent {
    pub source: MessageSource,
    #[serde(default)]
    pub message_payload: MessagePayload,
}

impl BotMessageEvent {
    pub fn new(source: MessageSource, message_payload: MessagePayload) -> Self {
        Self {
            source,
            message_payload,
        }
    }
}

/// Events delivered on the widget subscription channel
#[derive(Debug, Clone)]
pub enum WidgetEvent {
    /// The widget was expanded by the user
    Opened,
    /// A conversation message arrived
    Message(BotMessageEvent),
}
