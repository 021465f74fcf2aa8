pub mod client;
pub mod events;
pub mod settings;

pub use client::{wait_until_ready, ChatSdk, RetryPolicy};
pub use events::{BotMessageEvent, MessagePayload, MessageSource, WidgetEvent};
pub use settings::{
    I18nTable, InitMessageOptions, InitUserProfile, ThemeColors, UserProfile, WidgetSettings,
};
