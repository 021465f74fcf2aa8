use anyhow::Result;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::debug;

use super::events::WidgetEvent;
use super::settings::WidgetSettings;

/// The opaque chat-widget SDK boundary
///
/// Everything conversational lives behind this seam: chat transport, state,
/// NLP, authentication. The crate only configures the widget, subscribes to
/// its events and drives its imperative operations.
#[async_trait::async_trait]
pub trait ChatSdk: Send + Sync {
    /// Whether the widget runtime has finished loading
    fn is_ready(&self) -> bool;

    /// Hand the widget its settings record
    async fn configure(&self, settings: WidgetSettings) -> Result<()>;

    /// Connect to the assistant service
    async fn connect(&self) -> Result<()>;

    /// Expand the chat widget
    async fn open_chat(&self) -> Result<()>;

    /// Resize the widget (CSS dimension strings, e.g. "100vw")
    fn set_size(&self, width: &str, height: &str);

    /// Subscribe to widget events. Dropping the receiver unsubscribes.
    fn subscribe(&self) -> broadcast::Receiver<WidgetEvent>;
}

/// Bounded readiness retry with exponential backoff
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(4),
        }
    }
}

/// Wait until the widget runtime reports ready
///
/// Probes `is_ready` up to `max_attempts` times, doubling the delay between
/// probes up to `max_delay`. Errors once the attempt budget is exhausted
/// instead of silently retrying forever.
pub async fn wait_until_ready(sdk: &dyn ChatSdk, policy: &RetryPolicy) -> Result<()> {
    let mut delay = policy.initial_delay;

    for attempt in 1..=policy.max_attempts {
        if sdk.is_ready() {
            debug!("Widget runtime ready after {} attempt(s)", attempt);
            return Ok(());
        }

        if attempt < policy.max_attempts {
            debug!(
                "Widget runtime not ready (attempt {}/{}), retrying in {:?}",
                attempt, policy.max_attempts, delay
            );
            tokio::time::sleep(delay).await;
            delay = (delay * 2).min(policy.max_delay);
        }
    }

    anyhow::bail!(
        "widget runtime not ready after {} attempts",
        policy.max_attempts
    )
}
