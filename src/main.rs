use anyhow::Result;
use assistant_voice::store::KEY_LANGUAGE_TAG;
use assistant_voice::{Config, SessionStore, WidgetSettings};
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "assistant-voice")]
#[command(about = "Voice wiring for the digital assistant chat widget")]
struct Args {
    /// Path to the configuration file (without extension)
    #[arg(short, long, default_value = "config/assistant-voice")]
    config: String,

    /// Override the session language tag (e.g. pt_BR, es, en)
    #[arg(short, long)]
    locale: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("Assistant Voice v0.1.0");
    info!("Loaded config: {}", cfg.service.name);
    info!(
        "Widget endpoint: {} (channel {})",
        cfg.sdk.uri, cfg.sdk.channel_id
    );

    let mut store = SessionStore::new();
    if let Some(locale) = args.locale {
        store.insert(KEY_LANGUAGE_TAG, locale);
    }

    let settings = WidgetSettings::for_store(&cfg.sdk, &store);
    info!(
        "Speech locale: {} ({} voice preferences)",
        settings.speech_locale,
        settings.skill_voices.len()
    );

    // Dump the assembled settings payload for inspection.
    println!("{}", serde_json::to_string_pretty(&settings)?);

    Ok(())
}
