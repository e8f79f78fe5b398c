use chatgate_core::{config, context::ContextStore, traits::Inference};
use chatgate_providers::gemini::GeminiProvider;
use chatgate_reply::ReplyPipeline;
use clap::{Parser, Subcommand};
use std::{path::Path, sync::Arc};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "chatgate",
    version,
    about = "Chat replies with a quality gate and current-events verification"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml", env = "CHATGATE_CONFIG")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Check configuration and provider availability.
    Status,
    /// Answer a one-shot message through the full reply pipeline.
    Ask {
        /// Channel whose context the reply uses.
        #[arg(long, default_value = "local")]
        channel: String,
        /// Who is asking.
        #[arg(long, default_value = "viewer")]
        author: String,
        /// Channel mood to include in the live context.
        #[arg(long)]
        vibe: Option<String>,
        /// Channel style profile for the reply tone.
        #[arg(long)]
        style: Option<String>,
        /// The message to send.
        #[arg(trailing_var_arg = true)]
        message: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Log level comes from the config; report the fallback once tracing is up.
    let config_found = Path::new(&cli.config).exists();
    let cfg = if config_found {
        config::load(&cli.config)?
    } else {
        config::fallback()
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.bot.log_level)),
        )
        .init();

    if !config_found {
        info!("config file not found at {}, using defaults", cli.config);
    }

    match cli.command {
        Commands::Status => {
            println!("{} status\n", cfg.bot.name);
            println!("Config: {}", cli.config);
            println!("Default provider: {}", cfg.provider.default);
            println!(
                "Reply: live_context={} grounding={} history_window={}",
                cfg.reply.live_context,
                cfg.reply.grounding,
                cfg.reply.history_window()
            );
            println!();

            match build_provider(&cfg) {
                Ok(provider) => {
                    let available = provider.is_available().await;
                    println!(
                        "  {}: {}",
                        provider.name(),
                        if available { "available" } else { "unreachable" }
                    );
                }
                Err(e) => println!("  {}: {e}", cfg.provider.default),
            }
        }
        Commands::Ask {
            channel,
            author,
            vibe,
            style,
            message,
        } => {
            if message.is_empty() {
                anyhow::bail!("no message provided. Usage: chatgate ask <message>");
            }

            let prompt = message.join(" ");
            let provider = build_provider(&cfg)?;
            if !provider.is_available().await {
                anyhow::bail!(
                    "provider '{}' is not available. Is the API key valid?",
                    provider.name()
                );
            }

            let store = ContextStore::new();
            if let Some(vibe) = vibe {
                store.set_vibe(&channel, &vibe);
            }
            if let Some(style) = style {
                store.set_style_profile(&channel, &style);
            }

            let snapshot = store.snapshot(&channel, chrono::Utc::now());
            let pipeline = ReplyPipeline::new(provider);
            info!("ask: {author} in {channel} via {}", pipeline.provider_name());

            let parts = pipeline
                .generate_reply(&prompt, &author, &snapshot, &cfg.reply)
                .await;

            for part in &parts {
                println!("{part}\n");
            }
            store.record_bot_reply(&channel, &parts.joined());
        }
    }

    Ok(())
}

/// Build the configured provider.
fn build_provider(cfg: &config::Config) -> anyhow::Result<Arc<dyn Inference>> {
    match cfg.provider.default.as_str() {
        "gemini" => {
            let gemini = cfg.provider.gemini.clone().unwrap_or_default();
            if !gemini.enabled {
                anyhow::bail!("gemini is the default provider but is disabled in config");
            }
            let api_key = if gemini.api_key.is_empty() {
                std::env::var("GEMINI_API_KEY").unwrap_or_default()
            } else {
                gemini.api_key
            };
            if api_key.is_empty() {
                anyhow::bail!(
                    "Gemini api_key is empty. Set it in config.toml or the GEMINI_API_KEY env var."
                );
            }
            Ok(Arc::new(GeminiProvider::from_config(api_key, gemini.model)))
        }
        other => anyhow::bail!("unsupported provider: {other}"),
    }
}
