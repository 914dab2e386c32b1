mod gateway;

use clap::{Parser, Subcommand};
use fitbot_channels::console::{self, ConsoleChannel};
use fitbot_core::{
    config::{self, shellexpand, Config},
    error::BotError,
    traits::Channel,
};
use fitbot_dialogue::{Engine, MenuTree};
use fitbot_sessions::SessionStore;
use gateway::{Gateway, SendThrottle};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "fitbot",
    version,
    about = "fitbot: menu-driven chat assistant for gyms"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot.
    Start,
    /// Print the effective configuration and enabled channels.
    Status,
    /// Validate the configured menu tree and print it as JSON.
    Menu,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;
    let _log_guard = init_logging(&cfg)?;

    match cli.command {
        Commands::Start => {
            let engine = Engine::new(build_menu(&cfg)?)?;

            let channels = build_channels(&cfg);
            if channels.is_empty() {
                anyhow::bail!("No channels enabled. Enable at least one channel in config.toml.");
            }

            let sessions =
                SessionStore::new(&cfg.bot.default_display_name, cfg.session.record_history);
            let outbox = SendThrottle::from_config(&cfg.delivery);

            info!("{} starting ({} menu)", cfg.bot.name, menu_source(&cfg));
            let gw = Gateway::new(engine, channels, sessions, outbox, cfg.session.clone());
            gw.run().await?;
        }
        Commands::Status => {
            println!("fitbot status\n");
            println!("Config:   {}", cli.config);
            println!("Business: {}", cfg.bot.name);
            println!("Menu:     {}", menu_source(&cfg));
            println!(
                "Sessions: expire after {}m idle, swept every {}m{}",
                cfg.session.inactivity_timeout_minutes,
                cfg.session.sweep_interval_minutes,
                if cfg.session.record_history {
                    ", history on"
                } else {
                    ""
                }
            );
            println!(
                "Delivery: {}ms between sends, {}ms send timeout",
                cfg.delivery.min_send_interval_ms, cfg.delivery.send_timeout_ms
            );
            println!();

            match cfg.channel.console {
                Some(ref c) if c.enabled => println!(
                    "  console: enabled (default sender {}, {} contact(s))",
                    c.default_sender,
                    c.contacts.len()
                ),
                Some(_) => println!("  console: disabled"),
                None => println!("  console: not configured"),
            }
        }
        Commands::Menu => {
            let tree = build_menu(&cfg)?;
            tree.validate()?;
            println!("{}", serde_json::to_string_pretty(&tree)?);
        }
    }

    Ok(())
}

/// Log to stderr (stdout belongs to the console channel), plus a daily
/// file under `bot.log_dir` when set. `RUST_LOG` overrides `bot.log_level`.
fn init_logging(cfg: &Config) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.bot.log_level))?;
    let stderr = fmt::layer().with_writer(std::io::stderr);

    match cfg.bot.log_dir {
        Some(ref dir) => {
            let appender = tracing_appender::rolling::daily(shellexpand(dir), "fitbot.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr)
                .init();
            Ok(None)
        }
    }
}

/// Load the menu file when configured, otherwise the built-in variant.
fn build_menu(cfg: &Config) -> Result<MenuTree, BotError> {
    match cfg.bot.menu_file {
        Some(ref file) => {
            let path = shellexpand(file);
            MenuTree::load(Path::new(&path)).map_err(|e| BotError::Menu(format!("{path}: {e}")))
        }
        None => Ok(MenuTree::builtin(cfg.bot.variant, &cfg.bot.name)),
    }
}

fn menu_source(cfg: &Config) -> String {
    match cfg.bot.menu_file {
        Some(ref file) => format!("file {file}"),
        None => format!("built-in {}", cfg.bot.variant.as_str()),
    }
}

/// Build the enabled channels.
fn build_channels(cfg: &Config) -> HashMap<String, Arc<dyn Channel>> {
    let mut channels: HashMap<String, Arc<dyn Channel>> = HashMap::new();

    if let Some(ref c) = cfg.channel.console {
        if c.enabled {
            channels.insert(
                console::NAME.to_string(),
                Arc::new(ConsoleChannel::new(c.clone())),
            );
        }
    }

    channels
}
