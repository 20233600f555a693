use clap::{Parser, Subcommand};
use inbox::channel::{run_feed_client, ReconnectPolicy};
use inbox::feed::{LiveBoundedFeedRenderer, RendererOptions, TerminalView};
use inbox::FeedError;
use std::io::IsTerminal;

#[derive(Parser)]
#[command(name = "testinbox")]
#[command(about = "testinbox CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,

    /// Create the configuration directory and a default config.json.
    Init {
        /// Config file path (default: TESTINBOX_CONFIG_PATH or ~/.testinbox/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<std::path::PathBuf>,
    },

    /// Connect to the push channel and show the most recent messages as a live table.
    Watch {
        /// Config file path (default: TESTINBOX_CONFIG_PATH or ~/.testinbox/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<std::path::PathBuf>,

        /// Push channel WebSocket URL (default from TESTINBOX_FEED_URL or config)
        #[arg(long, value_name = "URL")]
        url: Option<String>,

        /// Number of rows to keep (default from config or 25)
        #[arg(long, short = 'n')]
        capacity: Option<usize>,

        /// Only show messages for this recipient.
        #[arg(long, value_name = "ADDRESS")]
        recipient: Option<String>,

        /// Stop when the connection ends instead of reconnecting.
        #[arg(long)]
        once: bool,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) => {
            println!("testinbox {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Init { config }) => {
            if let Err(e) = run_init(config) {
                log::error!("init failed: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Watch {
            config,
            url,
            capacity,
            recipient,
            once,
        }) => {
            if let Err(e) = run_watch(config, url, capacity, recipient, once).await {
                if !already_reported(&e) {
                    log::error!("watch failed: {}", e);
                }
                std::process::exit(1);
            }
        }
        None => {
            println!("Run with --help for usage");
        }
    }
}

/// Transport failures were logged by the renderer when they happened.
fn already_reported(e: &anyhow::Error) -> bool {
    e.downcast_ref::<FeedError>()
        .is_some_and(FeedError::is_transport)
}

fn run_init(config_path: Option<std::path::PathBuf>) -> anyhow::Result<()> {
    let path = config_path.unwrap_or_else(inbox::config::default_config_path);
    let _dir = inbox::init::init_config_dir(&path)?;
    println!("initialized configuration at {}", path.display());
    Ok(())
}

async fn run_watch(
    config_path: Option<std::path::PathBuf>,
    url: Option<String>,
    capacity: Option<usize>,
    recipient: Option<String>,
    once: bool,
) -> anyhow::Result<()> {
    let (mut config, _) = inbox::config::load_config(config_path)?;
    if let Some(n) = capacity {
        config.feed.capacity = n;
    }
    if recipient.is_some() {
        config.feed.recipient = recipient;
    }
    if once {
        config.reconnect.enabled = false;
    }
    let url = url.unwrap_or_else(|| inbox::config::resolve_feed_url(&config));

    let options = RendererOptions::from_config(&config.feed)?;
    let stdout = std::io::stdout();
    let clear_screen = config.feed.clear_screen && stdout.is_terminal();
    let mut renderer = LiveBoundedFeedRenderer::new(options, TerminalView::new(stdout, clear_screen));
    renderer.render();

    let policy = ReconnectPolicy::from_config(&config.reconnect)?;
    log::info!("watching {} (capacity {})", url, config.feed.capacity);

    tokio::select! {
        result = run_feed_client(&url, &policy, &mut renderer) => result?,
        _ = tokio::signal::ctrl_c() => {
            log::info!("interrupted, stopping");
        }
    }
    Ok(())
}
