use clap::Parser;
use nexus::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "nexus", about = "Terminal client for a threaded chat service")]
struct Args {
    /// Base URL of the chat service (overrides NEXUS_BASE_URL and config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Give up on a request after this many seconds (0 = wait forever)
    #[arg(long)]
    timeout: Option<u64>,

    /// Milliseconds between revealed words of a reply
    #[arg(long)]
    reveal_interval_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to nexus.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("nexus.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("Falling back to default config: {}", e);
            eprintln!("Warning: {}; using defaults", e);
            config::NexusConfig::default()
        }
    };
    let cli = CliOverrides {
        base_url: args.base_url,
        request_timeout_secs: args.timeout,
        reveal_interval_ms: args.reveal_interval_ms,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!("Nexus starting up against {}", resolved.base_url);

    nexus::tui::run(resolved)
}
