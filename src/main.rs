use clap::{Parser, ValueEnum};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use astro::core::config;
use astro::core::state::Panel;
use astro::tui;

#[derive(Clone, Debug, ValueEnum)]
enum StartPanel {
    /// Free-form chat with Astro
    Chat,
    /// Generative visual explorer
    Explorer,
}

#[derive(Parser)]
#[command(name = "astro", about = "Space chat and visual explorer for young astronomers")]
struct Args {
    /// Panel to open on launch
    #[arg(short, long, value_enum, default_value = "chat")]
    panel: StartPanel,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to astro.log in current directory.
    // The TUI owns the terminal, so nothing may log to stdout.
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("astro.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Astro starting up with panel: {:?}", args.panel);

    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Could not read ~/.astro/config.toml: {e}");
            std::process::exit(1);
        }
    };
    let resolved = config::resolve(&config);

    let transport = match tui::build_transport(&resolved) {
        Ok(transport) => transport,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
    };

    let panel = match args.panel {
        StartPanel::Chat => Panel::Chat,
        StartPanel::Explorer => Panel::Explorer,
    };

    tui::run(transport, resolved, panel)
}
