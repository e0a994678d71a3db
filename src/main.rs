use anyhow::Result;
use clap::Parser;
use std::time::Duration;

mod app;
mod bounded_vec;
mod event;
mod source;
mod themes;
mod tracker;
mod ui;
mod version;

use app::App;
use themes::ThemeName;

fn theme_help_text() -> String {
    let themes = ThemeName::all_themes()
        .iter()
        .map(|theme| theme.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!("Color theme to use (available: {})", themes)
}

fn parse_theme(s: &str) -> Result<String, String> {
    if ThemeName::all_themes()
        .iter()
        .any(|theme| theme.as_str() == s)
    {
        Ok(s.to_string())
    } else {
        let available = ThemeName::all_themes()
            .iter()
            .map(|theme| theme.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Err(format!(
            "Invalid theme '{}'. Available themes: {}",
            s, available
        ))
    }
}

#[derive(Parser)]
#[command(name = "chat-trace")]
#[command(about = "A terminal UI application for tracing recent bot activity across chat channels")]
#[command(version = version::get_version())]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Address to listen on for the JSON-lines event feed
    #[arg(short, long, default_value = "127.0.0.1:4040")]
    listen: String,

    /// Replay events from a JSON-lines file instead of listening
    #[arg(short, long)]
    replay: Option<String>,

    /// Update interval in milliseconds
    #[arg(short, long, default_value = "250")]
    update_interval: u64,

    /// Maximum number of events retained per channel
    #[arg(short, long, default_value = "1000")]
    max_history: usize,

    /// Enable debug status in the header
    #[arg(short, long)]
    debug: bool,

    #[arg(short, long, default_value = "default", value_parser = parse_theme, help = theme_help_text())]
    theme: String,
}

#[derive(Parser)]
pub enum Commands {
    /// Show detailed version information
    VersionInfo,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle subcommands
    if let Some(command) = cli.command {
        match command {
            Commands::VersionInfo => {
                version::print_header_info();
                return Ok(());
            }
        }
    }

    // Parse theme
    let theme_name = ThemeName::from_str(&cli.theme).unwrap_or_else(|| {
        eprintln!("Unknown theme '{}', using default", cli.theme);
        ThemeName::Default
    });

    // Create the event receiver early to fail fast on a bad address or file
    let receiver = match &cli.replay {
        Some(path) => source::replay(path)?,
        None => source::listen(&cli.listen).await?,
    };

    // Initialize the application
    let update_interval = Duration::from_millis(cli.update_interval);
    let mut app = App::new(
        update_interval,
        cli.debug,
        theme_name,
        receiver,
        cli.max_history,
    )?;

    // Run the TUI application
    app.run().await?;

    Ok(())
}
