use std::path::PathBuf;

use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use streamhist::{
    cli::{self, TrackSource},
    config, error, utils, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Merge streaming-history files and print the listening log
    Show(ShowOptions),

    /// Play a track on the first available device
    Play(TrackOptions),

    /// Add a track to the queue
    Queue(TrackOptions),

    /// Pause playback
    Pause,

    /// Resume playback on the first available device
    Resume,

    /// Add a track to the history playlist
    HistoryAdd(TrackOptions),

    /// Create a playlist from selected history rows
    Playlist(PlaylistOptions),

    /// Manage the Spotify token cache
    Cache(CacheOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ShowOptions {
    /// Streaming-history JSON export files
    #[clap(required = true)]
    files: Vec<PathBuf>,

    /// Only show entries whose song or creator contains this text
    #[clap(long)]
    search: Option<String>,

    /// Print at most this many rows
    #[clap(long)]
    limit: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
pub struct TrackOptions {
    /// Track URI (spotify:track:...) or open.spotify.com link
    #[clap(conflicts_with = "row", required_unless_present = "row")]
    track: Option<String>,

    /// Take the track from this row of the loaded history (1-based)
    #[clap(long, requires = "files")]
    row: Option<usize>,

    #[clap(flatten)]
    history: HistoryOptions,
}

#[derive(Args, Debug, Clone)]
pub struct HistoryOptions {
    /// Streaming-history JSON export file; can be repeated
    #[clap(long = "file", short = 'f')]
    files: Vec<PathBuf>,

    /// Search applied before picking the row
    #[clap(long)]
    search: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    /// Streaming-history JSON export files
    #[clap(required = true)]
    files: Vec<PathBuf>,

    /// Only consider entries whose song or creator contains this text
    #[clap(long)]
    search: Option<String>,

    /// Rows to include, e.g. 1,4,9 (default: every row shown)
    #[clap(long, value_parser = utils::parse_rows)]
    rows: Option<utils::RowSelection>,
}

#[derive(Parser, Debug, Clone)]
pub struct CacheOptions {
    #[command(subcommand)]
    command: CacheSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CacheSubcommand {
    /// Remove the cached Spotify token
    Clear,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

impl TrackOptions {
    fn into_source(self) -> TrackSource {
        match (self.track, self.row) {
            (Some(uri), _) => TrackSource::Uri(uri),
            (None, Some(row)) => TrackSource::Row {
                files: self.history.files,
                search: self.history.search,
                row,
            },
            (None, None) => error!("Provide a track URI or --row with --file"),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Show(opt) => cli::show(opt.files, opt.search, opt.limit).await,
        Command::Play(opt) => cli::play(opt.into_source()).await,
        Command::Queue(opt) => cli::queue(opt.into_source()).await,
        Command::Pause => cli::pause().await,
        Command::Resume => cli::resume().await,
        Command::HistoryAdd(opt) => cli::history_add(opt.into_source()).await,
        Command::Playlist(opt) => cli::playlist(opt.files, opt.search, opt.rows).await,
        Command::Cache(opt) => match opt.command {
            CacheSubcommand::Clear => cli::clear_cache().await,
        },
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
