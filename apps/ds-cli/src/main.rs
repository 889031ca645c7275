//! DS CLI - command-line control point for OpenHome DS players.
//!
//! Runs a single device action per invocation and prints the decoded reply
//! as JSON on stdout. Device location and service table come from a YAML
//! configuration file (see `config.rs`).

mod config;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ds_core::{DsClient, DsControl, DsError, DsResult, ErrorCode, HttpSoapTransport, RadioChannel};
use serde::Serialize;

use crate::config::CliConfig;

/// DS CLI - Control an OpenHome DS player from the command line.
#[derive(Parser, Debug)]
#[command(name = "ds-cli")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (YAML).
    #[arg(short, long, value_name = "FILE", env = "DS_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(short, long, default_value = "warn", env = "DS_LOG_LEVEL")]
    log_level: log::LevelFilter,

    /// Device base URL (overrides config file and DS_BASE_URL).
    #[arg(short, long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    // Playlist
    /// Print the ids of all playlist entries.
    TrackIds,
    /// Print uri and metadata of the given playlist entries.
    TrackDetails {
        #[arg(required = true)]
        ids: Vec<u32>,
    },
    /// Insert a track described by DIDL-Lite metadata; prints the new id.
    QueueTrack {
        /// File holding the DIDL-Lite document ("-" for stdin).
        #[arg(short, long, value_name = "FILE")]
        metadata: PathBuf,
        /// Entry to insert after (0 = head of the playlist).
        #[arg(short, long, default_value_t = 0)]
        after_id: u32,
    },
    /// Remove every playlist entry.
    DeleteAll,
    EnableShuffle,
    DisableShuffle,
    /// Start playback at a playlist position.
    PlayIndex { index: u32 },
    PlayPlaylist,
    Pause,
    Skip,

    // Product
    /// Print the input sources.
    Sources,
    /// Select the source at the given position.
    ChangeSource { index: u32 },
    /// Print the standby flag.
    Standby,
    PowerOn,
    PowerOff,

    // Radio
    PlayRadio,
    /// Print the ids of all radio presets.
    RadioIds,
    /// Print title, stream and artwork of the given presets.
    RadioDetails {
        #[arg(required = true)]
        ids: Vec<u32>,
    },
    /// Tune to a preset.
    SetRadioChannel {
        id: u32,
        uri: String,
    },

    // Volume
    VolumeUp,
    VolumeDown,

    // Info
    /// Print the currently playing track.
    NowPlaying,
}

#[derive(Serialize)]
struct Done {
    ok: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(args.log_level)
        .format_timestamp_millis()
        .init();

    // Load configuration
    let mut config =
        CliConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    // Apply CLI overrides
    if let Some(base_url) = args.base_url {
        config.base_url = Some(base_url);
    }

    let Some(base_url) = config.base_url.clone() else {
        bail!("No device base URL. Set base_url in the config file, DS_BASE_URL, or --base-url.");
    };

    let transport =
        HttpSoapTransport::default().with_timeout(Duration::from_secs(config.timeout_secs));
    let client = DsClient::with_http(base_url, config.services, transport);

    log::info!(
        "Configuration: base_url={}, timeout={}s, services={}",
        client.base_url(),
        config.timeout_secs,
        client.services().len()
    );

    run(&client, args.command).await
}

async fn run(device: &dyn DsControl, command: Command) -> Result<()> {
    match command {
        Command::TrackIds => print(&device.track_ids().await),
        Command::TrackDetails { ids } => print(&device.retrieve_track_details(&ids).await),
        Command::QueueTrack { metadata, after_id } => {
            let document = read_metadata(&metadata)?;
            print(&device.queue_track(&document, after_id).await)
        }
        Command::DeleteAll => done(device.delete_all().await),
        Command::EnableShuffle => done(device.enable_shuffle().await),
        Command::DisableShuffle => done(device.disable_shuffle().await),
        Command::PlayIndex { index } => done(device.play_from_playlist_index(index).await),
        Command::PlayPlaylist => done(device.play_playlist().await),
        Command::Pause => done(device.pause().await),
        Command::Skip => done(device.skip_track().await),

        Command::Sources => print(&device.sources().await),
        Command::ChangeSource { index } => done(device.change_source(index).await),
        Command::Standby => print(&device.standby_state().await),
        Command::PowerOn => done(device.power_on().await),
        Command::PowerOff => done(device.power_off().await),

        Command::PlayRadio => done(device.play_radio().await),
        Command::RadioIds => print(&device.radio_ids().await),
        Command::RadioDetails { ids } => {
            print(&device.retrieve_radio_station_details(&ids).await)
        }
        Command::SetRadioChannel { id, uri } => {
            let channel = RadioChannel {
                id,
                uri,
                title: String::new(),
                artwork: None,
            };
            done(device.set_radio_channel(&channel).await)
        }

        Command::VolumeUp => done(device.volume_inc().await),
        Command::VolumeDown => done(device.volume_dec().await),

        Command::NowPlaying => print(&device.current_track_details().await),
    }
}

fn read_metadata(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        return std::io::read_to_string(std::io::stdin())
            .context("Failed to read metadata from stdin");
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read metadata file: {}", path.display()))
}

fn done(result: DsResult<()>) -> Result<()> {
    print(&result.map(|()| Done { ok: true }))
}

fn print<T: Serialize>(result: &DsResult<T>) -> Result<()> {
    match result {
        Ok(value) => {
            let json = serde_json::to_string_pretty(value).context("Failed to serialize reply")?;
            println!("{json}");
            Ok(())
        }
        Err(DsError::Transport(inner)) => bail!("{} (transport_error: {})", inner, inner.code()),
        Err(e) => bail!("{} ({})", e, e.code()),
    }
}
