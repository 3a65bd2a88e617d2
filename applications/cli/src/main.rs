/// Soundmint - browse and play NFT music listings from the terminal
use clap::{Parser, Subcommand};
use soundmint_cli::{
    session::{self, OfflineMarketplace, SessionSettings},
    SoundmintConfig,
};
use soundmint_core::Track;
use soundmint_market::{Storefront, StorefrontStatus};
use soundmint_playback::{PlaybackController, RepeatMode};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "soundmint")]
#[command(about = "Browse and play Soundmint music listings", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./soundmint.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List unsold tracks
    Listings,
    /// List tokens owned by the connected account
    Tokens,
    /// List the connected account's resales
    Resales,
    /// Play the catalog on a virtual clock
    Play {
        /// Start in shuffled order
        #[arg(long)]
        shuffle: bool,
        /// Repeat mode: off, playlist or one
        #[arg(long)]
        repeat: Option<RepeatMode>,
        /// Initial volume (0-100)
        #[arg(long)]
        volume: Option<u8>,
        /// Stop after this many tracks
        #[arg(long)]
        max_tracks: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soundmint=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = SoundmintConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Listings => {
            config.validate()?;
            list(&config).await?;
        }
        Commands::Tokens => {
            config.validate()?;
            my_tokens(&config).await?;
        }
        Commands::Resales => {
            config.validate()?;
            my_resales(&config).await?;
        }
        Commands::Play {
            shuffle,
            repeat,
            volume,
            max_tracks,
        } => {
            if shuffle {
                config.playback.shuffle = true;
            }
            if let Some(repeat) = repeat {
                config.playback.repeat = repeat;
            }
            if let Some(volume) = volume {
                config.playback.volume = volume;
            }
            config.validate()?;
            play(&config, max_tracks).await?;
        }
    }

    Ok(())
}

async fn list(config: &SoundmintConfig) -> anyhow::Result<()> {
    let catalog = session::build_catalog(&config.catalog)?;
    let mut storefront = Storefront::new(catalog, OfflineMarketplace);
    storefront.refresh().await;

    match storefront.status() {
        StorefrontStatus::Ready => {
            print_tracks(storefront.listings());
        }
        StorefrontStatus::Empty | StorefrontStatus::Loading => {
            if let Some(error) = storefront.last_error() {
                tracing::warn!("Catalog unavailable: {}", error);
            }
            println!("No listed assets");
        }
    }

    Ok(())
}

async fn my_tokens(config: &SoundmintConfig) -> anyhow::Result<()> {
    let storefront = Storefront::new(session::build_catalog(&config.catalog)?, OfflineMarketplace);

    match storefront.my_tokens().await {
        Ok(tokens) if tokens.is_empty() => println!("No owned tokens"),
        Ok(tokens) => print_tracks(&tokens),
        Err(e) => tracing::warn!("Owned tokens unavailable: {}", e),
    }

    Ok(())
}

async fn my_resales(config: &SoundmintConfig) -> anyhow::Result<()> {
    let storefront = Storefront::new(session::build_catalog(&config.catalog)?, OfflineMarketplace);

    match storefront.my_resales().await {
        Ok(resales) if resales.listed.is_empty() => println!("No listed assets"),
        Ok(resales) => {
            println!("Listed");
            print_tracks(&resales.listed);
            println!("Sold");
            if resales.sold.is_empty() {
                println!("No sold assets");
            } else {
                print_tracks(&resales.sold);
            }
        }
        Err(e) => tracing::warn!("Resales unavailable: {}", e),
    }

    Ok(())
}

fn print_tracks(tracks: &[Track]) {
    for track in tracks {
        let artist = if track.artist.is_empty() {
            "Unknown artist"
        } else {
            track.artist.as_str()
        };
        println!(
            "{:>6}  {} - {}  {} ETH",
            track.id, track.title, artist, track.price
        );
    }
}

async fn play(config: &SoundmintConfig, max_tracks: Option<usize>) -> anyhow::Result<()> {
    let catalog = session::build_catalog(&config.catalog)?;
    let mut storefront = Storefront::new(catalog, OfflineMarketplace);
    let tracks = storefront.refresh().await.to_vec();

    if tracks.is_empty() {
        println!("No listed assets");
        return Ok(());
    }

    let renderer = session::renderer_for(&tracks);
    let mut controller = PlaybackController::new(renderer, config.playback.playback_config());
    controller.load_playlist(tracks)?;
    controller.toggle_play()?;

    let settings = SessionSettings::from_playback(&config.playback, max_tracks);
    tracing::info!(
        volume = config.playback.volume,
        repeat = %config.playback.repeat,
        shuffle = config.playback.shuffle,
        "Starting playback"
    );

    tokio::select! {
        summary = session::run(&mut controller, settings) => {
            tracing::info!(
                tracks = summary.tracks_started,
                finished = summary.finished,
                "Playback session ended"
            );
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted");
        }
    }

    Ok(())
}
