use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use duet::RoomId;
use duet::client::{
    ClientConfig, IceServerConfig, LocalTracks, MediaConstraints, Negotiator, RemoteTrack, Role,
    SessionEvent, WebrtcBackend,
};
use duet::server::{RelayConfig, RelayServer};
use duet::utils::{DEFAULT_RELAY_PORT, DEFAULT_RELAY_URL, DEFAULT_STUN_ADDR};
use std::net::IpAddr;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "duet", version, about = "WebRTC signaling relay and peer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the signaling relay.
    Relay {
        #[arg(long, env = "DUET_HOST", default_value = "0.0.0.0")]
        host: IpAddr,

        #[arg(short, long, env = "DUET_PORT", default_value_t = DEFAULT_RELAY_PORT)]
        port: u16,

        /// Frames buffered per connection before further frames are skipped.
        #[arg(long, env = "DUET_OUTBOUND_BUFFER", default_value_t = 64)]
        outbound_buffer: usize,
    },
    /// Join a room as one participant.
    Join {
        #[arg(long, env = "DUET_RELAY", default_value = DEFAULT_RELAY_URL)]
        relay: String,

        #[arg(short, long, env = "DUET_ROOM")]
        room: String,

        #[arg(long, value_enum, default_value_t = RoleArg::Auto)]
        role: RoleArg,

        #[arg(long, env = "DUET_STUN", default_value = DEFAULT_STUN_ADDR)]
        stun: Vec<String>,

        #[arg(long)]
        no_audio: bool,

        #[arg(long)]
        no_video: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    Auto,
    Initiator,
    Responder,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Auto => Role::Auto,
            RoleArg::Initiator => Role::Initiator,
            RoleArg::Responder => Role::Responder,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Commands::Relay {
            host,
            port,
            outbound_buffer,
        } => {
            run_relay(RelayConfig {
                host,
                port,
                outbound_buffer,
            })
            .await
        }
        Commands::Join {
            relay,
            room,
            role,
            stun,
            no_audio,
            no_video,
        } => {
            let room_id = RoomId::new(room).context("Invalid room id")?;
            let mut config = ClientConfig::new(room_id);
            config.relay_url = relay;
            config.session.role = role.into();
            config.link.ice_servers = stun.into_iter().map(IceServerConfig::stun).collect();
            config.link.media = MediaConstraints {
                audio: !no_audio,
                video: !no_video,
            };
            run_join(config).await
        }
    }
}

async fn run_relay(config: RelayConfig) -> Result<()> {
    let server = RelayServer::bind(config).await?;
    let addr = server.local_addr()?;
    println!(
        "{} {}",
        "Relay listening on".green().bold(),
        format!("ws://{addr}").as_str().cyan()
    );

    server.run_until(shutdown_signal()).await?;
    println!("{}", "Relay stopped".yellow());
    Ok(())
}

async fn run_join(config: ClientConfig) -> Result<()> {
    let backend = WebrtcBackend::new(config.link.clone());
    let (negotiator, handle, mut events) = Negotiator::connect(&config, backend)
        .await
        .with_context(|| format!("Failed to connect to relay at {}", config.relay_url))?;

    println!(
        "{} {} {}",
        "Joined room".green().bold(),
        config.session.room_id.as_str().cyan(),
        format!("via {}", config.relay_url).as_str().dimmed()
    );

    let mut run = tokio::spawn(negotiator.run());
    let mut interrupt = Box::pin(shutdown_signal());

    loop {
        tokio::select! {
            Some(event) = events.recv() => print_event(event),
            result = &mut run => {
                result
                    .context("Negotiator task failed")?
                    .context("Negotiation failed")?;
                break;
            }
            _ = &mut interrupt => {
                if let Err(e) = handle.close().await {
                    warn!("Session already ended: {}", e);
                }
                run.await
                    .context("Negotiator task failed")?
                    .context("Negotiation failed")?;
                break;
            }
        }
    }

    println!("{}", "Session closed".yellow());
    Ok(())
}

fn print_event(event: SessionEvent<LocalTracks, RemoteTrack>) {
    match event {
        SessionEvent::LocalMediaReady(media) => println!(
            "{} {} track(s)",
            "Local media ready:".green(),
            media.tracks.len()
        ),
        SessionEvent::RemoteMediaReady(track) => println!(
            "{} stream {} (track {})",
            "Remote media ready:".green().bold(),
            track.stream_id().as_str().cyan(),
            track.id()
        ),
        SessionEvent::StateChanged(state) => {
            println!("{} {}", "State".blue(), state.to_string().as_str().bold())
        }
        SessionEvent::Error(e) => println!("{} {}", "Error:".red().bold(), e),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
