mod hooks;

use std::collections::HashMap;

use bridge_core::controller::{BridgeEvent, SessionController};
use bridge_core::host::HostHooks;
use bridge_core::sim::SimulatedEngine;
use bridge_proto::command::Surface;
use bridge_proto::config::Config;
use bridge_proto::event::HostEvent;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    std::fs::create_dir_all(&config.daemon.log_dir)?;
    let log_path = config.daemon.log_dir.join("bridge.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(log_file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,bridge_core=debug")),
        )
        .init();

    info!("Log file: {:?}", log_path);
    info!("Config loaded from: {:?}", Config::config_path());

    // All inputs funnel into the controller through one channel.
    let (event_tx, event_rx) = mpsc::channel::<BridgeEvent>(256);
    let (host_tx, mut host_rx) = mpsc::channel::<HostEvent>(config.daemon.event_capacity);

    let controller = SessionController::new(
        config.observer.clone(),
        Box::new(SimulatedEngine::new(config.daemon.sim_duration_secs)),
        Box::new(SimulatedEngine::new(config.daemon.sim_duration_secs)),
        HostHooks {
            ui: Box::new(hooks::LoggingUi::default()),
            now_playing: Box::new(hooks::LoggingNowPlaying),
            audio_session: Box::new(hooks::NullAudioSession),
        },
        host_tx,
        event_tx.clone(),
    );

    // Outbound events: one JSON object per line on stdout.
    tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(event) = host_rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(mut line) => {
                    line.push('\n');
                    if stdout.write_all(line.as_bytes()).await.is_err() {
                        break;
                    }
                    let _ = stdout.flush().await;
                }
                Err(error) => warn!(%error, "failed to encode host event"),
            }
        }
    });

    // Inbound commands: one string-keyed JSON object per line on stdin.  The
    // optional `surface` key selects the surface (defaults to podcast).
    let reader_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let mut message: HashMap<String, String> =
                        match serde_json::from_str(trimmed) {
                            Ok(m) => m,
                            Err(error) => {
                                warn!(%error, "ignoring malformed input line");
                                continue;
                            }
                        };
                    let surface = match message.remove("surface").as_deref() {
                        Some("video") => Surface::Video,
                        _ => Surface::Podcast,
                    };
                    if reader_tx
                        .send(BridgeEvent::HostMessage { surface, message })
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
                Ok(None) => {
                    info!("stdin closed, shutting down");
                    let _ = reader_tx.send(BridgeEvent::Shutdown).await;
                    break;
                }
                Err(error) => {
                    warn!(%error, "stdin read error");
                    let _ = reader_tx.send(BridgeEvent::Shutdown).await;
                    break;
                }
            }
        }
    });

    drop(event_tx);
    info!("Bridge initialised, running event loop");
    controller.run(event_rx).await;

    Ok(())
}
