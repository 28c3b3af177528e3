use std::collections::HashMap;
use std::time::Duration;

use bridge_proto::command::{Command, Surface};
use bridge_proto::config::ObserverConfig;
use bridge_proto::event::HostEvent;
use bridge_proto::metadata::MetadataCache;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::engine::PlayerEngine;
use crate::host::{HostHooks, NowPlayingSnapshot};
use crate::observer::ProgressObserver;
use crate::session::{PlaybackState, StreamSession};

/// All inputs that can mutate a session, funnelled through one channel so
/// every transition runs on one logical timeline: host messages, observer
/// ticks, and engine rate transitions.
#[derive(Debug)]
pub enum BridgeEvent {
    HostMessage {
        surface: Surface,
        message: HashMap<String, String>,
    },
    Tick {
        surface: Surface,
        generation: u64,
    },
    /// Engine playback-rate transition, pushed independently of the tick
    /// timer (pause by user, system interruption, or explicit command).
    RateChanged {
        surface: Surface,
        rate: f64,
    },
    Shutdown,
}

struct SurfaceState {
    session: StreamSession,
    engine: Box<dyn PlayerEngine>,
}

/// Composes the two playback surfaces, the metadata cache, and the host
/// collaborators.  Sole entry point for inbound commands and sole emitter of
/// outbound events.
pub struct SessionController {
    video: SurfaceState,
    audio: SurfaceState,
    metadata: MetadataCache,
    hooks: HostHooks,
    cadences: ObserverConfig,
    /// Non-owning handle to the host's message sink.
    events: mpsc::Sender<HostEvent>,
    /// Handed to spawned observers so their ticks come back through `run`.
    bridge_tx: mpsc::Sender<BridgeEvent>,
    next_generation: u64,
    last_video_rate: f64,
}

impl SessionController {
    pub fn new(
        cadences: ObserverConfig,
        video_engine: Box<dyn PlayerEngine>,
        audio_engine: Box<dyn PlayerEngine>,
        hooks: HostHooks,
        events: mpsc::Sender<HostEvent>,
        bridge_tx: mpsc::Sender<BridgeEvent>,
    ) -> Self {
        Self {
            video: SurfaceState {
                session: StreamSession::new(Surface::Video),
                engine: video_engine,
            },
            audio: SurfaceState {
                session: StreamSession::new(Surface::Podcast),
                engine: audio_engine,
            },
            metadata: MetadataCache::default(),
            hooks,
            cadences,
            events,
            bridge_tx,
            next_generation: 0,
            last_video_rate: 0.0,
        }
    }

    pub fn session(&self, surface: Surface) -> &StreamSession {
        match surface {
            Surface::Video => &self.video.session,
            Surface::Podcast => &self.audio.session,
        }
    }

    /// Drain the event channel until shutdown.  Host message delivery and
    /// timer callbacks are the only two sources of mutation; both arrive
    /// here.
    pub async fn run(mut self, mut rx: mpsc::Receiver<BridgeEvent>) {
        while let Some(event) = rx.recv().await {
            match event {
                BridgeEvent::HostMessage { surface, message } => {
                    self.handle_message(surface, &message)
                }
                BridgeEvent::Tick {
                    surface,
                    generation,
                } => self.handle_tick(surface, generation),
                BridgeEvent::RateChanged { surface, rate } => {
                    self.handle_rate_change(surface, rate)
                }
                BridgeEvent::Shutdown => break,
            }
        }
        debug!("controller: event loop finished");
    }

    // ── inbound commands ──────────────────────────────────────────────────

    pub fn handle_message(&mut self, surface: Surface, message: &HashMap<String, String>) {
        let Some(command) = Command::parse(surface, message) else {
            debug!(?surface, "ignoring unrecognised host message");
            return;
        };

        if surface == Surface::Podcast {
            // Failure is logged only; playback proceeds regardless.
            if let Err(error) = self.hooks.audio_session.activate() {
                warn!(%error, "audio session activation failed");
            }
        }

        match surface {
            Surface::Video => self.handle_video(command),
            Surface::Podcast => self.handle_podcast(command),
        }
    }

    fn handle_video(&mut self, command: Command) {
        match command {
            Command::Play { url, seconds } => self.video_play(url, seconds),
            // The parser only yields `play` for the video surface.
            other => debug!(?other, "video: unsupported command"),
        }
    }

    fn handle_podcast(&mut self, command: Command) {
        match command {
            Command::Load { url } => self.podcast_load(url),
            Command::Play { url, seconds } => self.podcast_play(url, seconds),
            Command::Seek { seconds } => self.audio.engine.seek(seconds),
            Command::Rate { rate } => {
                self.audio.engine.set_rate(rate);
                self.audio.session.rate = rate;
            }
            Command::Volume { volume } => {
                // Volume goes to volume, never to rate.
                self.audio.engine.set_volume(volume);
                self.audio.session.volume = volume;
            }
            Command::Muted { muted } => {
                self.audio.engine.set_muted(muted);
                self.audio.session.muted = muted;
            }
            Command::Pause => self.podcast_pause(),
            Command::Terminate => self.podcast_terminate(),
            Command::Metadata {
                episode_name,
                podcast_name,
                artwork_url,
            } => {
                self.metadata.apply(episode_name, podcast_name, artwork_url);
                self.push_now_playing();
            }
        }
    }

    // ── video surface ─────────────────────────────────────────────────────

    fn video_play(&mut self, url: Option<String>, seconds: Option<f64>) {
        if self.video.session.needs_reload(url.as_deref()) {
            let Some(url) = url else { return };
            let first_start = self.video.session.state == PlaybackState::Empty;

            // Old observer goes first so no tick from the previous stream can
            // fire once load returns.
            self.video.session.observer = None;
            self.video.session.state = PlaybackState::Loading;
            if let Err(error) = self.video.engine.load(&url) {
                warn!(%error, url, "video: engine rejected stream");
                self.video.session.stream_url = None;
                self.video.session.state = PlaybackState::Empty;
                return;
            }
            self.video.session.stream_url = Some(url);

            // Loading resets position reporting; announce it once before any
            // timer-driven ticks.
            self.send_event(HostEvent::video_tick(0.0));

            if let Some(secs) = seconds {
                self.video.engine.seek(secs);
            }
            self.video.engine.play();
            self.video.session.state = PlaybackState::Playing;
            self.last_video_rate = self.video.engine.rate();

            if first_start {
                self.hooks.ui.show_video_surface();
            }
            self.hooks.ui.hide_podcast_surface();
            self.spawn_observer(Surface::Video);
        } else {
            if self.video.session.stream_url.is_none() {
                return;
            }
            // Same stream: resume only when not already playing, so a
            // duplicate play message never restarts in-progress playback.
            if self.video.engine.rate() == 0.0 {
                if let Some(secs) = seconds {
                    self.video.engine.seek(secs);
                }
                self.video.engine.play();
                self.video.session.state = PlaybackState::Playing;
                self.last_video_rate = self.video.engine.rate();
            }
        }
    }

    // ── podcast surface ───────────────────────────────────────────────────

    fn podcast_load(&mut self, url: Option<String>) {
        if !self.audio.session.needs_reload(url.as_deref()) {
            debug!("podcast: load for current stream, no-op");
            return;
        }
        let Some(url) = url else { return };

        self.audio.session.observer = None;
        self.audio.session.state = PlaybackState::Loading;
        if let Err(error) = self.audio.engine.load(&url) {
            warn!(%error, url, "podcast: engine rejected stream");
            self.audio.session.stream_url = None;
            self.audio.session.state = PlaybackState::Empty;
            return;
        }
        self.audio.session.stream_url = Some(url);
        self.send_event(HostEvent::podcast_init());

        self.audio.engine.play();
        self.audio.session.state = PlaybackState::Playing;
        self.push_now_playing();
        self.spawn_observer(Surface::Podcast);
    }

    fn podcast_play(&mut self, url: Option<String>, seconds: Option<f64>) {
        if self.audio.session.needs_reload(url.as_deref()) {
            let Some(url) = url else { return };

            self.audio.session.observer = None;
            self.audio.engine.stop();
            self.audio.session.state = PlaybackState::Loading;
            if let Err(error) = self.audio.engine.load(&url) {
                warn!(%error, url, "podcast: engine rejected stream");
                self.audio.session.stream_url = None;
                self.audio.session.state = PlaybackState::Empty;
                return;
            }
            self.audio.session.stream_url = Some(url);
            self.send_event(HostEvent::podcast_init());

            if let Some(secs) = seconds {
                self.audio.engine.seek(secs);
            }
            self.audio.engine.play();
            self.audio.session.state = PlaybackState::Playing;
            self.push_now_playing();
            self.spawn_observer(Surface::Podcast);
        } else {
            if self.audio.session.stream_url.is_none() {
                return;
            }
            if self.audio.engine.rate() == 0.0 {
                if let Some(secs) = seconds {
                    self.audio.engine.seek(secs);
                }
                self.audio.engine.play();
                self.audio.session.state = PlaybackState::Playing;
                self.push_now_playing();
            }
            // Already playing the same stream: duplicate play, full no-op.
        }
    }

    fn podcast_pause(&mut self) {
        self.audio.engine.pause();
        if self.audio.session.state == PlaybackState::Playing {
            self.audio.session.state = PlaybackState::Paused;
        }
        self.push_now_playing();
    }

    fn podcast_terminate(&mut self) {
        if self.audio.session.state == PlaybackState::Empty
            && self.audio.session.stream_url.is_none()
        {
            // Idempotent: terminating an empty surface is a no-op.
            return;
        }
        self.audio.session.observer = None;
        self.audio.engine.stop();
        self.audio.session.reset();
        self.metadata.clear();
        self.hooks.now_playing.clear();
        if let Err(error) = self.hooks.audio_session.deactivate() {
            warn!(%error, "audio session deactivation failed");
        }
    }

    // ── timer ticks ───────────────────────────────────────────────────────

    pub fn handle_tick(&mut self, surface: Surface, generation: u64) {
        let live = match surface {
            Surface::Video => &self.video.session.observer,
            Surface::Podcast => &self.audio.session.observer,
        };
        if live.as_ref().map(ProgressObserver::generation) != Some(generation) {
            debug!(?surface, generation, "discarding stale observer tick");
            return;
        }

        match surface {
            Surface::Podcast => {
                let time = self.audio.engine.current_time();
                let duration = self.audio.engine.duration();
                // Never emit a tick with an invalid timeline.
                if time <= 0.0 || duration.is_nan() || duration <= 0.0 {
                    self.send_event(HostEvent::podcast_init());
                } else {
                    self.send_event(HostEvent::podcast_tick(time, duration));
                    self.push_now_playing();
                }
            }
            Surface::Video => {
                if !self.hooks.ui.video_surface_attached() {
                    debug!("video: surface gone, tearing down observer");
                    self.video.session.observer = None;
                    return;
                }
                if self.video.engine.rate() == 0.0 || self.video.engine.has_error() {
                    return;
                }
                self.send_event(HostEvent::video_tick(self.video.engine.current_time()));
            }
        }
    }

    // ── engine rate transitions (video side-channel) ──────────────────────

    pub fn handle_rate_change(&mut self, surface: Surface, rate: f64) {
        if surface != Surface::Video {
            // Podcast rate is command-driven; nothing to observe.
            return;
        }
        let previous = self.last_video_rate;
        self.last_video_rate = rate;
        // Edge-triggered: only the transition into rate 0 emits.
        if rate == 0.0 && previous != 0.0 {
            self.send_event(HostEvent::video_pause());
            self.hooks.ui.video_paused();
            if self.video.session.state == PlaybackState::Playing {
                self.video.session.state = PlaybackState::Paused;
            }
        }
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn spawn_observer(&mut self, surface: Surface) {
        self.next_generation += 1;
        let generation = self.next_generation;
        let period = match surface {
            Surface::Video => Duration::from_secs_f64(self.cadences.video_tick_secs),
            Surface::Podcast => Duration::from_secs_f64(self.cadences.audio_tick_secs),
        };
        let observer =
            ProgressObserver::spawn(surface, generation, period, self.bridge_tx.clone());
        match surface {
            Surface::Video => self.video.session.observer = Some(observer),
            Surface::Podcast => self.audio.session.observer = Some(observer),
        }
    }

    fn push_now_playing(&mut self) {
        let snapshot = NowPlayingSnapshot {
            title: self.metadata.episode_name.clone(),
            subtitle: self.metadata.podcast_name.clone(),
            artwork_url: self.metadata.artwork_url.clone(),
            rate: self.audio.engine.rate(),
            position: self.audio.engine.current_time(),
            duration: self.audio.engine.duration(),
        };
        self.hooks.now_playing.update(&snapshot);

        if let Some(url) = self.metadata.artwork_url.clone() {
            if !self.metadata.artwork_fetched {
                self.hooks.now_playing.request_artwork(&url);
                self.metadata.mark_artwork_fetched();
            }
        }
    }

    fn send_event(&self, event: HostEvent) {
        // Backpressure is the transport's problem; never stall a transition
        // behind a slow host.
        if let Err(error) = self.events.try_send(event) {
            debug!(%error, "host sink not draining, event dropped");
        }
    }
}
