use bridge_core::host::{AudioSessionControl, NowPlaying, NowPlayingSnapshot, UiSurfaces};
use tracing::{debug, info};

/// Stdio harness has no native surfaces; the hooks just log so the
/// exclusion/pause transitions are visible in the daemon log.
pub struct LoggingUi {
    attached: bool,
}

impl Default for LoggingUi {
    fn default() -> Self {
        Self { attached: true }
    }
}

impl UiSurfaces for LoggingUi {
    fn show_video_surface(&mut self) {
        info!("ui: show video surface");
    }
    fn hide_podcast_surface(&mut self) {
        info!("ui: hide podcast surface");
    }
    fn video_surface_attached(&self) -> bool {
        self.attached
    }
    fn video_paused(&mut self) {
        info!("ui: video paused");
    }
}

pub struct LoggingNowPlaying;

impl NowPlaying for LoggingNowPlaying {
    fn update(&mut self, snapshot: &NowPlayingSnapshot) {
        debug!(
            title = snapshot.title.as_deref().unwrap_or(""),
            position = snapshot.position,
            duration = snapshot.duration,
            "now playing update"
        );
    }
    fn request_artwork(&mut self, url: &str) {
        info!(url, "now playing: artwork requested");
    }
    fn clear(&mut self) {
        info!("now playing: cleared");
    }
}

/// No platform audio session to claim on the harness.
pub struct NullAudioSession;

impl AudioSessionControl for NullAudioSession {
    fn activate(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
    fn deactivate(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}
