/// Collaborator seams to the embedding host.  The controller holds these as
/// injected handles for lookup/dispatch only, never for lifetime ownership;
/// real hosts back them with whatever native integration they have, tests
/// substitute recording fakes.

/// Read-only snapshot handed to the now-playing integration whenever
/// playback starts or a tick updates position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NowPlayingSnapshot {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub artwork_url: Option<String>,
    pub rate: f64,
    pub position: f64,
    pub duration: f64,
}

/// Host UI surface lifecycle hooks.
pub trait UiSurfaces: Send {
    /// Bring up the native video surface.  Called once per video session;
    /// reloading an active session reuses the existing surface.
    fn show_video_surface(&mut self);
    /// Cross-surface exclusion: starting video hides any podcast UI.
    fn hide_podcast_surface(&mut self);
    /// Whether the host still owns a live video surface.  When it is gone the
    /// video observer is torn down instead of emitting into the void.
    fn video_surface_attached(&self) -> bool;
    /// Delegate hook fired on the edge-triggered video pause event.
    fn video_paused(&mut self);
}

/// System now-playing / remote-control integration.  Artwork fetching lives
/// on the host side; the bridge only asks once per artwork URL.
pub trait NowPlaying: Send {
    fn update(&mut self, snapshot: &NowPlayingSnapshot);
    fn request_artwork(&mut self, url: &str);
    fn clear(&mut self);
}

/// Platform audio-session activation.  Failures are logged by the caller and
/// never block command processing.
pub trait AudioSessionControl: Send {
    fn activate(&mut self) -> anyhow::Result<()>;
    fn deactivate(&mut self) -> anyhow::Result<()>;
}

/// Bundle of host collaborators injected into the controller.
pub struct HostHooks {
    pub ui: Box<dyn UiSurfaces>,
    pub now_playing: Box<dyn NowPlaying>,
    pub audio_session: Box<dyn AudioSessionControl>,
}
