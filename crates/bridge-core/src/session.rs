use bridge_proto::command::Surface;

use crate::observer::ProgressObserver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Empty,
    Loading,
    Playing,
    Paused,
}

/// Per-surface session bookkeeping.  `stream_url` is the single source of
/// truth for dedup decisions: it only changes through a load/play whose URL
/// differs from the current value.
pub struct StreamSession {
    pub surface: Surface,
    pub stream_url: Option<String>,
    pub rate: f64,
    pub volume: f64,
    pub muted: bool,
    pub state: PlaybackState,
    pub observer: Option<ProgressObserver>,
}

impl StreamSession {
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            stream_url: None,
            rate: 1.0,
            volume: 1.0,
            muted: false,
            state: PlaybackState::Empty,
            observer: None,
        }
    }

    /// Dedup policy: reload only for a present URL that differs from the
    /// currently loaded one.
    pub fn needs_reload(&self, url: Option<&str>) -> bool {
        match url {
            Some(url) => self.stream_url.as_deref() != Some(url),
            None => false,
        }
    }

    /// Back to `Empty`: identity cleared, observer dropped (which aborts its
    /// timer task), per-stream settings back to defaults.
    pub fn reset(&mut self) {
        self.stream_url = None;
        self.rate = 1.0;
        self.volume = 1.0;
        self.muted = false;
        self.state = PlaybackState::Empty;
        self.observer = None;
    }
}
