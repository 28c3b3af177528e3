use std::time::Instant;

use crate::engine::{EngineError, PlayerEngine};

/// Wall-clock engine used by the stdio harness and coarse tests.  Position
/// advances at the configured rate while playing; duration is fixed per
/// loaded stream.
pub struct SimulatedEngine {
    url: Option<String>,
    stream_duration: f64,
    rate: f64,
    volume: f64,
    muted: bool,
    playing: bool,
    base_pos: f64,
    started_at: Option<Instant>,
}

impl SimulatedEngine {
    pub fn new(stream_duration: f64) -> Self {
        Self {
            url: None,
            stream_duration,
            rate: 1.0,
            volume: 1.0,
            muted: false,
            playing: false,
            base_pos: 0.0,
            started_at: None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Fold wall-clock progress into `base_pos` so rate changes take effect
    /// from the current position.
    fn settle(&mut self) {
        if let Some(started) = self.started_at.take() {
            self.base_pos += started.elapsed().as_secs_f64() * self.rate;
        }
        if self.playing {
            self.started_at = Some(Instant::now());
        }
    }
}

impl PlayerEngine for SimulatedEngine {
    fn load(&mut self, url: &str) -> Result<(), EngineError> {
        self.url = Some(url.to_string());
        self.playing = false;
        self.base_pos = 0.0;
        self.started_at = None;
        Ok(())
    }

    fn play(&mut self) {
        if self.url.is_none() {
            return;
        }
        self.playing = true;
        self.settle();
    }

    fn pause(&mut self) {
        self.playing = false;
        self.settle();
    }

    fn stop(&mut self) {
        self.playing = false;
        self.started_at = None;
        self.base_pos = 0.0;
    }

    fn seek(&mut self, seconds: f64) {
        self.base_pos = seconds.max(0.0);
        if self.playing {
            self.started_at = Some(Instant::now());
        }
    }

    fn set_rate(&mut self, rate: f64) {
        self.settle();
        self.rate = rate;
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn rate(&self) -> f64 {
        if self.playing {
            self.rate
        } else {
            0.0
        }
    }

    fn current_time(&self) -> f64 {
        let elapsed = self
            .started_at
            .map(|t| t.elapsed().as_secs_f64() * self.rate)
            .unwrap_or(0.0);
        self.base_pos + elapsed
    }

    fn duration(&self) -> f64 {
        if self.url.is_some() {
            self.stream_duration
        } else {
            f64::NAN
        }
    }

    fn has_error(&self) -> bool {
        false
    }
}
