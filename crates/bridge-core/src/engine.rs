use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no stream loaded")]
    NoStream,
    #[error("stream rejected: {0}")]
    Rejected(String),
}

/// Opaque playback engine behind one surface.  Owns at most one active
/// stream; `load` replaces any previous stream atomically from the caller's
/// perspective and resets position reporting to (0, 0).
///
/// All methods besides `load` are infallible by contract: the engine absorbs
/// transient faults and surfaces them through `has_error()` instead, which
/// the progress observer consults before emitting ticks.
pub trait PlayerEngine: Send {
    fn load(&mut self, url: &str) -> Result<(), EngineError>;
    fn play(&mut self);
    fn pause(&mut self);
    /// Halt playback and rewind to zero.  The loaded stream stays loaded.
    fn stop(&mut self);
    fn seek(&mut self, seconds: f64);
    fn set_rate(&mut self, rate: f64);
    fn set_volume(&mut self, volume: f64);
    fn set_muted(&mut self, muted: bool);
    /// Effective playback rate; exactly 0.0 while paused/stopped.
    fn rate(&self) -> f64;
    fn current_time(&self) -> f64;
    /// NaN while the timeline is unknown (nothing loaded / still buffering).
    fn duration(&self) -> f64;
    fn has_error(&self) -> bool;
}
