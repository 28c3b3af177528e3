use serde::Serialize;

use crate::command::Surface;

/// Outbound event delivered to the host.  Field names and the 4-fractional-
/// digit time formatting are part of the wire contract; the host parses these
/// strings verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostEvent {
    #[serde(rename = "type")]
    pub surface: Surface,
    pub action: EventAction,
    #[serde(rename = "currentTime", skip_serializing_if = "Option::is_none")]
    pub current_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventAction {
    Tick,
    Pause,
    /// "No valid position yet" — sent in place of a tick while the podcast
    /// engine reports a zero/NaN timeline.
    Init,
}

/// Format seconds with exactly four fractional digits.
pub fn format_secs(secs: f64) -> String {
    format!("{:.4}", secs)
}

impl HostEvent {
    pub fn video_tick(current_time: f64) -> Self {
        Self {
            surface: Surface::Video,
            action: EventAction::Tick,
            current_time: Some(format_secs(current_time)),
            duration: None,
        }
    }

    pub fn video_pause() -> Self {
        Self {
            surface: Surface::Video,
            action: EventAction::Pause,
            current_time: None,
            duration: None,
        }
    }

    pub fn podcast_tick(current_time: f64, duration: f64) -> Self {
        Self {
            surface: Surface::Podcast,
            action: EventAction::Tick,
            current_time: Some(format_secs(current_time)),
            duration: Some(format_secs(duration)),
        }
    }

    pub fn podcast_init() -> Self {
        Self {
            surface: Surface::Podcast,
            action: EventAction::Init,
            current_time: None,
            duration: None,
        }
    }
}
