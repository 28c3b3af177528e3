use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One of the two mutually-exclusive playback contexts.  At most one video
/// and one podcast session exist at a time; starting the video surface hides
/// any podcast UI, the reverse does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Video,
    Podcast,
}

impl Surface {
    /// Label used in outbound event payloads ("video" / "podcast").
    pub fn label(&self) -> &'static str {
        match self {
            Surface::Video => "video",
            Surface::Podcast => "podcast",
        }
    }
}

/// A validated inbound command.  Parsing is deliberately tolerant: the host
/// sends loosely-typed string maps and malformed traffic must degrade to a
/// silent no-op, never an error (compatibility contract with the host).
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Video `play`, or podcast `play`: start/resume the stream, optionally
    /// at an offset.  `url` may be absent (resume of whatever is loaded).
    Play {
        url: Option<String>,
        seconds: Option<f64>,
    },
    /// Podcast `load`: load a stream and start it.
    Load { url: Option<String> },
    /// Podcast `seek`.  Unparsable `seconds` drops the whole command.
    Seek { seconds: f64 },
    /// Podcast `rate`.  Unparsable values fall back to 1.0.
    Rate { rate: f64 },
    /// Podcast `volume`.  Unparsable values fall back to 1.0.
    Volume { volume: f64 },
    /// Podcast `muted`.  Only the literal string "true" mutes.
    Muted { muted: bool },
    Pause,
    Terminate,
    /// Podcast `metadata`: any subset of the three fields may be present.
    Metadata {
        episode_name: Option<String>,
        podcast_name: Option<String>,
        artwork_url: Option<String>,
    },
}

impl Command {
    /// Parse a raw host message for the given surface.  Returns `None` for
    /// anything unrecognised: missing `action`, unknown action, an action the
    /// surface does not support, or a `seek` whose `seconds` fails to parse.
    pub fn parse(surface: Surface, message: &HashMap<String, String>) -> Option<Command> {
        let action = message.get("action")?.as_str();

        // The video surface only understands `play`.
        if surface == Surface::Video && action != "play" {
            return None;
        }

        match action {
            "play" => Some(Command::Play {
                url: get_string(message, "url"),
                seconds: get_f64(message, "seconds"),
            }),
            "load" => Some(Command::Load {
                url: get_string(message, "url"),
            }),
            "seek" => get_f64(message, "seconds").map(|seconds| Command::Seek { seconds }),
            "rate" => Some(Command::Rate {
                rate: get_f64(message, "rate").unwrap_or(1.0),
            }),
            "volume" => Some(Command::Volume {
                volume: get_f64(message, "volume").unwrap_or(1.0),
            }),
            "muted" => Some(Command::Muted {
                muted: message.get("muted").map(|v| v == "true").unwrap_or(false),
            }),
            "pause" => Some(Command::Pause),
            "terminate" => Some(Command::Terminate),
            "metadata" => Some(Command::Metadata {
                episode_name: get_string(message, "episodeName"),
                podcast_name: get_string(message, "podcastName"),
                artwork_url: get_string(message, "podcastImageUrl"),
            }),
            _ => None,
        }
    }
}

fn get_string(message: &HashMap<String, String>, key: &str) -> Option<String> {
    message.get(key).cloned()
}

fn get_f64(message: &HashMap<String, String>, key: &str) -> Option<f64> {
    message.get(key).and_then(|v| v.parse::<f64>().ok())
}
