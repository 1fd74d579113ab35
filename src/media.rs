// Now-playing info from the desktop media session: MPRIS through playerctl, or the
// Windows media transport controls.

#[cfg(windows)]
mod gsmtc;

#[cfg(windows)]
pub use gsmtc::WindowsMedia;

use crate::error::TelemetryError;
use crate::hardware::run_command;
use crate::models::MediaState;
use crate::sources::MediaSource;
use std::time::Duration;
use tracing::instrument;

/// Field separator in the playerctl format string (ASCII unit separator).
const SEP: &str = "\u{1f}";

pub struct PlayerctlMedia {
    player: Option<String>,
    timeout: Duration,
}

impl PlayerctlMedia {
    /// `player` restricts to one MPRIS player (e.g. "spotify"); `None` follows the active one.
    pub fn new(player: Option<String>, timeout: Duration) -> Self {
        Self { player, timeout }
    }

    fn format_arg() -> String {
        ["{{title}}", "{{artist}}", "{{position}}", "{{mpris:length}}"].join(SEP)
    }
}

/// Parse one line of `playerctl metadata --format` output. Times are microseconds.
pub fn parse_playerctl(line: &str) -> Result<MediaState, TelemetryError> {
    let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split(SEP).collect();
    let &[title, artist, position, length] = fields.as_slice() else {
        return Err(TelemetryError::Parse(format!(
            "expected 4 fields, got {}",
            fields.len()
        )));
    };
    let micros_to_ms = |s: &str| s.trim().parse::<u64>().map_or(0, |us| us / 1000);
    Ok(MediaState {
        title: non_empty(title),
        artist: non_empty(artist),
        position_ms: micros_to_ms(position),
        duration_ms: micros_to_ms(length),
    })
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// 100 ns ticks per millisecond (WinRT `TimeSpan` unit).
const TICKS_PER_MS: u64 = 10_000;

/// Media state from session text and a timeline in 100 ns ticks. Negative ticks read as zero.
pub fn media_state_from_timeline(
    title: &str,
    artist: &str,
    position_ticks: i64,
    end_ticks: i64,
) -> MediaState {
    let ticks_to_ms = |ticks: i64| u64::try_from(ticks).map_or(0, |t| t / TICKS_PER_MS);
    MediaState {
        title: non_empty(title),
        artist: non_empty(artist),
        position_ms: ticks_to_ms(position_ticks),
        duration_ms: ticks_to_ms(end_ticks),
    }
}

impl MediaSource for PlayerctlMedia {
    #[instrument(skip(self), fields(repo = "playerctl", operation = "current_media"))]
    async fn current(&self) -> Result<MediaState, TelemetryError> {
        let format = Self::format_arg();
        let mut args: Vec<&str> = Vec::with_capacity(5);
        if let Some(player) = &self.player {
            args.extend(["--player", player.as_str()]);
        }
        args.extend(["metadata", "--format", format.as_str()]);

        match run_command("playerctl", &args, self.timeout).await {
            Ok(out) => parse_playerctl(&out),
            Err(TelemetryError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Err(
                TelemetryError::Unavailable("playerctl not installed".into()),
            ),
            // "No players found" and friends.
            Err(TelemetryError::CommandFailed(msg)) => Err(TelemetryError::Unavailable(msg)),
            Err(e) => Err(e),
        }
    }
}
