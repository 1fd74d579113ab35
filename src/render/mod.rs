// Fixed-layout chatbox pages

mod progress;
mod title;

pub use progress::{EMPTY_GLYPH, FILLED_GLYPH, IDLE_GLYPH, progress_bar};
pub use title::clean_title;
pub(crate) use title::{collapse_whitespace, strip_bracketed};

use crate::config::DisplayConfig;
use crate::models::MetricSnapshot;
use crate::rate::format_rate;

/// Placeholder for a reading the sensors did not report.
pub const SENTINEL: &str = "error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Header, clock, Download, Upload, progress bar, song.
    Status,
    /// Header, clock, CPU load, CPU power/temp, GPU load, GPU power/temp.
    Hardware,
}

impl Page {
    /// Which page is up at `unix_secs`. Flips every `switch_interval_secs`, so every
    /// tick agrees on the page without remembering the last one.
    pub fn at(unix_secs: i64, switch_interval_secs: u64) -> Self {
        let interval = switch_interval_secs.max(1) as i64;
        match unix_secs.div_euclid(interval).rem_euclid(2) {
            0 => Page::Status,
            _ => Page::Hardware,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Page::Status => 0,
            Page::Hardware => 1,
        }
    }
}

pub fn render_status(page: Page, snapshot: &MetricSnapshot, display: &DisplayConfig) -> String {
    let lines = match page {
        Page::Status => vec![
            display.page1_header.clone(),
            snapshot.time.clone(),
            format!("Download {}", format_rate(snapshot.rates.download_bps)),
            format!("Upload {}", format_rate(snapshot.rates.upload_bps)),
            snapshot.progress_bar.clone(),
            song_line(&snapshot.song, snapshot.artist.as_deref()),
        ],
        Page::Hardware => {
            let hw = &snapshot.hardware;
            vec![
                display.page2_header.clone(),
                snapshot.time.clone(),
                format!("{} {}%", snapshot.identity.cpu_name, reading(hw.cpu_load_pct)),
                format!("{}w {}℃", reading(hw.cpu_power_w), reading(hw.cpu_temp_c)),
                format!("{} {}%", snapshot.identity.gpu_name, reading(hw.gpu_load_pct)),
                format!("{}w {}℃", reading(hw.gpu_power_w), reading(hw.gpu_temp_c)),
            ]
        }
    };
    lines.join("\n")
}

fn song_line(song: &str, artist: Option<&str>) -> String {
    let song = (!song.is_empty()).then(|| format!("🎵 {song}"));
    let artist = artist
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(|a| format!("-{a}"));
    [song, artist].into_iter().flatten().collect::<Vec<_>>().join(" ")
}

fn reading(value: Option<i64>) -> String {
    value.map_or_else(|| SENTINEL.to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_line_omits_missing_parts() {
        assert_eq!(song_line("Song", Some("Band")), "🎵 Song -Band");
        assert_eq!(song_line("Song", None), "🎵 Song");
        assert_eq!(song_line("", Some("Band")), "-Band");
        assert_eq!(song_line("", Some("  ")), "");
    }

    #[test]
    fn missing_reading_is_sentinel() {
        assert_eq!(reading(None), "error");
        assert_eq!(reading(Some(42)), "42");
    }

    #[test]
    fn page_handles_pre_epoch_time() {
        assert_eq!(Page::at(-1, 30), Page::Hardware);
        assert_eq!(Page::at(-31, 30), Page::Status);
    }
}
