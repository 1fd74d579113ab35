// Now-playing media models

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaState {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub position_ms: u64,
    pub duration_ms: u64,
}

impl MediaState {
    /// No session: no song, no artist, empty timeline.
    pub fn empty() -> Self {
        Self::default()
    }
}
