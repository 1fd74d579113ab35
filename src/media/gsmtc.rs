// Now-playing info from the Windows media session (GlobalSystemMediaTransportControls).

use super::media_state_from_timeline;
use crate::error::TelemetryError;
use crate::models::MediaState;
use crate::sources::MediaSource;
use tracing::instrument;
use windows::Media::Control::GlobalSystemMediaTransportControlsSessionManager;

/// Whichever app Windows currently reports as the media session.
#[derive(Debug, Default)]
pub struct WindowsMedia;

impl WindowsMedia {
    pub fn new() -> Self {
        Self
    }
}

fn read_session() -> Result<MediaState, TelemetryError> {
    let manager = GlobalSystemMediaTransportControlsSessionManager::RequestAsync()?.get()?;
    // No session comes back as a null interface, which surfaces as an error.
    let Ok(session) = manager.GetCurrentSession() else {
        return Err(TelemetryError::Unavailable("no media session".into()));
    };
    let props = session.TryGetMediaPropertiesAsync()?.get()?;
    let timeline = session.GetTimelineProperties()?;
    Ok(media_state_from_timeline(
        &props.Title()?.to_string_lossy(),
        &props.Artist()?.to_string_lossy(),
        timeline.Position()?.Duration,
        timeline.EndTime()?.Duration,
    ))
}

impl MediaSource for WindowsMedia {
    #[instrument(skip(self), fields(repo = "gsmtc", operation = "current_media"))]
    async fn current(&self) -> Result<MediaState, TelemetryError> {
        // WinRT async operations are awaited with a blocking `get`.
        tokio::task::spawn_blocking(read_session).await?
    }
}
