// Polling worker: each tick queries media, hardware and network, renders the
// current page and pushes it to the chatbox, then sleeps. Runs until stopped.
// The only state shared with the caller is the run flag.

use crate::config::AppConfig;
use crate::error::{SendError, StartupError, TelemetryError};
use crate::models::{
    HardwareIdentity, HardwareSample, MediaState, MetricSnapshot, NetCounterSample, NetRates,
};
use crate::rate::estimate_rates;
use crate::render::{Page, clean_title, progress_bar, render_status};
use crate::sources::{HardwareSource, MediaSource, NetworkSource, StatusSink};
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Notify, watch};
use tokio::time::Duration;
use tracing::Instrument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Not started yet.
    Idle,
    Running,
    /// Stopped by request or by a failed startup check.
    Stopped,
}

/// The collaborators one poller talks to.
pub struct PollerDeps<N, M, H, S> {
    pub network: N,
    pub media: M,
    pub hardware: H,
    pub sink: S,
    pub identity: HardwareIdentity,
}

/// Per-tick logic, separate from the sleep/stop loop so ticks can be driven directly.
pub struct StatusPoller<N, M, H, S> {
    deps: PollerDeps<N, M, H, S>,
    config: AppConfig,
    prev: NetCounterSample,
    hardware: HardwareSample,
    ticks_until_hardware: u32,
}

impl<N, M, H, S> StatusPoller<N, M, H, S>
where
    N: NetworkSource,
    M: MediaSource,
    H: HardwareSource,
    S: StatusSink,
{
    /// Check the configured interface exists and take the baseline counter sample.
    pub async fn start(deps: PollerDeps<N, M, H, S>, config: AppConfig) -> Result<Self, StartupError> {
        let interface = &config.network.interface;
        let available = deps
            .network
            .interfaces()
            .await
            .map_err(StartupError::Interfaces)?;
        if !available.iter().any(|name| name == interface) {
            return Err(StartupError::InterfaceNotFound {
                name: interface.clone(),
                available,
            });
        }
        let prev = deps
            .network
            .sample(interface)
            .await
            .map_err(StartupError::Interfaces)?;
        Ok(Self {
            deps,
            config,
            prev,
            hardware: HardwareSample::unavailable(),
            ticks_until_hardware: 0,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    async fn query_media(&self) -> MediaState {
        match self.deps.media.current().await {
            Ok(media) => media,
            Err(TelemetryError::Unavailable(reason)) => {
                tracing::debug!(reason = %reason, operation = "query_media", "no media session");
                MediaState::empty()
            }
            Err(e) => {
                tracing::warn!(error = %e, operation = "query_media", "media query failed");
                MediaState::empty()
            }
        }
    }

    /// Hardware is refreshed every `hardware_refresh_ticks` ticks; the last sample is reused in between.
    async fn query_hardware(&mut self) -> HardwareSample {
        if self.ticks_until_hardware == 0 {
            self.hardware = match self.deps.hardware.sample().await {
                Ok(sample) => sample,
                Err(e) => {
                    tracing::warn!(error = %e, operation = "query_hardware", "hardware query failed");
                    HardwareSample::unavailable()
                }
            };
            self.ticks_until_hardware = self.config.polling.hardware_refresh_ticks;
        }
        self.ticks_until_hardware = self.ticks_until_hardware.saturating_sub(1);
        self.hardware
    }

    /// Rates since the previous good sample. A failed read reports zero and keeps the old sample.
    async fn query_rates(&mut self) -> NetRates {
        match self.deps.network.sample(&self.config.network.interface).await {
            Ok(cur) => {
                let rates = estimate_rates(&self.prev, &cur);
                self.prev = cur;
                rates
            }
            Err(e) => {
                tracing::warn!(error = %e, operation = "query_network", "network counters unavailable");
                NetRates::default()
            }
        }
    }

    fn format_time(&self, now: &DateTime<Local>) -> String {
        let mut time = String::new();
        if write!(time, "{}", now.format(&self.config.display.time_format)).is_err() {
            time = now.format("%I:%M %p").to_string();
        }
        time
    }

    /// Steps 1-3 of a tick: gather everything the page needs.
    pub async fn collect(&mut self, now: DateTime<Local>) -> MetricSnapshot {
        let media = self.query_media().await;
        let hardware = self.query_hardware().await;
        let rates = self.query_rates().await;

        let song = media
            .title
            .as_deref()
            .map(|title| {
                clean_title(
                    title,
                    media.artist.as_deref(),
                    &self.config.title.junk_words,
                )
            })
            .unwrap_or_default();

        MetricSnapshot {
            time: self.format_time(&now),
            rates,
            hardware,
            identity: self.deps.identity.clone(),
            song,
            artist: media.artist,
            progress_bar: progress_bar(
                media.position_ms,
                media.duration_ms,
                self.config.display.progress_bar_length,
            ),
        }
    }

    pub fn page_at(&self, now: &DateTime<Local>) -> Page {
        Page::at(now.timestamp(), self.config.display.switch_interval_secs)
    }

    pub fn render(&self, now: &DateTime<Local>, snapshot: &MetricSnapshot) -> String {
        render_status(self.page_at(now), snapshot, &self.config.display)
    }

    /// One full tick: collect, render, dispatch. Returns the text that was sent.
    pub async fn tick(&mut self, now: DateTime<Local>) -> Result<String, SendError> {
        let snapshot = self.collect(now).await;
        let text = self.render(&now, &snapshot);
        self.deps.sink.send(&text).await?;
        Ok(text)
    }
}

/// Lifecycle and stop flag for one polling loop.
pub struct Worker {
    state: watch::Sender<LoopState>,
    running: AtomicBool,
    wake: Notify,
}

impl Default for Worker {
    fn default() -> Self {
        Self::new()
    }
}

impl Worker {
    pub fn new() -> Self {
        let (state, _) = watch::channel(LoopState::Idle);
        Self {
            state,
            running: AtomicBool::new(false),
            wake: Notify::new(),
        }
    }

    pub fn state(&self) -> LoopState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoopState> {
        self.state.subscribe()
    }

    /// Raise the run flag. A `stop` issued after this is never lost, even if the
    /// loop has not been polled yet.
    pub fn start(&self) {
        self.running.store(true, Ordering::SeqCst);
    }

    /// Ask the loop to finish. Takes effect at the next tick boundary; a pending sleep is cut short.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        // Wakes only a loop that is waiting; nothing is stored for a later run.
        self.wake.notify_waiters();
    }

    /// Start checks, then tick until stopped. Returns the startup error if the loop never began.
    /// Calling it again after a stop restarts with the given config.
    pub async fn run<N, M, H, S>(
        &self,
        deps: PollerDeps<N, M, H, S>,
        config: AppConfig,
    ) -> Result<(), StartupError>
    where
        N: NetworkSource,
        M: MediaSource,
        H: HardwareSource,
        S: StatusSink,
    {
        self.start();
        self.run_started(deps, config).await
    }

    /// The loop body of `run`, for callers that already raised the flag with `start`.
    async fn run_started<N, M, H, S>(
        &self,
        deps: PollerDeps<N, M, H, S>,
        config: AppConfig,
    ) -> Result<(), StartupError>
    where
        N: NetworkSource,
        M: MediaSource,
        H: HardwareSource,
        S: StatusSink,
    {
        let tick_interval = Duration::from_millis(config.polling.tick_interval_ms);
        let error_delay = Duration::from_millis(config.polling.error_delay_ms);

        let mut poller = match StatusPoller::start(deps, config).await {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(error = %e, operation = "start", "polling loop not started");
                self.running.store(false, Ordering::SeqCst);
                self.state.send_replace(LoopState::Stopped);
                return Err(e);
            }
        };

        self.state.send_replace(LoopState::Running);
        tracing::info!(
            interface = %poller.config().network.interface,
            tick_interval_ms = tick_interval.as_millis() as u64,
            "polling loop running"
        );

        let mut ticks: u64 = 0;
        loop {
            // Registered before the flag check so a stop in between still wakes the sleep.
            let wake = self.wake.notified();
            tokio::pin!(wake);
            wake.as_mut().enable();
            if !self.running.load(Ordering::SeqCst) {
                break;
            }

            let now = Local::now();
            let delay = match poller.tick(now).await {
                Ok(text) => {
                    ticks += 1;
                    tracing::debug!(tick = ticks, page = poller.page_at(&now).index(), text = %text, "status sent");
                    tick_interval
                }
                Err(e) => {
                    tracing::warn!(error = %e, operation = "send_status", "tick failed");
                    error_delay
                }
            };
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = &mut wake => {}
            }
        }

        self.state.send_replace(LoopState::Stopped);
        tracing::info!(ticks, "polling loop stopped");
        Ok(())
    }
}

/// Spawn the loop on the runtime with the run flag already raised. Stop through the
/// returned worker; the handle yields the startup result.
pub fn spawn<N, M, H, S>(
    deps: PollerDeps<N, M, H, S>,
    config: AppConfig,
) -> (
    Arc<Worker>,
    tokio::task::JoinHandle<Result<(), StartupError>>,
)
where
    N: NetworkSource + 'static,
    M: MediaSource + 'static,
    H: HardwareSource + 'static,
    S: StatusSink + 'static,
{
    let worker = Arc::new(Worker::new());
    let span = tracing::span!(
        tracing::Level::DEBUG,
        "worker",
        interface = %config.network.interface
    );
    worker.start();
    let handle = {
        let worker = worker.clone();
        tokio::spawn(async move { worker.run_started(deps, config).await }.instrument(span))
    };
    (worker, handle)
}
