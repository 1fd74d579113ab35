use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub osc: OscConfig,
    pub network: NetworkConfig,
    pub display: DisplayConfig,
    pub polling: PollingConfig,
    pub hardware: HardwareConfig,
    pub title: TitleConfig,
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OscConfig {
    pub host: String,
    pub port: u16,
    /// OSC address of the chatbox input field.
    pub address: String,
    /// Second message argument: show the text immediately instead of filling the keyboard.
    pub immediate: bool,
}

impl Default for OscConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 9000,
            address: "/chatbox/input".into(),
            immediate: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Interface whose counters feed the Download/Upload lines. Must exist at start.
    pub interface: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            interface: "Ethernet".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub page1_header: String,
    pub page2_header: String,
    pub switch_interval_secs: u64,
    pub progress_bar_length: usize,
    /// chrono format string for the clock line.
    pub time_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page1_header: "Thx for using boot's osc code".into(),
            page2_header: "hi put your text here :3".into(),
            switch_interval_secs: 30,
            progress_bar_length: 13,
            time_format: "%I:%M %p".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub tick_interval_ms: u64,
    /// Delay before the next tick after a failed one.
    pub error_delay_ms: u64,
    /// Query the hardware monitor once every N ticks; reuse the last sample in between.
    pub hardware_refresh_ticks: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 5000,
            error_delay_ms: 1000,
            hardware_refresh_ticks: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    /// LibreHardwareMonitor web server JSON endpoint.
    pub lhm_url: String,
    pub request_timeout_secs: u64,
    /// Timeout for shell invocations (hardware names, media session).
    pub command_timeout_secs: u64,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            lhm_url: "http://localhost:8085/data.json".into(),
            request_timeout_secs: 5,
            command_timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TitleConfig {
    /// Removed from song titles, case-insensitive, whole words only.
    pub junk_words: Vec<String>,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            junk_words: [
                "official",
                "video",
                "lyrics",
                "audio",
                "hd",
                "4k",
                "remastered",
                "live",
                "visualizer",
                "explicit",
                "clean",
                "version",
                "mix",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Only follow this MPRIS player (e.g. "spotify"); unset follows whichever is active.
    /// Not used on Windows, where the system media session picks the player.
    pub player: Option<String>,
}

impl AppConfig {
    /// Load from `CONFIG_FILE` (default `config.toml`). A missing file means built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        match std::fs::read_to_string(&path) {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path, "config file not found, using defaults");
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(anyhow::anyhow!("reading {}: {}", path, e)),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.osc.host.is_empty(), "osc.host must be non-empty");
        anyhow::ensure!(
            self.osc.port > 0,
            "osc.port must be between 1 and 65535, got {}",
            self.osc.port
        );
        anyhow::ensure!(
            self.osc.address.starts_with('/'),
            "osc.address must start with '/', got {:?}",
            self.osc.address
        );
        anyhow::ensure!(
            !self.network.interface.is_empty(),
            "network.interface must be non-empty"
        );
        anyhow::ensure!(
            self.display.switch_interval_secs > 0,
            "display.switch_interval_secs must be > 0, got {}",
            self.display.switch_interval_secs
        );
        anyhow::ensure!(
            self.display.progress_bar_length > 0,
            "display.progress_bar_length must be > 0, got {}",
            self.display.progress_bar_length
        );
        anyhow::ensure!(
            !self.display.time_format.is_empty()
                && StrftimeItems::new(&self.display.time_format).all(|i| !matches!(i, Item::Error)),
            "display.time_format is not a valid strftime format: {:?}",
            self.display.time_format
        );
        anyhow::ensure!(
            self.polling.tick_interval_ms > 0,
            "polling.tick_interval_ms must be > 0, got {}",
            self.polling.tick_interval_ms
        );
        anyhow::ensure!(
            self.polling.hardware_refresh_ticks > 0,
            "polling.hardware_refresh_ticks must be > 0, got {}",
            self.polling.hardware_refresh_ticks
        );
        anyhow::ensure!(
            self.hardware.lhm_url.starts_with("http://")
                || self.hardware.lhm_url.starts_with("https://"),
            "hardware.lhm_url must be an http(s) URL, got {:?}",
            self.hardware.lhm_url
        );
        anyhow::ensure!(
            self.hardware.request_timeout_secs > 0,
            "hardware.request_timeout_secs must be > 0, got {}",
            self.hardware.request_timeout_secs
        );
        anyhow::ensure!(
            self.hardware.command_timeout_secs > 0,
            "hardware.command_timeout_secs must be > 0, got {}",
            self.hardware.command_timeout_secs
        );
        Ok(())
    }
}
