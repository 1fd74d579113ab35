// Host hardware: names via local shell commands, sensors via the hardware monitor
// with sysinfo filling in CPU load.

use crate::error::TelemetryError;
use crate::lhm::LhmClient;
use crate::models::{HardwareIdentity, HardwareSample};
use crate::render::{collapse_whitespace, strip_bracketed};
use crate::sources::HardwareSource;
use crate::sysinfo_repo::SysinfoRepo;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

pub const UNKNOWN_CPU: &str = "CPU Unknown";
pub const UNKNOWN_GPU: &str = "GPU Unknown";

/// "Intel(R) Core(TM) i7-9700K CPU @ 3.60GHz" -> "Intel Core i7-9700K CPU".
pub fn clean_hardware_name(name: &str) -> String {
    let name = strip_bracketed(name);
    let name = name.split('@').next().unwrap_or_default();
    collapse_whitespace(name)
}

/// Run a command and return trimmed stdout. Fails on timeout or non-zero exit.
pub async fn run_command(
    program: &str,
    args: &[&str],
    limit: Duration,
) -> Result<String, TelemetryError> {
    let output = timeout(limit, Command::new(program).args(args).kill_on_drop(true).output())
        .await
        .map_err(|_| TelemetryError::Timeout(limit.as_secs()))??;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(TelemetryError::CommandFailed(format!(
            "{} exited with {}: {}",
            program,
            output.status,
            stderr.trim()
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn first_line(s: &str) -> Option<&str> {
    s.lines().map(str::trim).find(|l| !l.is_empty())
}

/// GPU name from `lspci` output: first VGA or 3D controller.
pub fn parse_lspci_gpu(output: &str) -> Option<String> {
    output
        .lines()
        .filter(|l| l.contains("VGA compatible controller") || l.contains("3D controller"))
        .find_map(|l| {
            let (_, rest) = l.split_once("controller")?;
            let name = rest.trim_start_matches(':').trim();
            (!name.is_empty()).then(|| name.to_string())
        })
}

async fn query_cpu_name(sysinfo: &SysinfoRepo, limit: Duration) -> Result<String, TelemetryError> {
    if cfg!(windows) {
        let out = run_command(
            "powershell",
            &["-Command", "(Get-CimInstance Win32_Processor).Name"],
            limit,
        )
        .await?;
        first_line(&out)
            .map(str::to_string)
            .ok_or_else(|| TelemetryError::Parse("empty processor name".into()))
    } else {
        sysinfo.get_cpu_model().await
    }
}

async fn query_gpu_name(limit: Duration) -> Result<String, TelemetryError> {
    if cfg!(windows) {
        let out = run_command(
            "powershell",
            &["-Command", "(Get-CimInstance Win32_VideoController).Name"],
            limit,
        )
        .await?;
        first_line(&out)
            .map(str::to_string)
            .ok_or_else(|| TelemetryError::Parse("empty video controller name".into()))
    } else if cfg!(target_os = "macos") {
        let out = run_command("system_profiler", &["SPDisplaysDataType"], limit).await?;
        out.lines()
            .find_map(|l| l.trim().strip_prefix("Chipset Model:"))
            .map(|s| s.trim().to_string())
            .ok_or_else(|| TelemetryError::Parse("no chipset model".into()))
    } else {
        let out = run_command("lspci", &[], limit).await?;
        parse_lspci_gpu(&out).ok_or_else(|| TelemetryError::Parse("no display controller".into()))
    }
}

/// CPU and GPU names, cleaned. Failures fall back to "CPU Unknown" / "GPU Unknown".
pub async fn detect_identity(sysinfo: &SysinfoRepo, limit: Duration) -> HardwareIdentity {
    let cpu = match query_cpu_name(sysinfo, limit).await {
        Ok(name) => clean_hardware_name(&name),
        Err(e) => {
            tracing::warn!(error = %e, operation = "detect_cpu", "CPU name unavailable");
            UNKNOWN_CPU.to_string()
        }
    };
    let gpu = match query_gpu_name(limit).await {
        Ok(name) => clean_hardware_name(&name),
        Err(e) => {
            tracing::warn!(error = %e, operation = "detect_gpu", "GPU name unavailable");
            UNKNOWN_GPU.to_string()
        }
    };
    HardwareIdentity::new(cpu, gpu)
}

/// Hardware monitor readings, with sysinfo's CPU usage when the monitor has none.
/// Fails only when neither answers.
pub struct HostHardware {
    lhm: LhmClient,
    sysinfo: Arc<SysinfoRepo>,
}

impl HostHardware {
    pub fn new(lhm: LhmClient, sysinfo: Arc<SysinfoRepo>) -> Self {
        Self { lhm, sysinfo }
    }
}

impl HardwareSource for HostHardware {
    async fn sample(&self) -> Result<HardwareSample, TelemetryError> {
        let fallback = self.sysinfo.get_cpu_usage().await.map(|usage| HardwareSample {
            cpu_load_pct: Some(usage as i64),
            ..HardwareSample::unavailable()
        });
        match (self.lhm.sample().await, fallback) {
            (Ok(primary), Ok(fallback)) => Ok(primary.or(fallback)),
            (Ok(primary), Err(_)) => Ok(primary),
            (Err(e), Ok(fallback)) => {
                tracing::debug!(error = %e, operation = "lhm_sample", "hardware monitor unavailable");
                Ok(fallback)
            }
            (Err(e), Err(_)) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_name_drops_marks_and_clock() {
        assert_eq!(
            clean_hardware_name("Intel(R) Core(TM) i7-9700K CPU @ 3.60GHz"),
            "Intel Core i7-9700K CPU"
        );
        assert_eq!(
            clean_hardware_name("  AMD Radeon   RX 6800 XT "),
            "AMD Radeon RX 6800 XT"
        );
    }

    #[test]
    fn lspci_picks_first_display_controller() {
        let out = "00:00.0 Host bridge: Intel Corporation 8th Gen Core Processor Host Bridge\n\
                   01:00.0 VGA compatible controller: NVIDIA Corporation GA102 [GeForce RTX 3080] (rev a1)\n\
                   02:00.0 3D controller: Other";
        assert_eq!(
            parse_lspci_gpu(out).as_deref(),
            Some("NVIDIA Corporation GA102 [GeForce RTX 3080] (rev a1)")
        );
        assert_eq!(parse_lspci_gpu("00:00.0 Host bridge: x"), None);
    }

    #[test]
    fn first_line_skips_blanks() {
        assert_eq!(first_line("\n  \nGPU A\nGPU B"), Some("GPU A"));
        assert_eq!(first_line(""), None);
    }
}
