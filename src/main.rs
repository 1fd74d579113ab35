use anyhow::Result;
use osc_chatbox::*;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        ) {
            Ok(s) => s,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    tracing::info!("{}", version::banner());
    let app_config = config::AppConfig::load()?;
    let command_timeout = Duration::from_secs(app_config.hardware.command_timeout_secs);

    let sysinfo_repo = Arc::new(sysinfo_repo::SysinfoRepo::new());
    let identity = hardware::detect_identity(&sysinfo_repo, command_timeout).await;
    tracing::info!(
        cpu = %identity.cpu_name,
        cpu_vendor = identity.cpu_vendor.as_str(),
        gpu = %identity.gpu_name,
        "hardware detected"
    );

    let lhm = lhm::LhmClient::new(
        app_config.hardware.lhm_url.clone(),
        Duration::from_secs(app_config.hardware.request_timeout_secs),
    )?;
    lhm.diagnose().await;

    let sink = osc::OscChatbox::connect(
        &app_config.osc.host,
        app_config.osc.port,
        app_config.osc.address.clone(),
        app_config.osc.immediate,
    )
    .await?;
    tracing::info!(target_addr = %sink.target(), address = %app_config.osc.address, "sending to chatbox");

    #[cfg(windows)]
    let media = media::WindowsMedia::new();
    #[cfg(not(windows))]
    let media = media::PlayerctlMedia::new(app_config.media.player.clone(), command_timeout);

    let deps = worker::PollerDeps {
        network: sysinfo_repo.clone(),
        media,
        hardware: hardware::HostHardware::new(lhm, sysinfo_repo),
        sink,
        identity,
    };
    let (worker, mut handle) = worker::spawn(deps, app_config);

    tokio::select! {
        result = &mut handle => {
            // Only returns on its own when the startup checks fail.
            result??;
        }
        _ = shutdown_signal() => {
            tracing::info!("Received shutdown signal");
            worker.stop();
            handle.await??;
        }
    }

    Ok(())
}
