// Print the hardware monitor's sensor tree and what the poller would read from it.
//
// Usage: cargo run --bin dump_sensors -- [URL]
//   URL  default: hardware.lhm_url from CONFIG_FILE / config.toml

use osc_chatbox::config::AppConfig;
use osc_chatbox::lhm::{LhmClient, format_tree, parse_sensors};
use std::env;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let url = env::args().nth(1).unwrap_or(config.hardware.lhm_url);

    let client = LhmClient::new(
        url,
        Duration::from_secs(config.hardware.request_timeout_secs),
    )?;
    let tree = client
        .fetch_tree()
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", client.url(), e))?;

    print!("{}", format_tree(&tree));
    println!();
    println!("{}", serde_json::to_string_pretty(&parse_sensors(&tree))?);
    Ok(())
}
