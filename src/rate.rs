// Byte counters -> throughput, and throughput -> display text.

use crate::models::{NetCounterSample, NetRates};

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

/// Upload/download rates between two samples.
///
/// Zero when no time has elapsed (or the clock went backwards). A counter that
/// went down (wrap, interface reset) yields zero for that direction.
pub fn estimate_rates(prev: &NetCounterSample, cur: &NetCounterSample) -> NetRates {
    let elapsed = cur.timestamp - prev.timestamp;
    if elapsed.is_nan() || elapsed <= 0.0 {
        return NetRates::default();
    }
    NetRates {
        upload_bps: per_second(prev.bytes_sent, cur.bytes_sent, elapsed),
        download_bps: per_second(prev.bytes_recv, cur.bytes_recv, elapsed),
    }
}

fn per_second(prev: u64, cur: u64, elapsed: f64) -> f64 {
    match cur.checked_sub(prev) {
        Some(delta) => delta as f64 / elapsed,
        None => 0.0,
    }
}

/// `"X.Y KB/s"` below 1 MiB/s, `"X.YY MB/s"` from there up (base 1024).
pub fn format_rate(bytes_per_sec: f64) -> String {
    if bytes_per_sec >= MIB {
        format!("{:.2} MB/s", bytes_per_sec / MIB)
    } else {
        format!("{:.1} KB/s", bytes_per_sec.max(0.0) / KIB)
    }
}
