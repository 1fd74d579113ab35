// Throughput estimation and formatting

use osc_chatbox::models::{NetCounterSample, NetRates};
use osc_chatbox::rate::{estimate_rates, format_rate};

fn sample(sent: u64, recv: u64, t: f64) -> NetCounterSample {
    NetCounterSample::new(sent, recv, t)
}

#[test]
fn rate_is_delta_over_elapsed() {
    let cases = [
        (0u64, 0u64, 1.0f64),
        (1024, 2048, 1.0),
        (5000, 10, 2.5),
        (1, 1_000_000, 0.1),
    ];
    for (d_sent, d_recv, elapsed) in cases {
        let prev = sample(1_000, 2_000, 50.0);
        let cur = sample(1_000 + d_sent, 2_000 + d_recv, 50.0 + elapsed);
        let rates = estimate_rates(&prev, &cur);
        assert!(rates.upload_bps >= 0.0 && rates.download_bps >= 0.0);
        assert!((rates.upload_bps - d_sent as f64 / elapsed).abs() < 1e-6);
        assert!((rates.download_bps - d_recv as f64 / elapsed).abs() < 1e-6);
    }
}

#[test]
fn zero_or_negative_elapsed_is_zero_rate() {
    let prev = sample(0, 0, 10.0);
    let same_time = sample(4096, 4096, 10.0);
    let earlier = sample(4096, 4096, 9.0);
    assert_eq!(estimate_rates(&prev, &same_time), NetRates::default());
    assert_eq!(estimate_rates(&prev, &earlier), NetRates::default());
}

#[test]
fn counter_reset_clamps_each_direction_to_zero() {
    let prev = sample(10_000, 10_000, 0.0);
    let cur = sample(100, 12_048, 1.0);
    let rates = estimate_rates(&prev, &cur);
    assert_eq!(rates.upload_bps, 0.0);
    assert_eq!(rates.download_bps, 2048.0);
}

#[test]
fn format_below_one_mib_uses_kb_one_decimal() {
    assert_eq!(format_rate(0.0), "0.0 KB/s");
    assert_eq!(format_rate(1023.0), "1.0 KB/s");
    assert_eq!(format_rate(1536.0), "1.5 KB/s");
    assert_eq!(format_rate(1024.0 * 1024.0 - 1.0), "1024.0 KB/s");
}

#[test]
fn format_from_one_mib_uses_mb_two_decimals() {
    assert_eq!(format_rate(1024.0 * 1024.0), "1.00 MB/s");
    assert_eq!(format_rate(2.0 * 1024.0 * 1024.0), "2.00 MB/s");
    assert_eq!(format_rate(12.5 * 1024.0 * 1024.0), "12.50 MB/s");
}
