//! Human-readable units for the results block
//!
//! Byte quantities use binary (1024-based) units, rates use decimal K/M/G.

use std::time::Duration;

const KIB: f64 = 1024.0;
const MIB: f64 = KIB * 1024.0;
const GIB: f64 = MIB * 1024.0;
const TIB: f64 = GIB * 1024.0;

/// Format a latency or elapsed time
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use ioloader::util::units::format_duration;
///
/// assert_eq!(format_duration(Duration::from_nanos(500)), "500ns");
/// assert_eq!(format_duration(Duration::from_nanos(1500)), "1.50us");
/// assert_eq!(format_duration(Duration::from_micros(2500)), "2.50ms");
/// assert_eq!(format_duration(Duration::from_secs(5)), "5.00s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    match nanos {
        0..=999 => format!("{}ns", nanos),
        1_000..=999_999 => format!("{:.2}us", nanos as f64 / 1e3),
        1_000_000..=999_999_999 => format!("{:.2}ms", nanos as f64 / 1e6),
        _ => format!("{:.2}s", nanos as f64 / 1e9),
    }
}

/// Format an operations-per-second figure
pub fn format_rate(rate: f64) -> String {
    if rate < 1e3 {
        format!("{:.0}", rate)
    } else if rate < 1e6 {
        format!("{:.2}K", rate / 1e3)
    } else if rate < 1e9 {
        format!("{:.2}M", rate / 1e6)
    } else {
        format!("{:.2}G", rate / 1e9)
    }
}

/// Per-second rate of `count` over `duration`; zero for an empty duration
pub fn per_second(count: u64, duration: Duration) -> f64 {
    let seconds = duration.as_secs_f64();
    if seconds > 0.0 {
        count as f64 / seconds
    } else {
        0.0
    }
}

/// Format a byte count (B, KB, MB, GB, TB)
pub fn format_bytes(bytes: u64) -> String {
    let value = bytes as f64;
    if value >= TIB {
        format!("{:.2} TB", value / TIB)
    } else if value >= GIB {
        format!("{:.2} GB", value / GIB)
    } else if value >= MIB {
        format!("{:.2} MB", value / MIB)
    } else if value >= KIB {
        format!("{:.2} KB", value / KIB)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a throughput in bytes per second
pub fn format_throughput(bytes_per_sec: f64) -> String {
    if bytes_per_sec >= TIB {
        format!("{:.2} TB/s", bytes_per_sec / TIB)
    } else if bytes_per_sec >= GIB {
        format!("{:.2} GB/s", bytes_per_sec / GIB)
    } else if bytes_per_sec >= MIB {
        format!("{:.2} MB/s", bytes_per_sec / MIB)
    } else if bytes_per_sec >= KIB {
        format!("{:.2} KB/s", bytes_per_sec / KIB)
    } else {
        format!("{:.2} B/s", bytes_per_sec)
    }
}

/// Format an integer with thousands separators
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
