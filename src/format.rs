//! Text rendering for elapsed durations.
//!
//! Durations are written with the largest units first, e.g. `1h2m3.004s`.
//! Anything below one second uses a single sub-second unit (`ns`, `µs` or
//! `ms`), and the zero duration is written as `0s`.

use chrono::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_MICRO: u128 = 1_000;

pub fn format_duration(duration: Duration) -> String {
    let nanos = total_nanos(duration);
    if nanos == 0 {
        return "0s".to_string();
    }

    let mut out = String::new();
    if nanos < 0 {
        out.push('-');
    }
    let nanos = nanos.unsigned_abs();

    if nanos < NANOS_PER_SEC {
        let (unit, scale) = if nanos < NANOS_PER_MICRO {
            ("ns", 1)
        } else if nanos < NANOS_PER_MILLI {
            ("µs", NANOS_PER_MICRO)
        } else {
            ("ms", NANOS_PER_MILLI)
        };
        push_decimal(&mut out, nanos, scale);
        out.push_str(unit);
        return out;
    }

    let secs = nanos / NANOS_PER_SEC;
    let hours = secs / 3600;
    let minutes = secs / 60 % 60;

    if hours > 0 {
        out.push_str(&format!("{}h", hours));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{}m", minutes));
    }
    push_decimal(&mut out, nanos % (60 * NANOS_PER_SEC), NANOS_PER_SEC);
    out.push('s');

    out
}

// chrono caps `num_nanoseconds` at ~292 years, so split into whole seconds
// and the sub-second remainder instead.
fn total_nanos(duration: Duration) -> i128 {
    let secs = duration.num_seconds();
    let subsec = (duration - Duration::seconds(secs))
        .num_nanoseconds()
        .unwrap_or(0);
    i128::from(secs) * NANOS_PER_SEC as i128 + i128::from(subsec)
}

/// Writes `value / scale` with the remainder as a trimmed decimal fraction.
/// `scale` must be a power of ten.
fn push_decimal(out: &mut String, value: u128, scale: u128) {
    out.push_str(&(value / scale).to_string());

    let frac = value % scale;
    if frac == 0 {
        return;
    }

    let width = scale.to_string().len() - 1;
    let digits = format!("{:0width$}", frac, width = width);
    out.push('.');
    out.push_str(digits.trim_end_matches('0'));
}
