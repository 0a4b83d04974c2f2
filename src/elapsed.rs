use crate::format::format_duration;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::fmt;

// 0001-01-01T00:00:00Z
const ZERO_TIME_SECS: i64 = -62_135_596_800;

/// Where a measurement stands, derived from which timestamps are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Initial,
    Running,
    Stopped,
}

/// Elapsed time between a start event and a stop event.
///
/// Either timestamp may be unset. An unset `start` with a set `stop` is
/// measured from [`ElapsedTime::unset_origin`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElapsedTime {
    start: Option<DateTime<Utc>>,
    stop: Option<DateTime<Utc>>,
}

impl ElapsedTime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Origin used in place of an unset start timestamp: midnight UTC on
    /// January 1st of year 1.
    pub fn unset_origin() -> DateTime<Utc> {
        Utc.timestamp_opt(ZERO_TIME_SECS, 0)
            .single()
            .expect("year 1 is within chrono's range")
    }

    pub fn with_times(
        start: Option<DateTime<Utc>>,
        stop: Option<DateTime<Utc>>,
    ) -> Self {
        Self { start, stop }
    }

    /// Records the current time as the start. Calling it again restarts.
    pub fn start(&mut self) {
        let now = Utc::now();
        tracing::trace!(start = %now, "elapsed time started");
        self.start = Some(now);
    }

    /// Records the current time as the stop. Calling it again overwrites.
    pub fn stop(&mut self) {
        let now = Utc::now();
        tracing::trace!(stop = %now, "elapsed time stopped");
        self.stop = Some(now);
    }

    pub fn times(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        (self.start, self.stop)
    }

    /// Duration covered by the measurement.
    ///
    /// Equal timestamps (including both unset) give zero. Once stopped the
    /// result is fixed, while a running measurement is computed against the
    /// current time on every call.
    pub fn elapsed(&self) -> Duration {
        if self.start == self.stop {
            return Duration::zero();
        }

        match (self.start, self.stop) {
            (start, Some(stop)) => {
                let start = start.unwrap_or_else(Self::unset_origin);
                stop.signed_duration_since(start)
            }
            (Some(start), None) => Utc::now().signed_duration_since(start),
            (None, None) => Duration::zero(),
        }
    }

    pub fn state(&self) -> State {
        match (self.start, self.stop) {
            (None, None) => State::Initial,
            (Some(_), None) => State::Running,
            (_, Some(_)) => State::Stopped,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == State::Running
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_duration(self.elapsed()))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            State::Initial => "initial",
            State::Running => "running",
            State::Stopped => "stopped",
        };
        f.write_str(s)
    }
}
