use chrono::{DateTime, Duration, Utc};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
	Idle,
	Running { started_at: DateTime<Utc> },
}

/// Measures how long the current tool call round-trip has been running.
#[derive(Clone, Debug)]
pub struct ActivityTimer {
	state: TimerState,
}

impl ActivityTimer {
	pub fn new() -> ActivityTimer {
		ActivityTimer { state: TimerState::Idle }
	}

	/// Returns whether the timer actually started; a running timer keeps its start time.
	pub fn start(&mut self, now: DateTime<Utc>) -> bool {
		match self.state {
			TimerState::Idle => {
				self.state = TimerState::Running { started_at: now };
				true
			},
			TimerState::Running { .. } => false,
		}
	}

	/// Returns the measured time, or `None` if the timer was not running.
	pub fn stop(&mut self, now: DateTime<Utc>) -> Option<Duration> {
		let elapsed = self.elapsed(now);
		self.state = TimerState::Idle;
		elapsed
	}

	/// Returns whether the timer was running.
	pub fn reset(&mut self) -> bool {
		let was_running = self.is_running();
		self.state = TimerState::Idle;
		was_running
	}

	pub fn elapsed(&self, now: DateTime<Utc>) -> Option<Duration> {
		match self.state {
			TimerState::Idle => None,
			TimerState::Running { started_at } => Some(now - started_at),
		}
	}

	pub fn is_running(&self) -> bool {
		self.started_at().is_some()
	}

	pub fn started_at(&self) -> Option<DateTime<Utc>> {
		match self.state {
			TimerState::Idle => None,
			TimerState::Running { started_at } => Some(started_at),
		}
	}

	pub fn state(&self) -> TimerState {
		self.state
	}
}

impl Default for ActivityTimer {
	fn default() -> Self {
		ActivityTimer::new()
	}
}

/// Formats a duration as `MM:SS`; minutes are not capped at 59.
pub fn fmt_clock(elapsed: Duration) -> String {
	let secs = elapsed.num_seconds().max(0);
	format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	fn at(secs: i64) -> DateTime<Utc> {
		Utc.timestamp_opt(1_742_400_000 + secs, 0).unwrap()
	}

	#[test]
	fn test_start_is_idempotent() {
		let mut timer = ActivityTimer::new();
		assert!(timer.start(at(0)));
		assert!(!timer.start(at(5)));
		assert_eq!(timer.started_at(), Some(at(0)));
		assert_eq!(timer.elapsed(at(7)), Some(Duration::seconds(7)));
	}

	#[test]
	fn test_stop_while_idle() {
		let mut timer = ActivityTimer::new();
		assert_eq!(timer.stop(at(3)), None);
		assert_eq!(timer.state(), TimerState::Idle);
	}

	#[test]
	fn test_stop_and_reset() {
		let mut timer = ActivityTimer::new();
		timer.start(at(10));
		assert_eq!(timer.stop(at(72)), Some(Duration::seconds(62)));
		assert!(!timer.is_running());
		timer.start(at(100));
		assert!(timer.reset());
		assert!(!timer.reset());
	}

	#[test]
	fn test_fmt_clock() {
		assert_eq!(fmt_clock(Duration::seconds(0)), "00:00");
		assert_eq!(fmt_clock(Duration::seconds(62)), "01:02");
		assert_eq!(fmt_clock(Duration::milliseconds(59_999)), "00:59");
		assert_eq!(fmt_clock(Duration::seconds(6001)), "100:01");
		assert_eq!(fmt_clock(Duration::seconds(-4)), "00:00");
	}
}
