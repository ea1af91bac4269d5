//! Status bar item summarizing what the monitor is doing.

use crate::timer::fmt_clock;
use chrono::{DateTime, Duration, Utc};
use evscode::{status_bar::Alignment, StatusBar};
use std::cell::RefCell;

/// How long "Activity detected" stays visible after mirrored log lines arrive.
pub fn activity_flash() -> Duration {
	Duration::seconds(3)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	Starting,
	Stopped,
	Monitoring,
	NoLogs,
	Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
	pub phase: Phase,
	pub running_since: Option<DateTime<Utc>>,
	pub flash_until: Option<DateTime<Utc>>,
}

impl State {
	pub fn new() -> State {
		State { phase: Phase::Starting, running_since: None, flash_until: None }
	}
}

pub fn render(state: &State, now: DateTime<Utc>) -> String {
	if let Some(started_at) = state.running_since {
		return format!("$(copilot) Tool call {}", fmt_clock(now - started_at));
	}
	if state.flash_until.map_or(false, |until| now < until) {
		return "$(copilot) Activity detected".to_owned();
	}
	match state.phase {
		Phase::Starting => "$(copilot) Starting",
		Phase::Stopped => "$(copilot) Not monitoring",
		Phase::Monitoring => "$(copilot) Monitoring logs",
		Phase::NoLogs => "$(copilot) No logs found",
		Phase::Error => "$(copilot) Error finding logs",
	}
	.to_owned()
}

struct Item {
	bar: StatusBar,
	state: State,
}

thread_local! {
	static ITEM: RefCell<Option<Item>> = RefCell::new(None);
}

pub fn show() {
	ITEM.with(|item| {
		let mut item = item.borrow_mut();
		if item.is_none() {
			let bar = StatusBar::new(Alignment::Right, 100.0);
			bar.set_tooltip("Copilot Arcade");
			bar.set_command("copilotArcade.monitor.showStatus");
			bar.show();
			*item = Some(Item { bar, state: State::new() });
		}
	});
	refresh();
}

pub fn dispose() {
	ITEM.with(|item| item.borrow_mut().take());
}

pub fn set_phase(phase: Phase) {
	update(|state| state.phase = phase);
}

pub fn set_running(running_since: Option<DateTime<Utc>>) {
	update(|state| state.running_since = running_since);
}

/// Shows "Activity detected" for a few seconds.
pub fn flash_activity() {
	let until = crate::util::time_now() + activity_flash();
	update(|state| state.flash_until = Some(until));
	evscode::spawn(async {
		crate::util::timers::sleep(activity_flash().to_std().unwrap_or_default()).await;
		refresh();
		Ok(())
	});
}

pub fn refresh() {
	update(|_| ());
}

fn update(f: impl FnOnce(&mut State)) {
	ITEM.with(|item| {
		if let Some(item) = item.borrow_mut().as_mut() {
			f(&mut item.state);
			item.bar.set_text(&render(&item.state, crate::util::time_now()));
		}
	});
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::util::fs::memory::at;

	#[test]
	fn test_phases() {
		let mut state = State::new();
		assert_eq!(render(&state, at(0)), "$(copilot) Starting");
		state.phase = Phase::Monitoring;
		assert_eq!(render(&state, at(0)), "$(copilot) Monitoring logs");
		state.phase = Phase::NoLogs;
		assert_eq!(render(&state, at(0)), "$(copilot) No logs found");
		state.phase = Phase::Error;
		assert_eq!(render(&state, at(0)), "$(copilot) Error finding logs");
	}

	#[test]
	fn test_activity_flash_expires() {
		let state = State { phase: Phase::Monitoring, running_since: None, flash_until: Some(at(3)) };
		assert_eq!(render(&state, at(1)), "$(copilot) Activity detected");
		assert_eq!(render(&state, at(3)), "$(copilot) Monitoring logs");
	}

	#[test]
	fn test_running_clock_wins() {
		let state = State { phase: Phase::Monitoring, running_since: Some(at(10)), flash_until: Some(at(100)) };
		assert_eq!(render(&state, at(75)), "$(copilot) Tool call 01:05");
	}
}
