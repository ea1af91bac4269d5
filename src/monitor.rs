//! Watching Copilot Chat logs and turning tool call markers into arcade events.

pub mod engine;

use crate::{
	arcade, locate, logger, status::{self, Phase}, timer::fmt_clock, util::{
		fs::{Filesystem, NodeFs}, path::Path, plural, time_now, timers::{Interval, Watch}
	}
};
use chrono::{DateTime, Utc};
use engine::{Engine, Reaction};
use evscode::{Message, E, R};
use futures::lock::Mutex;
use std::{
	cell::{Cell, RefCell}, collections::BTreeMap, rc::Rc, time::Duration
};

/// Start monitoring Copilot Chat logs as soon as the editor starts.
#[evscode::config]
static AUTO_START: evscode::Config<bool> = true;

const POLL_PERIOD: Duration = Duration::from_secs(1);
const RESCAN_PERIOD: Duration = Duration::from_secs(60);

type SharedEngine<F> = Rc<Mutex<Engine<F>>>;

struct Session {
	generation: u64,
	root: Path,
	engine: SharedEngine<NodeFs>,
	watches: RefCell<BTreeMap<Path, Watch>>,
	intervals: RefCell<Vec<Interval>>,
}

thread_local! {
	static SESSION: RefCell<Option<Rc<Session>>> = RefCell::new(None);
	static GENERATION: Cell<u64> = Cell::new(0);
}

impl Session {
	/// The running session, if it is still the one with the given generation.
	fn current(generation: u64) -> Option<Rc<Session>> {
		SESSION.with(|session| session.borrow().as_ref().filter(|session| session.generation == generation).cloned())
	}

	fn active() -> Option<Rc<Session>> {
		SESSION.with(|session| session.borrow().clone())
	}

	/// Whether results computed by this session's engine still reach the UI.
	fn is_live(&self) -> bool {
		Session::active().map_or(false, |active| Rc::ptr_eq(&active.engine, &self.engine))
	}
}

/// Engine for a new session. A replaced session hands over its engine, so file offsets and a
/// tool call in progress carry over to the new one.
fn engine_for_restart<F: Filesystem>(previous: Option<&SharedEngine<F>>, fs: impl FnOnce() -> F) -> SharedEngine<F> {
	match previous {
		Some(engine) => engine.clone(),
		None => Rc::new(Mutex::new(Engine::new(fs()))),
	}
}

pub async fn activate() -> R<()> {
	logger::initialize()?;
	status::show();
	if AUTO_START.get() {
		if let Err(e) = start().await {
			status::set_phase(Phase::Error);
			log::warn!("{}", e.human_detailed());
		}
	} else {
		log::info!("automatic monitoring is disabled");
		status::set_phase(Phase::Stopped);
	}
	Ok(())
}

pub async fn deactivate() -> R<()> {
	stop();
	arcade::dispose();
	status::dispose();
	logger::dispose();
	Ok(())
}

/// Replaces the running session, keeping its engine, and performs a scan.
///
/// Returns the number of log files found.
async fn start() -> R<usize> {
	let root = locate::logs_root()?;
	let generation = GENERATION.with(|counter| {
		counter.set(counter.get() + 1);
		counter.get()
	});
	log::info!("looking for Copilot logs in {}", root);
	let previous = Session::active().map(|session| session.engine.clone());
	let session = Rc::new(Session {
		generation,
		root,
		engine: engine_for_restart(previous.as_ref(), || NodeFs),
		watches: RefCell::new(BTreeMap::new()),
		intervals: RefCell::new(Vec::new()),
	});
	session.intervals.borrow_mut().extend(vec![
		Interval::new(POLL_PERIOD, move || evscode::spawn(poll_all(generation))),
		Interval::new(RESCAN_PERIOD, move || evscode::spawn(periodic_rescan(generation))),
	]);
	SESSION.with(|current| current.replace(Some(session.clone())));
	rescan(&session).await
}

fn stop() {
	if SESSION.with(|session| session.borrow_mut().take()).is_some() {
		log::info!("stopped monitoring");
	}
}

async fn rescan(session: &Session) -> R<usize> {
	let result = session.engine.lock().await.rescan(&session.root, time_now()).await;
	if !session.is_live() {
		return Ok(0);
	}
	let rescan = match result {
		Ok(rescan) => rescan,
		Err(e) => {
			status::set_phase(Phase::Error);
			return Err(e.context("could not search for Copilot logs"));
		},
	};
	let mut watches = session.watches.borrow_mut();
	for path in &rescan.removed {
		watches.remove(path);
	}
	for candidate in &rescan.found {
		let path = &candidate.path;
		if watches.contains_key(path) {
			continue;
		}
		let generation = session.generation;
		let changed = path.clone();
		match Watch::new(path, move || evscode::spawn(poll(generation, changed.clone()))) {
			Ok(watch) => {
				watches.insert(path.clone(), watch);
			},
			Err(e) if rescan.added.contains(path) => log::warn!("{}, relying on polling", e.human()),
			Err(e) => log::debug!("{}, relying on polling", e.human()),
		}
	}
	if !rescan.added.is_empty() || !rescan.removed.is_empty() {
		log::info!("monitoring {}", plural(rescan.found.len(), "log file", "log files"));
	}
	status::set_phase(if rescan.found.is_empty() { Phase::NoLogs } else { Phase::Monitoring });
	Ok(rescan.found.len())
}

async fn periodic_rescan(generation: u64) -> R<()> {
	if let Some(session) = Session::current(generation) {
		if let Err(e) = rescan(&session).await {
			log::warn!("{}", e.human_detailed());
		}
	}
	Ok(())
}

async fn poll(generation: u64, path: Path) -> R<()> {
	let session = match Session::current(generation) {
		Some(session) => session,
		None => return Ok(()),
	};
	let reactions = session.engine.lock().await.poll(&path, time_now()).await;
	match reactions {
		Ok(reactions) if session.is_live() => apply(reactions),
		Ok(_) => (),
		Err(e) => log::warn!("could not read {}, {}", path, e.human()),
	}
	Ok(())
}

async fn poll_all(generation: u64) -> R<()> {
	let session = match Session::current(generation) {
		Some(session) => session,
		None => return Ok(()),
	};
	let reactions = session.engine.lock().await.poll_all(time_now()).await;
	if session.is_live() {
		apply(reactions);
	}
	Ok(())
}

fn apply(reactions: Vec<Reaction>) {
	for reaction in reactions {
		match reaction {
			Reaction::ToolCallStarted { started_at } => {
				log::info!("tool call started");
				status::set_running(Some(started_at));
				arcade::tool_call_started(started_at);
			},
			Reaction::ToolCallFinished { elapsed } => {
				log::info!("tool call finished after {}", fmt_clock(elapsed));
				status::set_running(None);
				arcade::tool_call_finished(elapsed);
			},
			Reaction::Mirror(line) => logger::mirror(&line),
			Reaction::Activity => status::flash_activity(),
		}
	}
}

/// Forces the timer back to idle, as if the running tool call had finished without a result.
pub async fn reset() {
	if let Some(session) = Session::active() {
		if session.engine.lock().await.reset() {
			log::info!("timer reset");
		}
	}
	status::set_running(None);
	arcade::timer_reset();
}

async fn retry() -> R<()> {
	start().await.map(|_| ())
}

#[evscode::command(title = "Copilot Arcade: Find Copilot Logs")]
async fn find_logs() -> R<()> {
	let found = start().await.map_err(|e| e.action("Retry", retry()))?;
	let text = if found == 0 {
		"No Copilot Chat logs found, will keep looking every minute".to_owned()
	} else {
		format!("Monitoring {}", plural(found, "Copilot Chat log file", "Copilot Chat log files"))
	};
	Message::new::<()>(&text).show().await;
	Ok(())
}

#[evscode::command(title = "Copilot Arcade: Show Monitoring Status")]
async fn show_status() -> R<()> {
	let session = Session::active().ok_or_else(|| {
		E::error("Copilot Arcade is not monitoring any logs").workflow_error().action("Find logs", retry())
	})?;
	let (running, files) = {
		let engine = session.engine.lock().await;
		let running = engine.timer().elapsed(time_now());
		let files: Vec<(Path, Option<DateTime<Utc>>)> =
			engine.watched().map(|file| (file.path.clone(), file.last_activity)).collect();
		(running, files)
	};
	for (file, last_activity) in &files {
		match last_activity {
			Some(at) => logger::mirror(&format!("watching {}, last activity at {}", file, at.to_rfc3339())),
			None => logger::mirror(&format!("watching {}, no activity yet", file)),
		}
	}
	let timer = match running {
		Some(elapsed) => format!("tool call running for {}", fmt_clock(elapsed)),
		None => "timer idle".to_owned(),
	};
	let names: Vec<&str> = files.iter().map(|(file, _)| file.file_name()).collect();
	let text = format!("Copilot Arcade: {}, watching {}: {}", timer, plural(files.len(), "file", "files"), names.join(", "));
	if Message::new(&text).item((), "Show Log", false).show().await.is_some() {
		logger::reveal();
	}
	Ok(())
}

#[evscode::command(title = "Copilot Arcade: Reset Timer")]
async fn reset_timer() -> R<()> {
	reset().await;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::util::fs::memory::{at, MemoryFs};
	use futures::executor::block_on;

	const ROOT: &str = "/home/user/.config/Code/logs";
	const LOG: &str = "/home/user/.config/Code/logs/20250319T171247/window1/exthost/GitHub.copilot-chat/GitHub Copilot Chat.log";

	#[test]
	fn test_restart_keeps_running_tool_call() {
		let fs = MemoryFs::new();
		fs.write(LOG, b"", at(0));
		let old = engine_for_restart(None, || fs.clone());
		block_on(async {
			old.lock().await.rescan(&Path::from(ROOT), at(1)).await.unwrap();
			fs.append(LOG, b"message 0 returned. finish reason: [tool_calls]\n");
			assert_eq!(old.lock().await.poll_all(at(2)).await, vec![Reaction::ToolCallStarted { started_at: at(2) }]);
			let new = engine_for_restart(Some(&old), MemoryFs::new);
			let rescan = new.lock().await.rescan(&Path::from(ROOT), at(3)).await.unwrap();
			assert!(rescan.added.is_empty());
			assert_eq!(rescan.found.len(), 1);
			fs.append(LOG, b"message 0 returned. finish reason: [stop]\n");
			assert_eq!(new.lock().await.poll_all(at(5)).await, vec![Reaction::ToolCallFinished { elapsed: chrono::Duration::seconds(3) }]);
		});
	}

	#[test]
	fn test_first_session_gets_fresh_engine() {
		let engine = engine_for_restart(None, MemoryFs::new);
		let engine = block_on(engine.lock());
		assert!(!engine.timer().is_running());
		assert_eq!(engine.watched().count(), 0);
	}
}
