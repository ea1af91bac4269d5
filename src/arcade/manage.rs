use super::{
	comms::{Food, Note}, games::{self, Game}, render::render
};
use crate::{
	status, timer::fmt_clock, util::{
		time_now, timers::{sleep, Interval}
	}
};
use chrono::{DateTime, Duration, Utc};
use evscode::{
	webview::{Disposer, Listener, WebviewMeta}, Column, Webview, R
};
use futures::StreamExt;
use std::cell::{Cell, RefCell};

const TICK_PERIOD: std::time::Duration = std::time::Duration::from_secs(1);
const CLOSE_DELAY: std::time::Duration = std::time::Duration::from_secs(2);

const STATUS_STARTED: &str = "Timer started: tool call detected";
const STATUS_RUNNING: &str = "Timer running: waiting for completion";
const STATUS_RESET: &str = "Timer reset, waiting for new activity";

/// Tool call timing and delayed close bookkeeping of the panel.
///
/// Every change of the tool call state takes a new close ticket, so a delayed close scheduled
/// before it no longer applies.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Lifetime {
	running_since: Option<DateTime<Utc>>,
	close_ticket: u64,
}

impl Lifetime {
	fn start(&mut self, started_at: DateTime<Utc>) {
		self.close_ticket += 1;
		self.running_since = Some(started_at);
	}

	/// Returns the message for the game and the ticket of the delayed close.
	fn finish(&mut self) -> (Food<'static>, u64) {
		self.close_ticket += 1;
		self.running_since = None;
		(Food::StopGame, self.close_ticket)
	}

	fn reset(&mut self) -> Food<'static> {
		self.close_ticket += 1;
		self.running_since = None;
		Food::Update { time: "00:00", status: STATUS_RESET }
	}

	fn is_running(&self) -> bool {
		self.running_since.is_some()
	}

	fn clock(&self, now: DateTime<Utc>) -> String {
		fmt_clock(self.running_since.map_or_else(Duration::zero, |since| now - since))
	}

	/// Whether the panel may close now. A close without a ticket was asked for by the page itself.
	fn may_close(&self, ticket: Option<u64>) -> bool {
		!self.is_running() && ticket.map_or(true, |ticket| ticket == self.close_ticket)
	}
}

struct Panel {
	id: u64,
	webview: Webview,
	game: &'static Game,
	tick: Option<Interval>,
	lifetime: Lifetime,
}

impl Panel {
	fn post(&self, food: &Food) {
		if let Err(e) = self.webview.post_message(food) {
			log::warn!("{}", e.human_detailed());
		}
	}

	fn post_update(&self, status: &str) {
		self.post(&Food::Update { time: &self.lifetime.clock(time_now()), status });
	}

	fn switch(&mut self, game: &'static Game) {
		log::info!("switching the arcade to {}", game.name);
		self.game = game;
		self.webview.set_title(game.name);
		self.webview.set_html(&render(game));
		if self.lifetime.is_running() {
			self.post_update(STATUS_RUNNING);
		}
	}
}

thread_local! {
	static PANEL: RefCell<Option<Panel>> = RefCell::new(None);
	static NEXT_ID: Cell<u64> = Cell::new(0);
}

fn with_panel<T>(f: impl FnOnce(&mut Panel) -> T) -> Option<T> {
	PANEL.with(|panel| panel.borrow_mut().as_mut().map(f))
}

pub fn current_game() -> Option<&'static Game> {
	with_panel(|panel| panel.game)
}

/// Opens the arcade with the given game, or reveals it and switches the game if it is already open.
pub fn show(game: &'static Game) {
	let revealed = with_panel(|panel| {
		panel.webview.reveal(Column::One, false);
		if panel.game.id != game.id {
			panel.switch(game);
		}
	});
	if revealed.is_some() {
		return;
	}
	let WebviewMeta { webview, listener, disposer } =
		Webview::new("copilotArcade.game", game.name, Column::One).enable_scripts().retain_context_when_hidden().create();
	webview.set_html(&render(game));
	let id = NEXT_ID.with(|next| {
		next.set(next.get() + 1);
		next.get()
	});
	log::info!("opened the arcade with {}", game.name);
	PANEL.with(|panel| *panel.borrow_mut() = Some(Panel { id, webview, game, tick: None, lifetime: Lifetime::default() }));
	evscode::spawn(handle_messages(id, listener, disposer));
}

pub fn tool_call_started(started_at: DateTime<Utc>) {
	if current_game().is_none() {
		show(super::configured_game());
	}
	with_panel(|panel| {
		panel.lifetime.start(started_at);
		panel.post_update(STATUS_STARTED);
		panel.tick = Some(Interval::new(TICK_PERIOD, tick));
	});
}

fn tick() {
	with_panel(|panel| {
		if panel.lifetime.is_running() {
			panel.post_update(STATUS_RUNNING);
		}
	});
	status::refresh();
}

/// Tells the game to stop and closes the arcade shortly after, unless another tool call starts.
pub fn tool_call_finished(elapsed: Duration) {
	let scheduled = with_panel(|panel| {
		panel.tick = None;
		let (food, ticket) = panel.lifetime.finish();
		panel.post(&food);
		log::debug!("stopping {} after {}", panel.game.name, fmt_clock(elapsed));
		(panel.id, ticket)
	});
	if let Some((id, ticket)) = scheduled {
		evscode::spawn(async move {
			sleep(CLOSE_DELAY).await;
			close_idle(id, Some(ticket));
			Ok(())
		});
	}
}

pub fn timer_reset() {
	with_panel(|panel| {
		panel.tick = None;
		let food = panel.lifetime.reset();
		panel.post(&food);
	});
}

pub fn dispose() {
	if let Some(panel) = PANEL.with(|panel| panel.borrow_mut().take()) {
		panel.webview.dispose();
	}
}

/// Closes the panel if it is still the same one, no tool call is running, and the close was not cancelled.
fn close_idle(id: u64, ticket: Option<u64>) {
	let panel = PANEL.with(|panel| {
		let mut panel = panel.borrow_mut();
		let closable = panel.as_ref().map_or(false, |panel| panel.id == id && panel.lifetime.may_close(ticket));
		if closable { panel.take() } else { None }
	});
	if let Some(panel) = panel {
		panel.webview.dispose();
	}
}

fn forget(id: u64) {
	PANEL.with(|panel| {
		let mut panel = panel.borrow_mut();
		if panel.as_ref().map_or(false, |panel| panel.id == id) {
			*panel = None;
			log::info!("arcade closed");
		}
	});
}

async fn handle_messages(id: u64, listener: Listener, disposer: Disposer) -> R<()> {
	let mut notes = listener.take_until(disposer);
	while let Some(raw) = notes.next().await {
		match raw.into_serde::<Note>() {
			Ok(Note::ResetTimer) => crate::monitor::reset().await,
			Ok(Note::CloseWebview) => close_idle(id, None),
			Ok(Note::ChangeGame { game_id: Some(game_id) }) => show(games::pick(&game_id, super::roll())),
			Ok(Note::ChangeGame { game_id: None }) => {
				if let Some(game) = super::choose_game().await {
					show(game);
				}
			},
			Err(e) => log::warn!("ignoring unrecognized webview message {:?}, {}", raw, e),
		}
	}
	forget(id);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::util::fs::memory::at;

	#[test]
	fn test_finish_queues_stop_and_allows_close() {
		let mut lifetime = Lifetime::default();
		lifetime.start(at(0));
		assert!(!lifetime.may_close(None));
		let (food, ticket) = lifetime.finish();
		assert_eq!(food, Food::StopGame);
		assert!(lifetime.may_close(Some(ticket)));
		assert!(lifetime.may_close(None));
	}

	#[test]
	fn test_new_call_cancels_delayed_close() {
		let mut lifetime = Lifetime::default();
		lifetime.start(at(0));
		let (_, ticket) = lifetime.finish();
		lifetime.start(at(1));
		assert!(!lifetime.may_close(Some(ticket)));
		let (_, later) = lifetime.finish();
		assert!(!lifetime.may_close(Some(ticket)));
		assert!(lifetime.may_close(Some(later)));
	}

	#[test]
	fn test_reset_cancels_delayed_close() {
		let mut lifetime = Lifetime::default();
		lifetime.start(at(0));
		let (_, ticket) = lifetime.finish();
		assert_eq!(lifetime.reset(), Food::Update { time: "00:00", status: STATUS_RESET });
		assert!(!lifetime.may_close(Some(ticket)));
		assert!(lifetime.may_close(None));
	}

	#[test]
	fn test_clock_follows_running_call() {
		let mut lifetime = Lifetime::default();
		assert_eq!(lifetime.clock(at(100)), "00:00");
		lifetime.start(at(10));
		assert_eq!(lifetime.clock(at(75)), "01:05");
		lifetime.reset();
		assert_eq!(lifetime.clock(at(80)), "00:00");
	}
}
