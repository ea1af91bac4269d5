//! Webview with mini-games shown while Copilot is busy running tools.

pub mod comms;
pub mod games;
mod manage;
mod render;

use evscode::{quick_pick, QuickPick, E, R};
use games::{Game, GAMES};
pub use manage::{dispose, timer_reset, tool_call_finished, tool_call_started};

/// Game shown when a tool call starts, like `snake-game`. Use `random` to get a different game every time.
#[evscode::config]
static DEFAULT_GAME: evscode::Config<String> = "dino-game";

fn roll() -> usize {
	(js_sys::Math::random() * GAMES.len() as f64) as usize
}

fn configured_game() -> &'static Game {
	games::pick(&DEFAULT_GAME.get(), roll())
}

async fn choose_game() -> Option<&'static Game> {
	let current = manage::current_game().map(|game| game.id);
	let id = QuickPick::new()
		.placeholder("Choose a game to play while Copilot works")
		.match_on_description()
		.items(GAMES.iter().map(|game| {
			quick_pick::Item::new(game.id.to_owned(), game.name).description(game.description).picked(Some(game.id) == current)
		}))
		.show()
		.await?;
	games::find(&id)
}

#[evscode::command(title = "Copilot Arcade: Show Game")]
async fn show_game() -> R<()> {
	manage::show(configured_game());
	Ok(())
}

#[evscode::command(title = "Copilot Arcade: Select Game")]
async fn select_game() -> R<()> {
	let game = choose_game().await.ok_or_else(E::cancel)?;
	manage::show(game);
	Ok(())
}
