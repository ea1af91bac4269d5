/// A mini-game, shipped as a fragment of HTML with its own style and script.
///
/// The script is expected to listen for the `arcade:stop` DOM event and show the final score.
#[derive(Debug, PartialEq, Eq)]
pub struct Game {
	pub id: &'static str,
	pub name: &'static str,
	pub description: &'static str,
	pub html: &'static str,
	pub css: &'static str,
	pub js: &'static str,
}

pub const RANDOM: &str = "random";

pub static GAMES: &[Game] = &[
	Game {
		id: "dino-game",
		name: "Dino Runner",
		description: "Jump over the cacti with Space or a click",
		html: include_str!("../../assets/games/dino/game.html"),
		css: include_str!("../../assets/games/dino/game.css"),
		js: include_str!("../../assets/games/dino/game.js"),
	},
	Game {
		id: "snake-game",
		name: "Neon Snake",
		description: "Eat the glowing dots, steer with the arrow keys",
		html: include_str!("../../assets/games/snake/game.html"),
		css: include_str!("../../assets/games/snake/game.css"),
		js: include_str!("../../assets/games/snake/game.js"),
	},
	Game {
		id: "xkcd-game",
		name: "XKCD Comics",
		description: "Browse random comics while Copilot works",
		html: include_str!("../../assets/games/xkcd/game.html"),
		css: include_str!("../../assets/games/xkcd/game.css"),
		js: include_str!("../../assets/games/xkcd/game.js"),
	},
];

pub fn find(id: &str) -> Option<&'static Game> {
	GAMES.iter().find(|game| game.id == id)
}

pub fn default_game() -> &'static Game {
	&GAMES[0]
}

/// Resolves a configured choice, where `roll` is any number used to pick a random game.
///
/// Unknown ids fall back to the first game.
pub fn pick(choice: &str, roll: usize) -> &'static Game {
	if choice == RANDOM {
		&GAMES[roll % GAMES.len()]
	} else {
		find(choice).unwrap_or_else(default_game)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_registry() {
		assert_eq!(default_game().id, "dino-game");
		assert_eq!(find("snake-game").map(|game| game.name), Some("Neon Snake"));
		assert_eq!(find("tetris"), None);
		let mut ids: Vec<&str> = GAMES.iter().map(|game| game.id).collect();
		ids.dedup();
		assert_eq!(ids.len(), GAMES.len());
	}

	#[test]
	fn test_pick() {
		assert_eq!(pick("xkcd-game", 0).id, "xkcd-game");
		assert_eq!(pick("tetris", 2).id, "dino-game");
		assert_eq!(pick(RANDOM, 1).id, "snake-game");
		assert_eq!(pick(RANDOM, 4).id, "snake-game");
	}

	#[test]
	fn test_games_handle_stop() {
		for game in GAMES {
			assert!(game.js.contains("arcade:stop"), "{} ignores the stop event", game.id);
			assert!(!game.html.is_empty());
		}
	}
}
