use super::games::{Game, GAMES, RANDOM};

pub fn render(game: &Game) -> String {
	format!(
		r##"<!DOCTYPE html>
<html lang="en">
	<head>
		<meta charset="UTF-8">
		<meta name="viewport" content="width=device-width, initial-scale=1.0">
		<title>{name}</title>
		<style>{css}</style>
		<style>{game_css}</style>
	</head>
	<body data-game="{id}">
		<header class="arcade-header">
			<div class="arcade-title">
				<h1>{name}</h1>
				<p class="arcade-description">{description}</p>
			</div>
			<div class="arcade-clock">
				<div id="arcade-timer">00:00</div>
				<div id="arcade-status">Waiting for Copilot</div>
			</div>
			<nav class="arcade-controls">
				<select id="arcade-game-select">{options}</select>
				<a id="arcade-reset" href="#">Reset timer</a>
			</nav>
		</header>
		<main id="arcade-game">{game_html}</main>
		<div id="arcade-final" class="arcade-final"></div>
		<script>{js}</script>
		<script>{game_js}</script>
	</body>
</html>
"##,
		name = game.name,
		id = game.id,
		description = game.description,
		css = include_str!("../../assets/arcade/arcade.css"),
		js = include_str!("../../assets/arcade/arcade.js"),
		options = render_options(game),
		game_html = game.html,
		game_css = game.css,
		game_js = game.js,
	)
}

fn render_options(current: &Game) -> String {
	let mut options: Vec<String> = GAMES
		.iter()
		.map(|game| format!(r#"<option value="{}"{}>{}</option>"#, game.id, if game.id == current.id { " selected" } else { "" }, game.name))
		.collect();
	options.push(format!(r#"<option value="{}">Random game</option>"#, RANDOM));
	options.push(r#"<option value="">More...</option>"#.to_owned());
	options.concat()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::arcade::games::find;

	#[test]
	fn test_page_embeds_game() {
		let snake = find("snake-game").unwrap();
		let page = render(snake);
		assert!(page.contains("<title>Neon Snake</title>"));
		assert!(page.contains(r#"data-game="snake-game""#));
		assert!(page.contains(snake.js));
		assert!(page.contains(r#"<option value="snake-game" selected>Neon Snake</option>"#));
		assert!(page.contains(r#"<option value="dino-game">Dino Runner</option>"#));
		assert!(page.contains("acquireVsCodeApi"));
		assert!(page.contains(r##"<a id="arcade-reset" href="#">Reset timer</a>"##));
		assert!(page.trim_end().ends_with("</html>"));
	}
}
