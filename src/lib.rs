mod arcade;
mod classify;
mod locate;
mod logger;
mod monitor;
mod status;
mod tail;
mod timer;
mod util;

evscode::plugin! {
	commands: [
		arcade::select_game,
		arcade::show_game,
		monitor::find_logs,
		monitor::reset_timer,
		monitor::show_status,
	],
	configuration: [
		arcade::DEFAULT_GAME,
		monitor::AUTO_START,
	],
	name: "Copilot Arcade",
	publisher: "copilot-arcade",
	description: "Mini-games to play while GitHub Copilot Chat runs its tools",
	keywords: &["copilot", "game", "timer", "chat", "fun"],
	categories: &["Other"],
	license: "MIT",
	repository: "https://github.com/copilot-arcade/copilot-arcade",
	vscode_version: "^1.80.0",
	on_activate: Some(|| Box::pin(monitor::activate())),
	on_deactivate: Some(|| Box::pin(monitor::deactivate())),
	extra_activations: &[evscode::meta::Activation::OnStartupFinished],
	log_filters: &[],
}
