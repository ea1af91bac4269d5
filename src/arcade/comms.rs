use serde::{Deserialize, Serialize};

/// Message sent by the page inside the arcade webview.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Note {
	ResetTimer,
	CloseWebview,
	ChangeGame {
		#[serde(rename = "gameId", default)]
		game_id: Option<String>,
	},
}

/// Message sent to the page inside the arcade webview.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Food<'a> {
	Update { time: &'a str, status: &'a str },
	StopGame,
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_notes() {
		let note = |value| serde_json::from_value::<Note>(value).unwrap();
		assert_eq!(note(json!({"command": "resetTimer"})), Note::ResetTimer);
		assert_eq!(note(json!({"command": "closeWebview"})), Note::CloseWebview);
		assert_eq!(note(json!({"command": "changeGame"})), Note::ChangeGame { game_id: None });
		assert_eq!(note(json!({"command": "changeGame", "gameId": "snake-game"})), Note::ChangeGame {
			game_id: Some("snake-game".to_owned())
		});
		assert!(serde_json::from_value::<Note>(json!({"command": "jump"})).is_err());
		assert!(serde_json::from_value::<Note>(json!({"type": "update"})).is_err());
	}

	#[test]
	fn test_food() {
		let update = Food::Update { time: "01:05", status: "Timer running: waiting for completion" };
		assert_eq!(
			serde_json::to_value(&update).unwrap(),
			json!({"type": "update", "time": "01:05", "status": "Timer running: waiting for completion"})
		);
		assert_eq!(serde_json::to_value(&Food::StopGame).unwrap(), json!({"type": "stopGame"}));
	}
}
