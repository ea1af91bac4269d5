pub mod message;
pub mod output_channel;
pub mod quick_pick;
pub mod status_bar;
pub mod webview;

pub use message::Message;
pub use output_channel::OutputChannel;
pub use quick_pick::QuickPick;
pub use status_bar::StatusBar;
pub use webview::Webview;

/// View column where a tab can appear.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
	/// View column of the currently active tab.
	Active,
	/// View column to the right of the currently active tab.
	Beside,
	/// First, leftmost column.
	One,
	/// Second column.
	Two,
	/// Third column.
	Three,
}

impl Column {
	pub(crate) fn as_native(self) -> i32 {
		match self {
			Column::Active => -1,
			Column::Beside => -2,
			Column::One => 1,
			Column::Two => 2,
			Column::Three => 3,
		}
	}
}

/// Name of the running editor, like `Visual Studio Code` or `Visual Studio Code - Insiders`.
pub fn app_name() -> String {
	vscode_sys::env::APP_NAME.clone()
}
