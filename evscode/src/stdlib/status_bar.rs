//! A single item in the status bar at the bottom of the window.

pub use vscode_sys::StatusBarAlignment as Alignment;

/// Handle to a status bar item. The item is removed from the window when the handle is dropped.
pub struct StatusBar {
	native: vscode_sys::StatusBarItem,
}

impl StatusBar {
	/// Create a new, hidden item. Items with higher priority are placed more to the left.
	pub fn new(alignment: Alignment, priority: f64) -> StatusBar {
		StatusBar { native: vscode_sys::window::create_status_bar_item(alignment, priority) }
	}

	/// Set the displayed text. [Codicons](https://code.visualstudio.com/api/references/icons-in-labels) like `$(copilot)` are supported.
	pub fn set_text(&self, text: &str) {
		self.native.set_text(text);
	}

	/// Set the text displayed when hovering over the item.
	pub fn set_tooltip(&self, tooltip: &str) {
		self.native.set_tooltip(tooltip);
	}

	/// Set the command run when the item is clicked, see [`crate::meta::Identifier`] for how command ids are formed.
	pub fn set_command(&self, command: &str) {
		self.native.set_command(command);
	}

	/// Make the item visible.
	pub fn show(&self) {
		self.native.show();
	}

	/// Hide the item.
	pub fn hide(&self) {
		self.native.hide();
	}
}

impl Drop for StatusBar {
	fn drop(&mut self) {
		self.native.dispose();
	}
}
