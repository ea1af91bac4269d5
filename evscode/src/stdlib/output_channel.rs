//! Readonly text containers, displayed at the bottom of the screen.
//!
//! Typically used for logs and other user-facing information that take too much space to display
//! elsewhere and are a part of normal workflow.

/// Handle to an output channel.
pub struct OutputChannel {
	native: vscode_sys::OutputChannel,
}

impl OutputChannel {
	/// Create a new output channel with a given name.
	pub fn new(name: &str) -> OutputChannel {
		OutputChannel { native: vscode_sys::window::create_output_channel(name) }
	}

	/// Appends a line of text to the output.
	pub fn append_line(&self, text: &str) {
		self.native.append_line(text)
	}

	/// Removes all text from the output channel.
	pub fn clear(&self) {
		self.native.clear()
	}

	/// Reveals the output channel in the UI.
	pub fn show(&self, preserve_focus: bool) {
		self.native.show(preserve_focus)
	}
}

impl Drop for OutputChannel {
	fn drop(&mut self) {
		self.native.dispose();
	}
}
