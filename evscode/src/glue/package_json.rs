use crate::meta::{Activation, Package};
use serde::{Serialize, Serializer};
use std::{collections::BTreeMap, fmt};

pub fn construct_package_json(pkg: &Package) -> PackageJson {
	PackageJson {
		name: pkg.identifier.to_owned(),
		version: pkg.version.to_owned(),
		publisher: pkg.publisher.to_owned(),
		engines: Engines { vscode: pkg.vscode_version.to_owned() },
		display_name: pkg.name.to_owned(),
		description: pkg.description.to_owned(),
		categories: pkg.categories.iter().map(|s| (*s).to_owned()).collect(),
		keywords: pkg.keywords.iter().map(|s| (*s).to_owned()).collect(),
		license: pkg.license.to_owned(),
		repository: pkg.repository.to_owned(),
		main: format!("{}.js", pkg.identifier.replace('-', "_")),
		contributes: Contributes {
			commands: SortedVec::new(
				pkg.commands.iter().map(|command| ContributesCommands {
					command: command.id.to_string(),
					title: command.title.to_owned(),
				}),
				|cmd| cmd.command.clone(),
			),
			keybindings: SortedVec::new(
				pkg.commands.iter().filter_map(|command| {
					command.key.map(|key| ContributesKeybindings { command: command.id.to_string(), key: key.to_owned() })
				}),
				|cmd| cmd.command.clone(),
			),
			configuration: ContributesConfiguration {
				r#type: "object",
				title: pkg.name.to_owned(),
				properties: pkg
					.configuration
					.iter()
					.map(|ce| {
						let mut entry = (ce.schema)();
						entry["description"] = ce.description.into();
						(ce.id.to_string(), entry)
					})
					.collect(),
			},
		},
		activation_events: collect_activation_events(pkg),
	}
}

#[derive(Debug, Serialize)]
pub struct PackageJson {
	name: String,
	version: String,
	publisher: String,
	engines: Engines,
	#[serde(rename = "displayName")]
	display_name: String,
	description: String,
	categories: Vec<String>,
	keywords: Vec<String>,
	license: String,
	repository: String,
	main: String,
	contributes: Contributes,
	#[serde(rename = "activationEvents")]
	activation_events: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Engines {
	vscode: String,
}

#[derive(Debug, Serialize)]
struct Contributes {
	commands: SortedVec<ContributesCommands>,
	keybindings: SortedVec<ContributesKeybindings>,
	configuration: ContributesConfiguration,
}

#[derive(Debug, Serialize)]
struct ContributesCommands {
	command: String,
	title: String,
}

#[derive(Debug, Serialize)]
struct ContributesKeybindings {
	command: String,
	key: String,
}

#[derive(Debug, Serialize)]
struct ContributesConfiguration {
	r#type: &'static str,
	title: String,
	properties: BTreeMap<String, serde_json::Value>,
}

struct SortedVec<T> {
	inner: Vec<T>,
}

impl<T> SortedVec<T> {
	fn new<K: Ord>(i: impl Iterator<Item=T>, key: impl FnMut(&T) -> K) -> SortedVec<T> {
		let mut inner: Vec<T> = i.collect();
		inner.sort_by_key(key);
		SortedVec { inner }
	}
}

impl<T: Serialize> Serialize for SortedVec<T> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.inner.serialize(serializer)
	}
}

impl<T: fmt::Debug> fmt::Debug for SortedVec<T> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		<Vec<T> as fmt::Debug>::fmt(&self.inner, f)
	}
}

fn collect_activation_events(pkg: &Package) -> Vec<String> {
	let mut events: Vec<String> =
		pkg.commands.iter().map(|command| Activation::<&str>::OnCommand { command: command.id }.package_json_format()).collect();
	events.extend(pkg.extra_activations.iter().map(Activation::package_json_format));
	events
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::meta::{Command, ConfigEntry, Identifier};

	fn sample() -> Package {
		Package {
			identifier: "copilot-arcade",
			version: "0.1.0",
			commands: vec![Command {
				id: Identifier { module_path: "copilot_arcade::arcade", local_name: "show_game" },
				title: "Copilot Arcade: Show Game",
				key: Some("alt+g"),
				trigger: || Box::pin(async { Ok(()) }),
			}],
			configuration: vec![ConfigEntry {
				id: Identifier { module_path: "copilot_arcade::monitor", local_name: "AUTO_START" },
				description: "Start monitoring on activation",
				schema: || serde_json::json!({"type": "boolean", "default": true}),
			}],
			name: "Copilot Arcade",
			publisher: "copilot-arcade",
			description: "",
			keywords: &[],
			categories: &["Other"],
			license: "MIT",
			repository: "",
			vscode_version: "^1.80.0",
			on_activate: None,
			on_deactivate: None,
			extra_activations: &[Activation::OnStartupFinished],
			log_filters: &[],
		}
	}

	#[test]
	fn test_manifest() {
		let json = serde_json::to_value(construct_package_json(&sample())).unwrap();
		assert_eq!(json["main"], "copilot_arcade.js");
		assert_eq!(json["contributes"]["commands"][0]["command"], "copilotArcade.arcade.showGame");
		assert_eq!(json["contributes"]["keybindings"][0]["key"], "alt+g");
		assert_eq!(
			json["contributes"]["configuration"]["properties"]["copilotArcade.monitor.autoStart"],
			serde_json::json!({"type": "boolean", "default": true, "description": "Start monitoring on activation"})
		);
		assert_eq!(json["activationEvents"], serde_json::json!(["onCommand:copilotArcade.arcade.showGame", "onStartupFinished"]));
	}
}
