//! Guarded route settings.
//!
//! Settings hold the serializable part of [`GuardedRouteProps`] so routes
//! can be configured from a TOML file. Every key is optional; a key left
//! out keeps whatever the props builder already set.
//!
//! ```toml
//! redirect_to_path_when_fail = "/login/"
//! enable_debug = true
//! variant = "secure"          # or "enhanced"
//! failure_policy = "deny"     # or "stall"
//! ```
//!
//! [`GuardedRouteProps`]: crate::router::GuardedRouteProps

use crate::router::RouteVariant;
use secure_route_core::GuardFailurePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors raised while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	/// The settings file could not be read.
	#[error("Failed to read settings file {path}: {source}")]
	Io {
		/// Path that failed.
		path: PathBuf,
		/// Underlying I/O error.
		#[source]
		source: std::io::Error,
	},
	/// The settings are not valid TOML or have unexpected values.
	#[error("Invalid guarded route settings: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Serializable guarded route configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuardedRouteSettings {
	/// Redirect target for denied routes.
	pub redirect_to_path_when_fail: Option<String>,
	/// Enables the debug log side-channel.
	pub enable_debug: Option<bool>,
	/// Route flavor.
	pub variant: Option<RouteVariant>,
	/// Resolution of failed guard completions.
	pub failure_policy: Option<GuardFailurePolicy>,
}

impl GuardedRouteSettings {
	/// Parses settings from a TOML string.
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(source)?)
	}

	/// Reads settings from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&source)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_empty_settings_leave_every_key_unset() {
		let settings = GuardedRouteSettings::from_toml_str("").unwrap();
		assert_eq!(settings, GuardedRouteSettings::default());
		assert_eq!(settings.enable_debug, None);
		assert_eq!(settings.variant, None);
		assert_eq!(settings.failure_policy, None);
	}

	#[rstest]
	fn test_full_settings() {
		let settings = GuardedRouteSettings::from_toml_str(
			r#"
			redirect_to_path_when_fail = "/login/"
			enable_debug = true
			variant = "enhanced"
			failure_policy = "stall"
			"#,
		)
		.unwrap();

		assert_eq!(settings.redirect_to_path_when_fail.as_deref(), Some("/login/"));
		assert_eq!(settings.enable_debug, Some(true));
		assert_eq!(settings.variant, Some(RouteVariant::Enhanced));
		assert_eq!(settings.failure_policy, Some(GuardFailurePolicy::Stall));
	}

	#[rstest]
	#[case("variant = \"paranoid\"")]
	#[case("enable_debug = \"yes\"")]
	#[case("redirect = \"/login/\"")]
	fn test_invalid_settings(#[case] source: &str) {
		let result = GuardedRouteSettings::from_toml_str(source);
		assert!(matches!(result, Err(SettingsError::Parse(_))));
	}

	#[rstest]
	fn test_missing_file() {
		let result = GuardedRouteSettings::from_file("/nonexistent/secure-route.toml");
		assert!(matches!(result, Err(SettingsError::Io { .. })));
	}

	#[rstest]
	fn test_settings_round_trip_through_toml() {
		let settings = GuardedRouteSettings {
			redirect_to_path_when_fail: Some("/denied/".to_string()),
			variant: Some(RouteVariant::Enhanced),
			..Default::default()
		};
		let source = toml::to_string(&settings).unwrap();
		assert_eq!(GuardedRouteSettings::from_toml_str(&source).unwrap(), settings);
	}
}
