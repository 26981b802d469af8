//! Animation config loading
//!
//! `eyes.toml` is checked by build.rs and compiled into the image; this
//! only has to turn it into an [`AnimatorConfig`].

use defmt::*;

use oculus_core::config::parse_config;
use oculus_core::AnimatorConfig;

/// Embedded configuration (compiled into firmware)
/// Edit eyes.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../eyes.toml");

/// Parse the embedded config, falling back to built-in defaults
pub fn load_config() -> AnimatorConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Parsed embedded configuration (closed frame {})",
                config.closed_frame.0
            );
            config
        }
        Err(e) => {
            // build.rs rejects bad files, so this means the two parsers disagree
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using built-in defaults");
            AnimatorConfig::default()
        }
    }
}
