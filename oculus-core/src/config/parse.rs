//! Minimal TOML parser for the animation config
//!
//! Handles only the subset the config file uses. It does NOT support the
//! full TOML spec.
//!
//! Supported features:
//! - `[section]` headers
//! - `key = integer` pairs (underscores allowed as digit separators)
//! - Comments (`# ...`), whole-line or trailing
//!
//! ```toml
//! [eyes]
//! closed_frame = 8
//!
//! [timing]
//! forced_closed_poll_ms = 500
//! relaxed_blink_hold_ms = 200
//! ```

use oculus_protocol::FrameId;

use super::types::AnimatorConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Section header not recognized
    InvalidSection,
    /// Line is neither a header nor `key = value`
    InvalidLine,
    /// Key not valid in its section
    UnknownKey,
    /// Value is not an integer in range
    InvalidValue,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Eyes,
    Timing,
}

/// Parse config text on top of the defaults
pub fn parse_config(input: &str) -> Result<AnimatorConfig, ConfigError> {
    let mut config = AnimatorConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = parse_section_header(header.trim())?;
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ConfigError::InvalidLine)?;
        apply_key(&mut config, section, key.trim(), value.trim())?;
    }

    if config.forced_closed_poll_ms == 0 {
        return Err(ConfigError::InvalidValue);
    }

    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(header: &str) -> Result<Section, ConfigError> {
    match header {
        "eyes" => Ok(Section::Eyes),
        "timing" => Ok(Section::Timing),
        _ => Err(ConfigError::InvalidSection),
    }
}

fn apply_key(
    config: &mut AnimatorConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    match (section, key) {
        (Section::Eyes, "closed_frame") => {
            let id = parse_u32(value)?;
            let id = u8::try_from(id).map_err(|_| ConfigError::InvalidValue)?;
            config.closed_frame = FrameId(id);
        }
        (Section::Timing, "forced_closed_poll_ms") => {
            config.forced_closed_poll_ms = parse_u32(value)?
        }
        (Section::Timing, "relaxed_blink_hold_ms") => {
            config.relaxed_blink_hold_ms = parse_u32(value)?
        }
        (Section::Timing, "active_blink_hold_ms") => config.active_blink_hold_ms = parse_u32(value)?,
        (Section::Timing, "wake_blink_gap_ms") => config.wake_blink_gap_ms = parse_u32(value)?,
        (Section::Timing, "wake_settle_ms") => config.wake_settle_ms = parse_u32(value)?,
        (Section::Timing, "initial_blink_interval_ms") => {
            config.initial_blink_interval_ms = parse_u32(value)?
        }
        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

/// Parse a non-negative integer, allowing `_` separators
fn parse_u32(value: &str) -> Result<u32, ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::InvalidValue);
    }

    let mut result: u32 = 0;
    for c in value.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(10).ok_or(ConfigError::InvalidValue)?;
        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(digit))
            .ok_or(ConfigError::InvalidValue)?;
    }
    Ok(result)
}
