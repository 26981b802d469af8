//! Build script for oculus-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates eyes.toml at compile time, with both the host `toml` crate
//!   and the same parser the firmware runs at boot

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys accepted in each section, with their allowed integer range
const SCHEMA: &[(&str, &[(&str, i64, i64)])] = &[
    ("eyes", &[("closed_frame", 0, 255)]),
    (
        "timing",
        &[
            ("forced_closed_poll_ms", 1, 60_000),
            ("relaxed_blink_hold_ms", 0, 5_000),
            ("active_blink_hold_ms", 0, 5_000),
            ("wake_blink_gap_ms", 0, 5_000),
            ("wake_settle_ms", 0, 5_000),
            ("initial_blink_interval_ms", 0, 60_000),
        ],
    ),
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate eyes.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=eyes.toml");

    let config_path = Path::new("eyes.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: eyes.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds eyes.toml for animation tuning.             ║\n\
            ║  Please create one in the oculus-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read eyes.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in eyes.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let errors = validate_schema(&config);
    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid settings in eyes.toml                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    // Valid TOML is not enough: hex, signed or inline-table forms would
    // only fail on the device and boot on defaults
    if let Err(e) = oculus_core::config::parse_config(&config_content) {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: eyes.toml uses syntax the firmware cannot parse          ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            ║  Error: {:<56} ║\n\
            ║                                                                  ║\n\
            ║  Use [section] headers and plain decimal `key = value` lines.    ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format!("{:?}", e)
        );
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check sections, keys, types and ranges against `SCHEMA`
///
/// The on-device parser only understands `[section]` headers and integer
/// values, so anything else is rejected here rather than at boot.
fn validate_schema(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let root = match config {
        toml::Value::Table(t) => t,
        _ => return vec!["top level must be a table".to_string()],
    };

    for (section_name, section) in root {
        let Some((_, keys)) = SCHEMA.iter().find(|(name, _)| *name == section_name.as_str()) else {
            errors.push(format!("unknown section [{}]", section_name));
            continue;
        };

        let section = match section {
            toml::Value::Table(t) => t,
            _ => {
                errors.push(format!("[{}] must be a table", section_name));
                continue;
            }
        };

        for (key, value) in section {
            let Some(&(_, min, max)) = keys.iter().find(|(name, _, _)| *name == key.as_str()) else {
                errors.push(format!("[{}] unknown key '{}'", section_name, key));
                continue;
            };

            match value {
                toml::Value::Integer(v) if (min..=max).contains(v) => {}
                toml::Value::Integer(_) => {
                    errors.push(format!("[{}] {} must be {}-{}", section_name, key, min, max));
                }
                _ => errors.push(format!("[{}] {} must be an integer", section_name, key)),
            }
        }
    }

    errors
}
