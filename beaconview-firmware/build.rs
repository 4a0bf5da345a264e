//! Build script for beaconview-firmware
//!
//! - Passes the esp-hal and defmt linker scripts
//! - Validates beacon.toml at compile time

use std::fs;
use std::path::Path;

fn main() {
    setup_linker();
    validate_config();
}

/// Linker scripts for esp-hal and defmt
fn setup_linker() {
    println!("cargo:rustc-link-arg=-Tlinkall.x");
    println!("cargo:rustc-link-arg=-Tdefmt.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate beacon.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=beacon.toml");

    let config_path = Path::new("beacon.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: beacon.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a beacon.toml configuration file.         ║\n\
            ║  Please create one in the beaconview-firmware directory.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read beacon.toml                               ║\n\
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
                ║  ERROR: Invalid TOML syntax in beacon.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_target(&config, &mut errors);
    validate_display(&config, &mut errors);
    validate_scan(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in beacon.toml                     ║\n\
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

    println!("cargo:warning=beacon.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                let head: String = line.chars().take(61).collect();
                format!("{}...", head)
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `aa:bb:cc:dd:ee:ff`, either case
fn is_valid_address(text: &str) -> bool {
    let octets: Vec<&str> = text.split(':').collect();
    octets.len() == 6
        && octets
            .iter()
            .all(|o| o.len() == 2 && o.chars().all(|c| c.is_ascii_hexdigit()))
}

fn integer(section: &toml::Value, key: &str) -> Option<i64> {
    section.get(key).and_then(|v| v.as_integer())
}

/// Validate the [target] section
fn validate_target(config: &toml::Value, errors: &mut Vec<String>) {
    match config.get("target").and_then(|t| t.get("address")) {
        Some(toml::Value::String(address)) => {
            if !is_valid_address(address) {
                errors.push(format!("[target] address '{}' is not aa:bb:cc:dd:ee:ff", address));
            }
        }
        Some(_) => errors.push("[target] address must be a string".to_string()),
        None => errors.push("Missing [target] address".to_string()),
    }
}

/// Validate the optional [display] section
fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(display) = config.get("display") else {
        return;
    };

    if let Some(lines) = integer(display, "max_scroll_lines") {
        if !(1..=6).contains(&lines) {
            errors.push("[display] max_scroll_lines must be 1-6".to_string());
        }
    }

    if let Some(address) = integer(display, "i2c_address") {
        if !(0x08..=0x77).contains(&address) {
            errors.push("[display] i2c_address must be a 7-bit address".to_string());
        }
    }
}

/// Validate the optional [scan] section
fn validate_scan(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(scan) = config.get("scan") else {
        return;
    };

    if let Some(duration) = integer(scan, "duration_s") {
        if !(1..=u32::MAX as i64).contains(&duration) {
            errors.push(format!("[scan] duration_s must be 1-{}", u32::MAX));
        }
    }

    if let Some(idle) = integer(scan, "idle_ms") {
        if !(0..=u32::MAX as i64).contains(&idle) {
            errors.push(format!("[scan] idle_ms must be 0-{}", u32::MAX));
        }
    }

    let interval = integer(scan, "interval_ms").unwrap_or(100);
    let window = integer(scan, "window_ms").unwrap_or(99);
    if !(1..=u16::MAX as i64).contains(&interval) {
        errors.push("[scan] interval_ms must be 1-65535".to_string());
    }
    if window <= 0 || window > interval {
        errors.push("[scan] window_ms must be 1..=interval_ms".to_string());
    }

    if let Some(active) = scan.get("active") {
        if !active.is_bool() {
            errors.push("[scan] active must be true or false".to_string());
        }
    }
}
