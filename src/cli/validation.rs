//! Value parsers for CLI arguments

use std::net::IpAddr;
use std::path::PathBuf;

const MAX_ROLLBACK_STEPS: u32 = 100;

pub fn validate_port(value: &str) -> Result<u16, String> {
    match value.parse::<u16>() {
        Ok(0) => Err("port 0 is not allowed, use 1-65535".to_string()),
        Ok(port) => Ok(port),
        Err(_) => Err(format!("'{value}' is not a port number between 1 and 65535")),
    }
}

/// Accepts an IP address or a DNS hostname.
pub fn validate_host_address(value: &str) -> Result<String, String> {
    let host = value.trim();
    if host.is_empty() {
        return Err("host address cannot be empty".to_string());
    }
    if host.parse::<IpAddr>().is_ok() {
        return Ok(host.to_string());
    }
    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(format!("'{value}' is not a valid IPv4 address"));
    }
    if host.len() > 253 {
        return Err("host name exceeds 253 characters".to_string());
    }

    let valid_label = |label: &str| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    };
    if host.split('.').all(valid_label) {
        Ok(host.to_string())
    } else {
        Err(format!("'{value}' is not a valid host name"))
    }
}

pub fn validate_config_file_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if !path.is_file() {
        return Err(format!("configuration file '{value}' does not exist or is not a file"));
    }
    std::fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("cannot read configuration file '{value}': {e}"))
}

pub fn validate_rollback_steps(value: &str) -> Result<u32, String> {
    let steps: u32 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a positive number"))?;
    if steps == 0 || steps > MAX_ROLLBACK_STEPS {
        return Err(format!("rollback steps must be between 1 and {MAX_ROLLBACK_STEPS}"));
    }
    Ok(steps)
}
