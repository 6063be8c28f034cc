//! Configuration management for the VCF Collector service.
//!
//! This module handles loading and validating configuration from environment
//! variables. Everything has a default so the server runs out of the box; the
//! admin secret falls back to the historical literal with a loud warning so
//! operators know to set their own.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use tracing::warn;

/// Admin password used when `ADMIN_PASSWORD` is not configured.
const DEFAULT_ADMIN_PASSWORD: &str = "sila0022";

/// Configuration for the VCF Collector service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listening port (default: 3000)
    pub port: u16,

    /// Shared admin password for `/api/admin/login`
    pub admin_password: String,

    /// Number of accepted contacts that unlocks export (default: 200)
    pub target: usize,

    /// Path of the JSON snapshot file (default: "contacts.json")
    pub contacts_file: String,

    /// Whether VCF export requires the target to be reached (default: true)
    pub export_requires_target: bool,

    /// Optional decorative prefix applied to every FN line in the VCF export
    pub vcf_branding_prefix: Option<String>,

    /// Optional webhook URL notified once when the target is first reached
    pub notify_webhook_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `PORT`: Listening port (default: 3000)
    /// - `ADMIN_PASSWORD`: Admin shared secret (default: historical literal, warns)
    /// - `CONTACT_TARGET`: Goal count (default: 200)
    /// - `CONTACTS_FILE`: Snapshot path (default: "contacts.json")
    /// - `EXPORT_REQUIRES_TARGET`: VCF gating toggle (default: true)
    /// - `VCF_BRANDING_PREFIX`: Decorative FN prefix (default: unset)
    /// - `NOTIFY_WEBHOOK_URL`: Goal-reached dispatch target (default: unset)
    pub fn from_env() -> ConfigResult<Self> {
        // Load .env if present, but don't fail if it doesn't exist
        let _ = dotenvy::dotenv();

        let port = Self::parse_env_u16("PORT", 3000)?;
        let target = Self::parse_env_usize("CONTACT_TARGET", 200)?;

        if target == 0 {
            return Err(ConfigError::InvalidValue {
                var: "CONTACT_TARGET".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let admin_password = match env::var("ADMIN_PASSWORD") {
            Ok(val) if !val.trim().is_empty() => val,
            _ => {
                warn!("ADMIN_PASSWORD not set, using the built-in default");
                DEFAULT_ADMIN_PASSWORD.to_string()
            }
        };

        let contacts_file =
            env::var("CONTACTS_FILE").unwrap_or_else(|_| "contacts.json".to_string());

        let export_requires_target = Self::parse_env_bool("EXPORT_REQUIRES_TARGET", true)?;

        let vcf_branding_prefix = env::var("VCF_BRANDING_PREFIX")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let notify_webhook_url = env::var("NOTIFY_WEBHOOK_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());

        Ok(Config {
            port,
            admin_password,
            target,
            contacts_file,
            export_requires_target,
            vcf_branding_prefix,
            notify_webhook_url,
        })
    }

    /// Parse an environment variable as u16 with a default value.
    fn parse_env_u16(var_name: &str, default: u16) -> ConfigResult<u16> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a port number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as bool with a default value.
    ///
    /// Accepts `1/0`, `true/false`, `yes/no`, `on/off` (case-insensitive).
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                other => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be a boolean, got: {}", other),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 3000,
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            target: 200,
            contacts_file: "contacts.json".to_string(),
            export_requires_target: true,
            vcf_branding_prefix: None,
            notify_webhook_url: None,
        }
    }
}
