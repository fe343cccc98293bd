//! FFI API for the Flutter shell.
//!
//! # Responsibility
//! - Expose runtime setup and draft checks to Dart via FRB.
//! - Keep every result a plain string or envelope the host can render.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Empty string means success wherever a `String` error slot is returned.

use log::warn;
use proofloop_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ChallengeDraft, RuntimeConfig,
};

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - A different level or directory returns an error message.
/// - Returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Default runtime config as JSON, for the host to edit and send back.
#[flutter_rust_bridge::frb(sync)]
pub fn default_runtime_config() -> String {
    RuntimeConfig::default()
        .to_json()
        .unwrap_or_else(|_| "{}".to_string())
}

/// Checks a host-edited runtime config.
///
/// # FFI contract
/// - Absent keys fall back to defaults.
/// - Returns empty string when the config is usable, else the reason.
#[flutter_rust_bridge::frb(sync)]
pub fn validate_runtime_config(json: String) -> String {
    match RuntimeConfig::from_json(&json) {
        Ok(_) => String::new(),
        Err(err) => {
            warn!("event=config_validate module=ffi status=error");
            err.to_string()
        }
    }
}

/// Readiness envelope for a wizard draft sent from Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftCheckResponse {
    /// Whether the draft parsed and every required field is present.
    pub ready: bool,
    /// Missing required fields (`name|goal|prove_time|end_date|cover_image`).
    pub missing: Vec<String>,
    /// Parse error; empty when the JSON was accepted.
    pub message: String,
}

/// Lists the required fields a draft still lacks.
///
/// # FFI contract
/// - Sync call, no I/O.
/// - Malformed JSON yields `ready=false` with an empty `missing` list.
#[flutter_rust_bridge::frb(sync)]
pub fn organize_draft_missing_fields(json: String) -> DraftCheckResponse {
    let draft = match serde_json::from_str::<ChallengeDraft>(&json) {
        Ok(draft) => draft,
        Err(err) => {
            warn!("event=draft_check module=ffi status=error");
            return DraftCheckResponse {
                ready: false,
                missing: Vec::new(),
                message: format!("organize_draft_missing_fields failed: {err}"),
            };
        }
    };
    let missing = draft
        .missing_fields()
        .into_iter()
        .map(|field| field.as_str().to_string())
        .collect::<Vec<_>>();
    DraftCheckResponse {
        ready: missing.is_empty(),
        missing,
        message: String::new(),
    }
}
