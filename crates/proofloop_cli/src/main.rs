//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `proofloop_core` linkage without the Flutter host.
//! - Print the default runtime config so hosts can diff against it.

use proofloop_core::RuntimeConfig;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("proofloop_core ping={}", proofloop_core::ping());
    println!("proofloop_core version={}", proofloop_core::core_version());
    match RuntimeConfig::default().to_json() {
        Ok(json) => {
            println!("proofloop_core runtime_config={json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("proofloop_core runtime_config error: {err}");
            ExitCode::FAILURE
        }
    }
}
