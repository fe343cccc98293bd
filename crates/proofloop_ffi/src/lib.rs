//! Flutter-facing bridge over `proofloop_core`.

pub mod api;
