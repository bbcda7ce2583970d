//! Library crate for tcp-scan-rs exposing reusable modules.
pub mod probe;
pub mod resolve;
pub mod scanner;
pub mod types;
