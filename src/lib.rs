//! relaycheck - single-shot TCP/SMTP connectivity probe
//!
//! Opens one connection to a target host and port, classifies what happened,
//! and for mail relay ports surfaces the capabilities the server advertises
//! in its extended-hello reply.

pub mod config;
pub mod error;
pub mod lookup;
pub mod output;
pub mod probe;
pub mod smtp;

// Re-export commonly used types
pub use config::ProbeConfig;
pub use error::{classify_io_error, FailureKind, ProbeError};
pub use output::{OutputConfig, OutputFormat, OutputManager, ProbeReport};
pub use probe::{ConnectivityProbe, ProbeOutcome};
pub use smtp::parse_greeting;

pub type Result<T> = std::result::Result<T, ProbeError>;
