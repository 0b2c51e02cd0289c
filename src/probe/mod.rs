//! Probe module containing the connectivity engine and its result types

pub mod engine;

use crate::error::FailureKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, SocketAddr};

pub use engine::ConnectivityProbe;

/// One side of an established TCP connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub address: IpAddr,
    pub port: u16,
}

impl From<SocketAddr> for Endpoint {
    fn from(addr: SocketAddr) -> Self {
        Self {
            address: addr.ip(),
            port: addr.port(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}

/// Outcome of a single connectivity probe.
///
/// Exactly one variant is produced per call; the value is immutable once
/// built and never cached across calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// The transport connection was established
    Success(ProbeSuccess),
    /// The connection could not be established
    Failure(ProbeFailure),
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success(_))
    }

    /// Get the failure classification, if the probe failed
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            ProbeOutcome::Success(_) => None,
            ProbeOutcome::Failure(failure) => Some(failure.kind),
        }
    }
}

/// Details of an established connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeSuccess {
    /// Local side of the socket
    pub local: Endpoint,

    /// Remote side of the socket
    pub remote: Endpoint,

    /// Wall-clock time from connect start to resolution, in milliseconds
    pub elapsed_ms: u64,

    /// First reply line of the greeting exchange, when one completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,

    /// Advertised capability tokens, in the order received
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub capabilities: Vec<String>,
}

/// Details of a failed connection attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeFailure {
    /// Classified failure cause
    pub kind: FailureKind,

    /// Human-readable message from the transport layer
    pub message: String,

    /// Actionable guidance tailored to the failure kind, never empty
    pub suggestions: Vec<String>,
}

impl ProbeFailure {
    /// Build a failure outcome with the suggestions wired to its kind
    pub fn new(kind: FailureKind, message: String) -> Self {
        Self {
            kind,
            message,
            suggestions: kind.suggestions(),
        }
    }

    /// Build the connect-phase timeout failure
    pub fn timed_out(timeout_ms: u64) -> Self {
        Self::new(
            FailureKind::TimedOut,
            format!("Connection timeout after {}ms", timeout_ms),
        )
    }

    /// Build a failure from a socket-level error, classifying it first
    pub fn from_io_error(err: &std::io::Error) -> Self {
        Self::new(
            crate::error::classify_io_error(err),
            format!("Connection failed: {}", err),
        )
    }
}
