//! Error handling for the relaycheck probe
//!
//! Socket-level failures are mapped onto a small, serializable taxonomy so
//! callers can render actionable guidance without inspecting raw io errors.

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Main error type for probe operations
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Output error: {0}")]
    OutputError(String),
}

/// Classification of a failed connection attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    /// The target actively refused the connection
    ConnectionRefused,
    /// The hostname did not resolve
    HostNotFound,
    /// No connect or error event arrived within the timeout
    TimedOut,
    /// The local system denied the outbound connection
    PermissionDenied,
    /// Anything the taxonomy does not cover
    Unknown,
}

impl FailureKind {
    /// Get the wire name of the failure kind
    pub fn name(&self) -> &'static str {
        match self {
            FailureKind::ConnectionRefused => "CONNECTION_REFUSED",
            FailureKind::HostNotFound => "HOST_NOT_FOUND",
            FailureKind::TimedOut => "TIMED_OUT",
            FailureKind::PermissionDenied => "PERMISSION_DENIED",
            FailureKind::Unknown => "UNKNOWN",
        }
    }

    /// Actionable guidance rendered alongside a failed probe
    pub fn suggestions(&self) -> Vec<String> {
        let lines: &[&str] = match self {
            FailureKind::ConnectionRefused => &[
                "The server is not listening on this port",
                "Check if the service is running",
                "Verify the port number is correct",
            ],
            FailureKind::HostNotFound => &[
                "Hostname could not be resolved",
                "Check DNS configuration",
                "Verify the hostname is correct",
            ],
            FailureKind::TimedOut => &[
                "Port may be blocked by network policy",
                "Check if the host is reachable",
                "Check firewall settings",
                "Try an alternate port (587 or 465 for SMTP)",
            ],
            FailureKind::PermissionDenied => &[
                "Permission denied by the local system",
                "Check egress and firewall policy",
                "Verify security policies allow outbound connections",
            ],
            FailureKind::Unknown => &[
                "Check network configuration",
                "Verify host and port are correct",
                "Check firewall and security settings",
            ],
        };
        lines.iter().map(|s| s.to_string()).collect()
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Map a socket-level error onto the failure taxonomy.
///
/// Pure: never touches the network, so it stays testable with constructed
/// `io::Error` values. Resolver failures surface as uncategorized io errors,
/// hence the message sniffing for the common getaddrinfo strings.
pub fn classify_io_error(err: &io::Error) -> FailureKind {
    match err.kind() {
        io::ErrorKind::ConnectionRefused => FailureKind::ConnectionRefused,
        io::ErrorKind::PermissionDenied => FailureKind::PermissionDenied,
        io::ErrorKind::TimedOut => FailureKind::TimedOut,
        _ => {
            let message = err.to_string();
            if message.contains("failed to lookup address")
                || message.contains("Name or service not known")
                || message.contains("nodename nor servname")
            {
                FailureKind::HostNotFound
            } else {
                FailureKind::Unknown
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_connection_refused() {
        let err = io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused");
        assert_eq!(classify_io_error(&err), FailureKind::ConnectionRefused);
    }

    #[test]
    fn test_classify_permission_denied() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "operation not permitted");
        assert_eq!(classify_io_error(&err), FailureKind::PermissionDenied);
    }

    #[test]
    fn test_classify_timed_out() {
        let err = io::Error::new(io::ErrorKind::TimedOut, "connection timed out");
        assert_eq!(classify_io_error(&err), FailureKind::TimedOut);
    }

    #[test]
    fn test_classify_resolver_failure() {
        let err = io::Error::new(
            io::ErrorKind::Other,
            "failed to lookup address information: Name or service not known",
        );
        assert_eq!(classify_io_error(&err), FailureKind::HostNotFound);
    }

    #[test]
    fn test_classify_unknown() {
        let err = io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe");
        assert_eq!(classify_io_error(&err), FailureKind::Unknown);
    }

    #[test]
    fn test_every_kind_has_suggestions() {
        let kinds = [
            FailureKind::ConnectionRefused,
            FailureKind::HostNotFound,
            FailureKind::TimedOut,
            FailureKind::PermissionDenied,
            FailureKind::Unknown,
        ];
        for kind in kinds {
            assert!(!kind.suggestions().is_empty(), "{} has no suggestions", kind);
        }
    }

    #[test]
    fn test_timeout_suggestions_mention_policy_and_alternate_ports() {
        let suggestions = FailureKind::TimedOut.suggestions();
        assert!(suggestions
            .iter()
            .any(|s| s.contains("blocked by network policy")));
        assert!(suggestions.iter().any(|s| s.contains("587") && s.contains("465")));
    }

    #[test]
    fn test_kind_serializes_to_screaming_snake_case() {
        let json = serde_json::to_string(&FailureKind::ConnectionRefused).unwrap();
        assert_eq!(json, "\"CONNECTION_REFUSED\"");
    }
}
