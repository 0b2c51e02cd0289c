//! Connectivity probe engine
//!
//! One probe call owns one socket: connect with a bounded timeout, classify
//! any socket error, and for mail-relay ports run a single EHLO exchange to
//! surface the server's advertised capabilities.

use crate::config::ProbeConfig;
use crate::probe::{Endpoint, ProbeFailure, ProbeOutcome, ProbeSuccess};
use crate::smtp::{self, Greeting};
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Single-shot TCP/SMTP connectivity prober.
///
/// Each call to [`probe`](Self::probe) is independent: no state survives
/// between calls and concurrent probes share nothing.
#[derive(Debug)]
pub struct ConnectivityProbe {
    config: ProbeConfig,
}

impl ConnectivityProbe {
    /// Create a new probe, rejecting invalid targets before any socket work
    pub fn new(config: ProbeConfig) -> crate::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Attempt one connection to the configured target.
    ///
    /// Transport success dominates: an established connection is reported as
    /// success even when the follow-up EHLO exchange times out or fails, in
    /// which case banner and capabilities stay empty. Transport errors come
    /// back as the failure variant, never as `Err`; only invalid input
    /// produces `Err`.
    pub async fn probe(&self) -> crate::Result<ProbeOutcome> {
        let addr = format!("{}:{}", self.config.target, self.config.port);
        let window = self.config.timeout_duration();
        let start = Instant::now();

        log::debug!("connecting to {} (timeout {:?})", addr, window);
        let stream = match timeout(window, TcpStream::connect(addr.as_str())).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(err)) => {
                log::debug!("connect to {} failed: {}", addr, err);
                return Ok(ProbeOutcome::Failure(ProbeFailure::from_io_error(&err)));
            }
            Err(_) => {
                log::debug!("connect to {} timed out", addr);
                return Ok(ProbeOutcome::Failure(ProbeFailure::timed_out(
                    self.config.timeout,
                )));
            }
        };

        let (local, remote) = match (stream.local_addr(), stream.peer_addr()) {
            (Ok(local), Ok(remote)) => (Endpoint::from(local), Endpoint::from(remote)),
            (Err(err), _) | (_, Err(err)) => {
                log::debug!("socket introspection on {} failed: {}", addr, err);
                return Ok(ProbeOutcome::Failure(ProbeFailure::from_io_error(&err)));
            }
        };
        log::debug!("connected {} -> {}", local, remote);

        let greeting = if self.config.is_handshake_port() {
            self.handshake(stream, window).await
        } else {
            // Non-SMTP port: the established connection is the whole answer.
            drop(stream);
            None
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;
        let (banner, capabilities) = match greeting {
            Some(greeting) => (Some(greeting.banner), greeting.capabilities),
            None => (None, Vec::new()),
        };

        Ok(ProbeOutcome::Success(ProbeSuccess {
            local,
            remote,
            elapsed_ms,
            banner,
            capabilities,
        }))
    }

    /// Send one EHLO line and collect the reply until a line terminator
    /// arrives, then parse whatever complete lines were received.
    ///
    /// Returns `None` when the exchange errors out or no complete line shows
    /// up inside the window; the caller still reports transport success. The
    /// stream is owned here, so every return path (including the timeout
    /// dropping the exchange future) closes the socket.
    async fn handshake(&self, mut stream: TcpStream, window: Duration) -> Option<Greeting> {
        let identity = self.config.ehlo_identity.clone();

        let exchange = async move {
            stream
                .write_all(smtp::ehlo_line(&identity).as_bytes())
                .await?;

            let mut collected: Vec<u8> = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = stream.read(&mut chunk).await?;
                if n == 0 {
                    break;
                }
                collected.extend_from_slice(&chunk[..n]);
                if collected.windows(2).any(|pair| pair == b"\r\n") {
                    break;
                }
            }
            Ok::<Vec<u8>, std::io::Error>(collected)
        };

        match timeout(window, exchange).await {
            Ok(Ok(collected)) => {
                let text = String::from_utf8_lossy(&collected);
                let mut lines: Vec<&str> = text.split("\r\n").collect();
                // The tail element is either empty or a partial line; only
                // complete lines are parsed.
                lines.pop();

                let greeting = smtp::parse_greeting(lines);
                if greeting.banner.is_empty() {
                    None
                } else {
                    Some(greeting)
                }
            }
            Ok(Err(err)) => {
                log::debug!("greeting exchange failed: {}", err);
                None
            }
            Err(_) => {
                log::debug!("greeting exchange timed out after {:?}", window);
                None
            }
        }
    }
}
