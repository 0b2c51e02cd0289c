//! Output formatting and management

use crate::probe::ProbeOutcome;
use chrono::{DateTime, Utc};
use colored::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub file: Option<String>,
    pub colored: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            file: None,
            colored: true,
        }
    }
}

/// Serialized envelope around a probe outcome.
///
/// Carries the presentation metadata the probe itself does not own: target
/// echo, timestamp, and the informational public IP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeReport {
    pub host: String,
    pub port: u16,
    pub my_ip_address: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub outcome: ProbeOutcome,
}

impl ProbeReport {
    pub fn new(host: String, port: u16, my_ip_address: String, outcome: ProbeOutcome) -> Self {
        Self {
            host,
            port,
            my_ip_address,
            timestamp: Utc::now(),
            outcome,
        }
    }
}

/// Main output manager
pub struct OutputManager {
    config: OutputConfig,
}

impl OutputManager {
    pub fn new(config: OutputConfig) -> Self {
        if !config.colored {
            colored::control::set_override(false);
        }
        Self { config }
    }

    /// Render the report and deliver it to stdout or the configured file
    pub fn write_report(&self, report: &ProbeReport) -> crate::Result<()> {
        let rendered = match self.config.format {
            OutputFormat::Text => self.format_text(report),
            OutputFormat::Json => serde_json::to_string_pretty(report)
                .map_err(|e| crate::ProbeError::OutputError(e.to_string()))?,
        };

        match &self.config.file {
            Some(path) => {
                let mut file = File::create(path)
                    .map_err(|e| crate::ProbeError::OutputError(e.to_string()))?;
                writeln!(file, "{}", rendered)
                    .map_err(|e| crate::ProbeError::OutputError(e.to_string()))?;
            }
            None => println!("{}", rendered),
        }

        Ok(())
    }

    fn format_text(&self, report: &ProbeReport) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "{} {}:{} at {}",
            "Probe target:".bright_blue(),
            report.host.bright_cyan(),
            report.port.to_string().bright_cyan(),
            report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        lines.push(format!(
            "{} {}",
            "Public IP:".bright_blue(),
            report.my_ip_address
        ));

        match &report.outcome {
            ProbeOutcome::Success(success) => {
                lines.push(format!(
                    "{} connected in {}ms",
                    "[+]".bright_green().bold(),
                    success.elapsed_ms
                ));
                lines.push(format!("    local:  {}", success.local));
                lines.push(format!("    remote: {}", success.remote));

                if let Some(banner) = &success.banner {
                    lines.push(format!("{} {}", "Server banner:".bright_blue(), banner));
                }
                if !success.capabilities.is_empty() {
                    lines.push(format!("{}", "Capabilities:".bright_blue()));
                    for capability in &success.capabilities {
                        lines.push(format!("    {}", capability.bright_cyan()));
                    }
                }
            }
            ProbeOutcome::Failure(failure) => {
                lines.push(format!(
                    "{} {} ({})",
                    "[!]".bright_red().bold(),
                    failure.message.bright_red(),
                    failure.kind
                ));
                lines.push(format!("{}", "Suggestions:".bright_yellow()));
                for suggestion in &failure.suggestions {
                    lines.push(format!("    - {}", suggestion));
                }
            }
        }

        lines.join("\n")
    }
}
