//! Minimal SMTP greeting helpers
//!
//! Only the first round of the protocol is spoken: one EHLO line out, one
//! multi-line reply back. Continuation lines of the extended-hello reply
//! start with `250-`, the final line with `250 `.

/// Well-known mail relay and submission ports
pub const SMTP_PORTS: [u16; 3] = [25, 465, 587];

/// Check whether a port conventionally speaks SMTP
pub fn is_smtp_port(port: u16) -> bool {
    SMTP_PORTS.contains(&port)
}

/// Build the greeting line sent after connecting
pub fn ehlo_line(identity: &str) -> String {
    format!("EHLO {}\r\n", identity)
}

/// Parsed first exchange of an SMTP session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Greeting {
    /// First reply line, usually the `220` server banner
    pub banner: String,
    /// Capability tokens advertised in the extended-hello reply, in wire order
    pub capabilities: Vec<String>,
}

/// Extract the banner and advertised capabilities from raw reply lines.
///
/// The first non-empty line becomes the banner. Every later line carrying the
/// `250-` or `250 ` prefix contributes its stripped, trimmed remainder as a
/// capability when non-empty. Deterministic and free of I/O; empty input
/// yields an empty greeting.
pub fn parse_greeting<'a, I>(lines: I) -> Greeting
where
    I: IntoIterator<Item = &'a str>,
{
    let mut lines = lines
        .into_iter()
        .map(str::trim_end)
        .filter(|line| !line.is_empty());

    let banner = lines.next().unwrap_or("").to_string();

    let mut capabilities = Vec::new();
    for line in lines {
        let remainder = line
            .strip_prefix("250-")
            .or_else(|| line.strip_prefix("250 "));

        if let Some(remainder) = remainder {
            let token = remainder.trim();
            if !token.is_empty() {
                capabilities.push(token.to_string());
            }
        }
    }

    Greeting {
        banner,
        capabilities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smtp_port_detection() {
        assert!(is_smtp_port(25));
        assert!(is_smtp_port(465));
        assert!(is_smtp_port(587));
        assert!(!is_smtp_port(443));
        assert!(!is_smtp_port(2525));
    }

    #[test]
    fn test_ehlo_line_is_crlf_terminated() {
        assert_eq!(ehlo_line("relaycheck.local"), "EHLO relaycheck.local\r\n");
    }

    #[test]
    fn test_parse_typical_exchange() {
        let greeting = parse_greeting(["220 hello", "250-AUTH LOGIN", "250 OK"]);

        assert_eq!(greeting.banner, "220 hello");
        assert_eq!(greeting.capabilities, vec!["AUTH LOGIN", "OK"]);
    }

    #[test]
    fn test_parse_empty_input() {
        let greeting = parse_greeting(Vec::<&str>::new());

        assert_eq!(greeting.banner, "");
        assert!(greeting.capabilities.is_empty());
    }

    #[test]
    fn test_parse_tolerates_trailing_whitespace() {
        let greeting = parse_greeting(["220 mail.example.com ESMTP  ", "250-PIPELINING \t"]);

        assert_eq!(greeting.banner, "220 mail.example.com ESMTP");
        assert_eq!(greeting.capabilities, vec!["PIPELINING"]);
    }

    #[test]
    fn test_parse_ignores_non_capability_lines() {
        let greeting = parse_greeting([
            "220 mx.example.net",
            "250-SIZE 35882577",
            "500 unrecognized",
            "250 SMTPUTF8",
        ]);

        assert_eq!(greeting.banner, "220 mx.example.net");
        assert_eq!(greeting.capabilities, vec!["SIZE 35882577", "SMTPUTF8"]);
    }

    #[test]
    fn test_parse_skips_bare_prefix_lines() {
        let greeting = parse_greeting(["220 hi", "250- ", "250 "]);

        assert_eq!(greeting.banner, "220 hi");
        assert!(greeting.capabilities.is_empty());
    }

    #[test]
    fn test_parse_is_deterministic() {
        let lines = ["220 hello", "250-STARTTLS", "250 HELP"];
        assert_eq!(parse_greeting(lines), parse_greeting(lines));
    }
}
