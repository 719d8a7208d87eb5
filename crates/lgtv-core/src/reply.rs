//! Parsers for query replies.
//!
//! Acknowledgement-style commands answer `OK` and are checked by the session.
//! Queries answer with a `KEY:VALUE` shape that each function here validates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::command;

/// A reply did not have the shape its command promises.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to parse reply to {command}: {reply:?}")]
pub struct ParseError {
    pub command: &'static str,
    pub reply: String,
}

impl ParseError {
    fn new(command: &'static str, reply: &str) -> Self {
        Self {
            command,
            reply: reply.to_string(),
        }
    }
}

/// What the TV reports about the foreground application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDetails {
    pub app: String,
    pub hot_plug: Option<String>,
    pub signal: Option<bool>,
    pub hdcp_version: Option<String>,
    pub hdcp_status: Option<String>,
}

/// Parses `VOL:<digits>`.
pub fn parse_volume(reply: &str) -> Result<u8, ParseError> {
    let err = || ParseError::new(command::CURRENT_VOLUME, reply);
    let digits = reply.strip_prefix("VOL:").ok_or_else(err)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }
    digits.parse().map_err(|_| err())
}

/// Parses `MUTE:on` / `MUTE:off`.
pub fn parse_mute_state(reply: &str) -> Result<bool, ParseError> {
    match reply {
        "MUTE:on" => Ok(true),
        "MUTE:off" => Ok(false),
        _ => Err(ParseError::new(command::MUTE_STATE, reply)),
    }
}

/// The TV only answers `ON`; anything else means the feature is not active.
pub fn parse_ip_control_state(reply: &str) -> Result<bool, ParseError> {
    if reply == "ON" {
        Ok(true)
    } else {
        Err(ParseError::new(command::IP_CONTROL_STATE, reply))
    }
}

/// Parses the `CURRENT_APP` reply.
///
/// An empty reply means the panel is off and yields `None`.  Otherwise the
/// reply is a run of `Key:Value` pairs, e.g.
/// `APP:com.webos.app.hdmi1 Hot plug:Yes Signal:Yes HDCP:2.2 HDCP Status:Authenticated`.
pub fn parse_current_app(reply: &str) -> Result<Option<AppDetails>, ParseError> {
    if reply.is_empty() {
        return Ok(None);
    }

    let pairs = key_value_pairs(reply);
    let lookup = |key: &str| {
        pairs
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    };

    let app = lookup("APP").ok_or_else(|| ParseError::new(command::CURRENT_APP, reply))?;
    Ok(Some(AppDetails {
        app,
        hot_plug: lookup("Hot plug"),
        signal: lookup("Signal").map(|s| s == "Yes"),
        hdcp_version: lookup("HDCP"),
        hdcp_status: lookup("HDCP Status"),
    }))
}

fn is_key_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c.is_whitespace()
}

/// Splits `A:x B c:y` into `[("A", "x"), ("B c", "y")]`.  A key is the run of
/// word characters and spaces before a colon; a value runs to the next space.
fn key_value_pairs(text: &str) -> Vec<(&str, &str)> {
    let mut pairs = Vec::new();
    let mut rest = text;
    while let Some(colon) = rest.find(':') {
        let key = rest[..colon]
            .rsplit(|c: char| !is_key_char(c))
            .next()
            .unwrap_or_default()
            .trim();
        let after = &rest[colon + 1..];
        let value_end = after.find(char::is_whitespace).unwrap_or(after.len());
        let value = &after[..value_end];
        if !key.is_empty() && !value.is_empty() {
            pairs.push((key, value));
        }
        rest = &after[value_end..];
    }
    pairs
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_volume_accepts_digits() {
        assert_eq!(parse_volume("VOL:0"), Ok(0));
        assert_eq!(parse_volume("VOL:43"), Ok(43));
        assert_eq!(parse_volume("VOL:100"), Ok(100));
    }

    #[test]
    fn test_parse_volume_rejects_malformed_reply() {
        for bad in ["VOL:1d00", "VOL:", "VOL:+5", "vol:5", "OK", "VOL:999"] {
            assert!(parse_volume(bad).is_err(), "{bad:?} must be rejected");
        }
    }

    #[test]
    fn test_parse_mute_state() {
        assert_eq!(parse_mute_state("MUTE:on"), Ok(true));
        assert_eq!(parse_mute_state("MUTE:off"), Ok(false));
        assert!(parse_mute_state("MUTE:maybe").is_err());
    }

    #[test]
    fn test_parse_ip_control_state_requires_on() {
        assert_eq!(parse_ip_control_state("ON"), Ok(true));
        let err = parse_ip_control_state("OFF").unwrap_err();
        assert_eq!(err.command, "GET_IPCONTROL_STATE");
        assert_eq!(err.reply, "OFF");
    }

    #[test]
    fn test_parse_current_app_empty_means_off() {
        assert_eq!(parse_current_app(""), Ok(None));
    }

    #[test]
    fn test_parse_current_app_single_pair() {
        // Arrange / Act
        let details = parse_current_app("APP:youtube.leanback.v4").unwrap().unwrap();

        // Assert
        assert_eq!(details.app, "youtube.leanback.v4");
        assert_eq!(details.hot_plug, None);
        assert_eq!(details.signal, None);
    }

    #[test]
    fn test_parse_current_app_full_details() {
        // Arrange
        let reply = "APP:com.webos.app.hdmi1 Hot plug:Yes Signal:Yes HDCP:2.2 HDCP Status:Authenticated";

        // Act
        let details = parse_current_app(reply).unwrap().unwrap();

        // Assert
        assert_eq!(
            details,
            AppDetails {
                app: "com.webos.app.hdmi1".to_string(),
                hot_plug: Some("Yes".to_string()),
                signal: Some(true),
                hdcp_version: Some("2.2".to_string()),
                hdcp_status: Some("Authenticated".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_current_app_signal_no_is_false() {
        let details = parse_current_app("APP:com.webos.app.hdmi2 Signal:No")
            .unwrap()
            .unwrap();
        assert_eq!(details.signal, Some(false));
    }

    #[test]
    fn test_parse_current_app_without_app_key_fails() {
        assert!(parse_current_app("Signal:Yes").is_err());
        assert!(parse_current_app("garbage").is_err());
    }
}
