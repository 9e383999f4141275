//! Line to [`LogEvent`] conversion.

use routewatch_core::LogEvent;
use routewatch_core::contracts::http::proxy::DATA_PREFIX;

use crate::error::FrameError;

/// Stateless parser for one decoded stream line.
///
/// Accepted shapes:
///
/// - `data: {"route": "...", "endpoint": "..."}` (the `data:` prefix and
///   surrounding whitespace are optional)
/// - empty or whitespace-only lines, which are frame separators
/// - lines starting with `:`, which are keep-alive comments
///
/// Separators and comments parse to `Ok(None)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventFrameParser;

impl EventFrameParser {
    /// Parse one line.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Malformed`] when a non-empty payload is not a
    /// JSON object with string `route` and `endpoint` fields. Unknown fields
    /// are ignored.
    pub fn parse(line: &str) -> Result<Option<LogEvent>, FrameError> {
        let line = line.trim();
        if line.starts_with(':') {
            return Ok(None);
        }

        let payload = line.strip_prefix(DATA_PREFIX).unwrap_or(line).trim();
        if payload.is_empty() {
            return Ok(None);
        }

        serde_json::from_str(payload)
            .map(Some)
            .map_err(|source| FrameError::Malformed {
                line: payload.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_line() {
        let event = EventFrameParser::parse(r#"data: {"route":"/a","endpoint":"index"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(event, LogEvent::new("/a", "index"));
    }

    #[test]
    fn test_parse_without_prefix() {
        let event = EventFrameParser::parse(r#"  {"route":"/b","endpoint":"show"}  "#)
            .unwrap()
            .unwrap();
        assert_eq!(event.route, "/b");
    }

    #[test]
    fn test_prefix_without_space() {
        let event = EventFrameParser::parse(r#"data:{"route":"/c","endpoint":"e"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(event.endpoint, "e");
    }

    #[test]
    fn test_blank_lines_are_separators() {
        for line in ["", "   ", "\t", "data:", "data:   "] {
            assert!(EventFrameParser::parse(line).unwrap().is_none(), "{line:?}");
        }
    }

    #[test]
    fn test_comment_lines_are_skipped() {
        assert!(EventFrameParser::parse(": ping").unwrap().is_none());
        assert!(EventFrameParser::parse(":").unwrap().is_none());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let event = EventFrameParser::parse(
            r#"data: {"route":"/a","endpoint":"index","method":"GET","ts":1}"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(event, LogEvent::new("/a", "index"));
    }

    #[test]
    fn test_malformed_json_keeps_payload() {
        let err = EventFrameParser::parse("data: {not json").unwrap_err();
        assert_eq!(err.line(), "{not json");
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let err = EventFrameParser::parse(r#"data: {"route":"/a"}"#).unwrap_err();
        assert!(err.to_string().contains("endpoint"));
    }

    #[test]
    fn test_non_object_is_malformed() {
        assert!(EventFrameParser::parse("data: [1,2]").is_err());
        assert!(EventFrameParser::parse("data: \"text\"").is_err());
    }
}
