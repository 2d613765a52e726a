//! Invocation envelope and request validation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::ValidationError;
use crate::format::{DateFormat, FilenameFormat, parse_local_time};

/// Host invocation event.
///
/// The body normally arrives as a JSON document encoded in a string. A body
/// that is already a JSON object is accepted as well.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Request payload
    #[serde(default)]
    pub body: Option<Value>,
}

impl Event {
    /// Wrap a JSON-encoded request body.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: Some(Value::String(body.into())),
        }
    }

    /// Decode a whole envelope document.
    pub fn from_json(raw: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(raw).map_err(|e| {
            debug!(error = %e, "Envelope is not valid JSON");
            ValidationError::MalformedBody
        })
    }

    /// Decode the request carried in the body.
    pub fn request(&self) -> Result<RawRequest, ValidationError> {
        let decoded = match &self.body {
            Some(Value::String(body)) => serde_json::from_str(body),
            Some(body @ Value::Object(_)) => RawRequest::deserialize(body),
            _ => return Err(ValidationError::MalformedBody),
        };

        decoded.map_err(|e| {
            debug!(error = %e, "Request body did not decode");
            ValidationError::MalformedBody
        })
    }
}

/// Request fields as sent by the client, before any checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRequest {
    /// File text to classify
    #[serde(rename = "text", default)]
    pub content: Option<String>,

    /// Caller's local date, `YYYY-MM-DD`
    #[serde(default)]
    pub local_time: Option<String>,

    /// Date format token, e.g. `YYYYMMDD`
    #[serde(default)]
    pub date_format: Option<String>,

    /// Filename template, e.g. `{date} - {filename}`
    #[serde(default)]
    pub filename_format: Option<String>,
}

impl RawRequest {
    /// Check the fields in order, stopping at the first failure.
    pub fn validate(self) -> Result<ValidatedRequest, ValidationError> {
        let content = self
            .content
            .filter(|content| !content.is_empty())
            .ok_or(ValidationError::EmptyContent)?;

        let local_time = self
            .local_time
            .filter(|local_time| !local_time.is_empty())
            .ok_or(ValidationError::EmptyLocalTime)?;

        let date_format: DateFormat = self
            .date_format
            .as_deref()
            .ok_or(ValidationError::InvalidDateFormat)?
            .parse()?;

        let filename_format: FilenameFormat = self
            .filename_format
            .as_deref()
            .ok_or(ValidationError::InvalidFilenameFormat)?
            .parse()?;

        let date = parse_local_time(&local_time)?;

        debug!(
            content_chars = content.chars().count(),
            %date,
            %date_format,
            %filename_format,
            "Request validated"
        );

        Ok(ValidatedRequest {
            content,
            date,
            date_format,
            filename_format,
        })
    }
}

/// A request that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    /// File text, non-empty
    pub content: String,
    /// Caller's local date
    pub date: NaiveDate,
    /// How to render the date
    pub date_format: DateFormat,
    /// Where to put the date
    pub filename_format: FilenameFormat,
}

impl ValidatedRequest {
    /// The date rendered in the requested format.
    pub fn formatted_date(&self) -> String {
        self.date_format.format(self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn complete() -> RawRequest {
        RawRequest {
            content: Some("Quarterly results".to_string()),
            local_time: Some("2024-01-01".to_string()),
            date_format: Some("YYYYMMDD".to_string()),
            filename_format: Some("{date} - {filename}".to_string()),
        }
    }

    #[test]
    fn test_validate_complete_request() {
        let validated = complete().validate().unwrap();

        assert_eq!(validated.content, "Quarterly results");
        assert_eq!(validated.date_format, DateFormat::Compact);
        assert_eq!(validated.filename_format, FilenameFormat::DateThenFilename);
        assert_eq!(validated.formatted_date(), "20240101");
    }

    #[rstest]
    #[case(RawRequest { content: None, ..complete() }, ValidationError::EmptyContent)]
    #[case(RawRequest { content: Some(String::new()), ..complete() }, ValidationError::EmptyContent)]
    #[case(RawRequest { local_time: None, ..complete() }, ValidationError::EmptyLocalTime)]
    #[case(RawRequest { local_time: Some(String::new()), ..complete() }, ValidationError::EmptyLocalTime)]
    #[case(RawRequest { date_format: None, ..complete() }, ValidationError::InvalidDateFormat)]
    #[case(RawRequest { date_format: Some("DDMMYYYY".into()), ..complete() }, ValidationError::InvalidDateFormat)]
    #[case(RawRequest { filename_format: None, ..complete() }, ValidationError::InvalidFilenameFormat)]
    #[case(RawRequest { filename_format: Some("{date}".into()), ..complete() }, ValidationError::InvalidFilenameFormat)]
    #[case(RawRequest { local_time: Some("2024-02-30".into()), ..complete() }, ValidationError::InvalidLocalTime)]
    fn test_validate_failures(#[case] request: RawRequest, #[case] expected: ValidationError) {
        assert_eq!(request.validate(), Err(expected));
    }

    #[test]
    fn test_checks_run_in_order() {
        assert_eq!(
            RawRequest::default().validate(),
            Err(ValidationError::EmptyContent)
        );

        let request = RawRequest {
            content: Some("x".into()),
            ..RawRequest::default()
        };
        assert_eq!(request.validate(), Err(ValidationError::EmptyLocalTime));

        // an impossible date only matters once the enums are valid
        let request = RawRequest {
            local_time: Some("garbage".into()),
            date_format: Some("nope".into()),
            ..complete()
        };
        assert_eq!(request.validate(), Err(ValidationError::InvalidDateFormat));
    }

    #[test]
    fn test_whitespace_content_is_accepted() {
        let request = RawRequest {
            content: Some("   ".into()),
            ..complete()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_event_string_body() {
        let body = json!({
            "text": "hello",
            "local_time": "2024-01-01",
            "date_format": "YYYY-MM-DD",
            "filename_format": "{filename}",
            "unexpected": 42
        });
        let event = Event::new(body.to_string());

        let request = event.request().unwrap();
        assert_eq!(request.content.as_deref(), Some("hello"));
        assert_eq!(request.filename_format.as_deref(), Some("{filename}"));
    }

    #[test]
    fn test_event_object_body() {
        let event = Event::from_json(r#"{"body": {"text": "hello", "local_time": "2024-01-01"}}"#)
            .unwrap();

        let request = event.request().unwrap();
        assert_eq!(request.local_time.as_deref(), Some("2024-01-01"));
        assert_eq!(request.date_format, None);
    }

    #[rstest]
    #[case(Event::default())]
    #[case(Event::new("not json"))]
    #[case(Event::new("null"))]
    #[case(Event::new(r#"{"text": 7}"#))]
    #[case(Event { body: Some(json!(["text"])) })]
    fn test_event_malformed_body(#[case] event: Event) {
        assert_eq!(event.request(), Err(ValidationError::MalformedBody));
    }

    #[test]
    fn test_envelope_not_json() {
        assert_eq!(
            Event::from_json("{body:"),
            Err(ValidationError::MalformedBody)
        );
    }

    #[test]
    fn test_null_fields_are_missing() {
        let event = Event::new(r#"{"text": null}"#);
        let request = event.request().unwrap();
        assert_eq!(request.validate(), Err(ValidationError::EmptyContent));
    }
}
