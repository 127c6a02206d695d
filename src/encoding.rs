//! Body encoding and decoding configuration.

use serde::{de::DeserializeOwned, Serialize};

use crate::Error;

/// Stateless encoder/decoder configuration for request and response bodies.
///
/// Bodies are JSON. Date and time fields ride on their types' serde
/// implementations; `chrono` types produce and consume ISO-8601 (RFC 3339)
/// text, which is the expected wire format.
///
/// An `EncodingOptions` value is plain configuration with no interior state,
/// so it is safe to share across concurrent calls. Each [`Endpoint`] carries
/// its own copy and may override the default.
///
/// [`Endpoint`]: crate::Endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodingOptions {
    pretty: bool,
}

impl EncodingOptions {
    /// Creates the default options: compact JSON.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options producing pretty-printed JSON bodies.
    ///
    /// Useful against servers that log raw request bodies.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Serializes a body value to JSON bytes.
    ///
    /// Failure (e.g. a map with non-string keys, a non-finite float) maps to
    /// [`Error::PreparationFailed`]: the request never leaves the process.
    pub fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, Error> {
        let result = if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        };
        result.map_err(|e| Error::PreparationFailed(format!("failed to encode request body: {e}")))
    }

    /// Deserializes response bytes into the expected type.
    ///
    /// Failure maps to [`Error::InvalidData`] with the raw body text
    /// preserved for debugging.
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, Error> {
        serde_json::from_slice(bytes).map_err(|e| Error::InvalidData {
            raw_response: String::from_utf8_lossy(bytes).into_owned(),
            serde_error: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Event {
        name: String,
        occurred_at: DateTime<Utc>,
    }

    #[test]
    fn round_trips_date_fields_through_iso_8601() {
        let event = Event {
            name: "deploy".to_string(),
            occurred_at: Utc.with_ymd_and_hms(2024, 5, 17, 10, 30, 42).unwrap(),
        };

        let options = EncodingOptions::new();
        let bytes = options.encode(&event).unwrap();

        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.contains("2024-05-17T10:30:42"), "got {text}");

        let decoded: Event = options.decode(&bytes).unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn decode_failure_preserves_the_raw_body() {
        let options = EncodingOptions::new();
        let err = options.decode::<Event>(b"not json").unwrap_err();
        match err {
            Error::InvalidData { raw_response, .. } => assert_eq!(raw_response, "not json"),
            other => panic!("expected InvalidData, got {other:?}"),
        }
    }

    #[test]
    fn pretty_options_produce_indented_output() {
        let event = Event {
            name: "deploy".to_string(),
            occurred_at: Utc.with_ymd_and_hms(2024, 5, 17, 10, 30, 42).unwrap(),
        };

        let compact = EncodingOptions::new().encode(&event).unwrap();
        let pretty = EncodingOptions::pretty().encode(&event).unwrap();

        assert!(pretty.len() > compact.len());
        assert_eq!(
            EncodingOptions::new().decode::<Event>(&pretty).unwrap(),
            event
        );
    }
}
