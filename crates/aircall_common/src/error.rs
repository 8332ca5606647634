//! Error types for aircall.
//!
//! No error crosses a public operation boundary as a panic: callers either
//! get a success payload or one of these, and the presentation layer renders
//! the failure case as `{"error": <message>}`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AircallError {
    #[error("Flight {0} not found in database.")]
    FlightNotFound(String),

    #[error("No transcripts provided")]
    NoTranscripts,

    #[error("Completion error: {0}")]
    Completion(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AircallError {
    /// The `{"error": <message>}` payload consumed by the presentation layer.
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_flight() {
        let err = AircallError::FlightNotFound("AI999".to_string());
        assert_eq!(err.to_string(), "Flight AI999 not found in database.");
    }

    #[test]
    fn test_error_payload_shape() {
        let payload = AircallError::NoTranscripts.to_payload();
        assert_eq!(payload["error"], "No transcripts provided");
    }
}
