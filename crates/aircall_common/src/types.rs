//! Shared payload types.
//!
//! All of these serialize to the flat JSON objects the presentation layer
//! consumes. Categorization results also deserialize, because the
//! model-assisted path strict-parses completion output back into
//! [`CallCategorization`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Operational status of a flight, as supplied by the flight-record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightStatus {
    Scheduled,
    #[serde(rename = "On Time")]
    OnTime,
    Delayed,
    Boarding,
    Cancelled,
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Scheduled => "Scheduled",
            Self::OnTime => "On Time",
            Self::Delayed => "Delayed",
            Self::Boarding => "Boarding",
            Self::Cancelled => "Cancelled",
        };
        write!(f, "{}", s)
    }
}

/// Immutable fact sheet for one flight. Owned by the flight-record store;
/// the engines never mutate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub flight_number: String,
    pub departure_time: String,
    pub destination: String,
    pub status: FlightStatus,
    pub terminal: String,
    pub gate: String,
    pub arrival_time: String,
}

/// Closed set of call categories.
///
/// Declaration order is load-bearing: the categorizer scans its keyword
/// rules in this order, and KPI tie-breaks resolve to the earliest declared
/// category. `Unknown` is the sentinel for calls that failed categorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallCategory {
    #[serde(rename = "Flight Booking")]
    FlightBooking,
    #[serde(rename = "Flight Cancellation")]
    FlightCancellation,
    #[serde(rename = "Flight Rescheduling")]
    FlightRescheduling,
    #[serde(rename = "Baggage Issue")]
    BaggageIssue,
    Complaint,
    #[serde(rename = "Seat Change")]
    SeatChange,
    #[serde(rename = "General Inquiry")]
    GeneralInquiry,
    Unknown,
}

impl CallCategory {
    /// The seven real categories in declaration order (excludes `Unknown`).
    pub const ALL: [CallCategory; 7] = [
        Self::FlightBooking,
        Self::FlightCancellation,
        Self::FlightRescheduling,
        Self::BaggageIssue,
        Self::Complaint,
        Self::SeatChange,
        Self::GeneralInquiry,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::FlightBooking => "Flight Booking",
            Self::FlightCancellation => "Flight Cancellation",
            Self::FlightRescheduling => "Flight Rescheduling",
            Self::BaggageIssue => "Baggage Issue",
            Self::Complaint => "Complaint",
            Self::SeatChange => "Seat Change",
            Self::GeneralInquiry => "General Inquiry",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse from a human-readable label.
    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "Flight Booking" => Some(Self::FlightBooking),
            "Flight Cancellation" => Some(Self::FlightCancellation),
            "Flight Rescheduling" => Some(Self::FlightRescheduling),
            "Baggage Issue" => Some(Self::BaggageIssue),
            "Complaint" => Some(Self::Complaint),
            "Seat Change" => Some(Self::SeatChange),
            "General Inquiry" => Some(Self::GeneralInquiry),
            "Unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for CallCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Whether a call was closed out on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionStatus {
    Resolved,
    Pending,
}

impl fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Resolved => "Resolved",
            Self::Pending => "Pending",
        };
        write!(f, "{}", s)
    }
}

/// Structured facts pulled out of one transcript, independent of its
/// category. Built fresh per call, never shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallDetails {
    /// Carrier flight numbers in encounter order, duplicates kept.
    pub flight_numbers: Vec<String>,
    pub customer_name: String,
    pub resolution_status: ResolutionStatus,
    pub call_summary: String,
}

/// The atomic unit the KPI aggregator consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallCategorization {
    pub category: CallCategory,
    pub details: CallDetails,
}

/// One entry of the most-mentioned-flights ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightMention {
    pub flight_number: String,
    pub mentions: usize,
}

/// Fleet-wide performance indicators for one batch of transcripts.
/// Computed once per batch, not incrementally updatable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiReport {
    pub total_calls: usize,
    pub call_categories: BTreeMap<String, usize>,
    pub resolution_rate: f64,
    /// Placeholder constant, not measured. See `kpi::AVERAGE_RESPONSE_TIME_SECS`.
    pub average_response_time: u32,
    pub average_sentiment: f64,
    pub most_common_issue: String,
    /// Top 3 by mention count, descending, ties in encounter order.
    pub most_mentioned_flights: Vec<FlightMention>,
    pub category_distribution: BTreeMap<String, f64>,
}

/// Query responder payload. Always present, even on degraded paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryAnswer {
    pub answer: String,
}
