//! In-memory flight-record store.
//!
//! External collaborator boundary: the engines only ever call [`FlightStore::lookup`].
//! Keys are upper-cased flight numbers; lookups upper-case before matching.

use aircall_common::{FlightRecord, FlightStatus};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct FlightStore {
    records: HashMap<String, FlightRecord>,
}

impl FlightStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: FlightRecord) {
        self.records
            .insert(record.flight_number.to_uppercase(), record);
    }

    pub fn lookup(&self, flight_number: &str) -> Option<&FlightRecord> {
        self.records.get(&flight_number.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The demo flight database.
    pub fn sample() -> Self {
        let mut store = Self::new();
        for record in [
            record("AI123", "08:00 AM", "Delhi", FlightStatus::Delayed, "T2", "G14", "10:30 AM"),
            record("AI456", "10:30 AM", "Mumbai", FlightStatus::OnTime, "T1", "G22", "12:15 PM"),
            record("AI789", "02:15 PM", "Bangalore", FlightStatus::Boarding, "T3", "G5", "04:00 PM"),
            record("AI234", "06:45 PM", "Chennai", FlightStatus::Cancelled, "T2", "G19", "08:30 PM"),
            record("AI567", "11:15 AM", "Kolkata", FlightStatus::OnTime, "T1", "G7", "01:30 PM"),
            record("AI890", "04:30 PM", "Hyderabad", FlightStatus::Scheduled, "T3", "G12", "06:15 PM"),
        ] {
            store.insert(record);
        }
        store
    }
}

fn record(
    flight_number: &str,
    departure_time: &str,
    destination: &str,
    status: FlightStatus,
    terminal: &str,
    gate: &str,
    arrival_time: &str,
) -> FlightRecord {
    FlightRecord {
        flight_number: flight_number.to_string(),
        departure_time: departure_time.to_string(),
        destination: destination.to_string(),
        status,
        terminal: terminal.to_string(),
        gate: gate.to_string(),
        arrival_time: arrival_time.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let store = FlightStore::sample();
        let record = store.lookup("ai123").expect("sample flight");
        assert_eq!(record.flight_number, "AI123");
        assert_eq!(record.status, FlightStatus::Delayed);
    }

    #[test]
    fn test_lookup_miss() {
        let store = FlightStore::sample();
        assert!(store.lookup("ZZ999").is_none());
    }

    #[test]
    fn test_sample_store_size() {
        let store = FlightStore::sample();
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn test_insert_overwrites_same_flight() {
        let mut store = FlightStore::sample();
        let mut updated = store.lookup("AI123").unwrap().clone();
        updated.status = FlightStatus::Boarding;
        store.insert(updated);

        assert_eq!(store.len(), 6);
        assert_eq!(store.lookup("AI123").unwrap().status, FlightStatus::Boarding);
    }
}
