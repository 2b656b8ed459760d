//! Availability data for one bookable product and the explicit load
//! lifecycle around it. The set is owned by the product-detail view and
//! replaced wholesale on every load; nothing mutates it in place.

use std::collections::HashSet;

use thiserror::Error;

use crate::DisponibilidadResponse;

/// Classification of a single day against the loaded availability
/// data. `Indefinite` is a normal answer: the backend does not promise
/// data for every day in the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    Available,
    Occupied,
    Indefinite,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailabilitySet {
    available: HashSet<String>,
    occupied: HashSet<String>,
}

impl AvailabilitySet {
    /// The server does not guarantee the two lists are disjoint; an
    /// occupied day wins, so classification stays deterministic.
    pub fn new(available: Vec<String>, occupied: Vec<String>) -> Self {
        let occupied: HashSet<String> = occupied.into_iter().collect();
        let available = available
            .into_iter()
            .filter(|day| !occupied.contains(day))
            .collect();
        Self { available, occupied }
    }

    pub fn from_response(response: DisponibilidadResponse) -> Self {
        Self::new(response.fechas_disponibles, response.fechas_ocupadas)
    }

    pub fn classify(&self, day: &str) -> DayStatus {
        if self.occupied.contains(day) {
            DayStatus::Occupied
        } else if self.available.contains(day) {
            DayStatus::Available
        } else {
            DayStatus::Indefinite
        }
    }

    pub fn is_occupied(&self, day: &str) -> bool {
        self.occupied.contains(day)
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty() && self.occupied.is_empty()
    }
}

/// Transport-level failures while loading availability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("the request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response status {0}")]
    Status(u16),
    #[error("malformed response payload: {0}")]
    Decode(String),
}

/// Load lifecycle for the availability data. An empty result is
/// `Ready`, never `Failed`, so the view can tell "zero known days for
/// this product" apart from "the load broke".
#[derive(Debug, Clone, PartialEq)]
pub enum AvailabilityState {
    Loading,
    Ready(AvailabilitySet),
    Failed(LoadError),
}

impl AvailabilityState {
    pub fn set(&self) -> Option<&AvailabilitySet> {
        match self {
            AvailabilityState::Ready(set) => Some(set),
            _ => None,
        }
    }

    /// Days are unknown until a load succeeds.
    pub fn classify(&self, day: &str) -> DayStatus {
        self.set()
            .map(|set| set.classify(day))
            .unwrap_or(DayStatus::Indefinite)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AvailabilityState::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AvailabilitySet {
        AvailabilitySet::new(
            vec!["2025-06-05".to_string(), "2025-06-06".to_string()],
            vec!["2025-06-10".to_string()],
        )
    }

    #[test]
    fn test_classify_known_days() {
        let set = sample();
        assert_eq!(set.classify("2025-06-05"), DayStatus::Available);
        assert_eq!(set.classify("2025-06-10"), DayStatus::Occupied);
    }

    #[test]
    fn test_classify_unknown_day_is_indefinite() {
        assert_eq!(sample().classify("2025-07-01"), DayStatus::Indefinite);
    }

    #[test]
    fn test_occupied_wins_on_overlapping_server_data() {
        let set = AvailabilitySet::new(
            vec!["2025-06-10".to_string(), "2025-06-11".to_string()],
            vec!["2025-06-10".to_string()],
        );
        assert_eq!(set.classify("2025-06-10"), DayStatus::Occupied);
        assert_eq!(set.classify("2025-06-11"), DayStatus::Available);
    }

    #[test]
    fn test_failed_is_distinct_from_ready_empty() {
        let empty = AvailabilityState::Ready(AvailabilitySet::default());
        let failed = AvailabilityState::Failed(LoadError::Timeout);
        assert_ne!(empty, failed);
        assert!(empty.set().is_some());
        assert!(failed.set().is_none());
    }

    #[test]
    fn test_state_classify_before_load_is_indefinite() {
        assert_eq!(
            AvailabilityState::Loading.classify("2025-06-05"),
            DayStatus::Indefinite
        );
    }
}
