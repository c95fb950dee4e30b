//! Detect business trips: expense clusters away from the home base.
//!
//! Expenses are located from their descriptions, grouped by (location, day),
//! kept when a day holds two or more expenses or a single accommodation
//! booking, then merged into trips across consecutive days.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tally_core::{LocationDictionary, Transaction};
use tracing::debug;
use uuid::Uuid;

use crate::trip_expense::{TripExpenseType, classify_trip_expense, is_accommodation_booking};

/// Largest gap in days between trip days that still counts as one trip
const MAX_GAP_DAYS: i64 = 1;

/// A trip expense with its expense type
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TripTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub expense_type: TripExpenseType,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DetectedTrip {
    pub id: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub transactions: Vec<TripTransaction>,
    /// Sum of absolute amounts
    pub total_spend: f64,
}

impl DetectedTrip {
    /// Calendar days covered, inclusive
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn contains(&self, transaction_id: &str) -> bool {
        self.transactions
            .iter()
            .any(|t| t.transaction.id == transaction_id)
    }
}

struct TripBuilder<'t> {
    location: &'static str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    transactions: Vec<&'t Transaction>,
}

impl TripBuilder<'_> {
    fn extends_to(&self, location: &str, date: NaiveDate) -> bool {
        self.location == location && (date - self.end_date).num_days() <= MAX_GAP_DAYS
    }

    fn finish(self, id: String) -> DetectedTrip {
        let total_spend = self.transactions.iter().map(|t| t.abs_amount()).sum();
        DetectedTrip {
            id,
            location: self.location.to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            transactions: self
                .transactions
                .into_iter()
                .map(|t| TripTransaction {
                    transaction: t.clone(),
                    expense_type: classify_trip_expense(&t.description),
                })
                .collect(),
            total_spend,
        }
    }
}

/// Detect trips with the built-in town dictionary and random trip ids.
///
/// `base_location` is the business's home town; expenses there, or anywhere
/// in the same county, never form a trip.
pub fn detect_trips(transactions: &[Transaction], base_location: Option<&str>) -> Vec<DetectedTrip> {
    detect_trips_with(
        transactions,
        base_location,
        LocationDictionary::builtin(),
        || Uuid::new_v4().to_string(),
    )
}

/// Detect trips with an explicit dictionary and trip id generator.
///
/// Trips come out ordered by location, then date.
pub fn detect_trips_with(
    transactions: &[Transaction],
    base_location: Option<&str>,
    dictionary: &LocationDictionary,
    mut next_id: impl FnMut() -> String,
) -> Vec<DetectedTrip> {
    let base = base_location
        .map(|b| b.trim().to_lowercase())
        .filter(|b| !b.is_empty());
    let base_county = base.as_deref().and_then(|b| dictionary.county_of(b));

    // (location, date) keys iterate in trip order
    let mut days: BTreeMap<(&'static str, NaiveDate), Vec<&Transaction>> = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        let Some(location) = dictionary.extract_location(&txn.description) else {
            continue;
        };
        if base.as_deref() == Some(location.to_lowercase().as_str()) {
            continue;
        }
        if base_county.is_some() && dictionary.county_of(location) == base_county {
            debug!(id = %txn.id, location, "skipping expense in home county");
            continue;
        }
        days.entry((location, txn.date)).or_default().push(txn);
    }

    let mut trips = Vec::new();
    let mut current: Option<TripBuilder> = None;

    for ((location, date), txns) in days {
        let qualifies = txns.len() >= 2
            || (txns.len() == 1 && is_accommodation_booking(&txns[0].description));
        if !qualifies {
            continue;
        }

        if let Some(trip) = current.as_mut().filter(|t| t.extends_to(location, date)) {
            trip.end_date = date;
            trip.transactions.extend(txns);
            continue;
        }

        let started = TripBuilder {
            location,
            start_date: date,
            end_date: date,
            transactions: txns,
        };
        if let Some(done) = current.replace(started) {
            trips.push(done.finish(next_id()));
        }
    }
    if let Some(done) = current {
        trips.push(done.finish(next_id()));
    }

    debug!(count = trips.len(), "trips detected");
    trips
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use tally_core::Direction;

    fn expense(id: &str, desc: &str, amount: f64, day: u32) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
        Transaction::new(id, desc, amount, date, Direction::Expense)
    }

    fn counter() -> impl FnMut() -> String {
        let mut n = 0;
        move || {
            n += 1;
            format!("trip-{n}")
        }
    }

    fn detect(txns: &[Transaction], base: Option<&str>) -> Vec<DetectedTrip> {
        detect_trips_with(txns, base, LocationDictionary::builtin(), counter())
    }

    #[test]
    fn test_two_same_day_expenses_make_a_trip() {
        let txns = vec![
            expense("1", "POS CENTRA GALWAY", -8.40, 3),
            expense("2", "APCOA PARKING GALWAY", -6.00, 3),
        ];
        let trips = detect(&txns, Some("Dublin"));
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].id, "trip-1");
        assert_eq!(trips[0].location, "Galway");
        assert_eq!(trips[0].transactions.len(), 2);
        assert!((trips[0].total_spend - 14.40).abs() < 1e-9);
        assert_eq!(trips[0].transactions[1].expense_type, TripExpenseType::Transport);
    }

    #[test]
    fn test_single_expense_needs_accommodation() {
        let single = vec![expense("1", "POS CENTRA GALWAY", -8.40, 3)];
        assert!(detect(&single, Some("Dublin")).is_empty());

        let hotel = vec![expense("1", "MALDRON HOTEL GALWAY", -129.0, 3)];
        let trips = detect(&hotel, Some("Dublin"));
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].transactions[0].expense_type, TripExpenseType::Accommodation);
    }

    #[test]
    fn test_consecutive_days_merge() {
        let txns = vec![
            expense("1", "HOTEL CORK", -100.0, 10),
            expense("2", "CENTRA CORK", -5.0, 11),
            expense("3", "TOLL CORK", -2.0, 11),
        ];
        let trips = detect(&txns, Some("Dublin"));
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].start_date, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        assert_eq!(trips[0].end_date, NaiveDate::from_ymd_opt(2024, 6, 11).unwrap());
        assert_eq!(trips[0].days(), 2);
    }

    #[test]
    fn test_gap_splits_trips() {
        let txns = vec![
            expense("1", "HOTEL CORK", -100.0, 10),
            expense("2", "HOTEL CORK", -100.0, 12),
        ];
        let trips = detect(&txns, Some("Dublin"));
        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].id, "trip-1");
        assert_eq!(trips[1].id, "trip-2");
    }

    #[test]
    fn test_base_and_home_county_excluded() {
        let txns = vec![
            expense("1", "HOTEL DUBLIN", -100.0, 10),
            expense("2", "CENTRA SWORDS", -5.0, 11),
            expense("3", "TOLL SWORDS", -2.0, 11),
        ];
        // Dublin itself, and Swords in Co. Dublin
        assert!(detect(&txns, Some("dublin")).is_empty());
    }

    #[test]
    fn test_income_and_unlocated_ignored() {
        let mut income = expense("1", "HOTEL GALWAY", 100.0, 3);
        income.direction = Direction::Income;
        let txns = vec![income, expense("2", "HOTEL SOMEWHERE", -100.0, 3)];
        assert!(detect(&txns, None).is_empty());
    }

    #[test]
    fn test_ordered_by_location_then_date() {
        let txns = vec![
            expense("1", "HOTEL SLIGO", -90.0, 1),
            expense("2", "HOTEL CORK", -90.0, 20),
            expense("3", "HOTEL CORK", -90.0, 5),
        ];
        let trips = detect(&txns, None);
        let order: Vec<_> = trips
            .iter()
            .map(|t| (t.location.as_str(), t.start_date.day()))
            .collect();
        assert_eq!(order, vec![("Cork", 5), ("Cork", 20), ("Sligo", 1)]);
    }

    #[test]
    fn test_uuid_ids() {
        let txns = vec![expense("1", "HOTEL CORK", -90.0, 5)];
        let trips = detect_trips(&txns, None);
        assert_eq!(trips.len(), 1);
        assert!(Uuid::parse_str(&trips[0].id).is_ok());
        assert!(trips[0].contains("1"));
    }
}
