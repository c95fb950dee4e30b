//! Bulk recategorisation: classify, override business-trip spend, move
//! job-related drawings to travel, and persist the results in batches.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Mutex;

use anyhow::Result;
use chrono::NaiveDate;
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use tally_core::{Account, BookedTransaction, Direction, Transaction};
use tracing::{debug, info, warn};

use crate::accounts::{find_matching_account, get_default_account};
use crate::chart::vat_rate_percent;
use crate::classifier::Classifier;
use crate::trip_expense::TripExpenseType;
use crate::trips::{DetectedTrip, detect_trips};

pub const TRAVEL_CATEGORY: &str = "Travel & Subsistence";
/// Category whose account trip spend is posted to
const TRAVEL_ACCOUNT_CATEGORY: &str = "Travel";
const DRAWINGS_CATEGORY: &str = "Drawings";

/// Booked categories that "reclassify miscellaneous" revisits
pub const MISCELLANEOUS_CATEGORIES: &[&str] = &[
    "Other",
    "Other Expenses",
    "Miscellaneous",
    "General Expenses",
    "Sundry",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecategoriseMode {
    /// Only transactions with no booked category
    UncategorisedOnly,
    /// Uncategorised plus catch-all categories
    ReclassifyMiscellaneous,
    /// Everything; low-confidence results clear the category for review
    ReclassifyAll,
}

impl RecategoriseMode {
    pub fn default_threshold(&self) -> u8 {
        match self {
            RecategoriseMode::UncategorisedOnly => 50,
            RecategoriseMode::ReclassifyMiscellaneous => 40,
            RecategoriseMode::ReclassifyAll => 40,
        }
    }

    /// Whether a booked transaction is a candidate in this mode
    pub fn selects(&self, booked: &BookedTransaction) -> bool {
        match self {
            RecategoriseMode::UncategorisedOnly => booked.is_uncategorised(),
            RecategoriseMode::ReclassifyMiscellaneous => {
                booked.is_uncategorised() || booked.category.as_deref().is_some_and(is_miscellaneous)
            }
            RecategoriseMode::ReclassifyAll => true,
        }
    }
}

fn is_miscellaneous(category: &str) -> bool {
    let category = category.trim();
    MISCELLANEOUS_CATEGORIES
        .iter()
        .any(|m| m.eq_ignore_ascii_case(category))
}

/// An invoice raised for a job; expenses during the job count as job travel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub job_start: Option<NaiveDate>,
    #[serde(default)]
    pub job_end: Option<NaiveDate>,
}

impl Invoice {
    /// True when `date` is inside the job range, or within `window_days` of
    /// the invoice date when the invoice has no job range.
    pub fn covers(&self, date: NaiveDate, window_days: i64) -> bool {
        match (self.job_start, self.job_end) {
            (None, None) => (date - self.date).num_days().abs() <= window_days,
            (start, end) => {
                let (start, end) = (start.or(end), end.or(start));
                start.is_some_and(|s| date >= s) && end.is_some_and(|e| date <= e)
            }
        }
    }
}

/// One change to persist for a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub transaction_id: String,
    /// `None` clears the booked category
    pub category: Option<String>,
    pub account_id: Option<String>,
    /// VAT percentage, e.g. 13.5
    pub vat_rate: Option<f64>,
    pub notes: Option<String>,
    pub needs_review: bool,
}

/// Persistence port for category updates
pub trait TransactionStore {
    fn apply(&self, update: &CategoryUpdate) -> impl Future<Output = Result<()>>;
}

/// Store that keeps updates in memory, in the order they were applied
#[derive(Debug, Default)]
pub struct MemoryStore {
    updates: Mutex<Vec<CategoryUpdate>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> Vec<CategoryUpdate> {
        self.updates
            .lock()
            .map(|u| u.clone())
            .unwrap_or_default()
    }

    /// Last update per transaction, in first-seen order
    pub fn latest_updates(&self) -> Vec<CategoryUpdate> {
        let mut order = Vec::new();
        let mut latest: HashMap<String, CategoryUpdate> = HashMap::new();
        for update in self.updates() {
            if !latest.contains_key(&update.transaction_id) {
                order.push(update.transaction_id.clone());
            }
            latest.insert(update.transaction_id.clone(), update);
        }
        order
            .into_iter()
            .filter_map(|id| latest.remove(&id))
            .collect()
    }
}

impl TransactionStore for MemoryStore {
    async fn apply(&self, update: &CategoryUpdate) -> Result<()> {
        self.updates
            .lock()
            .map_err(|_| anyhow::anyhow!("update log poisoned"))?
            .push(update.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecategoriseOptions {
    pub mode: RecategoriseMode,
    /// Minimum confidence for a classification to be applied
    pub threshold: u8,
    pub batch_size: usize,
    /// Home town; trips are only detected away from it
    pub base_location: Option<String>,
    pub invoice_window_days: i64,
}

impl RecategoriseOptions {
    pub fn new(mode: RecategoriseMode) -> Self {
        Self {
            mode,
            threshold: mode.default_threshold(),
            batch_size: 20,
            base_location: None,
            invoice_window_days: 2,
        }
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_base_location(mut self, base: impl Into<String>) -> Self {
        self.base_location = Some(base.into());
        self
    }

    pub fn with_invoice_window(mut self, days: i64) -> Self {
        self.invoice_window_days = days;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecategoriseReport {
    pub classified: usize,
    pub skipped: usize,
    pub flagged_for_review: usize,
    pub trips_detected: usize,
    pub trip_overrides: usize,
    pub drawings_reclassified: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// VAT percentage claimed on trip spend of a given type
pub fn trip_vat_rate(expense_type: TripExpenseType) -> f64 {
    match expense_type {
        TripExpenseType::Transport => 0.0,
        TripExpenseType::Accommodation => 13.5,
        TripExpenseType::Subsistence | TripExpenseType::Other => 23.0,
    }
}

/// Anything that is not transport or accommodation is booked as subsistence
fn trip_treatment(expense_type: TripExpenseType) -> TripExpenseType {
    match expense_type {
        TripExpenseType::Transport | TripExpenseType::Accommodation => expense_type,
        TripExpenseType::Subsistence | TripExpenseType::Other => TripExpenseType::Subsistence,
    }
}

/// Runs the classification, trip and drawings passes over a transaction set
pub struct Recategoriser<C: Classifier, S: TransactionStore> {
    classifier: C,
    store: S,
    accounts: Vec<Account>,
    options: RecategoriseOptions,
}

impl<C: Classifier, S: TransactionStore> Recategoriser<C, S> {
    pub fn new(classifier: C, store: S, accounts: Vec<Account>, options: RecategoriseOptions) -> Self {
        Self {
            classifier,
            store,
            accounts,
            options,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn account_id(&self, category: &str, direction: Direction, vat_rate: Option<&str>) -> Option<String> {
        find_matching_account(category, direction, vat_rate, &self.accounts)
            .or_else(|| get_default_account(direction, &self.accounts))
            .map(|a| a.id.clone())
    }

    /// Run all passes. Persistence failures are counted, never returned.
    pub async fn run(&self, transactions: &[BookedTransaction], invoices: &[Invoice]) -> RecategoriseReport {
        let mut report = RecategoriseReport::default();

        // Category in effect after each pass, keyed by transaction id
        let mut effective: HashMap<String, Option<String>> = transactions
            .iter()
            .map(|b| (b.transaction.id.clone(), b.category.clone()))
            .collect();

        let updates = self.classification_pass(transactions, &mut report);
        for update in &updates {
            effective.insert(update.transaction_id.clone(), update.category.clone());
        }
        self.persist(&updates, &mut report).await;
        info!(
            classified = report.classified,
            skipped = report.skipped,
            flagged = report.flagged_for_review,
            "classification pass done"
        );

        let expenses: Vec<Transaction> = transactions
            .iter()
            .filter(|b| b.transaction.is_expense())
            .map(|b| b.transaction.clone())
            .collect();
        let trips = detect_trips(&expenses, self.options.base_location.as_deref());
        report.trips_detected = trips.len();

        let updates = self.trip_pass(&trips);
        report.trip_overrides = updates.len();
        let on_trip: HashSet<&str> = updates.iter().map(|u| u.transaction_id.as_str()).collect();
        self.persist(&updates, &mut report).await;
        info!(trips = trips.len(), overrides = report.trip_overrides, "trip pass done");

        let updates = self.drawings_pass(transactions, invoices, &effective, &on_trip);
        report.drawings_reclassified = updates.len();
        self.persist(&updates, &mut report).await;
        info!(reclassified = report.drawings_reclassified, "drawings pass done");

        report
    }

    fn classification_pass(
        &self,
        transactions: &[BookedTransaction],
        report: &mut RecategoriseReport,
    ) -> Vec<CategoryUpdate> {
        let mode = self.options.mode;
        let mut updates = Vec::new();

        for booked in transactions.iter().filter(|b| mode.selects(b)) {
            let txn = &booked.transaction;
            let result = self.classifier.classify(booked);

            if result.confidence >= self.options.threshold {
                debug!(id = %txn.id, category = %result.category, confidence = result.confidence, "classified");
                let vat_rate = result.vat_rate.as_deref();
                updates.push(CategoryUpdate {
                    transaction_id: txn.id.clone(),
                    account_id: self.account_id(&result.category, txn.direction, vat_rate),
                    vat_rate: vat_rate.and_then(vat_rate_percent),
                    category: Some(result.category),
                    notes: result.notes,
                    needs_review: false,
                });
                report.classified += 1;
            } else if mode == RecategoriseMode::ReclassifyAll {
                debug!(id = %txn.id, confidence = result.confidence, "low confidence, flagged for review");
                updates.push(CategoryUpdate {
                    transaction_id: txn.id.clone(),
                    category: None,
                    account_id: None,
                    vat_rate: None,
                    notes: Some(format!(
                        "Low confidence ({}%), needs manual review",
                        result.confidence
                    )),
                    needs_review: true,
                });
                report.flagged_for_review += 1;
            } else {
                report.skipped += 1;
            }
        }

        updates
    }

    fn trip_pass(&self, trips: &[DetectedTrip]) -> Vec<CategoryUpdate> {
        let account_id = self.account_id(TRAVEL_ACCOUNT_CATEGORY, Direction::Expense, None);

        trips
            .iter()
            .flat_map(|trip| {
                let account_id = account_id.clone();
                trip.transactions.iter().map(move |t| {
                    let treatment = trip_treatment(t.expense_type);
                    CategoryUpdate {
                        transaction_id: t.transaction.id.clone(),
                        category: Some(TRAVEL_CATEGORY.to_string()),
                        account_id: account_id.clone(),
                        vat_rate: Some(trip_vat_rate(treatment)),
                        notes: Some(format!(
                            "Business trip to {} ({} to {}): {}",
                            trip.location, trip.start_date, trip.end_date, treatment
                        )),
                        needs_review: false,
                    }
                })
            })
            .collect()
    }

    fn drawings_pass(
        &self,
        transactions: &[BookedTransaction],
        invoices: &[Invoice],
        effective: &HashMap<String, Option<String>>,
        on_trip: &HashSet<&str>,
    ) -> Vec<CategoryUpdate> {
        if invoices.is_empty() {
            return Vec::new();
        }
        let account_id = self.account_id(TRAVEL_ACCOUNT_CATEGORY, Direction::Expense, None);
        let window = self.options.invoice_window_days;

        transactions
            .iter()
            .map(|b| &b.transaction)
            .filter(|t| t.is_expense() && !on_trip.contains(t.id.as_str()))
            .filter(|t| {
                effective
                    .get(t.id.as_str())
                    .and_then(|c| c.as_deref())
                    .is_some_and(|c| c.trim().eq_ignore_ascii_case(DRAWINGS_CATEGORY))
            })
            .filter_map(|t| {
                let invoice = invoices.iter().find(|i| i.covers(t.date, window))?;
                debug!(id = %t.id, invoice = %invoice.id, "drawings during job");
                Some(CategoryUpdate {
                    transaction_id: t.id.clone(),
                    category: Some(TRAVEL_CATEGORY.to_string()),
                    account_id: account_id.clone(),
                    vat_rate: Some(trip_vat_rate(TripExpenseType::Subsistence)),
                    notes: Some(format!("Job travel for invoice {}", invoice.id)),
                    needs_review: false,
                })
            })
            .collect()
    }

    /// Apply updates in sequential batches; items within a batch run
    /// concurrently and one failure does not stop the others.
    async fn persist(&self, updates: &[CategoryUpdate], report: &mut RecategoriseReport) {
        for batch in updates.chunks(self.options.batch_size.max(1)) {
            let results = join_all(batch.iter().map(|u| self.store.apply(u))).await;
            for (update, result) in batch.iter().zip(results) {
                match result {
                    Ok(()) => report.succeeded += 1,
                    Err(e) => {
                        warn!(id = %update.transaction_id, error = %e, "failed to save update");
                        report.failed += 1;
                    }
                }
            }
        }
    }
}
