//! Pure views over a fetched transaction collection.
//!
//! Every function takes the collection by reference and returns a fresh
//! value: callers own the storage of results, and no hidden cache sits
//! between the remote store and the derived view. Sorting, month filtering,
//! and the income/expense totals here back both the home and activities
//! screens.

use std::str::FromStr;

use chrono::{Datelike, Month};
use log::warn;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::types::{Transaction, TransactionKind};

/// Month selector for the activities view: the `All` sentinel or one
/// calendar month, matched in any year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    /// Identity filter
    All,
    /// Month-of-year match; the year is not part of the filter key
    Month(Month),
}

impl MonthFilter {
    /// The thirteen selector tags in display order
    pub const TAGS: [&'static str; 13] = [
        "All", "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];

    /// Whether `transaction` passes this filter. Records with no effective
    /// timestamp never match a concrete month.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(month) => transaction
                .effective_timestamp()
                .map(|timestamp| timestamp.month() == month.number_from_month())
                .unwrap_or(false),
        }
    }
}

/// Error returned when a month selector tag is not recognized
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown month selector: {0}")]
pub struct ParseMonthFilterError(String);

impl FromStr for MonthFilter {
    type Err = ParseMonthFilterError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let filter = match tag.to_ascii_lowercase().as_str() {
            "all" => MonthFilter::All,
            "jan" => MonthFilter::Month(Month::January),
            "feb" => MonthFilter::Month(Month::February),
            "mar" => MonthFilter::Month(Month::March),
            "apr" => MonthFilter::Month(Month::April),
            "may" => MonthFilter::Month(Month::May),
            "jun" => MonthFilter::Month(Month::June),
            "jul" => MonthFilter::Month(Month::July),
            "aug" => MonthFilter::Month(Month::August),
            "sep" => MonthFilter::Month(Month::September),
            "oct" => MonthFilter::Month(Month::October),
            "nov" => MonthFilter::Month(Month::November),
            "dec" => MonthFilter::Month(Month::December),
            _ => return Err(ParseMonthFilterError(tag.to_string())),
        };
        Ok(filter)
    }
}

/// Income, expense, and balance totals for a collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// Two-bucket series backing the income/expense bar chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartSeries {
    pub income_total: f64,
    pub expense_total: f64,
}

/// Stable sort, newest first, by effective timestamp.
///
/// Ties keep their fetch order; records with no timestamp sort last.
pub fn sort_by_recency(transactions: &[Transaction]) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| b.effective_timestamp().cmp(&a.effective_timestamp()));
    sorted
}

/// Apply a month filter.
///
/// `All` returns the input unchanged (same elements, same order); a concrete
/// month keeps transactions whose effective timestamp falls in that calendar
/// month of any year.
pub fn filter_by_month(transactions: &[Transaction], filter: MonthFilter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| filter.matches(transaction))
        .cloned()
        .collect()
}

/// Sum amount magnitudes per kind; `balance = income - expense`.
///
/// Empty input yields the all-zero summary. Garbage amounts were already
/// coerced to zero at the wire boundary, so they contribute nothing here.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let income = total(transactions, TransactionKind::Income);
    let expense = total(transactions, TransactionKind::Expense);
    Summary {
        income,
        expense,
        balance: income - expense,
    }
}

fn total(transactions: &[Transaction], kind: TransactionKind) -> f64 {
    transactions
        .iter()
        .filter(|transaction| transaction.kind == kind)
        .map(|transaction| transaction.amount.abs())
        .sum()
}

/// The chart series is derived from [`summarize`], not recomputed, so the
/// chart and the summary cards can never disagree
pub fn chart_series(transactions: &[Transaction]) -> ChartSeries {
    let summary = summarize(transactions);
    ChartSeries {
        income_total: summary.income,
        expense_total: summary.expense,
    }
}

/// Coerce a raw fetch payload into a transaction collection.
///
/// A payload that is not a JSON array (a null, an error object, a string)
/// reads as empty, and array elements that do not parse as transactions are
/// dropped: a flaky backend degrades the view instead of crashing it.
pub fn from_payload(payload: &Value) -> Vec<Transaction> {
    let items = match payload.as_array() {
        Some(items) => items,
        None => {
            warn!("transaction payload is not an array; treating as empty");
            return Vec::new();
        }
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(transaction) => Some(transaction),
            Err(err) => {
                warn!("dropping malformed transaction: {}", err);
                None
            }
        })
        .collect()
}
