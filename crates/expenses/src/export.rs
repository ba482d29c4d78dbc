//! CSV rendering for the share-sheet export.
//!
//! Pure formatting of the four-column table the activities view exports;
//! writing the file and invoking the share sheet are the platform's job.

use crate::types::{fmt_amount, Transaction};

/// Render `Title,Amount,Type,Date` rows for a (typically month-filtered)
/// collection.
///
/// Commas are stripped from titles so free-form text cannot break the table.
/// Dates render as `YYYY-MM-DD` of the effective timestamp, blank when a
/// record carries none.
pub fn to_csv(transactions: &[Transaction]) -> String {
    let mut csv = String::from("Title,Amount,Type,Date\n");
    let rows: Vec<String> = transactions
        .iter()
        .map(|transaction| {
            let title = transaction.title.replace(',', "");
            let date = transaction
                .effective_timestamp()
                .map(|timestamp| timestamp.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            format!(
                "{},{},{},{}",
                title,
                fmt_amount(transaction.amount),
                transaction.kind.as_str(),
                date
            )
        })
        .collect();
    csv.push_str(&rows.join("\n"));
    csv
}
