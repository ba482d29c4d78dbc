//! Wire types for the Monity expense endpoints

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Transaction kind; the only two values aggregation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// The wire tag, as sent and displayed
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

/// A transaction record as returned by the remote store.
///
/// Immutable once fetched. `amount` and both timestamps are parsed
/// defensively: the backend has been observed returning amounts as strings
/// and records with either timestamp missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Server-assigned identifier
    #[serde(rename = "_id")]
    pub id: String,

    /// Display label; not guaranteed non-empty
    #[serde(default)]
    pub title: String,

    /// Magnitude is what matters; the sign convention comes from `kind`
    #[serde(default, deserialize_with = "coerce_amount")]
    pub amount: f64,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Free-form category tag
    #[serde(default)]
    pub category: String,

    /// User-assigned transaction date; takes precedence over `created_at`
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub date: Option<DateTime<Utc>>,

    /// Server-assigned creation time
    #[serde(rename = "createdAt", default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// The timestamp that drives ordering, month filtering, and display:
    /// `date` when present, else `created_at`
    pub fn effective_timestamp(&self) -> Option<DateTime<Utc>> {
        self.date.or(self.created_at)
    }
}

/// Payload for creating a transaction.
///
/// The server expects `amount` as a string and `date` in RFC 3339, matching
/// what the mobile form submits.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub title: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    pub date: DateTime<Utc>,
}

impl NewExpense {
    pub(crate) fn to_payload(&self) -> Value {
        serde_json::json!({
            "title": self.title,
            "amount": fmt_amount(self.amount),
            "type": self.kind,
            "category": self.category,
            "date": self.date.to_rfc3339(),
        })
    }
}

/// Render an amount the way the original forms did: no trailing `.0` on
/// integral values
pub(crate) fn fmt_amount(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Accept a number, a numeric string, or garbage; garbage and non-finite
/// values coerce to zero rather than failing the record
fn coerce_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(amount_from_value(&value))
}

pub(crate) fn amount_from_value(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(amount) if amount.is_finite() => amount,
        _ => 0.0,
    }
}

/// RFC 3339 first, then a bare `YYYY-MM-DD`, then a millisecond epoch;
/// anything else reads as absent
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(datetime_from_value))
}

pub(crate) fn datetime_from_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(raw) => parse_datetime(raw),
        Value::Number(number) => number
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

pub(crate) fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn amount_coercion_matches_the_screens() {
        assert_eq!(amount_from_value(&json!(5000)), 5000.0);
        assert_eq!(amount_from_value(&json!("1200")), 1200.0);
        assert_eq!(amount_from_value(&json!(-300)), -300.0);
        assert_eq!(amount_from_value(&json!("not a number")), 0.0);
        assert_eq!(amount_from_value(&json!("NaN")), 0.0);
        assert_eq!(amount_from_value(&json!(null)), 0.0);
        assert_eq!(amount_from_value(&json!({"nested": 1})), 0.0);
    }

    #[test]
    fn transaction_tolerates_sparse_records() {
        let tx: Transaction = serde_json::from_value(json!({
            "_id": "t1",
            "type": "expense",
        }))
        .unwrap();

        assert_eq!(tx.title, "");
        assert_eq!(tx.amount, 0.0);
        assert_eq!(tx.effective_timestamp(), None);
    }

    #[test]
    fn date_takes_precedence_over_created_at() {
        let tx: Transaction = serde_json::from_value(json!({
            "_id": "t1",
            "title": "Groceries",
            "amount": "12.50",
            "type": "expense",
            "date": "2025-03-14T09:00:00.000Z",
            "createdAt": "2025-04-01T00:00:00.000Z",
        }))
        .unwrap();

        let effective = tx.effective_timestamp().unwrap();
        assert_eq!(effective, parse_datetime("2025-03-14T09:00:00Z").unwrap());
        assert_eq!(tx.amount, 12.5);
    }

    #[test]
    fn garbage_dates_read_as_absent() {
        let tx: Transaction = serde_json::from_value(json!({
            "_id": "t1",
            "type": "income",
            "date": "yesterday-ish",
            "createdAt": "2025-04-01",
        }))
        .unwrap();

        // Falls through to the parseable created_at
        assert!(tx.date.is_none());
        assert!(tx.created_at.is_some());
    }

    #[test]
    fn new_expense_serializes_amount_as_string() {
        let expense = NewExpense {
            title: "Lunch".to_string(),
            amount: 1200.0,
            kind: TransactionKind::Expense,
            category: "work".to_string(),
            date: parse_datetime("2025-03-14T12:00:00Z").unwrap(),
        };

        let payload = expense.to_payload();
        assert_eq!(payload["amount"], json!("1200"));
        assert_eq!(payload["type"], json!("expense"));
    }

    #[test]
    fn integral_amounts_render_without_decimals() {
        assert_eq!(fmt_amount(1200.0), "1200");
        assert_eq!(fmt_amount(12.5), "12.5");
        assert_eq!(fmt_amount(-300.0), "-300");
    }
}
