use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Discriminates the two kinds of ledger entries. They share one record shape;
/// the kind is carried alongside, not encoded as separate types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    Income,
    Expense,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Income => "income",
            RecordKind::Expense => "expense",
        }
    }
}

/// A single income or expense entry belonging to one user.
///
/// `amount` and `occurred_on` are optional because upstream stores have been
/// observed to hold partially populated rows; aggregation skips such records
/// rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRecord {
    pub id: i64,
    pub user_id: i64,
    /// Display name of the entry (e.g. "Rent", "Salary").
    pub name: String,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub amount: Option<Decimal>,
    pub occurred_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LedgerRecord {
    /// Category label used in breakdowns; entries without a category all
    /// collapse into the literal "Uncategorized" bucket.
    pub fn category_label(&self) -> &str {
        self.category_name.as_deref().unwrap_or("Uncategorized")
    }
}

/// The slice of the user profile the pipeline needs: a display name for
/// personalizing prompt text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub display_name: Option<String>,
}

impl UserProfile {
    pub fn display_name_or_default(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => "User",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label_defaults_to_uncategorized() {
        let record = LedgerRecord {
            id: 1,
            user_id: 1,
            name: "Groceries".to_string(),
            category_id: None,
            category_name: None,
            amount: None,
            occurred_on: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(record.category_label(), "Uncategorized");
    }

    #[test]
    fn test_display_name_falls_back_for_blank_names() {
        let profile = UserProfile {
            id: 7,
            display_name: Some("  ".to_string()),
        };
        assert_eq!(profile.display_name_or_default(), "User");

        let profile = UserProfile {
            id: 7,
            display_name: Some("Priya".to_string()),
        };
        assert_eq!(profile.display_name_or_default(), "Priya");
    }
}
