use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::transaction::Category;

/// A single email as handed over by the ingestion boundary (mailbox sync or
/// a direct request payload). Immutable input to the analysis pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEmail {
    pub subject: String,
    pub content: String,
    /// Sender address, e.g. "alerts@hdfcbank.com"
    pub sender: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub recipient: Option<String>,
    /// Source message id, carried only for logging context
    #[serde(default)]
    pub message_id: Option<String>,
}

/// The kind of email the classifier decided on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailType {
    /// Marketing content, excluded from all downstream aggregation
    Promotional,
    CreditCardTransaction,
    CreditCardPayment,
    /// Credit-card mail that is neither a transaction alert nor a payment
    /// confirmation (statements, limit updates)
    CreditCards,
    FoodDining,
    TravelTransport,
    ShoppingRetail,
    Financial,
    Unknown,
}

impl EmailType {
    /// Spend category this email type feeds, if any
    pub fn category(&self) -> Option<Category> {
        match self {
            EmailType::CreditCardTransaction
            | EmailType::CreditCardPayment
            | EmailType::CreditCards => Some(Category::CreditCards),
            EmailType::FoodDining => Some(Category::FoodDining),
            EmailType::TravelTransport => Some(Category::TravelTransport),
            EmailType::ShoppingRetail => Some(Category::ShoppingRetail),
            EmailType::Financial => Some(Category::Financial),
            EmailType::Promotional | EmailType::Unknown => None,
        }
    }

    /// Whether this email type carries a debit the spending aggregator
    /// should see (payments are credits against a card, not spend)
    pub fn is_spend(&self) -> bool {
        matches!(
            self,
            EmailType::CreditCardTransaction
                | EmailType::FoodDining
                | EmailType::TravelTransport
                | EmailType::ShoppingRetail
                | EmailType::Financial
        )
    }
}

/// Outcome of classifying a single email. Computed fresh per email and
/// never persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub email_type: EmailType,
    pub category: Option<Category>,
}

impl Classification {
    pub fn unknown() -> Self {
        Self {
            email_type: EmailType::Unknown,
            category: None,
        }
    }

    pub fn of(email_type: EmailType) -> Self {
        Self {
            email_type,
            category: email_type.category(),
        }
    }
}
