use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel merchant name used when no merchant pattern matched
pub const UNKNOWN_MERCHANT: &str = "unknown";

/// Coarse spend classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    CreditCards,
    FoodDining,
    TravelTransport,
    ShoppingRetail,
    Financial,
    Others,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::CreditCards => "credit_cards",
            Category::FoodDining => "food_dining",
            Category::TravelTransport => "travel_transport",
            Category::ShoppingRetail => "shopping_retail",
            Category::Financial => "financial",
            Category::Others => "others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a transaction or payment was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    Upi,
    Netbanking,
    Card,
    Wallet,
    Cash,
    Unknown,
}

/// Direction of money movement from the user's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Debit,
    Credit,
}

/// A transaction extracted from a single email. Created during extraction,
/// consumed immediately by an aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedTransaction {
    /// Taken from the email timestamp, never re-parsed from the body
    pub date: DateTime<Utc>,
    pub amount: f64,
    /// "unknown" when no merchant pattern resolved
    pub merchant: String,
    pub category: Category,
    pub payment_mode: PaymentMode,
    pub reference: Option<String>,
    pub direction: Direction,
}

/// Statement billing period as printed in a credit-card email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementPeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// What kind of credit-card email produced a [`CardEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardEventKind {
    Transaction,
    Payment,
    /// Statement or limit-update mail; carries no spend amount
    Statement,
}

/// Everything the credit-card extraction pass pulled out of one email.
/// Events without a resolvable issuer or card number are discarded before
/// this struct is built, so both identity fields are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardEvent {
    pub kind: CardEventKind,
    pub date: DateTime<Utc>,
    /// Issuer resolved from the sender domain, e.g. "hdfc"
    pub issuer: String,
    /// Last four digits of the card number
    pub last4: String,
    /// Mandatory for transactions and payments, absent for statements
    pub amount: Option<f64>,
    pub merchant: Option<String>,
    pub available_limit: Option<f64>,
    pub total_limit: Option<f64>,
    pub min_due: Option<f64>,
    pub due_date: Option<NaiveDate>,
    pub statement_period: Option<StatementPeriod>,
    pub reward_points: Option<i64>,
    pub payment_mode: PaymentMode,
    pub reference: Option<String>,
}

impl CardEvent {
    /// Composite account key, `issuer_last4`
    pub fn card_key(&self) -> String {
        format!("{}_{}", self.issuer, self.last4)
    }
}

/// A payment recorded against a card account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub date: DateTime<Utc>,
    pub amount: f64,
    pub mode: PaymentMode,
    pub reference: Option<String>,
}
