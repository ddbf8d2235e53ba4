use chrono::NaiveDate;
use regex::Regex;
use shared_types::{
    CardEvent, CardEventKind, Category, Classification, Direction, EmailType,
    ExtractedTransaction, PaymentMode, RawEmail, StatementPeriod, UNKNOWN_MERCHANT,
};

use crate::patterns::PatternLibrary;

/// Extracts structured fields from a classified email by walking ordered
/// pattern lists; the first match wins per field. An amount is the only
/// mandatory field: without one the whole record is dropped. Every other
/// miss degrades to a sentinel or `None`.
pub struct FieldExtractor<'a> {
    patterns: &'a PatternLibrary,
}

impl<'a> FieldExtractor<'a> {
    pub fn new(patterns: &'a PatternLibrary) -> Self {
        Self { patterns }
    }

    /// Build the spend-side transaction record for an email, if it carries
    /// a parseable amount. Payment confirmations are not spend and yield
    /// no transaction here; they are handled by [`Self::extract_card_event`].
    pub fn extract_transaction(
        &self,
        email: &RawEmail,
        classification: &Classification,
    ) -> Option<ExtractedTransaction> {
        let text = combined_text(email);

        let (amount, merchant) = match classification.email_type {
            EmailType::CreditCardTransaction => (
                first_amount(&self.patterns.card.transaction_amounts, &text)?,
                first_match(&self.patterns.card.merchants, &text),
            ),
            EmailType::FoodDining
            | EmailType::TravelTransport
            | EmailType::ShoppingRetail
            | EmailType::Financial => {
                let category = classification.category?;
                let spend = self.patterns.spend_patterns(category)?;
                (
                    first_amount(&spend.amounts, &text)?,
                    first_match(&spend.merchants, &text),
                )
            }
            _ => return None,
        };

        Some(ExtractedTransaction {
            date: email.timestamp,
            amount,
            merchant: merchant.unwrap_or_else(|| UNKNOWN_MERCHANT.to_string()),
            category: classification.category.unwrap_or(Category::Others),
            payment_mode: self.payment_mode(&text),
            reference: first_match(&self.patterns.payment.references, &text),
            direction: Direction::Debit,
        })
    }

    /// Build the card-side event for a credit-card email. The issuer comes
    /// from the sender domain and the card number from the body; without
    /// both the event cannot be attributed to an account and is discarded.
    pub fn extract_card_event(
        &self,
        email: &RawEmail,
        classification: &Classification,
    ) -> Option<CardEvent> {
        let kind = match classification.email_type {
            EmailType::CreditCardTransaction => CardEventKind::Transaction,
            EmailType::CreditCardPayment => CardEventKind::Payment,
            EmailType::CreditCards => CardEventKind::Statement,
            _ => return None,
        };

        let issuer = self.patterns.issuer_for(&email.sender.to_lowercase())?;
        let text = combined_text(email);
        let last4 = first_match(&self.patterns.card.card_number, &text)?;

        let amount = match kind {
            CardEventKind::Transaction => {
                Some(first_amount(&self.patterns.card.transaction_amounts, &text)?)
            }
            CardEventKind::Payment => Some(first_amount(&self.patterns.payment.amounts, &text)?),
            CardEventKind::Statement => None,
        };

        Some(CardEvent {
            kind,
            date: email.timestamp,
            issuer: issuer.to_string(),
            last4,
            amount,
            merchant: first_match(&self.patterns.card.merchants, &text),
            available_limit: first_amount(&self.patterns.card.available_limit, &text),
            total_limit: first_amount(&self.patterns.card.total_limit, &text),
            min_due: first_amount(&self.patterns.card.min_due, &text),
            due_date: first_match(&self.patterns.card.due_date, &text)
                .and_then(|d| parse_date(&d)),
            statement_period: self.statement_period(&text),
            reward_points: first_match(&self.patterns.card.reward_points, &text)
                .and_then(|p| p.parse().ok()),
            payment_mode: self.payment_mode(&text),
            reference: first_match(&self.patterns.payment.references, &text),
        })
    }

    fn statement_period(&self, text: &str) -> Option<StatementPeriod> {
        let captures = self
            .patterns
            .card
            .statement_period
            .iter()
            .find_map(|re| re.captures(text))?;
        Some(StatementPeriod {
            from: parse_date(captures.get(1)?.as_str())?,
            to: parse_date(captures.get(2)?.as_str())?,
        })
    }

    /// Resolve the payment mode, preferring an explicit "via/through ..."
    /// phrase over bare keyword containment
    fn payment_mode(&self, text: &str) -> PaymentMode {
        if let Some(mode) = first_match(&self.patterns.payment.modes, text) {
            let mode = mode.to_lowercase();
            if let Some(found) = self.mode_from_keywords(&mode) {
                return found;
            }
        }
        let content = text.to_lowercase();
        self.mode_from_keywords(&content).unwrap_or(PaymentMode::Unknown)
    }

    fn mode_from_keywords(&self, text: &str) -> Option<PaymentMode> {
        self.patterns
            .mode_keywords
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
            .map(|(mode, _)| *mode)
    }
}

fn combined_text(email: &RawEmail) -> String {
    format!("{} {}", email.subject, email.content)
}

/// First capture-group match across an ordered pattern list
fn first_match(patterns: &[Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|re| {
        re.captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
    })
}

/// First capture that parses as a valid amount; a capture that fails to
/// parse falls through to the next pattern
fn first_amount(patterns: &[Regex], text: &str) -> Option<f64> {
    patterns.iter().find_map(|re| {
        re.captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| parse_amount(m.as_str()))
    })
}

/// Parse a currency amount, stripping thousands separators. Handles both
/// western ("2,499.00") and Indian ("1,00,000.00") digit grouping.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned = raw.replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Body dates come in a handful of formats; try them in order
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    for format in ["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn email(subject: &str, content: &str, sender: &str) -> RawEmail {
        RawEmail {
            subject: subject.to_string(),
            content: content.to_string(),
            sender: sender.to_string(),
            timestamp: Utc::now(),
            recipient: None,
            message_id: None,
        }
    }

    #[test]
    fn test_parse_amount_strips_separators() {
        assert_eq!(parse_amount("2,499.00"), Some(2499.0));
        assert_eq!(parse_amount("1,00,000.00"), Some(100000.0));
        assert_eq!(parse_amount("450"), Some(450.0));
        assert_eq!(parse_amount("no amount"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(parse_date("15/03/2024"), Some(expected));
        assert_eq!(parse_date("15-03-2024"), Some(expected));
        assert_eq!(parse_date("2024-03-15"), Some(expected));
        assert_eq!(parse_date("03-15-2024"), None);
    }

    #[test]
    fn test_extract_credit_card_transaction() {
        let patterns = PatternLibrary::new();
        let extractor = FieldExtractor::new(&patterns);
        let mail = email(
            "Txn Alert",
            "Rs. 2,499.00 spent at AMAZON.IN using Card ending 1234 on 12-03-2024. \
             Available limit Rs. 47,501.00",
            "alerts@hdfcbank.com",
        );
        let classification = Classification::of(EmailType::CreditCardTransaction);

        let tx = extractor
            .extract_transaction(&mail, &classification)
            .unwrap();
        assert_eq!(tx.amount, 2499.0);
        assert!(tx.merchant.contains("AMAZON"));
        assert_eq!(tx.category, Category::CreditCards);
        assert_eq!(tx.direction, Direction::Debit);

        let event = extractor.extract_card_event(&mail, &classification).unwrap();
        assert_eq!(event.card_key(), "hdfc_1234");
        assert_eq!(event.amount, Some(2499.0));
        assert_eq!(event.available_limit, Some(47501.0));
        assert_eq!(event.kind, CardEventKind::Transaction);
    }

    #[test]
    fn test_missing_amount_drops_the_record() {
        let patterns = PatternLibrary::new();
        let extractor = FieldExtractor::new(&patterns);
        let mail = email(
            "Txn Alert",
            "A transaction was made at AMAZON.IN using Card ending 1234",
            "alerts@hdfcbank.com",
        );
        let classification = Classification::of(EmailType::CreditCardTransaction);

        assert!(extractor.extract_transaction(&mail, &classification).is_none());
        assert!(extractor.extract_card_event(&mail, &classification).is_none());
    }

    #[test]
    fn test_missing_merchant_uses_sentinel() {
        let patterns = PatternLibrary::new();
        let extractor = FieldExtractor::new(&patterns);
        let mail = email(
            "Txn Alert",
            "Rs. 999.00 spent using Card ending 5678",
            "alerts@icicibank.com",
        );
        let classification = Classification::of(EmailType::CreditCardTransaction);

        let tx = extractor
            .extract_transaction(&mail, &classification)
            .unwrap();
        assert_eq!(tx.merchant, UNKNOWN_MERCHANT);
    }

    #[test]
    fn test_unresolvable_issuer_discards_card_event() {
        let patterns = PatternLibrary::new();
        let extractor = FieldExtractor::new(&patterns);
        let mail = email(
            "Txn Alert",
            "Rs. 999.00 spent at STORE using Card ending 5678",
            "alerts@obscure-bank.example",
        );
        let classification = Classification::of(EmailType::CreditCardTransaction);

        assert!(extractor.extract_card_event(&mail, &classification).is_none());
    }

    #[test]
    fn test_extract_payment_with_mode_and_reference() {
        let patterns = PatternLibrary::new();
        let extractor = FieldExtractor::new(&patterns);
        let mail = email(
            "Payment Received",
            "Thank you for your payment of Rs. 10,000.00 towards Card ending 1234 \
             via UPI. Reference: AXI12345XY",
            "alerts@hdfcbank.com",
        );
        let classification = Classification::of(EmailType::CreditCardPayment);

        let event = extractor.extract_card_event(&mail, &classification).unwrap();
        assert_eq!(event.kind, CardEventKind::Payment);
        assert_eq!(event.amount, Some(10000.0));
        assert_eq!(event.payment_mode, PaymentMode::Upi);
        assert_eq!(event.reference.as_deref(), Some("AXI12345XY"));
    }

    #[test]
    fn test_extract_statement_fields() {
        let patterns = PatternLibrary::new();
        let extractor = FieldExtractor::new(&patterns);
        let mail = email(
            "Statement Ready",
            "Statement for Card ending 1234. Total Limit Rs. 1,00,000.00. \
             Minimum amount due: Rs. 1,200.00. Due date: 15-04-2024. \
             Statement period: 16-02-2024 to 15-03-2024. Reward points: 450",
            "statements@hdfcbank.com",
        );
        let classification = Classification::of(EmailType::CreditCards);

        let event = extractor.extract_card_event(&mail, &classification).unwrap();
        assert_eq!(event.kind, CardEventKind::Statement);
        assert_eq!(event.amount, None);
        assert_eq!(event.total_limit, Some(100000.0));
        assert_eq!(event.min_due, Some(1200.0));
        assert_eq!(
            event.due_date,
            NaiveDate::from_ymd_opt(2024, 4, 15)
        );
        let period = event.statement_period.unwrap();
        assert_eq!(period.from, NaiveDate::from_ymd_opt(2024, 2, 16).unwrap());
        assert_eq!(period.to, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(event.reward_points, Some(450));
    }

    #[test]
    fn test_extract_food_order() {
        let patterns = PatternLibrary::new();
        let extractor = FieldExtractor::new(&patterns);
        let mail = email(
            "Order Confirmed",
            "Your order from Burger Palace is confirmed. Amount: Rs. 450.00. Paid using UPI",
            "no-reply@zomato.com",
        );
        let classification = Classification::of(EmailType::FoodDining);

        let tx = extractor
            .extract_transaction(&mail, &classification)
            .unwrap();
        assert_eq!(tx.amount, 450.0);
        assert_eq!(tx.merchant, "Burger Palace");
        assert_eq!(tx.category, Category::FoodDining);
        assert_eq!(tx.payment_mode, PaymentMode::Upi);
    }
}
