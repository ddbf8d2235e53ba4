use shared_types::{Category, Classification, EmailType, RawEmail};

use crate::patterns::{contains_any, PatternLibrary};

/// Decides, per email, whether it is promotional, a transaction alert, a
/// payment confirmation, one of the spend categories, or unrelated.
///
/// Precedence: the promotional filter runs first, then sender-domain
/// routing, then the content-keyword fallback. A sender match always wins
/// over a content match; within the content fallback the category with the
/// highest total pattern-match count wins, ties broken by declaration
/// order. Classification never fails: anything unresolvable is `Unknown`.
pub struct EmailClassifier<'a> {
    patterns: &'a PatternLibrary,
}

impl<'a> EmailClassifier<'a> {
    pub fn new(patterns: &'a PatternLibrary) -> Self {
        Self { patterns }
    }

    pub fn classify(&self, email: &RawEmail) -> Classification {
        let text = format!("{} {}", email.subject, email.content);
        let content = text.to_lowercase();
        if content.trim().is_empty() {
            return Classification::unknown();
        }
        let sender = email.sender.to_lowercase();

        if self.is_promotional(&content) {
            return Classification::of(EmailType::Promotional);
        }

        if let Some(category) = self.patterns.sender_category(&sender) {
            return Classification::of(self.refine_sender_match(category, &content));
        }

        self.content_fallback(&content, &text)
    }

    /// Promotional content is excluded from all downstream aggregation.
    /// Transaction, payment and statement keywords veto the filter so a
    /// genuine alert mentioning rewards is not thrown away.
    fn is_promotional(&self, content: &str) -> bool {
        contains_any(content, &self.patterns.promotional_keywords)
            && !contains_any(content, &self.patterns.transaction_keywords)
            && !contains_any(content, &self.patterns.payment_keywords)
            && !contains_any(content, &self.patterns.statement_keywords)
    }

    /// A credit-card sender is refined by content: payment confirmations
    /// are checked before transaction alerts, anything else stays generic
    fn refine_sender_match(&self, category: Category, content: &str) -> EmailType {
        match category {
            Category::CreditCards => {
                if contains_any(content, &self.patterns.payment_keywords) {
                    EmailType::CreditCardPayment
                } else if contains_any(content, &self.patterns.transaction_keywords) {
                    EmailType::CreditCardTransaction
                } else {
                    EmailType::CreditCards
                }
            }
            Category::FoodDining => EmailType::FoodDining,
            Category::TravelTransport => EmailType::TravelTransport,
            Category::ShoppingRetail => EmailType::ShoppingRetail,
            Category::Financial => EmailType::Financial,
            Category::Others => EmailType::Unknown,
        }
    }

    fn content_fallback(&self, content: &str, text: &str) -> Classification {
        if contains_any(content, &self.patterns.transaction_keywords) {
            return Classification::of(EmailType::CreditCardTransaction);
        }
        if contains_any(content, &self.patterns.payment_keywords) {
            return Classification::of(EmailType::CreditCardPayment);
        }

        let mut best: Option<(Category, usize)> = None;
        for (category, patterns) in &self.patterns.spend {
            let score = patterns.match_count(text);
            if score > 0 && best.map_or(true, |(_, s)| score > s) {
                best = Some((*category, score));
            }
        }

        match best {
            Some((Category::FoodDining, _)) => Classification::of(EmailType::FoodDining),
            Some((Category::TravelTransport, _)) => Classification::of(EmailType::TravelTransport),
            Some((Category::ShoppingRetail, _)) => Classification::of(EmailType::ShoppingRetail),
            Some((Category::Financial, _)) => Classification::of(EmailType::Financial),
            _ => Classification::unknown(),
        }
    }
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

    fn classify(email: &RawEmail) -> EmailType {
        let patterns = PatternLibrary::new();
        EmailClassifier::new(&patterns).classify(email).email_type
    }

    #[test]
    fn test_sender_match_with_transaction_keyword() {
        let ty = classify(&email(
            "Txn Alert",
            "Rs. 2,499.00 spent at AMAZON.IN using Card ending 1234 on 12-03-2024",
            "noreply@hdfcbank.com",
        ));
        assert_eq!(ty, EmailType::CreditCardTransaction);
    }

    #[test]
    fn test_payment_keyword_checked_before_transaction() {
        let ty = classify(&email(
            "Payment Update",
            "Thank you for your payment of Rs. 10,000.00 towards your Card ending 1234",
            "alerts@icicibank.com",
        ));
        assert_eq!(ty, EmailType::CreditCardPayment);
    }

    #[test]
    fn test_generic_credit_card_mail_stays_generic() {
        let ty = classify(&email(
            "Your Statement",
            "Your statement for Card ending 1234 is ready. Total amount due: Rs. 12,000.00. Due date: 15-04-2024",
            "statements@sbicard.com",
        ));
        assert_eq!(ty, EmailType::CreditCards);
    }

    #[test]
    fn test_promotional_email_is_filtered() {
        let ty = classify(&email(
            "Special for you",
            "Earn 5x reward points and 10% cashback on your next booking!",
            "promos@travelsite.com",
        ));
        assert_eq!(ty, EmailType::Promotional);
    }

    #[test]
    fn test_promotional_does_not_swallow_transaction_alerts() {
        // "cashback" alone would look promotional; "spent" vetoes the filter
        let ty = classify(&email(
            "Txn Alert",
            "Rs. 500.00 spent at STORE. You earned cashback of Rs. 5.00",
            "alerts@hdfcbank.com",
        ));
        assert_eq!(ty, EmailType::CreditCardTransaction);
    }

    #[test]
    fn test_sender_match_beats_content_keywords() {
        // Food sender plus generic transaction words still routes by sender
        let ty = classify(&email(
            "Order delivered",
            "Amount: Rs. 320.00. Your order from Burger Palace is confirmed",
            "no-reply@zomato.com",
        ));
        assert_eq!(ty, EmailType::FoodDining);
    }

    #[test]
    fn test_content_fallback_scores_categories() {
        let ty = classify(&email(
            "Trip receipt",
            "Your ride is complete. Fare: Rs. 230.00. Rate your driver!",
            "receipts@unknowncabs.example",
        ));
        assert_eq!(ty, EmailType::TravelTransport);
    }

    #[test]
    fn test_empty_content_is_unknown() {
        let ty = classify(&email("", "", "someone@example.com"));
        assert_eq!(ty, EmailType::Unknown);
    }

    #[test]
    fn test_unrelated_content_is_unknown() {
        let ty = classify(&email(
            "Meeting tomorrow",
            "Let's sync at 10am about the quarterly roadmap",
            "colleague@example.com",
        ));
        assert_eq!(ty, EmailType::Unknown);
    }
}
