use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use extractors::{EmailClassifier, FieldExtractor, PatternLibrary};
use shared_types::{AnalysisResult, EmailType, ExtractedTransaction, RawEmail};
use tracing::{debug, info};

use crate::credit::CreditAggregator;
use crate::insights::generate_insights;
use crate::spending::{detect_recurring_payments, SpendingAggregator};

/// The full analysis pipeline: classify -> extract -> aggregate ->
/// finalize -> insights. Stateless per invocation; processing a batch is a
/// pure function of that batch, so re-running over the same emails yields
/// the same analysis.
///
/// Emails are processed strictly sequentially because the aggregators are
/// mutated in place. One bad email never aborts the batch: every
/// per-email failure degrades to a skip with a debug log.
pub struct AnalysisPipeline {
    patterns: Arc<PatternLibrary>,
}

impl AnalysisPipeline {
    pub fn new() -> Self {
        Self::with_patterns(Arc::new(PatternLibrary::new()))
    }

    /// Use a shared pattern library built once at process start
    pub fn with_patterns(patterns: Arc<PatternLibrary>) -> Self {
        Self { patterns }
    }

    pub fn analyze(&self, emails: &[RawEmail]) -> AnalysisResult {
        let classifier = EmailClassifier::new(&self.patterns);
        let extractor = FieldExtractor::new(&self.patterns);
        let mut credit = CreditAggregator::new();
        let mut spending = SpendingAggregator::new();
        let mut transactions: Vec<ExtractedTransaction> = Vec::new();
        let mut distribution: BTreeMap<EmailType, u64> = BTreeMap::new();

        for email in emails {
            let classification = classifier.classify(email);
            *distribution.entry(classification.email_type).or_insert(0) += 1;

            match classification.email_type {
                EmailType::Promotional | EmailType::Unknown => {
                    debug!(
                        sender = %email.sender,
                        email_type = ?classification.email_type,
                        "email excluded from aggregation"
                    );
                }
                EmailType::CreditCardTransaction => {
                    match extractor.extract_card_event(email, &classification) {
                        Some(event) => credit.update(&event),
                        None => debug!(
                            sender = %email.sender,
                            subject = %email.subject,
                            "card transaction could not be attributed to an account"
                        ),
                    }
                    match extractor.extract_transaction(email, &classification) {
                        Some(tx) => {
                            spending.update(&tx);
                            transactions.push(tx);
                        }
                        None => debug!(
                            sender = %email.sender,
                            subject = %email.subject,
                            "no amount resolved, transaction dropped"
                        ),
                    }
                }
                EmailType::CreditCardPayment | EmailType::CreditCards => {
                    match extractor.extract_card_event(email, &classification) {
                        Some(event) => credit.update(&event),
                        None => debug!(
                            sender = %email.sender,
                            subject = %email.subject,
                            "card event could not be attributed to an account"
                        ),
                    }
                }
                EmailType::FoodDining
                | EmailType::TravelTransport
                | EmailType::ShoppingRetail
                | EmailType::Financial => {
                    match extractor.extract_transaction(email, &classification) {
                        Some(tx) => {
                            spending.update(&tx);
                            transactions.push(tx);
                        }
                        None => debug!(
                            sender = %email.sender,
                            subject = %email.subject,
                            "no amount resolved, transaction dropped"
                        ),
                    }
                }
            }
        }

        let credit_analysis = credit.finalize();
        let spending_analysis = spending.finalize();
        let recurring = detect_recurring_payments(&transactions);
        let insights = generate_insights(&credit_analysis, &spending_analysis, &recurring);

        info!(
            emails = emails.len(),
            transactions = transactions.len(),
            cards = credit_analysis.len(),
            "analysis complete"
        );

        AnalysisResult {
            credit_analysis,
            spending_analysis,
            insights,
            emails_processed: emails.len(),
            transactions_extracted: transactions.len(),
            category_distribution: distribution,
            generated_at: Utc::now(),
        }
    }
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new()
    }
}
