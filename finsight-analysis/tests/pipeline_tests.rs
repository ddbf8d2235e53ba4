use chrono::{DateTime, NaiveDate, Utc};
use finsight_analysis::AnalysisPipeline;
use shared_types::{Category, EmailType, RawEmail};

fn ts(date: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
        .and_utc()
}

fn email(subject: &str, content: &str, sender: &str, date: &str) -> RawEmail {
    RawEmail {
        subject: subject.to_string(),
        content: content.to_string(),
        sender: sender.to_string(),
        timestamp: ts(date),
        recipient: None,
        message_id: None,
    }
}

fn card_txn(amount: &str, merchant: &str, date: &str) -> RawEmail {
    email(
        "Txn Alert",
        &format!(
            "Rs. {amount} spent at {merchant} using Card ending 1234 on 12-03-2024. \
             Available limit Rs. 47,501.00"
        ),
        "alerts@hdfcbank.com",
        date,
    )
}

fn mixed_batch() -> Vec<RawEmail> {
    vec![
        card_txn("2,499.00", "AMAZON.IN", "2024-03-12"),
        email(
            "Order Confirmed",
            "Your order from Burger Palace is confirmed. Amount: Rs. 450.00. Paid using UPI",
            "no-reply@zomato.com",
            "2024-03-14",
        ),
        email(
            "Order Shipped",
            "Your Amazon order #AB1234XY has been shipped. Total: Rs. 1,299.00",
            "order-update@amazon.in",
            "2024-03-20",
        ),
        email(
            "Payment Received",
            "Thank you for your payment of Rs. 5,000.00 towards your Card ending 1234 \
             via UPI. Reference: ABC12345",
            "alerts@hdfcbank.com",
            "2024-03-25",
        ),
        email(
            "Weekend bonanza",
            "Get 500 bonus reward points and flat 10% cashback this weekend only!",
            "promos@shopmore.example",
            "2024-03-26",
        ),
        email(
            "Lunch plans",
            "Shall we meet at noon on Thursday?",
            "friend@example.com",
            "2024-03-27",
        ),
    ]
}

#[test]
fn basic_transaction_scenario() {
    let pipeline = AnalysisPipeline::new();
    let result = pipeline.analyze(&[card_txn("2,499.00", "AMAZON.IN", "2024-03-12")]);

    assert_eq!(result.emails_processed, 1);
    assert_eq!(result.transactions_extracted, 1);

    let account = &result.credit_analysis["hdfc_1234"];
    assert_eq!(account.total_spend, 2499.0);
    assert_eq!(account.transactions.len(), 1);
    assert!(account.transactions[0].merchant.contains("AMAZON"));

    let bucket = &result.spending_analysis.categories[&Category::CreditCards];
    assert_eq!(bucket.total_spend, 2499.0);
    assert_eq!(bucket.transaction_count, 1);
}

#[test]
fn promotional_emails_never_produce_transactions() {
    let pipeline = AnalysisPipeline::new();
    let result = pipeline.analyze(&[email(
        "Weekend bonanza",
        "Get 500 bonus reward points and flat 10% cashback this weekend only!",
        "promos@shopmore.example",
        "2024-03-26",
    )]);

    assert_eq!(result.transactions_extracted, 0);
    assert!(result.spending_analysis.categories.is_empty());
    assert!(result.credit_analysis.is_empty());
    assert_eq!(result.category_distribution[&EmailType::Promotional], 1);
}

#[test]
fn payments_update_card_history_but_not_spend() {
    let pipeline = AnalysisPipeline::new();
    let result = pipeline.analyze(&[email(
        "Payment Received",
        "Thank you for your payment of Rs. 5,000.00 towards your Card ending 1234 \
         via UPI. Reference: ABC12345",
        "alerts@hdfcbank.com",
        "2024-03-25",
    )]);

    let account = &result.credit_analysis["hdfc_1234"];
    assert_eq!(account.payment_history.len(), 1);
    assert_eq!(account.payment_history[0].amount, 5000.0);
    assert_eq!(account.total_spend, 0.0);
    // a payment is a credit against the card, not spend
    assert!(result.spending_analysis.categories.is_empty());
}

#[test]
fn card_total_spend_equals_sum_of_transactions() {
    let pipeline = AnalysisPipeline::new();
    let result = pipeline.analyze(&[
        card_txn("2,499.00", "AMAZON.IN", "2024-03-12"),
        card_txn("150.50", "SWIGGY", "2024-03-15"),
        card_txn("1,00,000.00", "MAKEMYTRIP", "2024-04-02"),
    ]);

    for account in result.credit_analysis.values() {
        let sum: f64 = account.transactions.iter().map(|t| t.amount).sum();
        assert_eq!(account.total_spend, sum);
    }
    // Indian digit grouping parses to the full value
    let account = &result.credit_analysis["hdfc_1234"];
    assert!(account.transactions.iter().any(|t| t.amount == 100000.0));
}

#[test]
fn every_transaction_category_has_a_bucket() {
    let pipeline = AnalysisPipeline::new();
    let result = pipeline.analyze(&mixed_batch());

    assert_eq!(result.transactions_extracted, 3);
    for expected in [
        Category::CreditCards,
        Category::FoodDining,
        Category::ShoppingRetail,
    ] {
        assert!(
            result.spending_analysis.categories.contains_key(&expected),
            "missing bucket for {expected}"
        );
    }
}

#[test]
fn spend_percentages_sum_to_one_hundred() {
    let pipeline = AnalysisPipeline::new();
    let result = pipeline.analyze(&mixed_batch());

    let total: f64 = result
        .spending_analysis
        .categories
        .values()
        .filter(|b| b.total_spend > 0.0)
        .map(|b| b.spend_percentage)
        .sum();
    assert!((total - 100.0).abs() < 1e-9, "percentages summed to {total}");
}

#[test]
fn analysis_is_idempotent() {
    let batch = mixed_batch();
    let pipeline = AnalysisPipeline::new();

    let mut first = serde_json::to_value(pipeline.analyze(&batch)).unwrap();
    let mut second = serde_json::to_value(pipeline.analyze(&batch)).unwrap();
    // generated_at is the only wall-clock field
    first.as_object_mut().unwrap().remove("generated_at");
    second.as_object_mut().unwrap().remove("generated_at");

    assert_eq!(first, second);
}

#[test]
fn recurring_payment_reported_for_regular_intervals() {
    let pipeline = AnalysisPipeline::new();
    let result = pipeline.analyze(&[
        card_txn("499.00", "NETFLIX", "2024-01-05"),
        card_txn("499.00", "NETFLIX", "2024-02-05"),
        card_txn("499.00", "NETFLIX", "2024-03-06"),
    ]);

    let insight = result
        .insights
        .iter()
        .find(|i| i.contains("NETFLIX") && i.contains("recurring"))
        .expect("expected a recurring payment insight");
    assert!(insight.contains("₹499.00"));
}

#[test]
fn recurring_pattern_broken_by_large_gap() {
    let pipeline = AnalysisPipeline::new();
    let result = pipeline.analyze(&[
        card_txn("499.00", "NETFLIX", "2024-01-05"),
        card_txn("499.00", "NETFLIX", "2024-02-05"),
        card_txn("499.00", "NETFLIX", "2024-03-06"),
        card_txn("499.00", "NETFLIX", "2024-06-04"),
    ]);

    assert!(
        !result.insights.iter().any(|i| i.contains("recurring")),
        "a 90-day gap must break the recurring pattern"
    );
}

#[test]
fn one_bad_email_never_aborts_the_batch() {
    let pipeline = AnalysisPipeline::new();
    let mut batch = mixed_batch();
    // transaction alert with no parseable amount: dropped, not fatal
    batch.push(email(
        "Txn Alert",
        "A purchase was made with your Card ending 1234",
        "alerts@hdfcbank.com",
        "2024-03-28",
    ));

    let result = pipeline.analyze(&batch);
    assert_eq!(result.emails_processed, batch.len());
    assert_eq!(result.transactions_extracted, 3);
}

#[test]
fn statement_and_payments_drive_card_metrics() {
    let pipeline = AnalysisPipeline::new();
    let result = pipeline.analyze(&[
        email(
            "Statement Ready",
            "Statement for Card ending 1234. Total Limit Rs. 1,00,000.00. \
             Minimum amount due: Rs. 1,200.00. Due date: 15-04-2024",
            "statements@hdfcbank.com",
            "2024-03-16",
        ),
        card_txn("25,000.00", "CROMA", "2024-03-20"),
        email(
            "Payment Received",
            "Thank you for your payment of Rs. 25,000.00 towards your Card ending 1234 via UPI",
            "alerts@hdfcbank.com",
            "2024-04-10",
        ),
    ]);

    let account = &result.credit_analysis["hdfc_1234"];
    assert_eq!(account.metrics.credit_utilization, Some(25.0));
    assert_eq!(account.metrics.payment_ratio, Some(1.0));
    assert_eq!(account.metrics.average_monthly_spend, 25000.0);
}
