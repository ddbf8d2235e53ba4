use std::collections::BTreeMap;

use shared_types::{
    CardAccount, CardEvent, CardEventKind, Category, Direction, ExtractedTransaction,
    PaymentRecord, UNKNOWN_MERCHANT,
};
use tracing::debug;

/// Groups card events by `issuer_last4` and accumulates spend, payment
/// history and statement data. Accounts are created lazily on the first
/// event referencing their key and only ever grow within a run.
#[derive(Debug, Default)]
pub struct CreditAggregator {
    accounts: BTreeMap<String, CardAccount>,
}

impl CreditAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, event: &CardEvent) {
        let account = self
            .accounts
            .entry(event.card_key())
            .or_insert_with(|| CardAccount::new(event.issuer.clone(), event.last4.clone()));

        match event.kind {
            CardEventKind::Transaction => {
                let Some(amount) = event.amount else {
                    debug!(card = %event.card_key(), "transaction event without amount, skipping");
                    return;
                };
                account.transactions.push(ExtractedTransaction {
                    date: event.date,
                    amount,
                    merchant: event
                        .merchant
                        .clone()
                        .unwrap_or_else(|| UNKNOWN_MERCHANT.to_string()),
                    category: Category::CreditCards,
                    payment_mode: event.payment_mode,
                    reference: event.reference.clone(),
                    direction: Direction::Debit,
                });
                account.total_spend += amount;
            }
            CardEventKind::Payment => {
                let Some(amount) = event.amount else {
                    debug!(card = %event.card_key(), "payment event without amount, skipping");
                    return;
                };
                account.payment_history.push(PaymentRecord {
                    date: event.date,
                    amount,
                    mode: event.payment_mode,
                    reference: event.reference.clone(),
                });
            }
            CardEventKind::Statement => {}
        }

        // Statement-style fields can ride on any event kind
        if let Some(due) = event.due_date {
            account.due_dates.push(due);
        }
        if let Some(limit) = event.total_limit {
            account.credit_limit = Some(account.credit_limit.map_or(limit, |l| l.max(limit)));
        }
        if let Some(points) = event.reward_points {
            account.reward_points = account.reward_points.max(points);
        }
    }

    /// Finalize pass: derive per-card metrics now that every event has
    /// been consumed
    pub fn finalize(mut self) -> BTreeMap<String, CardAccount> {
        for account in self.accounts.values_mut() {
            account.metrics.payment_ratio = payment_ratio(account);
            account.metrics.average_monthly_spend = average_monthly_spend(account);
            account.metrics.credit_utilization = account
                .credit_limit
                .filter(|limit| *limit > 0.0)
                .map(|limit| account.total_spend / limit * 100.0);
        }
        self.accounts
    }
}

/// on-time payments / recorded statements. Due dates and payments are
/// paired chronologically by index; a statement with no matching payment
/// counts as late. None when the account has no recorded due-dates.
fn payment_ratio(account: &CardAccount) -> Option<f64> {
    if account.due_dates.is_empty() {
        return None;
    }

    let mut due_dates = account.due_dates.clone();
    due_dates.sort();

    let mut payment_dates: Vec<_> = account
        .payment_history
        .iter()
        .map(|p| p.date.date_naive())
        .collect();
    payment_dates.sort();

    let on_time = due_dates
        .iter()
        .enumerate()
        .filter(|&(i, due)| payment_dates.get(i).is_some_and(|paid| paid <= due))
        .count();

    Some(on_time as f64 / due_dates.len() as f64)
}

/// Total spend divided by the number of distinct months that saw at least
/// one transaction
fn average_monthly_spend(account: &CardAccount) -> f64 {
    let months: std::collections::BTreeSet<String> = account
        .transactions
        .iter()
        .map(|t| t.date.format("%Y-%m").to_string())
        .collect();
    if months.is_empty() {
        return 0.0;
    }
    account.total_spend / months.len() as f64
}
