use std::collections::{BTreeMap, BTreeSet};

use shared_types::{
    Category, CategoryBucket, ExtractedTransaction, MerchantShare, OverallMerchant, OverallStats,
    RecurringPayment, SpendingAnalysis, UNKNOWN_MERCHANT,
};

/// How many transactions a category bucket keeps in its recent list
const RECENT_TRANSACTIONS_CAP: usize = 5;
/// Top merchants reported per category
const TOP_MERCHANTS_PER_CATEGORY: usize = 5;
/// Top merchants reported across all categories
const TOP_MERCHANTS_OVERALL: usize = 10;

/// Per-merchant rollup across categories, kept during accumulation
#[derive(Debug, Default)]
struct MerchantAccum {
    transaction_count: u64,
    total_spend: f64,
    categories: BTreeSet<Category>,
}

/// Groups transactions by category and merchant and keeps batch-wide
/// running totals. Strictly additive: there is no retraction path for a
/// misclassified email. Derived metrics are filled in by [`Self::finalize`]
/// once the grand total is known.
#[derive(Debug, Default)]
pub struct SpendingAggregator {
    categories: BTreeMap<Category, CategoryBucket>,
    overall: OverallStats,
    merchants: BTreeMap<String, MerchantAccum>,
}

impl SpendingAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, tx: &ExtractedTransaction) {
        let month = tx.date.format("%Y-%m").to_string();

        let bucket = self.categories.entry(tx.category).or_default();
        bucket.total_spend += tx.amount;
        bucket.transaction_count += 1;
        *bucket
            .merchant_frequency
            .entry(tx.merchant.clone())
            .or_insert(0) += 1;
        *bucket.monthly_trend.entry(month.clone()).or_insert(0.0) += tx.amount;
        if tx.amount > bucket.largest_transaction {
            bucket.largest_transaction = tx.amount;
        }
        bucket.recent_transactions.push(tx.clone());
        bucket.recent_transactions.sort_by(|a, b| b.date.cmp(&a.date));
        bucket.recent_transactions.truncate(RECENT_TRANSACTIONS_CAP);

        self.overall.total_spend += tx.amount;
        self.overall.transaction_count += 1;
        let month_total = {
            let entry = self.overall.monthly_totals.entry(month.clone()).or_insert(0.0);
            *entry += tx.amount;
            *entry
        };
        // Peak month is tracked incrementally, not recomputed post-hoc
        let peak_total = self
            .overall
            .peak_spending_month
            .as_ref()
            .and_then(|m| self.overall.monthly_totals.get(m).copied())
            .unwrap_or(f64::MIN);
        if month_total > peak_total {
            self.overall.peak_spending_month = Some(month);
        }

        // The sentinel is a bucket key but not a merchant
        if tx.merchant != UNKNOWN_MERCHANT {
            let accum = self.merchants.entry(tx.merchant.clone()).or_default();
            accum.transaction_count += 1;
            accum.total_spend += tx.amount;
            accum.categories.insert(tx.category);
        }
    }

    /// Second pass once every email has been consumed: averages,
    /// percentages against the grand total, and top-merchant lists
    pub fn finalize(mut self) -> SpendingAnalysis {
        let grand_total = self.overall.total_spend;

        for bucket in self.categories.values_mut() {
            let count = bucket.transaction_count;
            if count > 0 {
                bucket.average_transaction = bucket.total_spend / count as f64;
            }
            if grand_total > 0.0 {
                bucket.spend_percentage = bucket.total_spend / grand_total * 100.0;
            }

            let mut by_frequency: Vec<(String, u64)> = bucket
                .merchant_frequency
                .iter()
                .filter(|(merchant, _)| merchant.as_str() != UNKNOWN_MERCHANT)
                .map(|(merchant, freq)| (merchant.clone(), *freq))
                .collect();
            by_frequency.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            bucket.top_merchants = by_frequency
                .into_iter()
                .take(TOP_MERCHANTS_PER_CATEGORY)
                .map(|(merchant, transaction_count)| MerchantShare {
                    merchant,
                    transaction_count,
                    share: transaction_count as f64 / count as f64 * 100.0,
                })
                .collect();
        }

        let mut rollup: Vec<(String, MerchantAccum)> = self.merchants.into_iter().collect();
        rollup.sort_by(|a, b| {
            b.1.transaction_count
                .cmp(&a.1.transaction_count)
                .then_with(|| a.0.cmp(&b.0))
        });
        self.overall.top_merchants = rollup
            .into_iter()
            .take(TOP_MERCHANTS_OVERALL)
            .map(|(merchant, accum)| OverallMerchant {
                merchant,
                transaction_count: accum.transaction_count,
                total_spend: accum.total_spend,
                average_transaction: accum.total_spend / accum.transaction_count as f64,
                categories: accum.categories.into_iter().collect(),
            })
            .collect();

        SpendingAnalysis {
            categories: self.categories,
            overall: self.overall,
        }
    }
}

/// Maximum deviation of any inter-transaction gap from the mean gap for a
/// merchant to count as recurring
const RECURRING_TOLERANCE_DAYS: f64 = 5.0;
/// Minimum charges needed before a pattern is believable
const RECURRING_MIN_OCCURRENCES: usize = 3;

/// Find merchants charged at a regular interval. A merchant qualifies when
/// it has at least three transactions and every consecutive-date delta is
/// within ±5 days of the mean delta. Feeds insight generation only.
pub fn detect_recurring_payments(transactions: &[ExtractedTransaction]) -> Vec<RecurringPayment> {
    let mut by_merchant: BTreeMap<&str, Vec<&ExtractedTransaction>> = BTreeMap::new();
    for tx in transactions {
        if tx.merchant != UNKNOWN_MERCHANT {
            by_merchant.entry(tx.merchant.as_str()).or_default().push(tx);
        }
    }

    let mut recurring = Vec::new();
    for (merchant, mut txs) in by_merchant {
        if txs.len() < RECURRING_MIN_OCCURRENCES {
            continue;
        }
        txs.sort_by_key(|t| t.date);

        let deltas: Vec<i64> = txs
            .windows(2)
            .map(|w| (w[1].date - w[0].date).num_days())
            .collect();
        let mean = deltas.iter().sum::<i64>() as f64 / deltas.len() as f64;
        if mean <= 0.0 {
            continue;
        }
        let regular = deltas
            .iter()
            .all(|d| (*d as f64 - mean).abs() <= RECURRING_TOLERANCE_DAYS);
        if !regular {
            continue;
        }

        let average_amount = txs.iter().map(|t| t.amount).sum::<f64>() / txs.len() as f64;
        recurring.push(RecurringPayment {
            merchant: merchant.to_string(),
            interval_days: mean.round() as i64,
            average_amount,
            occurrences: txs.len(),
        });
    }
    recurring
}
