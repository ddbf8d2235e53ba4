use std::collections::BTreeMap;

use shared_types::{CardAccount, RecurringPayment, SpendingAnalysis};

/// Utilization above this share of the credit limit is flagged
const HIGH_UTILIZATION_PERCENT: f64 = 70.0;

/// Turn the finalized aggregates into human-readable insight strings.
/// All amounts are rendered with a single "₹" convention regardless of
/// which symbol form the source emails used.
pub fn generate_insights(
    credit: &BTreeMap<String, CardAccount>,
    spending: &SpendingAnalysis,
    recurring: &[RecurringPayment],
) -> Vec<String> {
    let mut insights = Vec::new();

    if !credit.is_empty() {
        insights.push(format!("Found {} credit card(s) in use", credit.len()));

        let utilizations: Vec<f64> = credit
            .values()
            .filter_map(|account| account.metrics.credit_utilization)
            .collect();
        if !utilizations.is_empty() {
            if utilizations.iter().any(|u| *u > HIGH_UTILIZATION_PERCENT) {
                insights.push("High credit utilization detected".to_string());
            } else {
                insights.push("Credit utilization is within safe limits".to_string());
            }
        }
    }

    if let Some((category, bucket)) = spending
        .categories
        .iter()
        .max_by(|a, b| a.1.total_spend.total_cmp(&b.1.total_spend))
    {
        if bucket.total_spend > 0.0 {
            insights.push(format!(
                "Top spending category: {} ({}, {:.1}% of total spend)",
                category,
                format_inr(bucket.total_spend),
                bucket.spend_percentage
            ));
        }
    }

    if let Some(month) = &spending.overall.peak_spending_month {
        if let Some(total) = spending.overall.monthly_totals.get(month) {
            insights.push(format!(
                "Peak spending month: {} ({})",
                month,
                format_inr(*total)
            ));
        }
    }

    if let Some(insight) = month_over_month(spending) {
        insights.push(insight);
    }

    for payment in recurring {
        insights.push(format!(
            "{} looks like a recurring payment of about {} every {} days",
            payment.merchant,
            format_inr(payment.average_amount),
            payment.interval_days
        ));
    }

    insights
}

/// Compare the two most recent months on record
fn month_over_month(spending: &SpendingAnalysis) -> Option<String> {
    let mut recent = spending.overall.monthly_totals.iter().rev();
    let (last_month, last_total) = recent.next()?;
    let (prev_month, prev_total) = recent.next()?;
    if *prev_total <= 0.0 {
        return None;
    }

    let change = (last_total - prev_total) / prev_total * 100.0;
    let direction = if change >= 0.0 { "up" } else { "down" };
    Some(format!(
        "Spending in {} was {} {:.1}% from {}",
        last_month,
        direction,
        change.abs(),
        prev_month
    ))
}

/// Format an amount with the "₹" symbol and Indian digit grouping
/// (e.g. 100000 -> "₹1,00,000.00")
pub fn format_inr(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let formatted = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    if int_part.len() <= 3 {
        return format!("{sign}₹{int_part}.{frac_part}");
    }

    // last three digits, then groups of two
    let (head, tail) = int_part.split_at(int_part.len() - 3);
    let head_chars: Vec<char> = head.chars().collect();
    let mut groups: Vec<String> = Vec::new();
    let mut end = head_chars.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(head_chars[start..end].iter().collect());
        end = start;
    }
    groups.reverse();

    format!("{sign}₹{},{tail}.{frac_part}", groups.join(","))
}
