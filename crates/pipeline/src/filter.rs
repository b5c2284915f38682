use crate::model::{FilterConfig, ProfitBucket, Transaction};

/// Apply the client/product/date-range restrictions to one side.
///
/// Empty selection sets pass everything; an inverted date range selects
/// nothing. Runs before aggregation, on transactions.
pub fn apply(filter: &FilterConfig, transactions: &[Transaction]) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| filter.clients.is_empty() || filter.clients.contains(&t.client))
        .filter(|t| filter.products.is_empty() || filter.products.contains(&t.product))
        .filter(|t| match filter.date_range {
            Some(range) => range.contains(t.date),
            None => true,
        })
        .cloned()
        .collect()
}

/// The status restriction applies after aggregation, to classified
/// buckets. An empty selection keeps all.
pub fn retain_statuses(mut buckets: Vec<ProfitBucket>, filter: &FilterConfig) -> Vec<ProfitBucket> {
    if filter.statuses.is_empty() {
        return buckets;
    }
    buckets.retain(|b| filter.statuses.contains(&b.status));
    buckets
}
