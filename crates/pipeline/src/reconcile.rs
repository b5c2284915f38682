use std::collections::BTreeMap;

use crate::classify::classify;
use crate::model::{BucketKey, Dimension, ProfitBucket, Transaction};

fn key_of(transaction: &Transaction, dimension: Dimension) -> BucketKey {
    match dimension {
        Dimension::Date => BucketKey::Date(transaction.date),
        Dimension::Client => BucketKey::Client(transaction.client.clone()),
        Dimension::Product => BucketKey::Product(transaction.product.clone()),
    }
}

/// Outer-join sales and returns totals on the dimension key.
///
/// Every key seen on either side produces exactly one bucket; the side
/// with no entries contributes zero. Net profit is the per-key
/// difference, classified as it is built.
pub fn reconcile(
    sales: &[Transaction],
    returns: &[Transaction],
    dimension: Dimension,
) -> Vec<ProfitBucket> {
    let mut joined: BTreeMap<BucketKey, (i64, i64)> = BTreeMap::new();

    for transaction in sales {
        joined.entry(key_of(transaction, dimension)).or_insert((0, 0)).0 +=
            transaction.amount_minor;
    }
    for transaction in returns {
        joined.entry(key_of(transaction, dimension)).or_insert((0, 0)).1 +=
            transaction.amount_minor;
    }

    joined
        .into_iter()
        .map(|(key, (sales_total, returns_total))| {
            let net_profit = sales_total - returns_total;
            ProfitBucket {
                key,
                sales_total,
                returns_total,
                net_profit,
                status: classify(net_profit),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use chrono::NaiveDate;

    fn txn(date: &str, client: &str, product: &str, amount: i64) -> Transaction {
        Transaction {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            client: client.into(),
            product: product.into(),
            qty: None,
            amount_minor: amount,
        }
    }

    #[test]
    fn daily_bucket_nets_sales_against_returns() {
        let sales = vec![txn("2025-12-01", "A", "Widget", 10_000)];
        let returns = vec![txn("2025-12-01", "A", "Widget", 3_000)];
        let buckets = reconcile(&sales, &returns, Dimension::Date);
        assert_eq!(buckets.len(), 1);
        assert_eq!(
            buckets[0].key,
            BucketKey::Date(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap())
        );
        assert_eq!(buckets[0].sales_total, 10_000);
        assert_eq!(buckets[0].returns_total, 3_000);
        assert_eq!(buckets[0].net_profit, 7_000);
        assert_eq!(buckets[0].status, Status::Profit);
    }

    #[test]
    fn returns_only_key_is_not_dropped() {
        let sales = vec![];
        let returns = vec![txn("2025-12-02", "B", "Widget", 5_000)];
        let buckets = reconcile(&sales, &returns, Dimension::Date);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].sales_total, 0);
        assert_eq!(buckets[0].returns_total, 5_000);
        assert_eq!(buckets[0].net_profit, -5_000);
        assert_eq!(buckets[0].status, Status::Loss);
    }

    #[test]
    fn sales_only_key_gets_zero_returns() {
        let sales = vec![txn("2025-12-01", "A", "Widget", 4_200)];
        let buckets = reconcile(&sales, &[], Dimension::Client);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].key, BucketKey::Client("A".into()));
        assert_eq!(buckets[0].returns_total, 0);
        assert_eq!(buckets[0].net_profit, 4_200);
    }

    #[test]
    fn amounts_sum_per_key() {
        let sales = vec![
            txn("2025-12-01", "A", "Widget", 10_000),
            txn("2025-12-01", "B", "Widget", 2_000),
            txn("2025-12-02", "A", "Widget", 1_000),
        ];
        let returns = vec![
            txn("2025-12-01", "A", "Widget", 500),
            txn("2025-12-01", "A", "Widget", 500),
        ];
        let buckets = reconcile(&sales, &returns, Dimension::Date);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].sales_total, 12_000);
        assert_eq!(buckets[0].returns_total, 1_000);
        assert_eq!(buckets[1].sales_total, 1_000);
        assert_eq!(buckets[1].returns_total, 0);
    }

    #[test]
    fn exactly_one_bucket_per_distinct_key() {
        let sales = vec![
            txn("2025-12-01", "A", "Widget", 100),
            txn("2025-12-02", "A", "Gadget", 100),
        ];
        let returns = vec![
            txn("2025-12-01", "B", "Widget", 50),
            txn("2025-12-03", "C", "Doodad", 50),
        ];
        let by_product = reconcile(&sales, &returns, Dimension::Product);
        let keys: Vec<_> = by_product.iter().map(|b| b.key.clone()).collect();
        assert_eq!(
            keys,
            vec![
                BucketKey::Product("Doodad".into()),
                BucketKey::Product("Gadget".into()),
                BucketKey::Product("Widget".into()),
            ]
        );

        let by_client = reconcile(&sales, &returns, Dimension::Client);
        assert_eq!(by_client.len(), 3);
    }

    #[test]
    fn zero_net_classifies_as_loss() {
        let sales = vec![txn("2025-12-01", "A", "Widget", 1_000)];
        let returns = vec![txn("2025-12-01", "A", "Widget", 1_000)];
        let buckets = reconcile(&sales, &returns, Dimension::Date);
        assert_eq!(buckets[0].net_profit, 0);
        assert_eq!(buckets[0].status, Status::Loss);
    }
}
