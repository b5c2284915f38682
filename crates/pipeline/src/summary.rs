use std::collections::BTreeMap;

use crate::model::{ProfitBucket, RunSummary, Status, StatusSlice};

/// Sum net profit per status. Only statuses with at least one bucket
/// appear; an all-profit series yields a single slice, an empty series
/// yields none.
pub fn status_rollup(buckets: &[ProfitBucket]) -> Vec<StatusSlice> {
    let mut totals: BTreeMap<Status, i64> = BTreeMap::new();
    for bucket in buckets {
        *totals.entry(bucket.status).or_insert(0) += bucket.net_profit;
    }
    totals
        .into_iter()
        .map(|(status, net_profit)| StatusSlice { status, net_profit })
        .collect()
}

/// Headline numbers over one bucket series.
pub fn compute_summary(buckets: &[ProfitBucket]) -> RunSummary {
    let mut summary = RunSummary {
        bucket_count: buckets.len(),
        ..Default::default()
    };
    for bucket in buckets {
        match bucket.status {
            Status::Profit => summary.profit_buckets += 1,
            Status::Loss => summary.loss_buckets += 1,
        }
        summary.sales_total += bucket.sales_total;
        summary.returns_total += bucket.returns_total;
        summary.net_total += bucket.net_profit;
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BucketKey;

    fn bucket(key: &str, sales: i64, returns: i64) -> ProfitBucket {
        let net = sales - returns;
        ProfitBucket {
            key: BucketKey::Client(key.into()),
            sales_total: sales,
            returns_total: returns,
            net_profit: net,
            status: crate::classify::classify(net),
        }
    }

    #[test]
    fn rollup_sums_per_status() {
        let buckets = vec![
            bucket("A", 10_000, 3_000),
            bucket("B", 2_000, 1_000),
            bucket("C", 500, 4_500),
        ];
        let slices = status_rollup(&buckets);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].status, Status::Profit);
        assert_eq!(slices[0].net_profit, 8_000);
        assert_eq!(slices[1].status, Status::Loss);
        assert_eq!(slices[1].net_profit, -4_000);
    }

    #[test]
    fn rollup_never_synthesizes_an_absent_status() {
        let buckets = vec![bucket("A", 10_000, 0)];
        let slices = status_rollup(&buckets);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].status, Status::Profit);

        assert!(status_rollup(&[]).is_empty());
    }

    #[test]
    fn summary_counts_and_totals() {
        let buckets = vec![
            bucket("A", 10_000, 3_000),
            bucket("B", 1_000, 1_000),
            bucket("C", 0, 2_000),
        ];
        let summary = compute_summary(&buckets);
        assert_eq!(summary.bucket_count, 3);
        assert_eq!(summary.profit_buckets, 1);
        assert_eq!(summary.loss_buckets, 2);
        assert_eq!(summary.sales_total, 11_000);
        assert_eq!(summary.returns_total, 6_000);
        assert_eq!(summary.net_total, 5_000);
    }
}
