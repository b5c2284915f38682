use crate::model::Status;

/// Strictly positive net is profit; zero and negative nets are losses.
pub fn classify(net_minor: i64) -> Status {
    if net_minor > 0 {
        Status::Profit
    } else {
        Status::Loss
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_is_profit() {
        assert_eq!(classify(1), Status::Profit);
        assert_eq!(classify(7000), Status::Profit);
        assert_eq!(classify(i64::MAX), Status::Profit);
    }

    #[test]
    fn zero_is_loss() {
        assert_eq!(classify(0), Status::Loss);
    }

    #[test]
    fn negative_is_loss() {
        assert_eq!(classify(-1), Status::Loss);
        assert_eq!(classify(i64::MIN), Status::Loss);
    }
}
