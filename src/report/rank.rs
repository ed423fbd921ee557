/// Direction a column is ranked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Largest value is 1st.
    Descending,
    /// Smallest value is 1st.
    Ascending,
}

/// Placeholder rank for regions without a value.
pub const NOT_AVAILABLE: &str = "N/A";

/// English ordinal for a positive rank: `1st`, `2nd`, `3rd`, `4th`, `11th`, `21st`, ...
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Competition ranking: tied values share the lowest rank and the next
/// distinct value skips ahead (`1, 2, 2, 4`). Missing values get `None`.
pub fn rank(values: &[Option<f64>], order: Order) -> Vec<Option<usize>> {
    values
        .iter()
        .map(|v| {
            let v = (*v)?;
            let ahead = values
                .iter()
                .flatten()
                .filter(|other| match order {
                    Order::Descending => **other > v,
                    Order::Ascending => **other < v,
                })
                .count();
            Some(ahead + 1)
        })
        .collect()
}

/// [`rank`] rendered as ordinals, with [`NOT_AVAILABLE`] for missing values.
pub fn ordinal_ranks(values: &[Option<f64>], order: Order) -> Vec<String> {
    rank(values, order)
        .into_iter()
        .map(|r| r.map(ordinal).unwrap_or_else(|| NOT_AVAILABLE.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_suffixes() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(13), "13th");
        assert_eq!(ordinal(21), "21st");
        assert_eq!(ordinal(22), "22nd");
        assert_eq!(ordinal(52), "52nd");
        assert_eq!(ordinal(111), "111th");
        assert_eq!(ordinal(101), "101st");
    }

    #[test]
    fn test_rank_descending_with_ties() {
        let values = [Some(10.0), Some(30.0), Some(20.0), Some(30.0)];
        assert_eq!(
            rank(&values, Order::Descending),
            vec![Some(4), Some(1), Some(3), Some(1)]
        );
    }

    #[test]
    fn test_rank_ascending_skips_missing() {
        let values = [Some(5.5), None, Some(2.1), Some(9.0)];
        assert_eq!(
            rank(&values, Order::Ascending),
            vec![Some(2), None, Some(1), Some(3)]
        );
    }

    #[test]
    fn test_ordinal_ranks() {
        let values = [Some(1.0), None, Some(3.0)];
        assert_eq!(
            ordinal_ranks(&values, Order::Descending),
            vec!["2nd", "N/A", "1st"]
        );
    }

    #[test]
    fn test_rank_consistent_with_values() {
        let values: Vec<Option<f64>> = [7.0, 3.0, 7.0, 1.0, 9.0, 3.0]
            .iter()
            .map(|v| Some(*v))
            .collect();
        let ranks = rank(&values, Order::Descending);

        for (i, a) in values.iter().enumerate() {
            for (j, b) in values.iter().enumerate() {
                if a > b {
                    assert!(ranks[i] < ranks[j]);
                } else if a == b {
                    assert_eq!(ranks[i], ranks[j]);
                }
            }
        }
    }
}
