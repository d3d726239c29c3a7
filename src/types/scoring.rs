pub type Score = f64;
pub type Rank = f64;

pub type EventId = u32;
pub type ContestantId = u32;
pub type JudgeId = u32;
pub type CriterionId = u32;

/// Sum of score-like values. An empty input is `0.0`, never `-0.0`.
pub fn total(values: impl IntoIterator<Item = f64>) -> f64 {
    values.into_iter().fold(0.0, |acc, value| acc + value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_total_is_positive_zero() {
        let sum = total(std::iter::empty());
        assert_eq!(sum, 0.0);
        assert!(sum.is_sign_positive());
        assert_eq!(format!("{:.2}", sum), "0.00");
    }

    #[test]
    fn total_adds_every_value() {
        assert_eq!(total([45.5, 30.0, 4.5]), 80.0);
    }
}
