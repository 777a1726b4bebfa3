use super::entity::Score;
use crate::domain::{DomainError, DomainResult};

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 5.0;

/// Rating value must be a finite number in 0..=5
pub fn validate_score(score: &Score) -> DomainResult<()> {
    if !score.value.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&score.value) {
        return Err(DomainError::InvariantViolation(format!(
            "Score must be between {} and {}, got {}",
            MIN_SCORE, MAX_SCORE, score.value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(validate_score(&Score::new(1, 1, 0.0)).is_ok());
        assert!(validate_score(&Score::new(1, 1, 5.0)).is_ok());
        assert!(validate_score(&Score::new(1, 1, 3.5)).is_ok());
    }

    #[test]
    fn test_out_of_range_fails() {
        assert!(validate_score(&Score::new(1, 1, -0.5)).is_err());
        assert!(validate_score(&Score::new(1, 1, 5.01)).is_err());
        assert!(validate_score(&Score::new(1, 1, f64::NAN)).is_err());
    }
}
