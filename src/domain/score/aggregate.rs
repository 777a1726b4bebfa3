/// Movie aggregate derived from the full set of a movie's score values.
///
/// Always recomputed from source rows rather than adjusted incrementally, so
/// a revised rating replaces its old contribution exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreAggregate {
    pub mean: f64,
    pub count: i32,
}

impl ScoreAggregate {
    pub const EMPTY: ScoreAggregate = ScoreAggregate {
        mean: 0.0,
        count: 0,
    };

    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::EMPTY;
        }

        let sum: f64 = values.iter().sum();
        Self {
            mean: sum / values.len() as f64,
            count: values.len() as i32,
        }
    }
}
