/// Round to one decimal place, halves away from zero
#[inline]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Fold one more rating into a running mean
///
/// Incremental mean over the previous mean and count; review bodies are not
/// kept, so the history cannot be recomputed. The result is rounded on every
/// call, which means long sequences accumulate rounding drift relative to the
/// exact mean of all ratings. That drift is accepted.
#[inline]
pub fn combine(old_mean: f64, old_count: u32, new_rating: u8) -> f64 {
    let total = old_mean * f64::from(old_count) + f64::from(new_rating);
    let count = f64::from(old_count) + 1.0;

    round1(total / count)
}

/// Human-readable label for a star rating
pub fn rating_label(rating: u8) -> Option<&'static str> {
    match rating {
        1 => Some("Poor accessibility"),
        2 => Some("Limited accessibility"),
        3 => Some("Moderate accessibility"),
        4 => Some("Good accessibility"),
        5 => Some("Excellent accessibility"),
        _ => None,
    }
}

/// Label for a stored mean, rounded to the nearest star
pub fn mean_label(mean: f64) -> Option<&'static str> {
    if !(0.0..=5.0).contains(&mean) {
        return None;
    }
    rating_label(mean.round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round1_half_away_from_zero() {
        assert_eq!(round1(4.25), 4.3);
        assert_eq!(round1(4.24), 4.2);
        assert_eq!(round1(3.0), 3.0);
        assert_eq!(round1(10.0 / 3.0), 3.3);
    }

    #[test]
    fn test_first_rating_is_the_mean() {
        assert_eq!(combine(0.0, 0, 5), 5.0);
        assert_eq!(combine(0.0, 0, 1), 1.0);
    }

    #[test]
    fn test_combine_sequence() {
        let mut mean = 0.0;
        let mut count = 0;
        for rating in [5, 3] {
            mean = combine(mean, count, rating);
            count += 1;
        }
        assert_eq!(mean, 4.0);

        let mut mean = 0.0;
        let mut count = 0;
        for rating in [2, 4, 4] {
            mean = combine(mean, count, rating);
            count += 1;
        }
        assert_eq!(mean, 3.3);
    }

    #[test]
    fn test_rating_labels() {
        assert_eq!(rating_label(1), Some("Poor accessibility"));
        assert_eq!(rating_label(5), Some("Excellent accessibility"));
        assert_eq!(rating_label(0), None);
        assert_eq!(rating_label(6), None);
    }

    #[test]
    fn test_mean_labels() {
        assert_eq!(mean_label(4.8), Some("Excellent accessibility"));
        assert_eq!(mean_label(4.4), Some("Good accessibility"));
        assert_eq!(mean_label(0.0), None);
        assert_eq!(mean_label(f64::NAN), None);
    }
}
