// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Arithmetic mean over a sliding window, maintained with a running sum so the
// whole series costs O(N):
//
//   sum += close_t
//   sum -= close_{t-period}        (once the window is full)
//   SMA_t = sum / period           (for t >= period - 1)
// =============================================================================

/// Compute the SMA series for `values` over `period`.
///
/// The first output corresponds to input index `period - 1`, so the result
/// has `max(0, N - period + 1)` elements.
///
/// # Edge cases
/// - `period == 0` => empty vec
/// - `values.len() < period` => empty vec
pub fn calculate_sma(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let period_f = period as f64;
    let mut result = Vec::with_capacity(values.len() - period + 1);
    let mut sum = 0.0;

    for (i, &value) in values.iter().enumerate() {
        sum += value;
        if i >= period {
            sum -= values[i - period];
        }
        if i + 1 >= period {
            result.push(sum / period_f);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_known_values() {
        let sma = calculate_sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(sma, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn sma_period_zero() {
        assert!(calculate_sma(&[1.0, 2.0, 3.0], 0).is_empty());
    }

    #[test]
    fn sma_insufficient_data() {
        assert!(calculate_sma(&[1.0, 2.0], 3).is_empty());
        assert!(calculate_sma(&[], 1).is_empty());
    }

    #[test]
    fn sma_period_one_is_identity() {
        let values = vec![3.0, 1.0, 4.0, 1.0, 5.0];
        assert_eq!(calculate_sma(&values, 1), values);
    }

    #[test]
    fn sma_output_length() {
        let values: Vec<f64> = (0..50).map(|x| x as f64).collect();
        assert_eq!(calculate_sma(&values, 20).len(), 31);
        assert_eq!(calculate_sma(&values, 50).len(), 1);
    }
}
