//! Assertion helpers for metric tests

/// Default tolerance for floating-point comparisons
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Assert that two floating-point numbers are approximately equal
pub fn assert_approx_eq(actual: f64, expected: f64, tolerance: f64) {
  assert!(
    (actual - expected).abs() < tolerance,
    "Values not approximately equal:\n  actual:   {}\n  expected: {}\n  diff:     {}\n  tolerance: {}",
    actual,
    expected,
    (actual - expected).abs(),
    tolerance
  );
}

/// Assert that an optional metric is present and approximately equal to `expected`
pub fn assert_metric_eq(actual: Option<f64>, expected: f64) {
  match actual {
    Some(value) => assert_approx_eq(value, expected, 1e-8),
    None => panic!("Expected metric {} but found None", expected),
  }
}

/// Assert that a floating-point value is approximately zero
pub fn assert_approx_zero(value: f64) {
  assert_approx_eq(value, 0.0, DEFAULT_TOLERANCE);
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_metric_eq_accepts_close_values() {
    assert_metric_eq(Some(0.1 + 0.2), 0.3);
    assert_approx_zero(1e-12);
  }

  #[test]
  #[should_panic]
  fn test_metric_eq_rejects_none() {
    assert_metric_eq(None, 1.0);
  }
}
