// src/threshold.rs - Threshold evaluation for alert samples
use crate::types::ThresholdMethod;
use serde::{Deserialize, Serialize};

/// Comparison configuration of an alert.
///
/// Samples and the level share one unsigned comparison domain. Physical
/// quantities are brought into it with [`Threshold::sample_from_physical`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threshold {
    /// Comparison operator
    pub method: ThresholdMethod,
    /// Reserved, carried but not interpreted
    #[serde(default)]
    pub format: u8,
    /// Comparison value
    pub level: u64,
}

impl Threshold {
    /// Create a threshold
    pub fn new(method: ThresholdMethod, format: u8, level: u64) -> Self {
        Self { method, format, level }
    }

    /// `true` if `sample` meets the alert condition.
    ///
    /// An `Unknown` method never matches.
    pub fn is_exceeded(&self, sample: u64) -> bool {
        match self.method {
            ThresholdMethod::Greater => sample > self.level,
            ThresholdMethod::Lower => sample < self.level,
            ThresholdMethod::Equal => sample == self.level,
            ThresholdMethod::Unknown(_) => false,
        }
    }

    /// Convert a physical reading into the comparison domain.
    ///
    /// `value` is divided by `resolution` and rounded to the nearest step.
    /// Returns `None` for NaN, negative or non-representable results instead of
    /// silently truncating them.
    ///
    /// ```rust
    /// use n2k_alert::Threshold;
    ///
    /// // 0.01 K resolution
    /// assert_eq!(Threshold::sample_from_physical(353.15, 0.01), Some(35315));
    /// assert_eq!(Threshold::sample_from_physical(-1.0, 0.01), None);
    /// ```
    pub fn sample_from_physical(value: f64, resolution: f64) -> Option<u64> {
        if !value.is_finite() || value < 0.0 || !resolution.is_finite() || resolution <= 0.0 {
            return None;
        }
        let steps = (value / resolution).round();
        // u64::MAX as f64 rounds up to 2^64, which is already out of range
        if steps < 0.0 || steps >= u64::MAX as f64 {
            return None;
        }
        Some(steps as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greater() {
        let threshold = Threshold::new(ThresholdMethod::Greater, 0, 60);
        assert!(threshold.is_exceeded(61));
        assert!(!threshold.is_exceeded(60));
        assert!(!threshold.is_exceeded(0));
    }

    #[test]
    fn test_lower() {
        let threshold = Threshold::new(ThresholdMethod::Lower, 0, 10);
        assert!(threshold.is_exceeded(9));
        assert!(!threshold.is_exceeded(10));
        assert!(!threshold.is_exceeded(u64::MAX));
    }

    #[test]
    fn test_equal() {
        let threshold = Threshold::new(ThresholdMethod::Equal, 0, 1);
        assert!(threshold.is_exceeded(1));
        assert!(!threshold.is_exceeded(2));
    }

    #[test]
    fn test_unknown_method_never_matches() {
        let threshold = Threshold::new(ThresholdMethod::Unknown(7), 0, 5);
        assert!(!threshold.is_exceeded(5));
        assert!(!threshold.is_exceeded(6));
    }

    #[test]
    fn test_sample_from_physical() {
        assert_eq!(Threshold::sample_from_physical(65.4, 1.0), Some(65));
        assert_eq!(Threshold::sample_from_physical(65.6, 1.0), Some(66));
        assert_eq!(Threshold::sample_from_physical(0.0, 0.1), Some(0));
        assert_eq!(Threshold::sample_from_physical(-0.4, 1.0), None);
        assert_eq!(Threshold::sample_from_physical(-0.0, 1.0), Some(0));
        assert_eq!(Threshold::sample_from_physical(-2.0, 1.0), None);
        assert_eq!(Threshold::sample_from_physical(f64::NAN, 1.0), None);
        assert_eq!(Threshold::sample_from_physical(1.0, 0.0), None);
        assert_eq!(Threshold::sample_from_physical(1e30, 1.0), None);
    }
}
