//! Scoring a predicted spread direction against an observed one.

/// Signed and absolute error between two spread bearings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularError {
    /// `predicted - expected`, in degrees. Not wrapped to ±180.
    pub error_deg: f64,
    /// Magnitude of `error_deg`.
    pub abs_error_deg: f64,
}

/// Compares a predicted spread bearing to the expected one.
#[must_use]
pub fn angular_error(predicted_deg: f64, expected_deg: f64) -> AngularError {
    let error_deg = predicted_deg - expected_deg;
    AngularError {
        error_deg,
        abs_error_deg: error_deg.abs(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_and_absolute() {
        let e = angular_error(40.0, 45.0);
        assert!((e.error_deg - -5.0).abs() < f64::EPSILON);
        assert!((e.abs_error_deg - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn does_not_wrap_across_north() {
        let e = angular_error(350.0, 10.0);
        assert!((e.error_deg - 340.0).abs() < f64::EPSILON);
    }
}
