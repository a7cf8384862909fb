//! Tests for quadratic least-squares fitting

#[cfg(test)]
mod tests {
    use shadow_haptics::math::regression::{QuadraticModel, SingularMatrixError};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // Tests an exact parabola is recovered
    // Verified by swapping the a and c coefficients in the result
    #[test]
    fn test_fit_exact_parabola() {
        let model = QuadraticModel::fit(&[1.0, 2.0, 3.0], &[1.0, 4.0, 9.0]).expect("fit");

        assert!(close(model.a, 1.0));
        assert!(close(model.b, 0.0));
        assert!(close(model.c, 0.0));
        assert!(close(model.predict(4.0), 16.0));
    }

    // Tests a noisy straight line fits with a negligible quadratic term
    // Verified by dropping the Σx⁴ term from the normal equations
    #[test]
    fn test_fit_overdetermined_line() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.0f64.mul_add(*x, 1.0)).collect();

        let model = QuadraticModel::fit(&xs, &ys).expect("fit");

        assert!(model.a.abs() < 1e-9);
        assert!(close(model.b, 2.0));
        assert!(close(model.c, 1.0));
    }

    // Tests too few or mismatched samples are rejected
    // Verified by lowering the sample minimum to two
    #[test]
    fn test_fit_underdetermined() {
        assert_eq!(
            QuadraticModel::fit(&[1.0, 2.0], &[1.0, 2.0]),
            Err(SingularMatrixError::Underdetermined { xs: 2, ys: 2 })
        );
        assert!(matches!(
            QuadraticModel::fit(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(SingularMatrixError::Underdetermined { .. })
        ));
    }

    // Tests repeated x values collapse a pivot
    // Verified by removing the pivot magnitude check
    #[test]
    fn test_fit_identical_x_is_singular() {
        let result = QuadraticModel::fit(&[2.0, 2.0, 2.0, 2.0], &[1.0, 3.0, 5.0, 7.0]);
        assert!(matches!(
            result,
            Err(SingularMatrixError::DegeneratePivot { .. })
        ));
    }

    // Tests prediction with fixed coefficients
    // Verified by evaluating a·x instead of a·x²
    #[test]
    fn test_predict() {
        let model = QuadraticModel::new(0.5, -1.0, 3.0);
        assert!(close(model.predict(0.0), 3.0));
        assert!(close(model.predict(2.0), 3.0));
        assert!(close(model.predict(-2.0), 7.0));
    }
}
