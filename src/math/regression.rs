//! Quadratic least-squares regression
//!
//! Fits y = a·x² + b·x + c by solving the 3×3 normal equations with
//! Gauss-Jordan elimination. The pivot of each step is the diagonal entry;
//! rows are never swapped.

use crate::io::configuration::PIVOT_EPSILON;
use std::error::Error;
use std::fmt;

/// Number of unknown coefficients in a quadratic
const UNKNOWNS: usize = 3;

/// Error raised when the normal equations cannot be solved
#[derive(Debug, Clone, PartialEq)]
pub enum SingularMatrixError {
    /// Too few samples, or x and y sample counts differ
    Underdetermined {
        /// Number of x samples supplied
        xs: usize,
        /// Number of y samples supplied
        ys: usize,
    },
    /// A diagonal pivot collapsed to (near) zero during elimination
    DegeneratePivot {
        /// Elimination step that failed
        step: usize,
        /// Value of the rejected pivot
        pivot: f64,
    },
}

impl fmt::Display for SingularMatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Underdetermined { xs, ys } => write!(
                f,
                "Regression needs at least {UNKNOWNS} paired samples, got {xs} x and {ys} y values"
            ),
            Self::DegeneratePivot { step, pivot } => {
                write!(f, "Singular normal equations: pivot {pivot:e} at step {step}")
            }
        }
    }
}

impl Error for SingularMatrixError {}

/// Fitted quadratic y = a·x² + b·x + c
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticModel {
    /// Quadratic coefficient
    pub a: f64,
    /// Linear coefficient
    pub b: f64,
    /// Constant term
    pub c: f64,
}

impl QuadraticModel {
    /// Create a model from known coefficients
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Evaluate the quadratic at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.a.mul_add(x * x, self.b.mul_add(x, self.c))
    }

    /// Least-squares fit over paired samples
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `xs` and `ys` have different lengths or fewer than 3 entries
    /// - Any elimination pivot is smaller than `PIVOT_EPSILON` in magnitude,
    ///   which happens when the x values do not span three distinct points
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self, SingularMatrixError> {
        if xs.len() != ys.len() || xs.len() < UNKNOWNS {
            return Err(SingularMatrixError::Underdetermined {
                xs: xs.len(),
                ys: ys.len(),
            });
        }

        let mut matrix = normal_equations(xs, ys);

        for step in 0..UNKNOWNS {
            let pivot_row = matrix.get(step).copied().unwrap_or_default();
            let pivot = pivot_row.get(step).copied().unwrap_or_default();
            if pivot.abs() < PIVOT_EPSILON {
                return Err(SingularMatrixError::DegeneratePivot { step, pivot });
            }

            let normalized = pivot_row.map(|value| value / pivot);
            if let Some(row) = matrix.get_mut(step) {
                *row = normalized;
            }

            for (k, row) in matrix.iter_mut().enumerate() {
                if k == step {
                    continue;
                }
                let factor = row.get(step).copied().unwrap_or_default();
                for (cell, pivot_value) in row.iter_mut().zip(normalized.iter()).skip(step) {
                    *cell -= factor * pivot_value;
                }
            }
        }

        let solution = |row: usize| {
            matrix
                .get(row)
                .and_then(|r| r.get(UNKNOWNS))
                .copied()
                .unwrap_or_default()
        };

        Ok(Self {
            a: solution(2),
            b: solution(1),
            c: solution(0),
        })
    }
}

// Augmented matrix [Σxʲ⁺ⁱ | Σxⁱy] for i, j in 0..3
fn normal_equations(xs: &[f64], ys: &[f64]) -> [[f64; UNKNOWNS + 1]; UNKNOWNS] {
    let mut power_sums = [0.0; 2 * UNKNOWNS - 1];
    let mut moment_sums = [0.0; UNKNOWNS];

    for (&x, &y) in xs.iter().zip(ys) {
        let mut power = 1.0;
        for (index, sum) in power_sums.iter_mut().enumerate() {
            *sum += power;
            if let Some(moment) = moment_sums.get_mut(index) {
                *moment += power * y;
            }
            power *= x;
        }
    }

    let power = |i: usize| power_sums.get(i).copied().unwrap_or_default();
    let moment = |i: usize| moment_sums.get(i).copied().unwrap_or_default();

    [
        [power(0), power(1), power(2), moment(0)],
        [power(1), power(2), power(3), moment(1)],
        [power(2), power(3), power(4), moment(2)],
    ]
}
