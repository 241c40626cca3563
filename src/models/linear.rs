//! Ordinary least squares linear regression
//!
//! Feature columns are centered (when fitting an intercept) and scaled to
//! unit norm, then the normal equations Z'Z γ = Z'y are solved with a
//! Cholesky factorization. Coefficients are mapped back to the original
//! units afterwards, so columns of very different magnitude are fitted
//! exactly. When Z'Z is singular (collinear or constant columns) the solve
//! falls back to pivoted Gauss-Jordan elimination with the free
//! coefficients set to zero, which still yields a least-squares fit.

use ndarray::{Array1, Array2, Axis};
use thiserror::Error;

/// Pivot tolerance, relative to the pivot column's own diagonal entry
const PIVOT_TOLERANCE: f64 = 1e-10;

/// A centered column whose norm falls below this fraction of its raw norm
/// is constant
const CONSTANT_TOLERANCE: f64 = 1e-10;

/// Errors that can occur during linear regression
#[derive(Error, Debug)]
pub enum LinearRegressionError {
    #[error("Matrix is singular and cannot be inverted")]
    SingularMatrix,

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Model has not been fitted yet")]
    NotFitted,

    #[error("Computation error: {0}")]
    ComputationError(String),
}

/// Linear Regression model using Ordinary Least Squares
#[derive(Debug, Clone)]
pub struct LinearRegression {
    /// Coefficients (weights) for each feature
    pub coefficients: Option<Array1<f64>>,
    /// Intercept (bias) term
    pub intercept: Option<f64>,
    /// Whether to fit an intercept
    fit_intercept: bool,
    /// R-squared on the training data
    pub r_squared: Option<f64>,
    /// Feature names
    pub feature_names: Option<Vec<String>>,
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new(true)
    }
}

impl LinearRegression {
    /// Create a new LinearRegression model
    ///
    /// # Arguments
    /// * `fit_intercept` - Whether to calculate the intercept
    pub fn new(fit_intercept: bool) -> Self {
        Self {
            coefficients: None,
            intercept: None,
            fit_intercept,
            r_squared: None,
            feature_names: None,
        }
    }

    /// Set feature names for interpretation
    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);
        self
    }

    /// Fit the model using Ordinary Least Squares
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), LinearRegressionError> {
        if x.nrows() != y.len() {
            return Err(LinearRegressionError::DimensionMismatch {
                expected: x.nrows(),
                got: y.len(),
            });
        }
        if x.nrows() == 0 {
            return Err(LinearRegressionError::ComputationError(
                "cannot fit on zero samples".to_string(),
            ));
        }

        let n_features = x.ncols();
        let means = if self.fit_intercept {
            x.mean_axis(Axis(0)).unwrap_or_else(|| Array1::zeros(n_features))
        } else {
            Array1::zeros(n_features)
        };
        let y_mean = if self.fit_intercept { y.mean().unwrap_or(0.0) } else { 0.0 };

        // Z = (X - mean) / norm, column by column; constant columns become zero
        let mut z = x - &means;
        let mut scales = Array1::<f64>::ones(n_features);
        for ((mut column, raw), scale) in z
            .columns_mut()
            .into_iter()
            .zip(x.columns())
            .zip(scales.iter_mut())
        {
            let norm = column.dot(&column).sqrt();
            let raw_norm = raw.dot(&raw).sqrt();
            if norm > CONSTANT_TOLERANCE * raw_norm {
                column /= norm;
                *scale = norm;
            } else {
                column.fill(0.0);
            }
        }
        let y_centered = y - y_mean;

        let zt = z.t();
        let ztz = zt.dot(&z);
        let zty = zt.dot(&y_centered);

        let gamma = solve_normal_equations(&ztz, &zty)?;
        let coefficients = &gamma / &scales;
        let intercept = y_mean - coefficients.dot(&means);
        if coefficients.iter().any(|b| !b.is_finite()) || !intercept.is_finite() {
            return Err(LinearRegressionError::SingularMatrix);
        }

        self.intercept = Some(intercept);
        self.coefficients = Some(coefficients);

        let predictions = self.predict(x)?;
        self.r_squared = Some(r_squared(y, &predictions));

        tracing::debug!(
            samples = x.nrows(),
            features = x.ncols(),
            r_squared = self.r_squared.unwrap_or_default(),
            "Fitted OLS model"
        );

        Ok(())
    }

    /// Make predictions
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, LinearRegressionError> {
        let coefficients = self
            .coefficients
            .as_ref()
            .ok_or(LinearRegressionError::NotFitted)?;
        let intercept = self.intercept.ok_or(LinearRegressionError::NotFitted)?;

        if x.ncols() != coefficients.len() {
            return Err(LinearRegressionError::DimensionMismatch {
                expected: coefficients.len(),
                got: x.ncols(),
            });
        }

        Ok(x.dot(coefficients) + intercept)
    }

    /// Get model summary
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str("Linear Regression Summary\n");
        s.push_str("=========================\n\n");

        if let Some(ref coef) = self.coefficients {
            s.push_str(&format!("Intercept: {:.6}\n\n", self.intercept.unwrap_or(0.0)));
            s.push_str("Coefficients:\n");

            if let Some(ref names) = self.feature_names {
                for (i, (name, &c)) in names.iter().zip(coef.iter()).enumerate() {
                    s.push_str(&format!("  {:3}. {:22}: {:>12.6}\n", i + 1, name, c));
                }
            } else {
                for (i, &c) in coef.iter().enumerate() {
                    s.push_str(&format!("  {:3}. Feature {:2}: {:>12.6}\n", i + 1, i, c));
                }
            }

            s.push_str(&format!("\nR-squared: {:.6}\n", self.r_squared.unwrap_or(0.0)));
        } else {
            s.push_str("Model not fitted yet.\n");
        }

        s
    }
}

/// R² = 1 - SS_res / SS_tot; a constant target that is fitted exactly gives 1
pub fn r_squared(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
    let y_mean = y_true.mean().unwrap_or(0.0);

    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p).powi(2))
        .sum();
    let ss_tot: f64 = y_true.iter().map(|&t| (t - y_mean).powi(2)).sum();

    if ss_tot < 1e-12 {
        return if ss_res < 1e-12 { 1.0 } else { 0.0 };
    }

    1.0 - ss_res / ss_tot
}

fn solve_normal_equations(
    xtx: &Array2<f64>,
    xty: &Array1<f64>,
) -> Result<Array1<f64>, LinearRegressionError> {
    match cholesky_solve(xtx, xty) {
        Ok(beta) => Ok(beta),
        Err(LinearRegressionError::SingularMatrix) => {
            tracing::debug!("Normal equations are singular, using pivoted elimination");
            gauss_jordan_solve(xtx, xty)
        }
        Err(e) => Err(e),
    }
}

fn pivot_tolerance(a: &Array2<f64>, col: usize) -> f64 {
    PIVOT_TOLERANCE * a[[col, col]].abs()
}

/// Solve A x = b for symmetric positive definite A
fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, LinearRegressionError> {
    let n = a.nrows();
    let mut l = Array2::<f64>::zeros((n, n));

    // A = L * L^T
    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            for k in 0..j {
                sum += l[[i, k]] * l[[j, k]];
            }

            if i == j {
                let diag = a[[i, i]] - sum;
                if diag <= pivot_tolerance(a, i) {
                    return Err(LinearRegressionError::SingularMatrix);
                }
                l[[i, j]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }

    // L * z = b
    let mut z = Array1::<f64>::zeros(n);
    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..i {
            sum += l[[i, j]] * z[j];
        }
        z[i] = (b[i] - sum) / l[[i, i]];
    }

    // L^T * x = z
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += l[[j, i]] * x[j];
        }
        x[i] = (z[i] - sum) / l[[i, i]];
    }

    Ok(x)
}

/// Gauss-Jordan elimination with partial pivoting; columns without a
/// usable pivot get a zero coefficient.
fn gauss_jordan_solve(
    a: &Array2<f64>,
    b: &Array1<f64>,
) -> Result<Array1<f64>, LinearRegressionError> {
    let n = a.nrows();
    let mut m = a.clone();
    let mut rhs = b.clone();
    let mut pivots: Vec<(usize, usize)> = Vec::with_capacity(n);
    let mut row = 0;

    for col in 0..n {
        if row == n {
            break;
        }

        let (pivot_row, pivot_abs) = (row..n)
            .map(|r| (r, m[[r, col]].abs()))
            .fold((row, 0.0_f64), |best, cur| if cur.1 > best.1 { cur } else { best });
        if pivot_abs <= pivot_tolerance(a, col) {
            continue;
        }

        if pivot_row != row {
            for c in 0..n {
                m.swap([pivot_row, c], [row, c]);
            }
            rhs.swap(pivot_row, row);
        }

        let pivot = m[[row, col]];
        for r in 0..n {
            if r == row {
                continue;
            }
            let factor = m[[r, col]] / pivot;
            if factor == 0.0 {
                continue;
            }
            for c in 0..n {
                m[[r, c]] -= factor * m[[row, c]];
            }
            rhs[r] -= factor * rhs[row];
        }

        pivots.push((row, col));
        row += 1;
    }

    let mut x = Array1::<f64>::zeros(n);
    for (r, c) in pivots {
        x[c] = rhs[r] / m[[r, c]];
    }
    Ok(x)
}
