//! Sampled SISO frequency response with smooth interpolation.

use num_complex::Complex64;

use crate::constants::MIN_RESPONSE_SAMPLES;
use crate::error::{MarginError, Result};
use crate::system::FrequencyEvaluator;

/// Complex frequency response `G(jω)` sampled on a strictly increasing,
/// non-negative frequency grid.
///
/// Between grid points the response is interpolated with a natural cubic
/// spline through the real and imaginary parts, so the interpolant and its
/// slope are continuous. On grid points the stored samples are returned
/// unchanged. No extrapolation is performed.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyResponse {
    omega: Vec<f64>,
    response: Vec<Complex64>,
    curvature: Vec<Complex64>,
}

impl FrequencyResponse {
    /// Build from a frequency grid and complex samples
    ///
    /// # Errors
    /// * `ShapeMismatch` when the arrays differ in length
    /// * `NonNumeric` for NaN or infinite entries
    /// * `InvalidFrequencyGrid` for fewer than two points, negative or
    ///   non-increasing frequencies
    pub fn new(omega: Vec<f64>, response: Vec<Complex64>) -> Result<Self> {
        if response.len() != omega.len() {
            return Err(MarginError::ShapeMismatch {
                what: "frequency response",
                expected: omega.len(),
                actual: response.len(),
            });
        }
        if omega.len() < MIN_RESPONSE_SAMPLES {
            return Err(MarginError::InvalidFrequencyGrid(format!(
                "need at least {} samples, have {}",
                MIN_RESPONSE_SAMPLES,
                omega.len()
            )));
        }
        if let Some(index) = omega.iter().position(|w| !w.is_finite()) {
            return Err(MarginError::NonNumeric {
                what: "omega",
                index,
            });
        }
        if let Some(index) = response.iter().position(|g| !g.is_finite()) {
            return Err(MarginError::NonNumeric {
                what: "response",
                index,
            });
        }
        if omega[0] < 0.0 {
            return Err(MarginError::InvalidFrequencyGrid(format!(
                "negative frequency {}",
                omega[0]
            )));
        }
        if let Some(i) = omega.windows(2).position(|w| w[1] <= w[0]) {
            return Err(MarginError::InvalidFrequencyGrid(format!(
                "frequencies must be strictly increasing (index {}: {} then {})",
                i + 1,
                omega[i],
                omega[i + 1]
            )));
        }

        let curvature = natural_spline_curvature(&omega, &response);
        Ok(Self {
            omega,
            response,
            curvature,
        })
    }

    /// Build from Bode data: magnitude (absolute, not dB), phase in degrees
    /// and frequency, all of equal length.
    ///
    /// # Example
    /// ```
    /// use loopmargin::system::FrequencyResponse;
    ///
    /// let frd = FrequencyResponse::from_bode(&[2.0, 1.0], &[0.0, -90.0], &[1.0, 2.0]).unwrap();
    /// assert!((frd.response()[1].im + 1.0).abs() < 1e-12);
    /// ```
    pub fn from_bode(magnitude: &[f64], phase_degrees: &[f64], omega: &[f64]) -> Result<Self> {
        if phase_degrees.len() != magnitude.len() {
            return Err(MarginError::ShapeMismatch {
                what: "phase",
                expected: magnitude.len(),
                actual: phase_degrees.len(),
            });
        }
        if omega.len() != magnitude.len() {
            return Err(MarginError::ShapeMismatch {
                what: "omega",
                expected: magnitude.len(),
                actual: omega.len(),
            });
        }
        if let Some(index) = magnitude.iter().position(|m| !m.is_finite()) {
            return Err(MarginError::NonNumeric {
                what: "magnitude",
                index,
            });
        }
        if let Some(index) = phase_degrees.iter().position(|p| !p.is_finite()) {
            return Err(MarginError::NonNumeric {
                what: "phase",
                index,
            });
        }

        let response = magnitude
            .iter()
            .zip(phase_degrees)
            .map(|(&m, &p)| Complex64::from_polar(m, p.to_radians()))
            .collect();
        Self::new(omega.to_vec(), response)
    }

    /// Sample a frequency evaluator on the given grid
    pub fn sample<E>(system: &E, omega: Vec<f64>) -> Result<Self>
    where
        E: FrequencyEvaluator + ?Sized,
    {
        let response = omega
            .iter()
            .map(|&w| system.evaluate(w))
            .collect::<Result<Vec<_>>>()?;
        Self::new(omega, response)
    }

    pub fn omega(&self) -> &[f64] {
        &self.omega
    }

    pub fn response(&self) -> &[Complex64] {
        &self.response
    }

    pub fn len(&self) -> usize {
        self.omega.len()
    }

    pub fn is_empty(&self) -> bool {
        self.omega.is_empty()
    }

    /// Lowest and highest sampled frequency
    pub fn range(&self) -> (f64, f64) {
        (self.omega[0], self.omega[self.omega.len() - 1])
    }
}

impl FrequencyEvaluator for FrequencyResponse {
    fn evaluate(&self, omega: f64) -> Result<Complex64> {
        let (min, max) = self.range();
        if !(omega >= min && omega <= max) {
            return Err(MarginError::FrequencyOutOfRange { omega, min, max });
        }

        let hi = match self.omega.binary_search_by(|w| w.total_cmp(&omega)) {
            Ok(exact) => return Ok(self.response[exact]),
            Err(insert) => insert,
        };
        let lo = hi - 1;

        let h = self.omega[hi] - self.omega[lo];
        let a = (self.omega[hi] - omega) / h;
        let b = (omega - self.omega[lo]) / h;

        Ok(self.response[lo] * a
            + self.response[hi] * b
            + (self.curvature[lo] * (a * a * a - a) + self.curvature[hi] * (b * b * b - b))
                * (h * h / 6.0))
    }
}

/// Second derivatives of the natural cubic spline through `(x, y)`.
///
/// Real and imaginary parts are independent, so the tridiagonal sweep runs
/// on both at once.
fn natural_spline_curvature(x: &[f64], y: &[Complex64]) -> Vec<Complex64> {
    let n = x.len();
    let zero = Complex64::new(0.0, 0.0);
    let mut diag = vec![0.0; n];
    let mut rhs = vec![zero; n];

    for i in 1..n - 1 {
        let sig = (x[i] - x[i - 1]) / (x[i + 1] - x[i - 1]);
        let p = sig * diag[i - 1] + 2.0;
        diag[i] = (sig - 1.0) / p;
        let slope_change =
            (y[i + 1] - y[i]) / (x[i + 1] - x[i]) - (y[i] - y[i - 1]) / (x[i] - x[i - 1]);
        rhs[i] = (slope_change * (6.0 / (x[i + 1] - x[i - 1])) - rhs[i - 1] * sig) / p;
    }

    let mut curvature = vec![zero; n];
    for k in (0..n - 1).rev() {
        curvature[k] = curvature[k + 1] * diag[k] + rhs[k];
    }
    curvature
}
