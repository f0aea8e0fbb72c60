use num_complex::Complex64;

use crate::error::{MarginError, Result};
use crate::polynomial::ops::{evaluate_complex, trim_leading_zeros};
use crate::system::FrequencyEvaluator;

/// Rational transfer function matrix.
///
/// Each channel `(output, input)` is a ratio of real polynomials with
/// coefficients ordered highest degree first. Margin analysis only accepts
/// single-channel (SISO) systems; the matrix shape exists so that the
/// restriction is checked rather than assumed.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    num: Vec<Vec<Vec<f64>>>,
    den: Vec<Vec<Vec<f64>>>,
}

impl TransferFunction {
    /// Single-input single-output transfer function `num(s) / den(s)`
    ///
    /// # Example
    /// ```
    /// use loopmargin::system::TransferFunction;
    ///
    /// // 1 / (s^3 + 2s^2 + 3s + 4)
    /// let tf = TransferFunction::siso(vec![1.0], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert!(tf.is_siso());
    /// ```
    pub fn siso(num: Vec<f64>, den: Vec<f64>) -> Result<Self> {
        Self::mimo(vec![vec![num]], vec![vec![den]])
    }

    /// Transfer function matrix indexed `[output][input]`
    pub fn mimo(num: Vec<Vec<Vec<f64>>>, den: Vec<Vec<Vec<f64>>>) -> Result<Self> {
        let outputs = num.len();
        if outputs == 0 {
            return Err(MarginError::Conversion(
                "transfer function has no outputs".to_string(),
            ));
        }
        if den.len() != outputs {
            return Err(MarginError::ShapeMismatch {
                what: "denominator outputs",
                expected: outputs,
                actual: den.len(),
            });
        }

        let inputs = num[0].len();
        if inputs == 0 {
            return Err(MarginError::Conversion(
                "transfer function has no inputs".to_string(),
            ));
        }

        for (num_row, den_row) in num.iter().zip(&den) {
            if num_row.len() != inputs {
                return Err(MarginError::ShapeMismatch {
                    what: "numerator inputs",
                    expected: inputs,
                    actual: num_row.len(),
                });
            }
            if den_row.len() != inputs {
                return Err(MarginError::ShapeMismatch {
                    what: "denominator inputs",
                    expected: inputs,
                    actual: den_row.len(),
                });
            }
            for (n, d) in num_row.iter().zip(den_row) {
                check_finite(n, "numerator")?;
                check_finite(d, "denominator")?;
                if trim_leading_zeros(d).is_empty() {
                    return Err(MarginError::EmptyPolynomial("denominator"));
                }
            }
        }

        Ok(Self { num, den })
    }

    pub fn outputs(&self) -> usize {
        self.num.len()
    }

    pub fn inputs(&self) -> usize {
        self.num[0].len()
    }

    pub fn is_siso(&self) -> bool {
        self.outputs() == 1 && self.inputs() == 1
    }

    /// Numerator and denominator of channel `(output, input)`
    pub fn channel(&self, output: usize, input: usize) -> Option<(&[f64], &[f64])> {
        let num = self.num.get(output)?.get(input)?;
        let den = self.den.get(output)?.get(input)?;
        Some((num.as_slice(), den.as_slice()))
    }

    /// Numerator and denominator of the only channel, or `NotSiso`
    pub fn siso_channel(&self) -> Result<(&[f64], &[f64])> {
        if !self.is_siso() {
            return Err(MarginError::NotSiso {
                outputs: self.outputs(),
                inputs: self.inputs(),
            });
        }
        Ok((self.num[0][0].as_slice(), self.den[0][0].as_slice()))
    }

    /// `G(jω)` for channel `(0, 0)`
    pub fn response_at(&self, omega: f64) -> Complex64 {
        let s = Complex64::new(0.0, omega);
        evaluate_complex(&self.num[0][0], s) / evaluate_complex(&self.den[0][0], s)
    }
}

impl FrequencyEvaluator for TransferFunction {
    fn evaluate(&self, omega: f64) -> Result<Complex64> {
        self.siso_channel()?;
        Ok(self.response_at(omega))
    }
}

fn check_finite(values: &[f64], what: &'static str) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(MarginError::NonNumeric { what, index }),
        None => Ok(()),
    }
}
