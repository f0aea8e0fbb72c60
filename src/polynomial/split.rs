//! Substitution `s = jω` into real polynomials.
//!
//! Powers of `j` repeat with period four (`1, j, -1, -j`), so `P(jω)` splits
//! into two real polynomials in `ω` by masking and sign-flipping coefficients
//! according to the power they multiply.

use num_complex::Complex64;

/// Split `P(jω)` into `(Re P(jω), Im P(jω))` as real polynomials in `ω`.
///
/// Both outputs have the same length as the input. Coefficients that do not
/// contribute to a part are zero.
///
/// # Example
/// ```
/// use loopmargin::polynomial::split_imaginary;
///
/// // s^2 + 3s + 2 at s = jω  ->  (2 - ω^2) + j(3ω)
/// let (re, im) = split_imaginary(&[1.0, 3.0, 2.0]);
/// assert_eq!(re, vec![-1.0, 0.0, 2.0]);
/// assert_eq!(im, vec![0.0, 3.0, 0.0]);
/// ```
pub fn split_imaginary(p: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let degree = p.len().saturating_sub(1);
    let mut real = vec![0.0; p.len()];
    let mut imag = vec![0.0; p.len()];

    for (i, &c) in p.iter().enumerate() {
        match (degree - i) % 4 {
            0 => real[i] = c,
            1 => imag[i] = c,
            2 => real[i] = -c,
            _ => imag[i] = -c,
        }
    }

    (real, imag)
}

/// Coefficients of `P(jω)` (or `P(-jω)` when `conjugate` is set) as a complex
/// polynomial in `ω`.
pub fn substitute_jw(p: &[f64], conjugate: bool) -> Vec<Complex64> {
    let degree = p.len().saturating_sub(1);
    let unit = if conjugate {
        Complex64::new(0.0, -1.0)
    } else {
        Complex64::new(0.0, 1.0)
    };

    p.iter()
        .enumerate()
        .map(|(i, &c)| unit.powu((degree - i) as u32) * c)
        .collect()
}
