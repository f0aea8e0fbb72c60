//! Arithmetic on dense polynomials.
//!
//! Coefficients are stored highest degree first: `[a_n, ..., a_1, a_0]`.
//! Sums and differences align on the constant term, so operands of different
//! lengths combine the way the polynomials themselves do.

use std::ops::{Add, Mul, Neg};

use num_complex::Complex64;

/// Strip leading (highest-degree) zero coefficients
pub fn trim_leading_zeros(p: &[f64]) -> &[f64] {
    let first = p.iter().position(|&c| c != 0.0).unwrap_or(p.len());
    &p[first..]
}

/// `a + b`
pub fn add<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: Copy + Default + Add<Output = T>,
{
    let len = a.len().max(b.len());
    let mut out = vec![T::default(); len];
    for (dst, &c) in out[len - a.len()..].iter_mut().zip(a) {
        *dst = *dst + c;
    }
    for (dst, &c) in out[len - b.len()..].iter_mut().zip(b) {
        *dst = *dst + c;
    }
    out
}

/// `a - b`
pub fn sub<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: Copy + Default + Add<Output = T> + Neg<Output = T>,
{
    let negated: Vec<T> = b.iter().map(|&c| -c).collect();
    add(a, &negated)
}

/// `a * b` by direct convolution
pub fn mul<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: Copy + Default + Add<Output = T> + Mul<Output = T>,
{
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![T::default(); a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            out[i + j] = out[i + j] + x * y;
        }
    }
    out
}

/// `p * p`
pub fn square(p: &[f64]) -> Vec<f64> {
    mul(p, p)
}

/// First derivative; constants differentiate to the empty polynomial
pub fn derivative(p: &[f64]) -> Vec<f64> {
    let degree = p.len().saturating_sub(1);
    p.iter()
        .take(degree)
        .enumerate()
        .map(|(i, &c)| c * (degree - i) as f64)
        .collect()
}

/// Evaluate at a real point (Horner)
pub fn evaluate(p: &[f64], x: f64) -> f64 {
    p.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Evaluate a real-coefficient polynomial at a complex point (Horner)
pub fn evaluate_complex(p: &[f64], z: Complex64) -> Complex64 {
    p.iter()
        .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * z + c)
}
