//! Polynomial roots by simultaneous (Aberth-Ehrlich) iteration.
//!
//! Every root estimate is refined at once with a Newton step corrected by
//! the repulsion of the other estimates. Unlike shifted QR on a companion
//! matrix, this has no trouble with roots of equal modulus (`±r`, `±jr`),
//! which the crossover polynomials have by construction.

use std::f64::consts::TAU;

use num_complex::Complex64;

use crate::config::RootConfig;
use crate::error::{MarginError, Result};
use crate::polynomial::ops::trim_leading_zeros;

/// Offset (in fractions of a sector) of the starting estimates, so that they
/// are not symmetric about the real axis.
const START_ANGLE_OFFSET: f64 = 0.3;

/// An estimate has converged once `|p(z)|` is within rounding error of the
/// evaluation, i.e. `|p(z)| <= BACKWARD_ERROR * (n + 1) * Σ |a_k| |z|^k`.
const BACKWARD_ERROR: f64 = 4.0 * f64::EPSILON;

/// All complex roots of `p` (highest degree first).
///
/// Leading zeros are ignored and trailing zeros contribute roots at exactly
/// zero. Constant and all-zero polynomials have no roots. Roots are returned
/// with multiplicity, in no particular order.
///
/// # Errors
/// `RootFinding` when the iteration produces non-finite estimates.
pub fn roots(p: &[f64], config: &RootConfig) -> Result<Vec<Complex64>> {
    let p = trim_leading_zeros(p);
    if p.is_empty() {
        return Ok(Vec::new());
    }

    let trailing = p.iter().rev().take_while(|&&c| c == 0.0).count();
    let reduced = &p[..p.len() - trailing];
    let mut found = vec![Complex64::new(0.0, 0.0); trailing];

    match reduced.len() - 1 {
        0 => {}
        1 => found.push(Complex64::new(-reduced[1] / reduced[0], 0.0)),
        2 => found.extend(quadratic(reduced[0], reduced[1], reduced[2])),
        _ => found.extend(aberth(reduced, config.max_iterations)?),
    }

    Ok(found)
}

/// Real roots of `p`, accepting roots whose imaginary part is negligible
/// relative to their magnitude.
///
/// Polynomials that are even or odd in their variable are solved in the
/// square of the variable, halving the degree; each positive root `x` then
/// gives the pair `±√x` exactly.
pub fn real_roots(p: &[f64], config: &RootConfig) -> Result<Vec<f64>> {
    let p = trim_leading_zeros(p);

    let found = match squared_variable(p) {
        Some((q, odd)) => {
            let mut found: Vec<f64> = if odd { vec![0.0] } else { Vec::new() };
            for x in real_parts(roots(&q, config)?, config.imaginary_tolerance) {
                if x > 0.0 {
                    let w = x.sqrt();
                    found.extend([w, -w]);
                } else if x == 0.0 {
                    found.extend([0.0, 0.0]);
                }
            }
            found
        }
        None => real_parts(roots(p, config)?, config.imaginary_tolerance),
    };

    log::trace!("polynomial of length {} has real roots {:?}", p.len(), found);
    Ok(found)
}

fn real_parts(all: Vec<Complex64>, tolerance: f64) -> Vec<f64> {
    all.into_iter()
        .filter(|z| z.im.abs() <= tolerance * z.norm().max(1.0))
        .map(|z| z.re)
        .collect()
}

/// For `p(ω) = q(ω²)` returns `(q, false)`; for `p(ω) = ω·q(ω²)` returns
/// `(q, true)`. `None` when `p` mixes even and odd powers.
fn squared_variable(p: &[f64]) -> Option<(Vec<f64>, bool)> {
    if p.len() < 2 {
        return None;
    }
    // p[i] multiplies ω^(len - 1 - i); p[1], p[3], ... are the opposite
    // parity to the leading term
    let mixed = p.iter().skip(1).step_by(2).any(|&c| c != 0.0);
    if mixed {
        return None;
    }

    let odd = (p.len() - 1) % 2 == 1;
    let q = p.iter().step_by(2).copied().collect();
    Some((q, odd))
}

/// Roots of `a x² + b x + c` without cancellation; `a` and `c` are nonzero
fn quadratic(a: f64, b: f64, c: f64) -> [Complex64; 2] {
    let disc = b * b - 4.0 * a * c;
    if disc >= 0.0 {
        let q = -0.5 * (b + b.signum() * disc.sqrt());
        [Complex64::new(q / a, 0.0), Complex64::new(c / q, 0.0)]
    } else {
        let re = -b / (2.0 * a);
        let im = (-disc).sqrt() / (2.0 * a.abs());
        [Complex64::new(re, im), Complex64::new(re, -im)]
    }
}

/// `(p(z), p'(z), Σ |a_k| |z|^k)` by Horner's rule
fn evaluate_with_bound(p: &[f64], z: Complex64) -> (Complex64, Complex64, f64) {
    let modulus = z.norm();
    let mut value = Complex64::new(0.0, 0.0);
    let mut slope = Complex64::new(0.0, 0.0);
    let mut bound = 0.0;
    for &c in p {
        slope = slope * z + value;
        value = value * z + c;
        bound = bound * modulus + c.abs();
    }
    (value, slope, bound)
}

/// Aberth-Ehrlich iteration on `p` with nonzero leading and constant terms.
///
/// Estimates start on the circle whose radius is the geometric mean of the
/// root moduli. Converged estimates are frozen. When the sweep cap is reached
/// the current estimates are returned as they are.
fn aberth(p: &[f64], max_iterations: usize) -> Result<Vec<Complex64>> {
    let n = p.len() - 1;
    let radius = (p[n].abs() / p[0].abs()).powf(1.0 / n as f64);
    let mut z: Vec<Complex64> = (0..n)
        .map(|k| Complex64::from_polar(radius, TAU * (k as f64 + START_ANGLE_OFFSET) / n as f64))
        .collect();
    let mut converged = vec![false; n];
    let tolerance = BACKWARD_ERROR * (n + 1) as f64;

    for sweep in 0..max_iterations {
        let mut done = true;
        for i in 0..n {
            if converged[i] {
                continue;
            }
            let (value, slope, bound) = evaluate_with_bound(p, z[i]);
            if value.norm() <= tolerance * bound {
                converged[i] = true;
                continue;
            }
            done = false;

            let newton = value / slope;
            let repulsion: Complex64 = (0..n)
                .filter(|&j| j != i)
                .map(|j| (z[i] - z[j]).inv())
                .sum();
            z[i] -= newton / (1.0 - newton * repulsion);
        }

        if z.iter().any(|r| !r.is_finite()) {
            return Err(MarginError::RootFinding(format!(
                "non-finite estimate for a polynomial of degree {} after {} sweeps",
                n,
                sweep + 1
            )));
        }
        if done {
            return Ok(z);
        }
    }

    log::debug!(
        "root iteration for degree {} stopped after {} sweeps with {} of {} converged",
        n,
        max_iterations,
        converged.iter().filter(|&&c| c).count(),
        n
    );
    Ok(z)
}
