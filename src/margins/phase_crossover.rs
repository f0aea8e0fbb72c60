use num_complex::Complex64;
use serde::Serialize;

use crate::config::RootConfig;
use crate::error::{MarginError, Result};
use crate::polynomial::ops::mul;
use crate::polynomial::{real_roots, substitute_jw};
use crate::system::TransferFunction;

/// Real-axis crossings of a Nyquist curve
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PhaseCrossovers {
    /// Non-negative, ascending, without repeats; includes `ω = 0` when the
    /// curve starts there. Poles on the imaginary axis (an integrator at
    /// `ω = 0`) are not crossings and never appear.
    pub frequencies: Vec<f64>,
    /// `G(jω)` at each frequency (real by construction)
    pub gains: Vec<f64>,
}

impl PhaseCrossovers {
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// `(frequency, gain)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.frequencies.iter().copied().zip(self.gains.iter().copied())
    }
}

/// Every frequency where `G(jω)` is real, at either phase.
///
/// `Im(N(jω) · D(−jω))` vanishes exactly where `G(jω)` is real, so its
/// non-negative real roots are the crossings. No epsilon filter is applied.
/// Repeated roots are reported once and roots where `G(jω)` is not finite
/// are dropped.
///
/// Only channel `(0, 0)` of a transfer function matrix is analysed.
///
/// # Example
/// ```
/// use loopmargin::config::RootConfig;
/// use loopmargin::margins::phase_crossover_frequencies;
/// use loopmargin::system::TransferFunction;
///
/// let tf = TransferFunction::siso(vec![1.0], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let crossings = phase_crossover_frequencies(&tf, &RootConfig::default()).unwrap();
/// assert_eq!(crossings.len(), 2);
/// assert!((crossings.gains[1] + 0.5).abs() < 1e-9);
/// ```
pub fn phase_crossover_frequencies(
    tf: &TransferFunction,
    config: &RootConfig,
) -> Result<PhaseCrossovers> {
    if !tf.is_siso() {
        log::warn!(
            "phase crossovers of a {}x{} system use channel (0, 0) only",
            tf.outputs(),
            tf.inputs()
        );
    }
    let (num, den) = tf.channel(0, 0).ok_or(MarginError::NotSiso {
        outputs: tf.outputs(),
        inputs: tf.inputs(),
    })?;

    let product: Vec<Complex64> = mul(&substitute_jw(num, false), &substitute_jw(den, true));
    let imaginary: Vec<f64> = product.iter().map(|c| c.im).collect();

    let mut roots: Vec<f64> = real_roots(&imaginary, config)?
        .into_iter()
        .filter(|&w| w >= 0.0)
        .collect();
    roots.sort_by(f64::total_cmp);
    roots.dedup();

    let mut crossings = PhaseCrossovers::default();
    for w in roots {
        let g = tf.response_at(w);
        if !g.is_finite() {
            log::debug!("skipping imaginary-axis pole at {} rad/s", w);
            continue;
        }
        crossings.frequencies.push(w);
        crossings.gains.push(g.re);
    }

    Ok(crossings)
}
