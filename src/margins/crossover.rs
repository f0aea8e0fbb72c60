//! Crossover conditions as polynomials in ω, and the filters that turn their
//! roots into admissible crossover frequencies.
//!
//! With `N(jω) = Nr + j·Ni` and `D(jω) = Dr + j·Di`:
//!
//! * `|G| = 1`           ⇔ `Nr² + Ni² − Dr² − Di² = 0`
//! * `Im(N·conj(D)) = 0` ⇔ `Ni·Dr − Nr·Di = 0` (real-axis crossing)
//! * `d/dω |G + 1|² = 0` ⇔ `n'·d − n·d' = 0` with
//!   `n = (Nr + Dr)² + (Ni + Di)²` and `d = Dr² + Di²`

use std::fmt;

use num_complex::Complex64;
use serde::Serialize;

use crate::polynomial::ops::{add, derivative, evaluate, mul, square, sub};
use crate::polynomial::split_imaginary;

/// Condition a crossover frequency satisfies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverKind {
    /// Phase is −180°; gain margin is measured here
    Phase,
    /// |G| = 1; phase margin is measured here
    Gain,
    /// Local minimum of the Nyquist distance to −1
    Stability,
}

impl fmt::Display for CrossoverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Phase => write!(f, "phase crossover"),
            Self::Gain => write!(f, "gain crossover"),
            Self::Stability => write!(f, "stability minimum"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrossoverCandidate {
    pub frequency: f64,
    pub kind: CrossoverKind,
}

/// Candidate frequencies per condition, each ascending
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateFrequencies {
    /// `w180`: phase crossovers
    pub phase: Vec<f64>,
    /// `wc`: gain crossovers
    pub gain: Vec<f64>,
    /// `wstab`: Nyquist-distance minima
    pub stability: Vec<f64>,
}

impl CandidateFrequencies {
    pub fn is_empty(&self) -> bool {
        self.phase.is_empty() && self.gain.is_empty() && self.stability.is_empty()
    }

    /// Every candidate, tagged with its condition and sorted by frequency
    pub fn candidates(&self) -> Vec<CrossoverCandidate> {
        let tag = |freqs: &[f64], kind: CrossoverKind| {
            freqs
                .iter()
                .map(move |&frequency| CrossoverCandidate { frequency, kind })
                .collect::<Vec<_>>()
        };

        let mut all = tag(&self.phase, CrossoverKind::Phase);
        all.extend(tag(&self.gain, CrossoverKind::Gain));
        all.extend(tag(&self.stability, CrossoverKind::Stability));
        all.sort_by(|a, b| a.frequency.total_cmp(&b.frequency));
        all
    }
}

/// The three crossover-condition polynomials of a rational `G = N / D`
#[derive(Debug, Clone, PartialEq)]
pub struct CrossoverPolynomials {
    /// Roots are gain crossovers
    pub gain: Vec<f64>,
    /// Roots are real-axis crossings (both 0° and −180°)
    pub phase: Vec<f64>,
    /// Roots are stationary points of `|G(jω) + 1|²`
    pub stability: Vec<f64>,
}

impl CrossoverPolynomials {
    pub fn new(num: &[f64], den: &[f64]) -> Self {
        let (nr, ni) = split_imaginary(num);
        let (dr, di) = split_imaginary(den);

        let gain = sub(&add(&square(&nr), &square(&ni)), &add(&square(&dr), &square(&di)));
        let phase = sub(&mul(&ni, &dr), &mul(&nr, &di));

        let distance_den = add(&square(&dr), &square(&di));
        let distance_num = add(&square(&add(&nr, &dr)), &square(&add(&ni, &di)));
        let stability = sub(
            &mul(&derivative(&distance_num), &distance_den),
            &mul(&derivative(&distance_den), &distance_num),
        );

        Self {
            gain,
            phase,
            stability,
        }
    }
}

/// Gain crossovers: `ω > epsilon`, ascending
pub fn filter_gain_crossovers(roots: &[f64], epsilon: f64) -> Vec<f64> {
    let mut kept: Vec<f64> = roots.iter().copied().filter(|&w| w > epsilon).collect();
    kept.sort_by(f64::total_cmp);
    kept
}

/// Phase crossovers: `ω >= epsilon` and the response on the negative real
/// axis (drops the 0° crossings that share the polynomial), ascending
pub fn filter_phase_crossovers<F>(roots: &[f64], epsilon: f64, response: F) -> Vec<f64>
where
    F: Fn(f64) -> Complex64,
{
    let mut kept: Vec<f64> = roots
        .iter()
        .copied()
        .filter(|&w| w >= epsilon)
        .filter(|&w| response(w).re < 0.0)
        .collect();
    kept.sort_by(f64::total_cmp);
    kept
}

/// Nyquist-distance minima: non-negative roots where the stationarity
/// polynomial is rising (a minimum of `|G + 1|²`, not a maximum), with
/// `ω > epsilon`, ascending
pub fn filter_stability_minima(roots: &[f64], epsilon: f64, stability: &[f64]) -> Vec<f64> {
    let slope = derivative(stability);
    let mut kept: Vec<f64> = roots
        .iter()
        .copied()
        .filter(|&w| w >= 0.0)
        .filter(|&w| evaluate(&slope, w) > 0.0)
        .filter(|&w| w > epsilon)
        .collect();
    kept.sort_by(f64::total_cmp);
    kept
}
