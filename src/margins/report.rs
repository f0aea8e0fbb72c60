use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::margins::crossover::CandidateFrequencies;
use crate::system::FrequencyEvaluator;

/// Every margin at every crossover, each list ascending in frequency.
///
/// `gain_margins[i]` is measured at `phase_crossover_frequencies[i]`,
/// `phase_margins[i]` at `gain_crossover_frequencies[i]` and
/// `stability_margins[i]` at `stability_frequencies[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FullCrossoverSet {
    pub gain_margins: Vec<f64>,
    pub phase_margins: Vec<f64>,
    pub stability_margins: Vec<f64>,
    /// `w180`
    pub phase_crossover_frequencies: Vec<f64>,
    /// `wc`
    pub gain_crossover_frequencies: Vec<f64>,
    /// `wstab`
    pub stability_frequencies: Vec<f64>,
}

/// Worst-case margins. `None` means the crossover does not exist, which is
/// neither a zero nor an infinite margin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReducedMarginReport {
    /// Smallest `1 / |G|` over the phase crossovers
    pub gain_margin: Option<f64>,
    /// Smallest `∠G + 180°` over the gain crossovers, in degrees
    pub phase_margin: Option<f64>,
    /// Smallest `|G + 1|` over the Nyquist-distance minima
    pub stability_margin: Option<f64>,
    pub gain_margin_frequency: Option<f64>,
    pub phase_margin_frequency: Option<f64>,
    pub stability_margin_frequency: Option<f64>,
}

/// Margin result in the shape selected by [`crate::config::MarginMode`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Margins {
    Reduced(ReducedMarginReport),
    All(FullCrossoverSet),
}

/// Classic `(gm, pm, wcg, wcp)` quadruple
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ClassicMargins {
    pub gain_margin: Option<f64>,
    /// Degrees
    pub phase_margin: Option<f64>,
    /// Where |G| = 1 (phase margin is measured here)
    pub gain_crossover_frequency: Option<f64>,
    /// Where ∠G = −180° (gain margin is measured here)
    pub phase_crossover_frequency: Option<f64>,
}

impl FullCrossoverSet {
    /// Evaluate the response at each candidate and compute the margins
    pub fn from_candidates<E>(candidates: CandidateFrequencies, system: &E) -> Result<Self>
    where
        E: FrequencyEvaluator + ?Sized,
    {
        let gain_margins = candidates
            .phase
            .iter()
            .map(|&w| system.evaluate(w).map(|g| 1.0 / g.norm()))
            .collect::<Result<Vec<_>>>()?;
        let phase_margins = candidates
            .gain
            .iter()
            .map(|&w| system.evaluate(w).map(|g| g.arg().to_degrees() + 180.0))
            .collect::<Result<Vec<_>>>()?;
        let stability_margins = candidates
            .stability
            .iter()
            .map(|&w| system.evaluate(w).map(|g| (g + 1.0).norm()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            gain_margins,
            phase_margins,
            stability_margins,
            phase_crossover_frequencies: candidates.phase,
            gain_crossover_frequencies: candidates.gain,
            stability_frequencies: candidates.stability,
        })
    }

    /// Minimum of each margin and the first frequency where it occurs
    pub fn reduce(&self) -> ReducedMarginReport {
        let (gain_margin, gain_margin_frequency) =
            worst_case(&self.gain_margins, &self.phase_crossover_frequencies);
        let (phase_margin, phase_margin_frequency) =
            worst_case(&self.phase_margins, &self.gain_crossover_frequencies);
        let (stability_margin, stability_margin_frequency) =
            worst_case(&self.stability_margins, &self.stability_frequencies);

        ReducedMarginReport {
            gain_margin,
            phase_margin,
            stability_margin,
            gain_margin_frequency,
            phase_margin_frequency,
            stability_margin_frequency,
        }
    }
}

impl Margins {
    pub fn reduced(&self) -> ReducedMarginReport {
        match self {
            Self::Reduced(report) => *report,
            Self::All(set) => set.reduce(),
        }
    }
}

impl From<ReducedMarginReport> for ClassicMargins {
    fn from(report: ReducedMarginReport) -> Self {
        Self {
            gain_margin: report.gain_margin,
            phase_margin: report.phase_margin,
            gain_crossover_frequency: report.phase_margin_frequency,
            phase_crossover_frequency: report.gain_margin_frequency,
        }
    }
}

/// Smallest value (first on ties) and its frequency; `(None, None)` when empty
fn worst_case(values: &[f64], frequencies: &[f64]) -> (Option<f64>, Option<f64>) {
    // min_by keeps the first of equal elements
    let best = values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .min_by(|a, b| a.1.total_cmp(b.1));
    match best {
        Some((i, &v)) => (Some(v), frequencies.get(i).copied()),
        None => (None, None),
    }
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    value.map_or("-".to_string(), |v| format!("{:.*}", precision, v))
}

impl fmt::Display for ReducedMarginReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GM: {} at {} rad/s, PM: {}° at {} rad/s, SM: {} at {} rad/s",
            fmt_opt(self.gain_margin, 4),
            fmt_opt(self.gain_margin_frequency, 4),
            fmt_opt(self.phase_margin, 2),
            fmt_opt(self.phase_margin_frequency, 4),
            fmt_opt(self.stability_margin, 4),
            fmt_opt(self.stability_margin_frequency, 4),
        )
    }
}
