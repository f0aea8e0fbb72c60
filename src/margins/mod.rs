//! Gain, phase and stability margins of SISO loops.
//!
//! Rational systems go through the polynomial crossover conditions in
//! [`analytic`]; sampled responses are bracketed on their grid in
//! [`sampled`]. Both produce [`CandidateFrequencies`] that [`report`] turns
//! into margins.

pub mod analytic;
pub mod crossover;
pub mod phase_crossover;
pub mod report;
pub mod sampled;

pub use analytic::analytic_candidates;
pub use crossover::{CandidateFrequencies, CrossoverCandidate, CrossoverKind, CrossoverPolynomials};
pub use phase_crossover::{PhaseCrossovers, phase_crossover_frequencies};
pub use report::{ClassicMargins, FullCrossoverSet, Margins, ReducedMarginReport};
pub use sampled::sampled_candidates;

use crate::config::{MarginConfig, MarginMode};
use crate::error::Result;
use crate::system::{MarginArgument, SystemData};

/// Candidate crossover frequencies for either representation
pub fn crossover_candidates(
    system: &SystemData,
    config: &MarginConfig,
) -> Result<CandidateFrequencies> {
    match system {
        SystemData::Rational(tf) => analytic_candidates(tf, config),
        SystemData::Sampled(frd) => Ok(sampled_candidates(frd, config)),
    }
}

/// Every margin at every crossover
pub fn stability_margins_all(
    system: &SystemData,
    config: &MarginConfig,
) -> Result<FullCrossoverSet> {
    config.validate()?;
    let candidates = crossover_candidates(system, config)?;
    log::debug!(
        "{}: {} candidate frequencies",
        system.kind(),
        candidates.candidates().len()
    );
    FullCrossoverSet::from_candidates(candidates, system)
}

/// Worst-case gain, phase and stability margins
pub fn stability_margins_reduced(
    system: &SystemData,
    config: &MarginConfig,
) -> Result<ReducedMarginReport> {
    Ok(stability_margins_all(system, config)?.reduce())
}

/// Margins in the shape selected by `config.mode`
///
/// # Example
/// ```
/// use loopmargin::config::MarginConfig;
/// use loopmargin::margins::stability_margins;
/// use loopmargin::system::{SystemData, TransferFunction};
///
/// let tf = TransferFunction::siso(vec![2.0], vec![1.0, 3.0, 2.0, 0.0]).unwrap();
/// let margins = stability_margins(&SystemData::from(tf), &MarginConfig::default()).unwrap();
/// let gm = margins.reduced().gain_margin.unwrap();
/// assert!((gm - 3.0).abs() < 1e-9);
/// ```
pub fn stability_margins(system: &SystemData, config: &MarginConfig) -> Result<Margins> {
    let all = stability_margins_all(system, config)?;
    Ok(match config.mode {
        MarginMode::Reduced => Margins::Reduced(all.reduce()),
        MarginMode::All => Margins::All(all),
    })
}

/// Classic gain and phase margins with their crossover frequencies.
///
/// Accepts a single system, or the three arrays magnitude (absolute),
/// phase (degrees) and frequency (rad/s).
///
/// # Errors
/// * `InvalidArity` for anything other than 1 or 3 arguments
/// * `Conversion` when the arguments cannot form a system
/// * `NotSiso` for transfer function matrices
pub fn margin(args: &[MarginArgument]) -> Result<ClassicMargins> {
    let system = SystemData::try_from(args)?;
    let report = stability_margins_reduced(&system, &MarginConfig::default())?;
    Ok(report.into())
}
