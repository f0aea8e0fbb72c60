use crate::config::MarginConfig;
use crate::error::Result;
use crate::margins::crossover::{
    CandidateFrequencies, CrossoverPolynomials, filter_gain_crossovers, filter_phase_crossovers,
    filter_stability_minima,
};
use crate::polynomial::real_roots;
use crate::system::TransferFunction;

/// Crossover frequencies of a SISO transfer function from the roots of its
/// crossover polynomials.
///
/// # Errors
/// * `NotSiso` for transfer function matrices
/// * `RootFinding` if the root iteration diverges
pub fn analytic_candidates(
    tf: &TransferFunction,
    config: &MarginConfig,
) -> Result<CandidateFrequencies> {
    let (num, den) = tf.siso_channel()?;
    let polys = CrossoverPolynomials::new(num, den);

    let phase_roots = real_roots(&polys.phase, &config.roots)?;
    let phase = filter_phase_crossovers(&phase_roots, config.epsilon, |w| tf.response_at(w));

    let gain_roots = real_roots(&polys.gain, &config.roots)?;
    let gain = filter_gain_crossovers(&gain_roots, config.epsilon);

    let stability_roots = real_roots(&polys.stability, &config.roots)?;
    let stability = filter_stability_minima(&stability_roots, config.epsilon, &polys.stability);

    log::debug!(
        "analytic crossovers: {} phase, {} gain, {} stability",
        phase.len(),
        gain.len(),
        stability.len()
    );

    Ok(CandidateFrequencies {
        phase,
        gain,
        stability,
    })
}
