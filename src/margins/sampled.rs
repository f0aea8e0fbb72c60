//! Crossover detection on sampled frequency responses.
//!
//! Brackets are found from sign changes between adjacent grid samples and
//! then refined on the interpolated response. Crossovers that fall between
//! samples without a sign change (grid too coarse) are not found; the grid is
//! used as given.

use crate::config::MarginConfig;
use crate::constants::SAMPLE_SIGN_TOLERANCE;
use crate::margins::crossover::CandidateFrequencies;
use crate::solver::{brentq, minimize_bracketed};
use crate::system::{FrequencyEvaluator, FrequencyResponse};

/// Crossover frequencies of a sampled response.
///
/// A bracket whose refinement fails is skipped, never reported as an error.
pub fn sampled_candidates(frd: &FrequencyResponse, config: &MarginConfig) -> CandidateFrequencies {
    let omega = frd.omega();
    let samples = frd.response();

    let gain_error = |w: f64| frd.evaluate(w).map_or(f64::NAN, |g| g.norm() - 1.0);
    let phase_error = |w: f64| frd.evaluate(w).map_or(f64::NAN, |g| (-g).arg());
    let distance = |w: f64| frd.evaluate(w).map_or(f64::NAN, |g| (g + 1.0).norm());

    let gain_values: Vec<f64> = samples.iter().map(|g| g.norm() - 1.0).collect();
    let gain = refine_roots(
        &sign_changes(&gain_values),
        omega,
        gain_error,
        config,
        "gain",
    );

    let phase_values: Vec<f64> = samples.iter().map(|g| (-*g).arg()).collect();
    let phase_brackets: Vec<usize> = sign_changes(&phase_values)
        .into_iter()
        .filter(|&i| samples[i].re <= 0.0)
        .collect();
    let phase = refine_roots(&phase_brackets, omega, phase_error, config, "phase");

    let distances: Vec<f64> = samples.iter().map(|g| (*g + 1.0).norm()).collect();
    let mut stability: Vec<f64> = local_minima(&distances)
        .into_iter()
        .filter_map(|k| {
            let bracket = (omega[k - 1], omega[k], omega[k + 1]);
            let found = minimize_bracketed(&distance, bracket, &config.solver);
            if found.is_none() {
                log::debug!("stability bracket around {} did not converge", omega[k]);
            }
            found
        })
        .filter(|&w| w > config.epsilon)
        .collect();
    stability.sort_by(f64::total_cmp);
    stability.dedup();

    log::debug!(
        "sampled crossovers over {} points: {} phase, {} gain, {} stability",
        omega.len(),
        phase.len(),
        gain.len(),
        stability.len()
    );

    CandidateFrequencies {
        phase,
        gain,
        stability,
    }
}

/// `sign(x)` with zero kept distinct from both signs. Values within
/// [`SAMPLE_SIGN_TOLERANCE`] of zero are zero.
fn sign(x: f64) -> i8 {
    if x > SAMPLE_SIGN_TOLERANCE {
        1
    } else if x < -SAMPLE_SIGN_TOLERANCE {
        -1
    } else {
        0
    }
}

/// Indices `i` where the sign of `values[i]` differs from `values[i + 1]`
fn sign_changes(values: &[f64]) -> Vec<usize> {
    values
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| sign(pair[0]) != sign(pair[1]))
        .map(|(i, _)| i)
        .collect()
}

/// Interior indices `k` where the sequence stops falling and starts rising
fn local_minima(values: &[f64]) -> Vec<usize> {
    (1..values.len().saturating_sub(1))
        .filter(|&k| values[k] - values[k - 1] < 0.0 && values[k + 1] - values[k] >= 0.0)
        .collect()
}

fn refine_roots<F>(
    brackets: &[usize],
    omega: &[f64],
    f: F,
    config: &MarginConfig,
    what: &str,
) -> Vec<f64>
where
    F: Fn(f64) -> f64,
{
    let mut found: Vec<f64> = brackets
        .iter()
        .filter(|&&i| i + 1 < omega.len())
        .filter_map(|&i| {
            let root = brentq(&f, omega[i], omega[i + 1], &config.solver);
            if root.is_none() {
                log::debug!(
                    "{} bracket [{}, {}] did not converge",
                    what,
                    omega[i],
                    omega[i + 1]
                );
            }
            root
        })
        .filter(|&w| w > config.epsilon)
        .collect();
    found.sort_by(f64::total_cmp);
    found.dedup();
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn logspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 10f64.powf(start + (stop - start) * i as f64 / (n - 1) as f64))
            .collect()
    }

    fn sampled(num: &[f64], den: &[f64], omega: Vec<f64>) -> FrequencyResponse {
        let tf = crate::system::TransferFunction::siso(num.to_vec(), den.to_vec()).unwrap();
        FrequencyResponse::sample(&tf, omega).unwrap()
    }

    #[test]
    fn test_sign_changes_counts_zero_as_change() {
        assert_eq!(sign_changes(&[1.0, 0.5, -0.5, -1.0]), vec![1]);
        assert_eq!(sign_changes(&[1.0, 0.0, -1.0]), vec![0, 1]);
        assert!(sign_changes(&[1.0]).is_empty());
    }

    #[test]
    fn test_rounding_noise_has_no_sign() {
        assert!(sign_changes(&[1e-16, -2e-16, 0.0, 3e-16, -1e-16]).is_empty());
        assert_eq!(sign_changes(&[-1e-16, 1e-6]), vec![0]);
    }

    #[test]
    fn test_all_pass_has_no_gain_crossovers() {
        // |(1 − jω)/(1 + jω)| = 1 at every sample up to rounding
        let frd = sampled(&[-1.0, 1.0], &[1.0, 1.0], logspace(-2.0, 2.0, 400));
        let c = sampled_candidates(&frd, &MarginConfig::default());
        assert!(c.gain.is_empty());
        assert!(c.stability.is_empty());
    }

    #[test]
    fn test_local_minima_skip_endpoints() {
        assert_eq!(local_minima(&[3.0, 2.0, 1.0, 2.0, 0.5]), vec![2]);
        assert!(local_minima(&[1.0, 2.0, 3.0]).is_empty());
        assert!(local_minima(&[3.0, 2.0, 1.0]).is_empty());
    }

    #[test]
    fn test_third_order_type_one() {
        let frd = sampled(&[2.0], &[1.0, 3.0, 2.0, 0.0], logspace(-2.0, 2.0, 400));
        let c = sampled_candidates(&frd, &MarginConfig::default());

        assert_eq!(c.phase.len(), 1);
        assert!((c.phase[0] - 2.0_f64.sqrt()).abs() < 1e-4);
        assert_eq!(c.gain.len(), 1);
        assert_eq!(c.stability.len(), 1);
    }

    #[test]
    fn test_positive_real_axis_crossing_excluded() {
        // Response rotates through 0° (positive real axis) only
        let omega = vec![1.0, 2.0, 3.0, 4.0];
        let response = vec![
            Complex64::new(0.5, 0.4),
            Complex64::new(0.5, 0.1),
            Complex64::new(0.5, -0.1),
            Complex64::new(0.5, -0.4),
        ];
        let frd = FrequencyResponse::new(omega, response).unwrap();
        let c = sampled_candidates(&frd, &MarginConfig::default());
        assert!(c.phase.is_empty());
        assert!(c.gain.is_empty());
    }

    #[test]
    fn test_constant_response_has_no_candidates() {
        let omega = logspace(-1.0, 1.0, 50);
        let response = vec![Complex64::new(2.0, 0.0); omega.len()];
        let frd = FrequencyResponse::new(omega, response).unwrap();
        assert!(sampled_candidates(&frd, &MarginConfig::default()).is_empty());
    }
}
