//! Numeric defaults for margin computation
//!
//! These constants define the thresholds and solver limits used when the
//! caller does not override them through [`crate::config::MarginConfig`].

/// Frequencies at or below this value are treated as static gain.
/// Excludes spurious crossovers from integrators (poles at the origin).
pub const DEFAULT_FREQUENCY_EPSILON: f64 = 1e-8;

/// Absolute tolerance on the bracket width for scalar root finding and
/// minimization.
pub const DEFAULT_XTOL: f64 = 2e-12;

/// Relative tolerance on the bracket width, scaled by the current estimate.
pub const DEFAULT_RTOL: f64 = 4.0 * f64::EPSILON;

/// Iteration cap for bracketed refinement.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// A polynomial root counts as real when its imaginary part is below this
/// fraction of `max(1, |root|)`.
pub const REAL_ROOT_TOLERANCE: f64 = 1e-10;

/// Sweep cap for the simultaneous polynomial root iteration.
pub const DEFAULT_ROOT_ITERATIONS: usize = 500;

/// Sampled values within this distance of zero have no sign.
/// Keeps rounding noise on a response that sits at a crossing level (an
/// all-pass at unit gain) from producing brackets.
pub const SAMPLE_SIGN_TOLERANCE: f64 = 1e-12;

/// Minimum number of samples a frequency response needs to be interpolated.
pub const MIN_RESPONSE_SAMPLES: usize = 2;
