use num_complex::Complex64;

use crate::error::{MarginError, Result};
use crate::system::{FrequencyEvaluator, FrequencyResponse, TransferFunction};

/// A system in one of the representations margin analysis understands
#[derive(Debug, Clone, PartialEq)]
pub enum SystemData {
    /// Exact rational description; margins come from polynomial roots
    Rational(TransferFunction),
    /// Sampled response; margins come from bracketing on the grid
    Sampled(FrequencyResponse),
}

impl SystemData {
    /// Bode triple: magnitude (absolute), phase (degrees), frequency
    pub fn from_bode(magnitude: &[f64], phase_degrees: &[f64], omega: &[f64]) -> Result<Self> {
        Ok(Self::Sampled(FrequencyResponse::from_bode(
            magnitude,
            phase_degrees,
            omega,
        )?))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Rational(_) => "transfer function",
            Self::Sampled(_) => "frequency response",
        }
    }
}

impl FrequencyEvaluator for SystemData {
    fn evaluate(&self, omega: f64) -> Result<Complex64> {
        match self {
            Self::Rational(tf) => tf.evaluate(omega),
            Self::Sampled(frd) => frd.evaluate(omega),
        }
    }
}

impl From<TransferFunction> for SystemData {
    fn from(tf: TransferFunction) -> Self {
        Self::Rational(tf)
    }
}

impl From<FrequencyResponse> for SystemData {
    fn from(frd: FrequencyResponse) -> Self {
        Self::Sampled(frd)
    }
}

/// One positional argument of [`crate::margins::margin`]: either a whole
/// system or one array of a Bode triple.
#[derive(Debug, Clone, PartialEq)]
pub enum MarginArgument {
    System(SystemData),
    Array(Vec<f64>),
}

impl From<SystemData> for MarginArgument {
    fn from(system: SystemData) -> Self {
        Self::System(system)
    }
}

impl From<TransferFunction> for MarginArgument {
    fn from(tf: TransferFunction) -> Self {
        Self::System(tf.into())
    }
}

impl From<FrequencyResponse> for MarginArgument {
    fn from(frd: FrequencyResponse) -> Self {
        Self::System(frd.into())
    }
}

impl From<Vec<f64>> for MarginArgument {
    fn from(values: Vec<f64>) -> Self {
        Self::Array(values)
    }
}

impl From<&[f64]> for MarginArgument {
    fn from(values: &[f64]) -> Self {
        Self::Array(values.to_vec())
    }
}

impl TryFrom<&[MarginArgument]> for SystemData {
    type Error = MarginError;

    /// Accepts a single system, or three arrays `(magnitude, phase, omega)`
    fn try_from(args: &[MarginArgument]) -> Result<Self> {
        match args {
            [MarginArgument::System(system)] => Ok(system.clone()),
            [MarginArgument::Array(values)] => Err(MarginError::Conversion(format!(
                "a single argument must be a system, got an array of {} values",
                values.len()
            ))),
            [
                MarginArgument::Array(magnitude),
                MarginArgument::Array(phase),
                MarginArgument::Array(omega),
            ] => Self::from_bode(magnitude, phase, omega),
            [_, _, _] => Err(MarginError::Conversion(
                "three arguments must all be arrays (magnitude, phase, omega)".to_string(),
            )),
            _ => Err(MarginError::InvalidArity {
                received: args.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lag() -> TransferFunction {
        TransferFunction::siso(vec![1.0], vec![1.0, 1.0]).unwrap()
    }

    #[test]
    fn test_single_system_argument() {
        let args = [MarginArgument::from(lag())];
        let system = SystemData::try_from(&args[..]).unwrap();
        assert_eq!(system.kind(), "transfer function");
    }

    #[test]
    fn test_bode_triple_argument() {
        let args = [
            MarginArgument::from(vec![1.0, 0.5, 0.25]),
            MarginArgument::from(vec![-45.0, -90.0, -135.0]),
            MarginArgument::from(vec![1.0, 2.0, 4.0]),
        ];
        let system = SystemData::try_from(&args[..]).unwrap();
        assert_eq!(system.kind(), "frequency response");

        let g = system.evaluate(2.0).unwrap();
        assert!((g.re).abs() < 1e-12);
        assert!((g.im + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_wrong_arity() {
        let none: [MarginArgument; 0] = [];
        assert_eq!(
            SystemData::try_from(&none[..]).unwrap_err(),
            MarginError::InvalidArity { received: 0 }
        );

        let two = [MarginArgument::from(lag()), MarginArgument::from(lag())];
        assert_eq!(
            SystemData::try_from(&two[..]).unwrap_err(),
            MarginError::InvalidArity { received: 2 }
        );
    }

    #[test]
    fn test_unconvertible_arguments() {
        let single_array = [MarginArgument::from(vec![1.0, 2.0])];
        assert!(matches!(
            SystemData::try_from(&single_array[..]),
            Err(MarginError::Conversion(_))
        ));

        let mixed = [
            MarginArgument::from(lag()),
            MarginArgument::from(vec![1.0]),
            MarginArgument::from(vec![1.0]),
        ];
        assert!(matches!(
            SystemData::try_from(&mixed[..]),
            Err(MarginError::Conversion(_))
        ));
    }

    #[test]
    fn test_triple_shape_mismatch() {
        let args = [
            MarginArgument::from(vec![1.0, 0.5]),
            MarginArgument::from(vec![-45.0, -90.0]),
            MarginArgument::from(vec![1.0, 2.0, 4.0]),
        ];
        assert_eq!(
            SystemData::try_from(&args[..]).unwrap_err(),
            MarginError::ShapeMismatch {
                what: "omega",
                expected: 2,
                actual: 3
            }
        );
    }
}
