mod frequency_response;
mod input;
mod transfer_function;

use num_complex::Complex64;

use crate::error::Result;

pub use frequency_response::FrequencyResponse;
pub use input::{MarginArgument, SystemData};
pub use transfer_function::TransferFunction;

/// Anything that can report its SISO frequency response `G(jω)`
pub trait FrequencyEvaluator {
    fn evaluate(&self, omega: f64) -> Result<Complex64>;
}
