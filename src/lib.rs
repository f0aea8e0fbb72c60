pub mod config;
pub mod constants;
pub mod error;
pub mod margins;
pub mod polynomial;
pub mod solver;
pub mod system;

pub use config::{MarginConfig, MarginMode};
pub use error::{MarginError, Result};
pub use margins::{
    ClassicMargins, FullCrossoverSet, Margins, ReducedMarginReport, margin,
    phase_crossover_frequencies, stability_margins,
};
pub use system::{
    FrequencyEvaluator, FrequencyResponse, MarginArgument, SystemData, TransferFunction,
};
