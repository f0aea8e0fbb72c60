//! Bracketed scalar root finding and minimization.

mod brentq;
mod minimize;

pub use brentq::brentq;
pub use minimize::minimize_bracketed;
