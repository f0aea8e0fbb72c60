pub mod ops;
pub mod roots;
pub mod split;

pub use roots::{real_roots, roots};
pub use split::{split_imaginary, substitute_jw};
