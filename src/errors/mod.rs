#[allow(clippy::module_inception)]
pub mod errors;

pub use errors::*;
