pub mod combinatorial;
pub mod error;

pub use error::{Error, Result};
