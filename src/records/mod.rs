mod types;
mod validation;

pub use types::*;
pub use validation::ValidationError;
