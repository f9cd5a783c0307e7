mod summand;
mod gens;

pub use summand::*;
pub use gens::*;
