mod abst;
mod types;
mod control;

pub use abst::*;
pub use types::*;
pub use control::*;

pub mod dense;
pub mod homology;
pub mod util;
