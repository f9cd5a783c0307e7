mod int_ext;
mod ff;
mod ratio;

pub use int_ext::*;
pub use ff::*;
pub use ratio::*;
