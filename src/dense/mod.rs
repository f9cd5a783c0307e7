mod mat;
mod snf;
mod inv;
mod echelon;

pub use mat::*;
pub use snf::*;
pub use inv::*;
pub use echelon::*;
