pub mod interleave;
pub mod levels;
pub mod gamma;
pub mod finish;

pub use crate::buffer::*;
pub use crate::error::*;
pub use crate::raw::PakonRaw;
