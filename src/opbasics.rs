pub use crate::buffer::*;
pub use crate::error::*;
pub use crate::pipeline::*;
pub use crate::raw::*;
pub use std::sync::Arc;
pub use std::cmp;
