//! Data types shared by the grid engines.

mod column;
mod value;

pub use column::*;
pub use value::*;
