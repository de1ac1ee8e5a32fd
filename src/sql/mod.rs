//! Safe SQL builder: identifiers validated and quoted, values as parameters.

mod builder;
mod condition;
pub mod params;
pub use builder::*;
pub use condition::{Condition, Op};
pub use params::*;
