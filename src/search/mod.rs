//! Local search, variable neighborhood descent and shaking.
//!
//! Local search is deterministic; shaking draws every random decision
//! from the caller's generator.

mod local;
mod shake;

pub use local::{
    local_search, variable_neighborhood_descent, LocalSearchPolicy, IMPROVEMENT_EPSILON,
};
pub use shake::shake;
