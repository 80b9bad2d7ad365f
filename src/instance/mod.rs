//! ALWABP instance model.
//!
//! An [`Instance`] holds the worker × task processing-time table (with
//! [`INFEASIBLE`] marking pairs a worker cannot perform) and the
//! precedence DAG. It is validated once on construction and read-only
//! afterwards; every search component borrows it.

mod model;
mod parse;

pub use model::{Instance, INFEASIBLE};
pub use parse::parse_instance;
