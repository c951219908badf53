//! SAT-based core of a STRIPS planner: encodes a ground planning problem
//! into a boolean formula, runs a SAT solver behind a narrow capability
//! interface, and decodes a satisfying assignment into a set of selected
//! actions.
//!
//! The decoded actions are *not* guaranteed to form a causally valid
//! sequential plan; see [`problem::ActionSet`].

pub mod decode;
pub mod encode;
pub mod planner;
pub mod problem;
pub mod solver;
pub mod types;
