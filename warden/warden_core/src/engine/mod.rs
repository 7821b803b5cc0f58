//! Resolution and evaluation engine.
//!
//! Build time: [`ClauseExpander`] and [`resolve`] turn a raw permission map into
//! a [`ResolvedPermissionMap`]. Request time: [`check`] and [`evaluate`] answer
//! permission questions against it.

mod evaluator;
mod expander;
mod resolver;

pub use evaluator::{check, evaluate};
pub use expander::ClauseExpander;
pub use resolver::{resolve, PermissionPlan, ResolvedPermissionMap};
