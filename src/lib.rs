//! Head count over a family tree: leaves send their count up, the root sums
//! and broadcasts the total back down to every member.

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{aggregate, count_children, FamilyTree, Person, Report};
