//! Command execution
//!
//! The engine side of the crate: the execution shapes handlers come in,
//! and the dispatch cycle that drives them across all carets.

pub mod executor;
pub mod handler;

pub use executor::{CommandEngine, Dispatch};
pub use handler::{ActionHandler, CaretSelections, PerCaretExecuteFn, SingleExecuteFn};
