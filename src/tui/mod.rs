//! Interactive terminal interface.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: pure data types (App, Action, Transition, Effect)
//! - `update`: transitions, no I/O
//! - `view`: rendering, no I/O
//! - `run`: the effects boundary (terminal, threads, files)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;

pub use run::run;
