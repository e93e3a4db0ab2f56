//! Core domain types and logic.

pub mod object;
pub mod registry;
pub mod tenor;
pub mod index;
pub mod instrument;
pub mod script;
pub mod script_parser;
pub mod session;
pub mod config_validation;
pub mod error;
