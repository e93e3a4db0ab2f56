//! Concrete adapter implementations for ports.

pub mod csv_fixing_adapter;
pub mod file_config_adapter;
pub mod instrument_factory;
