//! Port traits connecting the domain to the outside world.

pub mod config_port;
pub mod factory_port;
pub mod fixing_port;
