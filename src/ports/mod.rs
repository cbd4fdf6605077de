//! Port traits at the boundary of the analytics core.

pub mod config_port;
pub mod note_port;
pub mod plan_port;
pub mod report_port;
pub mod trade_port;
