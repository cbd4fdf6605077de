//! Core domain types and analytics.

pub mod trade;
pub mod note;
pub mod plan;
pub mod period;
pub mod grouping;
pub mod bucketing;
pub mod aggregation;
pub mod summary;
pub mod filter;
pub mod insights;
pub mod dashboard;
pub mod review;
pub mod settings;
pub mod config_validation;
pub mod error;
