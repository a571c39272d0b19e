//! Domain logic for the field-worker activity report service.
//!
//! Pure types and functions with no I/O: the activity-category
//! enumeration, count containers, the average reduction, input
//! validation, and the domain error type.

pub mod average;
pub mod category;
pub mod error;
pub mod report;
pub mod types;
