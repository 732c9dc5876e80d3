//! Record keeping for a vehicle-service agency.
//!
//! Clients, vehicles, service appointments and promotional offers live in four
//! independent document collections. The only business rule is the inactivity
//! sweep in [`workflows::inactivity`], which removes long-dormant clients and
//! issues win-back discounts to the moderately dormant ones.

pub mod config;
pub mod domain;
pub mod error;
pub mod store;
pub mod telemetry;
pub mod workflows;
