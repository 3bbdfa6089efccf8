//! Domain models and operation parameter types.
//!
//! Repositories convert SeaORM entities into these types at the data boundary, services
//! operate on them, and controllers convert them into DTOs for responses.

pub mod admin;
pub mod booking;
pub mod dashboard;
pub mod message;
pub mod notification;
pub mod resource;
pub mod review;
pub mod user;
