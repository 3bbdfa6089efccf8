//! SeaORM entity definitions for the campus hub schema.

pub mod prelude;

pub mod booking;
pub mod message;
pub mod notification;
pub mod resource;
pub mod resource_equipment;
pub mod resource_image;
pub mod review;
pub mod user;
