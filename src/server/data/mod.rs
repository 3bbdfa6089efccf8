//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to keep the data layer separate from business logic.
//!
//! Repositories are generic over `ConnectionTrait` so the same queries run against the
//! shared connection pool or inside a `DatabaseTransaction`.

pub mod booking;
pub mod message;
pub mod notification;
pub mod resource;
pub mod review;
pub mod user;
