//! Booking API backend.
//!
//! Requests enter through `router`, pass the session layer and reach a handler in
//! `controller`. Handlers check access with `middleware::auth::AuthGuard`, turn DTOs
//! into parameter types from `model` and call a service. Services in `service` hold
//! the booking rules and open transactions; repositories in `data` run the queries
//! and hand back domain models, which controllers map to DTOs on the way out.
//!
//! `startup` wires the database, session store and model client into `state`.
//! `scheduler` runs the minute-by-minute completion sweep and `util` holds the
//! date and text parsing helpers.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
