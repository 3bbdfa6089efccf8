//! Service layer for business logic and orchestration.
//!
//! Services sit between the controllers and the repositories. They enforce the booking
//! rules, open transactions for multi-step writes and work with domain models rather
//! than DTOs or entity models.

pub mod admin;
pub mod auth;
pub mod booking;
pub mod chatbot;
pub mod dashboard;
pub mod message;
pub mod notification;
pub mod resource;
pub mod review;
pub mod user;

#[cfg(test)]
mod test;
