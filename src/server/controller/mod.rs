//! HTTP handlers.
//!
//! Each handler extracts the request, checks access through `AuthGuard`, calls a service
//! and converts the domain result into a DTO.

pub mod admin;
pub mod auth;
pub mod booking;
pub mod chatbot;
pub mod dashboard;
pub mod message;
pub mod notification;
pub mod profile;
pub mod resource;
pub mod review;
