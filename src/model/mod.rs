//! Data transfer objects exchanged over the HTTP API.

pub mod admin;
pub mod api;
pub mod booking;
pub mod chatbot;
pub mod dashboard;
pub mod message;
pub mod notification;
pub mod resource;
pub mod review;
pub mod user;
