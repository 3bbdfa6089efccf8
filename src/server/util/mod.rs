//! Small parsing helpers shared by services.

pub mod parse;
