//! Utility functions shared by the server crates

pub mod duration;
pub mod redirect;
