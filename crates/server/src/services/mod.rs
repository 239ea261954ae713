//! Application services for the readshelf server.

pub mod auth;
