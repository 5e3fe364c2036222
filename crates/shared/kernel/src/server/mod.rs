//! Axum building blocks shared by HTTP applications.

mod access;

pub use access::access_log;
