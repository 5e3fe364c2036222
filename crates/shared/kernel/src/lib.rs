//! Kernel utilities shared across slices and applications.
//! Keep this crate lightweight: it hosts the configuration loader and the axum plumbing
//! (middleware) every HTTP application composes.
//!
//! ## Config loading
//! ```rust
//! use agenda_kernel::config::load_config;
//!
//! let cfg: serde_json::Value = load_config(Some("does-not-exist")).unwrap();
//! assert!(cfg.as_object().is_some_and(serde_json::Map::is_empty));
//! ```
pub mod config;
#[cfg(feature = "server")]
pub mod server;
