//! # Utility Modules
//!
//! Supporting utilities shared by the codec and storage layers.
//!
//! ## Components
//! - **Logging**: structured logging setup from configuration

pub mod logging;

pub use logging::init_logging;
