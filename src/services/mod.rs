//! Service layer wiring configuration into running components
//!
//! - `ServiceFactory`: Builds the cache store, provider clients and orchestrator settings
//! - `SimpleServices`: Lightweight container handed to CLI commands and the HTTP server

pub mod factory;
pub mod simple_container;

pub use factory::ServiceFactory;
pub use simple_container::SimpleServices;
