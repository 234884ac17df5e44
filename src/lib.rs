// Keyi - Conversational support chat service
// Library exports

pub mod assessment;
pub mod config;
pub mod context;
pub mod crisis;
pub mod errors;
pub mod providers;
pub mod server;
pub mod service;
pub mod session;
