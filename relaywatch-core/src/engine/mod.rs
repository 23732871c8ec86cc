//! Everything wired together behind one handle.

mod error;
mod log_engine;

pub use error::EngineError;
pub use log_engine::LogEngine;
