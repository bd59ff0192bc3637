pub mod args;
pub mod commands;
mod config;
pub mod confirm;
mod error;
mod fs;
pub mod model;
pub mod session;
pub mod storage;
pub mod store;


pub use config::Config;
pub use error::Error;
pub use error::Result;
