pub mod env_cmd;
pub mod flags;
pub mod simple_logger;
pub mod spec_cmd;
pub mod utils;
