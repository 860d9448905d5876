pub mod common;
pub mod resolve;
pub mod stage;
