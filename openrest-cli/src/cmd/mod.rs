pub mod call;
pub mod config;
pub mod describe;
pub mod operations;
pub mod validate;
