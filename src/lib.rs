pub mod config;
pub mod error;
pub mod inference;
pub mod nutrition;
pub mod routes;
pub mod storage;
