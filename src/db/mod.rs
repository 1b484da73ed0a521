pub mod connection;
pub mod migrations;
pub mod board_repo;

pub use connection::*;
