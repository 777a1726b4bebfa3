// src/db/mod.rs
//
// Database module
//
// Provides:
// - Connection pooling
// - Schema migrations and seed data
// - Database utilities

pub mod connection;
pub mod migrations;

pub use connection::{
    create_connection_pool, create_memory_pool, get_database_path, register_functions,
    ConnectionPool, UNICODE_UPPER,
};

pub use migrations::{
    get_database_stats, initialize_database, seed_database, verify_database_integrity,
    DatabaseStats,
};
