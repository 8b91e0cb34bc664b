pub mod leveling;
pub mod postgres_connection;
pub mod repositories;
pub mod schema;
