pub mod database;
pub mod origin;
pub mod repositories;
