pub mod initialize;
pub mod migrate;
pub mod models;
pub mod pool;
