pub mod engine;
pub mod ledger;
pub mod occupancy;
pub mod purge;
pub mod visits;
