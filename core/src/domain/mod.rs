pub mod billing;
pub mod common;
pub mod food_analysis;
pub mod ledger;
pub mod profile;
pub mod storage;
