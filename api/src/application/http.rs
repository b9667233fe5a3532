pub mod food_analysis;
pub mod health;
pub mod ledger;
pub mod profile;
pub mod server;

#[cfg(test)]
pub mod test;
