pub mod policies;
pub mod ports;
