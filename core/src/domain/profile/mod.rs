pub mod calculator;
pub mod entities;
pub mod local;
pub mod ports;
pub mod services;
pub mod value_objects;
