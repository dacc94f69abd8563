pub mod connect;
pub mod seed;
