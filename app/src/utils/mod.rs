pub mod geo;
pub mod global_error_handler;
pub mod jwt;
pub mod response;
pub mod validation;
