pub mod server;
pub mod state;
