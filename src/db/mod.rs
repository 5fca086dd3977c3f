pub mod connection;
pub mod view_state;
