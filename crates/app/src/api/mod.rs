pub mod client;
pub mod v4;
