pub mod init;
pub mod playlist;
pub mod sign;
pub mod version;

pub use init::Init;
pub use playlist::{Create, Delete, Read, Update};
pub use sign::Sign;
pub use version::Version;
