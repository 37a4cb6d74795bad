pub mod decrypt;
pub mod encrypt;
pub mod init;
mod key_source;
pub mod keygen;
pub mod tip;
pub mod version;

pub use decrypt::Decrypt;
pub use encrypt::Encrypt;
pub use init::Init;
pub use keygen::Keygen;
pub use tip::Tip;
pub use version::Version;
