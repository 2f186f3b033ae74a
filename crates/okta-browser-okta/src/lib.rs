pub mod directory;
pub mod user;

pub use directory::{OktaDirectory, OktaDirectoryConfig};
pub use user::UserResponse;
