// Data models for the release management API

pub mod profile;
pub mod release;
pub mod user;

pub use profile::Profile;
pub use release::{NewReleaseStage, ReleaseStage};
pub use user::{Role, User};
