// Authentication module
// Holds the bearer token and the login/logout flows that change it

mod flow;
mod slot;
mod store;
mod types;

pub use flow::{login, logout};
pub use slot::{MemorySlot, SqliteSlot, TokenSlot, TOKEN_KEY};
pub use store::CredentialStore;
pub use types::TokenResponse;
