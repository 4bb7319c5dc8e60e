// Adapters layer: concrete implementations of the domain ports.

pub mod http;
pub mod storage;

pub use http::{HttpBackend, DEFAULT_API_URL};
pub use storage::LocalStorage;
