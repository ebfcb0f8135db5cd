pub mod client;
pub mod error;
pub mod remote;
pub mod types;

pub use error::ApiError;
pub use remote::{ProductBackend, RemoteProducts};
pub use types::{Product, ProductMetadata, ProductPage, SimilarityOpts};
