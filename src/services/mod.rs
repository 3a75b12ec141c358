//! Service layer modules for external integrations.
//!
//! Contains the Redis catalog cache and the tours API client.

pub mod cache;
pub mod tours_client;

pub use cache::RedisCache;
pub use tours_client::{ClientError, ToursApiClient};
