//! Redis client used by the Redis verification store

pub mod redis_client;


pub use redis_client::RedisClient;

// Re-export commonly used types
pub use ov_shared::config::cache::CacheConfig;
