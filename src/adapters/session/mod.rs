//! Session store adapters.
//!
//! Provides implementations of the `SessionStore` port:
//! - `InMemorySessionStore`: single process, lost on restart
//! - `RedisSessionStore`: shared across instances, expiry enforced by Redis

mod in_memory;
mod redis;

pub use self::redis::RedisSessionStore;
pub use in_memory::InMemorySessionStore;
