//! Cache module - Redis-backed stores

pub mod login_state_store;

pub use login_state_store::RedisLoginStateStore;
