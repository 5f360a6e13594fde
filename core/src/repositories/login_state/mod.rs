mod memory;
mod r#trait;

pub use memory::InMemoryLoginStateStore;
pub use r#trait::LoginStateStore;
