//! User directory: maps provider identities onto local accounts

mod reconcile;
mod service;


pub use reconcile::{reconcile, AdminAllowList, Reconciliation};
pub use service::UserDirectory;
