//! Audit emission for the token lifecycle

mod recorder;

pub use recorder::AuditRecorder;
