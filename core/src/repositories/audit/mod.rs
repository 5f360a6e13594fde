mod mock;
mod tracing_sink;
mod r#trait;

pub use mock::MockAuditSink;
pub use r#trait::AuditSink;
pub use tracing_sink::TracingAuditSink;
