//! Domain services - stateless decision logic

mod redaction;
mod retention;

pub use redaction::{redact, redact_args, REDACTED};
pub use retention::RetentionPolicy;
