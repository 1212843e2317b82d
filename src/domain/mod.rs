//! Domain layer
//!
//! Pure deployment logic with no process or filesystem access:
//! - `value_objects`: actions, tool families, auxiliary file roles
//! - `entities`: deployed versions and the service they belong to
//! - `services`: retention policy and argument redaction
//! - `ports`: the process-runner seam implemented by infrastructure

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
