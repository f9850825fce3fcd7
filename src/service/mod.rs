//! Request validation: static decode targets checked into typed model inputs.

mod validation;
pub use validation::{MovieBody, ScheduleBody, Validate};
