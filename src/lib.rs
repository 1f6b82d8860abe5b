//! Location Reminders bootstrap.
//!
//! Loads configuration, installs the tracing subscriber and wires the
//! registration sessions to the platform services.

pub mod bootstrap;
