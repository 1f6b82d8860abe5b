//! # lr-platform
//!
//! Platform-side implementations for Location Reminders.
//!
//! The platform reports asynchronous results (permission prompts, location
//! resolution flows, the app settings page) through numeric request codes.
//! [`ResultRouter`] keeps those codes at this boundary and hands each pending
//! operation a typed one-shot channel. The simulated services in
//! [`adapters`] implement the core ports on top of it and back the demo
//! binary and the flow tests.

pub mod adapters;
pub mod result_router;

pub use adapters::{
    GeofencingCall, SimulatedGeofencingClient, SimulatedLocationSettings,
    SimulatedPermissionService, TracingUi,
};
pub use result_router::{DeliveryOutcome, PlatformResult, ResultChannel, ResultRouter};
