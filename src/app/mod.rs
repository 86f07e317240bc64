//! Application core: pure domain logic, zero direct I/O.
//!
//! The button edge detection, relay toggle state machine and restart
//! recovery live here.  All interaction with hardware and the client
//! daemon happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without real peripherals.

pub mod controller;
pub mod events;
pub mod ports;
pub mod resource;
