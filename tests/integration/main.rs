//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  All tests run on the host with no GPIO or
//! client daemon required.

mod controller_tests;
mod lifecycle_tests;
