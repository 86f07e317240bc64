//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter    | Implements         | Connects to                    |
//! |------------|--------------------|--------------------------------|
//! | `awa`      | ResourceReporter   | `awa_clientd` + `awa-client-*` |
//! | `gpio`     | GpioPort           | `/dev/gpiochip0` (`gpio-cdev`) |
//! | `log_sink` | EventSink          | `log` facade                   |
//! | `time`     | DelayNs            | `std::thread::sleep`           |

pub mod awa;
pub mod gpio;
pub mod log_sink;
pub mod time;
