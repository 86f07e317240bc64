//! Button and relay drivers built on the [`GpioPort`](crate::app::ports::GpioPort) boundary.

pub mod button;
pub mod relay;
