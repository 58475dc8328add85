#![no_std]

//! Polled driver for the XPT2046 resistive touch controller.
//!
//! The driver owns the SPI bus, the chip-select line and the PENIRQ line, and
//! reports one pointer event per [`Xpt2046::poll`] call. It is meant to be
//! driven by a host input pipeline that samples the pointer on a fixed tick.

mod calibration;
mod command;
mod errors;
mod xpt2046;

use embedded_graphics::prelude::Point;

pub use calibration::{Axis, Calibration, LinearMap};
pub use command::{decode_sample, Command};
pub use errors::{CalibrationError, Error, Result};
pub use xpt2046::{TouchState, Xpt2046};

/// What a single input-sampling tick reports, when it reports anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchEvent {
    /// Pen is down, at these screen coordinates.
    Pressed(Point),
    /// Pen was lifted since the previous tick.
    Released,
}

/// Pointer source as seen by the host input pipeline.
///
/// `Ok(None)` means "nothing to report this tick".
pub trait TouchScreen {
    type TouchError;

    fn get_touch_event(&mut self) -> ::core::result::Result<Option<TouchEvent>, Self::TouchError>;
}
