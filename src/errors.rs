use embedded_hal::digital;

use crate::calibration::Axis;

pub type Result<T, E> = ::core::result::Result<T, Error<E>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CalibrationError {
    #[error("{axis:?} raw bounds are empty: max ({max}) must be greater than min ({min})")]
    EmptyRange { axis: Axis, min: u16, max: u16 },
    #[error("screen size must be non-zero, got {width}x{height}")]
    ZeroSize { width: u16, height: u16 },
}

/// Driver error, generic over the SPI transport's own error type.
#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    #[error("SPI bus error: {0:?}")]
    Bus(E),
    #[error("chip select pin error: {0}")]
    ChipSelect(digital::ErrorKind),
    #[error("pen interrupt pin error: {0}")]
    PenIrq(digital::ErrorKind),
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

impl<E> Error<E> {
    pub(crate) fn chip_select<P: digital::Error>(err: P) -> Self {
        Self::ChipSelect(err.kind())
    }

    pub(crate) fn pen_irq<P: digital::Error>(err: P) -> Self {
        Self::PenIrq(err.kind())
    }
}
