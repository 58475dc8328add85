use crate::{
    calibration::{Calibration, LinearMap},
    command::{decode_sample, Command, FRAME_LEN},
    errors::{Error, Result},
    TouchEvent, TouchScreen,
};
use embedded_hal::{
    digital::{InputPin, OutputPin},
    spi::{ErrorType, SpiBus},
};
use log::{debug, trace};

/// Press state carried between polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchState {
    #[default]
    Released,
    Pressed,
}

pub struct Xpt2046<SPI, CS, IRQ> {
    spi: SPI,
    /// Active low.
    cs: CS,
    /// PENIRQ, active low while the panel is touched.
    irq: IRQ,
    calibration: Calibration,
    map: LinearMap,
    state: TouchState,
}

impl<SPI, CS, IRQ> Xpt2046<SPI, CS, IRQ>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    IRQ: InputPin,
{
    /// Takes ownership of the bus and both pins, deasserts chip select and
    /// derives the raw-to-screen mapping.
    ///
    /// Fails if `calibration` has empty raw bounds or a zero screen size.
    pub fn new(spi: SPI, cs: CS, irq: IRQ, calibration: Calibration) -> Result<Self, SPI::Error> {
        let map = calibration.linear_map()?;

        let mut touch = Self {
            spi,
            cs,
            irq,
            calibration,
            map,
            state: TouchState::Released,
        };
        touch.cs.set_high().map_err(Error::chip_select)?;

        debug!("XPT2046 ready: {calibration:?}, {map:?}");

        Ok(touch)
    }

    /// Samples the panel once. Meant to be called on every input-sampling
    /// tick of the host pipeline.
    ///
    /// While PENIRQ is asserted every in-range sample is reported as
    /// [`TouchEvent::Pressed`], held touches included. Out-of-range samples
    /// report nothing and keep the current state, so the release edge is
    /// only emitted once PENIRQ deasserts.
    pub fn poll(&mut self) -> Result<Option<TouchEvent>, SPI::Error> {
        let pen_down = self.irq.is_low().map_err(Error::pen_irq)?;

        if pen_down {
            let Some(raw) = self.raw_touch()? else {
                return Ok(None);
            };
            let point = self.map.normalize(raw);

            if self.state == TouchState::Released {
                debug!("Pen down at {point:?} (raw {raw:?})");
            }
            self.state = TouchState::Pressed;

            Ok(Some(TouchEvent::Pressed(point)))
        } else if self.state == TouchState::Pressed {
            debug!("Pen up");
            self.state = TouchState::Released;

            Ok(Some(TouchEvent::Released))
        } else {
            Ok(None)
        }
    }

    /// Reads X then Y. `None` if either falls outside the calibrated bounds,
    /// which is normal right as the pen lifts.
    pub fn raw_touch(&mut self) -> Result<Option<(u16, u16)>, SPI::Error> {
        let x = self.read_channel(Command::ReadX)?;
        let y = self.read_channel(Command::ReadY)?;

        if self.calibration.contains((x, y)) {
            Ok(Some((x, y)))
        } else {
            trace!("Discarding out of range sample ({x}, {y})");
            Ok(None)
        }
    }

    /// One framed conversion: CS low, 3-byte transfer, CS high.
    ///
    /// Chip select is released even if the transfer fails. A bus error wins
    /// over a failure to release chip select.
    pub fn read_channel(&mut self, command: Command) -> Result<u16, SPI::Error> {
        let tx = command.frame();
        let mut rx = [0u8; FRAME_LEN];

        self.cs.set_low().map_err(Error::chip_select)?;
        let transfer = self
            .spi
            .transfer(&mut rx, &tx)
            .and_then(|()| self.spi.flush());
        let deselect = self.cs.set_high().map_err(Error::chip_select);
        transfer.map_err(Error::Bus)?;
        deselect?;

        let sample = decode_sample(&rx);
        trace!("{command:?} -> {sample}");

        Ok(sample)
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn state(&self) -> TouchState {
        self.state
    }

    pub fn is_pressed(&self) -> bool {
        self.state == TouchState::Pressed
    }

    /// Gives back the bus and pins.
    pub fn release(self) -> (SPI, CS, IRQ) {
        (self.spi, self.cs, self.irq)
    }
}

impl<SPI, CS, IRQ> TouchScreen for Xpt2046<SPI, CS, IRQ>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    IRQ: InputPin,
{
    type TouchError = Error<<SPI as ErrorType>::Error>;

    fn get_touch_event(&mut self) -> ::core::result::Result<Option<TouchEvent>, Self::TouchError> {
        self.poll()
    }
}
