/// XPT2046 control bytes.
///
/// Start bit set, 12-bit mode, differential reference, power-down between
/// conversions with PENIRQ left enabled. Only the channel select bits differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    ReadX = 0b1001_0000,
    ReadY = 0b1101_0000,
    ReadZ1 = 0b1011_0000,
    ReadZ2 = 0b1100_0000,
    ReadTemp0 = 0b1000_0000,
    ReadTemp1 = 0b1111_0000,
    ReadBattery = 0b1010_0000,
    ReadAux = 0b1110_0000,
}

impl Command {
    /// Transmit frame for one conversion: the control byte followed by two
    /// clocking bytes during which the sample is shifted out.
    pub const fn frame(self) -> [u8; FRAME_LEN] {
        [self as u8, 0, 0]
    }
}

pub(crate) const FRAME_LEN: usize = 3;

/// Pulls the 12-bit sample out of a received frame.
///
/// The conversion starts on the byte after the control byte, MSB first, so
/// the sample spans all of `rx[1]` and the high nibble of `rx[2]`.
pub const fn decode_sample(rx: &[u8; FRAME_LEN]) -> u16 {
    ((rx[1] as u16) << 4) | ((rx[2] as u16) >> 4)
}
