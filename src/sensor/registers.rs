//! Gas sensor register map.
//!
//! MiCS-6814-class multichannel sensor in register mode: a small MCU on
//! the sensor board exposes 16-bit big-endian concentration registers
//! behind a fixed bus address.

use defmt::Format;

/// 7-bit bus address of the sensor MCU.
pub const GAS_SENSOR_ADDR: u8 = 0x04;

/// Raw register value to ppm divisor, shared by all gas channels.
pub const GAS_SCALE: f32 = 100.0;

/// Number of gas channels carried in the reading snapshot.
pub const CHANNEL_COUNT: usize = 5;

/// Hydrogen register, present on some sensor revisions. Not sampled.
pub const GAS_H2_REG: u8 = 0x0C;

/// Propane register, present on some sensor revisions. Not sampled.
pub const GAS_PROPANE_REG: u8 = 0x0E;

/// One measurement channel of the gas sensor.
///
/// Discriminants are the register addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
#[repr(u8)]
pub enum GasChannel {
    Co = 0x02,
    No2 = 0x04,
    Nh3 = 0x06,
    Ch4 = 0x08,
    Ethanol = 0x0A,
}

impl GasChannel {
    /// All channels in snapshot order. Offsets in the 20-byte payload
    /// follow this order.
    pub const ALL: [GasChannel; CHANNEL_COUNT] = [
        GasChannel::Co,
        GasChannel::No2,
        GasChannel::Nh3,
        GasChannel::Ch4,
        GasChannel::Ethanol,
    ];

    /// Register address to write before the 2-byte read.
    pub const fn register(self) -> u8 {
        self as u8
    }

    /// Position of this channel in the snapshot order.
    pub const fn index(self) -> usize {
        match self {
            GasChannel::Co => 0,
            GasChannel::No2 => 1,
            GasChannel::Nh3 => 2,
            GasChannel::Ch4 => 3,
            GasChannel::Ethanol => 4,
        }
    }

    /// Channel label used in the consolidated log line.
    pub const fn name(self) -> &'static str {
        match self {
            GasChannel::Co => "CO",
            GasChannel::No2 => "NO2",
            GasChannel::Nh3 => "NH3",
            GasChannel::Ch4 => "CH4",
            GasChannel::Ethanol => "C2H5OH",
        }
    }
}
