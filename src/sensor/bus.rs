//! Sensor register bus.
//!
//! Write-then-read transactions against the gas sensor MCU over TWIM:
//! one register-address byte out, two value bytes back, decoded as
//! big-endian u16. A failed transaction is reported to the caller and
//! never escalates past the affected channel.

use defmt::{debug, Format};
use embassy_nrf::{
    bind_interrupts,
    peripherals::{P0_14, P0_15, TWISPI0},
    twim::{self, Twim},
    Peri,
};

use crate::sensor::registers::{GasChannel, GAS_SENSOR_ADDR};

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<TWISPI0>;
});

/// Bus transaction failure reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum BusError {
    /// Peripheral did not acknowledge its address or a data byte.
    Nack,
    /// Transaction did not complete in time.
    Timeout,
    /// Any other transfer-level failure.
    Transfer,
}

impl From<twim::Error> for BusError {
    fn from(err: twim::Error) -> Self {
        match err {
            twim::Error::AddressNack | twim::Error::DataNack => BusError::Nack,
            twim::Error::Timeout => BusError::Timeout,
            _ => BusError::Transfer,
        }
    }
}

/// Register-read seam between the sampling loop and the bus driver.
///
/// The production implementation wraps TWIM; tests substitute a scripted
/// fake to exercise per-cycle semantics without hardware.
#[allow(async_fn_in_trait)]
pub trait RegisterBus {
    async fn read_register(&mut self, channel: GasChannel) -> Result<u16, BusError>;
}

/// TWIM-backed register bus.
pub struct SensorBus {
    twim: Twim<'static, TWISPI0>,
}

impl SensorBus {
    /// Pins: SDA=P0.14, SCL=P0.15, 100 kHz with internal pull-ups.
    pub fn new(
        twim: Peri<'static, TWISPI0>,
        sda: Peri<'static, P0_14>,
        scl: Peri<'static, P0_15>,
    ) -> Self {
        let mut config = twim::Config::default();
        config.frequency = twim::Frequency::K100;
        config.sda_pullup = true;
        config.scl_pullup = true;

        Self {
            twim: Twim::new(twim, Irqs, sda, scl, config, &mut []),
        }
    }

    /// Startup probe: one read of the CO register to confirm the sensor
    /// MCU is responding.
    pub async fn probe(&mut self) -> Result<(), BusError> {
        self.read_register(GasChannel::Co).await.map(|_| ())
    }
}

impl RegisterBus for SensorBus {
    async fn read_register(&mut self, channel: GasChannel) -> Result<u16, BusError> {
        let mut buf = [0u8; 2];
        self.twim
            .write_read(GAS_SENSOR_ADDR, &[channel.register()], &mut buf)
            .await?;

        let raw = u16::from_be_bytes(buf);
        debug!("bus: reg {=u8:#04x} -> {=u16}", channel.register(), raw);
        Ok(raw)
    }
}
