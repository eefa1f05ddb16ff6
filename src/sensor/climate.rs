//! DHT11 temperature/humidity sensor (variant builds).
//!
//! Single-wire protocol bit-banged on one GPIO: an 18 ms start pulse
//! from the host, a presence answer from the sensor, then 40 data bits
//! encoded in high-pulse widths, closed by a checksum byte.

use defmt::{info, warn, Format};
use embassy_nrf::gpio::{Flex, OutputDrive, Pin, Pull};
use embassy_nrf::Peri;
use embassy_time::{Instant, Ticker, Timer};

use crate::config::{CLIMATE_PERIOD, SENSOR_BOOT_DELAY};

/// High-pulse width separating a 0 bit (~26 us) from a 1 bit (~70 us).
const BIT_THRESHOLD_US: u64 = 50;

/// Decoded value: integer part plus fractional part in 1e-5 units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub struct SensorValue {
    pub val1: i32,
    pub val2: i32,
}

impl SensorValue {
    /// One fractional digit for the log line.
    pub const fn deci(self) -> u32 {
        (self.val2 / 10_000).unsigned_abs()
    }
}

/// One temperature/humidity fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub struct ClimateSample {
    pub temperature: SensorValue,
    pub humidity: SensorValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum ClimateError {
    /// Sensor did not answer the start pulse.
    NotReady,
    /// A pulse outlasted its protocol timing limit.
    Timeout,
    /// Checksum mismatch over the four data bytes.
    Checksum,
}

/// Decode one 5-byte frame: humidity int/dec, temperature int/dec,
/// checksum. The decimal bytes carry tenths.
fn decode_frame(data: [u8; 5]) -> Result<ClimateSample, ClimateError> {
    let sum = data[0]
        .wrapping_add(data[1])
        .wrapping_add(data[2])
        .wrapping_add(data[3]);
    if sum != data[4] {
        return Err(ClimateError::Checksum);
    }

    Ok(ClimateSample {
        humidity: SensorValue {
            val1: data[0] as i32,
            val2: data[1] as i32 * 10_000,
        },
        temperature: SensorValue {
            val1: data[2] as i32,
            val2: data[3] as i32 * 10_000,
        },
    })
}

pub struct ClimateSensor {
    pin: Flex<'static>,
}

impl ClimateSensor {
    pub fn new(pin: Peri<'static, impl Pin>) -> Self {
        let mut pin = Flex::new(pin);
        pin.set_as_input(Pull::Up);
        Self { pin }
    }

    /// Busy-wait until the line reaches `level`, returning the wait in
    /// microseconds.
    fn wait_for(&mut self, level: bool, timeout_us: u64) -> Result<u64, ClimateError> {
        let start = Instant::now();
        while self.pin.is_high() != level {
            if start.elapsed().as_micros() > timeout_us {
                return Err(ClimateError::Timeout);
            }
        }
        Ok(start.elapsed().as_micros())
    }

    /// Run one read transaction.
    pub async fn fetch(&mut self) -> Result<ClimateSample, ClimateError> {
        // Start signal: hold the line low for 18 ms, then release.
        self.pin.set_as_output(OutputDrive::Standard);
        self.pin.set_low();
        Timer::after_millis(18).await;
        self.pin.set_as_input(Pull::Up);

        // Presence answer: ~80 us low, ~80 us high.
        self.wait_for(false, 60).map_err(|_| ClimateError::NotReady)?;
        self.wait_for(true, 200)?;
        self.wait_for(false, 200)?;

        // 40 bits, each a ~50 us low separator and a width-coded high.
        let mut data = [0u8; 5];
        for bit in 0..40 {
            self.wait_for(true, 100)?;
            let high_us = self.wait_for(false, 150)?;
            if high_us > BIT_THRESHOLD_US {
                data[bit / 8] |= 1 << (7 - bit % 8);
            }
        }

        decode_frame(data)
    }
}

/// Periodic climate sampling, independent of the gas cycle.
#[embassy_executor::task]
pub async fn climate_task(mut sensor: ClimateSensor) {
    Timer::after(SENSOR_BOOT_DELAY).await;

    let mut ticker = Ticker::every(CLIMATE_PERIOD);
    loop {
        match sensor.fetch().await {
            Ok(sample) => {
                info!(
                    "T:{=i32}.{=u32} C RH:{=i32}.{=u32} %",
                    sample.temperature.val1,
                    sample.temperature.deci(),
                    sample.humidity.val1,
                    sample.humidity.deci()
                );
            }
            Err(err) => warn!("climate fetch failed: {:?}", err),
        }
        ticker.next().await;
    }
}
