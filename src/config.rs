//! Compile-time configuration.
//!
//! Device identity, radio UUIDs, and timing parameters live here so they
//! can be tuned in one place. The sensor register map has its own module
//! (`sensor::registers`).

use embassy_time::Duration;

/// Complete local device name carried in the scan response.
pub const DEVICE_NAME: &str = "MultiGasSense";

/// 128-bit UUID of the readings service (connectable profile).
pub const READINGS_SERVICE_UUID: u128 = 0x9f1d0001_5b8e_4a6f_8db2_64f62ee1d6c4;

/// One-time delay before the first bus transaction. The sensor MCU needs
/// about a second to boot after power-up.
pub const SENSOR_BOOT_DELAY: Duration = Duration::from_secs(1);

/// Gas sampling period.
pub const SAMPLE_PERIOD: Duration = Duration::from_secs(2);

/// Climate (DHT11) sampling period in variant builds.
#[cfg(feature = "climate")]
pub const CLIMATE_PERIOD: Duration = Duration::from_secs(2);
