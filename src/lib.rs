#![no_std]

//! Multichannel gas sensor BLE firmware.
//!
//! Periodically samples a five-channel gas sensor over TWIM and exposes
//! the readings over BLE, either as a connectable GATT service with
//! notify or as a broadcast beacon:
//!
//! - `sensor`: register bus, raw-value decoding, optional climate sensor
//! - `snapshot`: the shared encoded reading snapshot
//! - `ble`: advertising, connection registry, and the readings service
//! - `sampler`: the periodic sampling loop

pub mod ble;
pub mod config;
pub mod sampler;
pub mod sensor;
pub mod snapshot;
