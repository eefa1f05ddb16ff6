//! Gas sensor access.
//!
//! Register map, bus transactions, and raw-value decoding for the
//! multichannel gas sensor, plus the optional DHT11 climate sensor.

pub mod bus;
#[cfg(feature = "climate")]
pub mod climate;
pub mod decode;
pub mod registers;
