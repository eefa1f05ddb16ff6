//! Shared setup for the defmt-test suites.
//!
//! Links the runtime crates every test binary needs: the global logger,
//! the panic handler, and the SoftDevice bindings (interrupt vectors and
//! the critical-section implementation).

pub use defmt_rtt as _; // global logger
pub use nrf_softdevice as _; // interrupt vectors + critical section
pub use panic_probe as _; // panic handler
pub use {embassy_futures as _, embassy_nrf as _, embassy_sync as _, embassy_time as _};
