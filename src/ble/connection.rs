//! Connection registry.
//!
//! Single-peer model: at most one live connection at any time. The
//! sampler clones the handle out of the slot before notifying, so a
//! disconnect racing the notify cannot invalidate the handle mid-send
//! (the SoftDevice binding reference-counts `Connection`).

use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, Ordering};

use defmt::{info, warn};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use nrf_softdevice::ble::Connection;

static ACTIVE: Mutex<CriticalSectionRawMutex, RefCell<Option<Connection>>> =
    Mutex::new(RefCell::new(None));

/// Peer subscription to the readings characteristic. Lives for the
/// duration of one connection.
static SUBSCRIBED: AtomicBool = AtomicBool::new(false);

/// Register a new connection. Subscription state starts out disabled on
/// every connection.
pub fn register(conn: &Connection) {
    SUBSCRIBED.store(false, Ordering::Relaxed);
    ACTIVE.lock(|slot| slot.borrow_mut().replace(conn.clone()));
    info!("connection registered");
}

/// Drop the registered connection after a disconnect.
pub fn deregister(reason: u8) {
    let had_connection = ACTIVE.lock(|slot| slot.borrow_mut().take()).is_some();
    SUBSCRIBED.store(false, Ordering::Relaxed);

    if had_connection {
        info!("connection deregistered (reason {=u8:#04x})", reason);
    } else {
        warn!("deregister without a registered connection");
    }
}

/// Clone the live connection handle, if any.
pub fn active() -> Option<Connection> {
    ACTIVE.lock(|slot| slot.borrow().clone())
}

/// Record a CCCD write from the peer.
pub fn set_subscribed(enabled: bool) {
    SUBSCRIBED.store(enabled, Ordering::Relaxed);
    info!(
        "readings notifications {}",
        if enabled { "enabled" } else { "disabled" }
    );
}

pub fn is_subscribed() -> bool {
    SUBSCRIBED.load(Ordering::Relaxed)
}
