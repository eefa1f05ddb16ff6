//! Radio link state machine.
//!
//! Tracks the advertising/connection lifecycle independently of the
//! sampling cadence. The transition logic is pure; the advertising task
//! drives the global instance from SoftDevice events.

use core::cell::Cell;

use defmt::{info, Format};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Advertising payload profile, fixed per build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum AdvertisingProfile {
    /// Non-connectable broadcast beacon.
    Beacon,
    /// Connectable advertisement carrying the readings service UUID.
    Connectable,
}

/// Lifecycle state of the radio link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum LinkState {
    Uninitialized,
    Initializing,
    Advertising(AdvertisingProfile),
    /// A peer is connected; advertising is paused. The profile is kept
    /// so advertising resumes unchanged after disconnect.
    Connected(AdvertisingProfile),
}

/// Events fed into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum LinkEvent {
    InitRequested,
    InitCompleted(AdvertisingProfile),
    InitFailed,
    PeerConnected,
    PeerDisconnected { reason: u8 },
}

impl LinkState {
    /// Apply one event. Pairs outside the transition table leave the
    /// state unchanged.
    pub fn on_event(self, event: LinkEvent) -> LinkState {
        match (self, event) {
            (LinkState::Uninitialized, LinkEvent::InitRequested) => LinkState::Initializing,
            (LinkState::Initializing, LinkEvent::InitCompleted(profile)) => {
                LinkState::Advertising(profile)
            }
            (LinkState::Initializing, LinkEvent::InitFailed) => LinkState::Uninitialized,
            (LinkState::Advertising(profile), LinkEvent::PeerConnected) => {
                LinkState::Connected(profile)
            }
            (LinkState::Connected(profile), LinkEvent::PeerDisconnected { .. }) => {
                LinkState::Advertising(profile)
            }
            (state, _) => state,
        }
    }

    pub fn is_connected(self) -> bool {
        matches!(self, LinkState::Connected(_))
    }
}

/// Global link state, shared by the advertising task and diagnostics.
static LINK_STATE: Mutex<CriticalSectionRawMutex, Cell<LinkState>> =
    Mutex::new(Cell::new(LinkState::Uninitialized));

/// Feed one event into the global machine, returning the new state.
pub fn dispatch(event: LinkEvent) -> LinkState {
    LINK_STATE.lock(|state| {
        let prev = state.get();
        let next = prev.on_event(event);
        if next != prev {
            info!("link: {:?} -> {:?}", prev, next);
        }
        state.set(next);
        next
    })
}

/// Current link state.
pub fn current() -> LinkState {
    LINK_STATE.lock(|state| state.get())
}
