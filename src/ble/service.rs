//! Readings GATT service.
//!
//! One service with one 20-byte characteristic the peer can read and
//! subscribe to. The CCCD is generated by the stack; writes to it arrive
//! as server events and only flip the subscription flag. Notification
//! sends are driven by the sampling loop, never from here.

use defmt::{debug, warn};
use nrf_softdevice::ble::Connection;

use crate::ble::connection;
use crate::snapshot::SNAPSHOT_LEN;

const _: () = assert!(SNAPSHOT_LEN == 20);

#[nrf_softdevice::gatt_service(uuid = "9f1d0001-5b8e-4a6f-8db2-64f62ee1d6c4")]
pub struct ReadingsService {
    /// Latest encoded snapshot: five little-endian 4-byte values in
    /// channel order CO, NO2, NH3, CH4, C2H5OH.
    #[characteristic(uuid = "9f1d0002-5b8e-4a6f-8db2-64f62ee1d6c4", read, notify)]
    pub readings: [u8; 20],
}

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub readings: ReadingsService,
}

impl Server {
    /// Handle one GATT server event raised while a connection is active.
    pub fn handle_event(&self, event: ServerEvent) {
        match event {
            ServerEvent::Readings(ReadingsServiceEvent::ReadingsCccdWrite { notifications }) => {
                connection::set_subscribed(notifications);
            }
        }
    }

    /// Mirror the snapshot into the attribute table so a peer read
    /// returns the latest cycle. No other side effect.
    pub fn publish(&self, snapshot: &[u8; SNAPSHOT_LEN]) {
        if let Err(err) = self.readings.readings_set(snapshot) {
            warn!(
                "failed to update readings attribute: {:?}",
                defmt::Debug2Format(&err)
            );
        }
    }

    /// Push the snapshot to the peer. A rejected send (peer unsubscribed,
    /// link torn down mid-send) is an expected condition, not an error.
    pub fn notify(&self, conn: &Connection, snapshot: &[u8; SNAPSHOT_LEN]) {
        if let Err(err) = self.readings.readings_notify(conn, snapshot) {
            debug!("notify skipped: {:?}", defmt::Debug2Format(&err));
        }
    }
}
