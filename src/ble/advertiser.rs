//! Advertising and serving loop.
//!
//! Drives the link lifecycle: advertise, accept the single connection,
//! run the GATT server until the peer drops, resume advertising. The
//! payload profile is fixed per build: either the connectable profile
//! carrying the readings service UUID, or a non-connectable
//! Eddystone-URL broadcast (`beacon` feature). The two are never
//! combined in one advertisement.

use defmt::{debug, error, info};
use embassy_time::{Duration, Timer};
#[cfg(feature = "beacon")]
use nrf_softdevice::ble::advertisement_builder::AdvertisementDataType;
use nrf_softdevice::ble::advertisement_builder::{
    Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload, ServiceList,
};
use nrf_softdevice::ble::{gatt_server, peripheral};
use nrf_softdevice::Softdevice;

use crate::ble::connection;
use crate::ble::link_state::{self, AdvertisingProfile, LinkEvent};
use crate::ble::service::Server;
use crate::config;

/// BLE_HCI_REMOTE_USER_TERMINATED_CONNECTION. The high-level API does
/// not expose the actual HCI reason code; the state machine accepts any.
const DISCONNECT_REASON_REMOTE_TERMINATED: u8 = 0x13;

/// Eddystone-URL service data: 16-bit UUID, URL frame type, calibrated
/// TX power at 0 m, URL scheme prefix (http://www.), 13 URL characters,
/// suffix code (.org).
#[cfg(feature = "beacon")]
const BEACON_SERVICE_DATA: [u8; 19] = [
    0xAA, 0xFE, // Eddystone UUID
    0x10, // Eddystone-URL frame type
    0x00, // Calibrated TX power at 0 m
    0x00, // URL scheme prefix http://www.
    b'z', b'e', b'p', b'h', b'y', b'r', b'p', b'r', b'o', b'j', b'e', b'c', b't',
    0x08, // .org
];

/// Connectable profile: advertise the readings service, serve the one
/// connection, re-advertise after disconnect.
#[embassy_executor::task]
pub async fn advertiser_task(sd: &'static Softdevice, server: &'static Server) {
    static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
        .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
        .services_128(
            ServiceList::Complete,
            &[config::READINGS_SERVICE_UUID.to_le_bytes()],
        )
        .build();

    static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
        .full_name(config::DEVICE_NAME)
        .build();

    link_state::dispatch(LinkEvent::InitCompleted(AdvertisingProfile::Connectable));
    info!("advertising as {=str}", config::DEVICE_NAME);

    loop {
        let adv_config = peripheral::Config::default();
        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &ADV_DATA,
            scan_data: &SCAN_DATA,
        };

        let conn = match peripheral::advertise_connectable(sd, adv, &adv_config).await {
            Ok(conn) => conn,
            Err(err) => {
                error!("advertising failed: {:?}", defmt::Debug2Format(&err));
                Timer::after(Duration::from_secs(1)).await;
                continue;
            }
        };

        link_state::dispatch(LinkEvent::PeerConnected);
        connection::register(&conn);

        // Serves reads and CCCD writes until the link drops.
        let err = gatt_server::run(&conn, server, |event| server.handle_event(event)).await;
        debug!("gatt server exited: {:?}", defmt::Debug2Format(&err));

        let reason = DISCONNECT_REASON_REMOTE_TERMINATED;
        connection::deregister(reason);
        link_state::dispatch(LinkEvent::PeerDisconnected { reason });
    }
}

/// Broadcast profile: non-connectable Eddystone-URL beacon. No
/// connection ever forms; the GATT service is not advertised.
#[cfg(feature = "beacon")]
#[embassy_executor::task]
pub async fn beacon_task(sd: &'static Softdevice) {
    static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
        .flags(&[Flag::LE_Only])
        .raw(AdvertisementDataType::COMPLETE_16_SERVICE_LIST, &[0xAA, 0xFE])
        .raw(AdvertisementDataType::SERVICE_DATA_16, &BEACON_SERVICE_DATA)
        .build();

    static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
        .full_name(config::DEVICE_NAME)
        .build();

    link_state::dispatch(LinkEvent::InitCompleted(AdvertisingProfile::Beacon));
    info!("beacon started, advertising as {=str}", config::DEVICE_NAME);

    loop {
        let adv_config = peripheral::Config::default();
        let adv = peripheral::NonconnectableAdvertisement::ScannableUndirected {
            adv_data: &ADV_DATA,
            scan_data: &SCAN_DATA,
        };

        if let Err(err) = peripheral::advertise(sd, adv, &adv_config).await {
            error!("beacon advertising failed: {:?}", defmt::Debug2Format(&err));
            Timer::after(Duration::from_secs(1)).await;
        }
    }
}
