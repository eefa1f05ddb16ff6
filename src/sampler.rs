//! Periodic sampling loop.
//!
//! Reads every gas channel once per cycle, logs a consolidated line,
//! publishes the encoded snapshot, and pushes it to a subscribed peer.
//! A failed channel read degrades to the unavailable sentinel without
//! disturbing the rest of the cycle; the loop runs for the process
//! lifetime.

use defmt::{error, info, warn};
use embassy_time::{Ticker, Timer};

use crate::ble::{connection, service::Server};
use crate::config::{SAMPLE_PERIOD, SENSOR_BOOT_DELAY};
use crate::sensor::bus::{RegisterBus, SensorBus};
use crate::sensor::decode::{decode, split_centi, UNAVAILABLE};
use crate::sensor::registers::{GasChannel, CHANNEL_COUNT};
use crate::snapshot::SNAPSHOT;

/// Read and decode every gas channel once, in snapshot order.
///
/// A bus failure yields the sentinel for that channel only; the other
/// channels keep their own results.
pub async fn sample_all<B: RegisterBus>(bus: &mut B) -> [f32; CHANNEL_COUNT] {
    let mut readings = [UNAVAILABLE; CHANNEL_COUNT];
    for channel in GasChannel::ALL {
        readings[channel.index()] = match bus.read_register(channel).await {
            Ok(raw) => decode(raw),
            Err(err) => {
                warn!("{=str} read failed: {:?}", channel.name(), err);
                UNAVAILABLE
            }
        };
    }
    readings
}

fn log_readings(readings: &[f32; CHANNEL_COUNT]) {
    let (co_i, co_f) = split_centi(readings[GasChannel::Co.index()]);
    let (no2_i, no2_f) = split_centi(readings[GasChannel::No2.index()]);
    let (nh3_i, nh3_f) = split_centi(readings[GasChannel::Nh3.index()]);
    let (ch4_i, ch4_f) = split_centi(readings[GasChannel::Ch4.index()]);
    let (etoh_i, etoh_f) = split_centi(readings[GasChannel::Ethanol.index()]);

    info!(
        "CO:{=i32}.{=u32:02} NO2:{=i32}.{=u32:02} NH3:{=i32}.{=u32:02} CH4:{=i32}.{=u32:02} C2H5OH:{=i32}.{=u32:02} ppm",
        co_i, co_f, no2_i, no2_f, nh3_i, nh3_f, ch4_i, ch4_f, etoh_i, etoh_f
    );
}

/// Periodic sampling driver.
///
/// `server` is absent in beacon builds and when GATT registration
/// failed; sampling and logging continue either way.
#[embassy_executor::task]
pub async fn sampler_task(mut bus: SensorBus, server: Option<&'static Server>) {
    // Allow the sensor MCU to boot before the first transaction.
    Timer::after(SENSOR_BOOT_DELAY).await;

    if let Err(err) = bus.probe().await {
        error!("gas sensor not ready, sampling disabled: {:?}", err);
        return;
    }
    info!("gas sensor ready, sampling every {=u64}s", SAMPLE_PERIOD.as_secs());

    let mut ticker = Ticker::every(SAMPLE_PERIOD);
    loop {
        let readings = sample_all(&mut bus).await;
        log_readings(&readings);

        SNAPSHOT.update(&readings);
        let snapshot = SNAPSHOT.view();

        if let Some(server) = server {
            server.publish(&snapshot);

            // Fire-and-forget: only attempted with a live connection and
            // a subscribed peer; the handle is cloned out of the registry
            // so a concurrent disconnect cannot tear it down mid-send.
            if connection::is_subscribed() {
                if let Some(conn) = connection::active() {
                    server.notify(&conn, &snapshot);
                }
            }
        }

        ticker.next().await;
    }
}
