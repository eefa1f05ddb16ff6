#![no_std]
#![no_main]

use defmt::*;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_nrf::{config::Config, interrupt};
use nrf_softdevice::{raw, Config as SdConfig, Softdevice};
use panic_probe as _;
#[cfg(not(feature = "beacon"))]
use static_cell::StaticCell;

use nrf52820_multigas_firmware::ble::advertiser;
use nrf52820_multigas_firmware::ble::link_state::{self, LinkEvent};
#[cfg(not(feature = "beacon"))]
use nrf52820_multigas_firmware::ble::service::Server;
use nrf52820_multigas_firmware::config::DEVICE_NAME;
use nrf52820_multigas_firmware::sampler;
use nrf52820_multigas_firmware::sensor::bus::SensorBus;
#[cfg(feature = "climate")]
use nrf52820_multigas_firmware::sensor::climate::{self, ClimateSensor};

#[cfg(not(feature = "beacon"))]
static SERVER: StaticCell<Server> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Starting multichannel gas sensor firmware");

    // Configure nRF peripherals
    let mut nrf_config = Config::default();
    // Keep interrupt priorities off the SoftDevice reserved levels (0, 1, 4)
    nrf_config.gpiote_interrupt_priority = interrupt::Priority::P2;
    nrf_config.time_interrupt_priority = interrupt::Priority::P2;

    let p = embassy_nrf::init(nrf_config);

    info!("Embassy initialized, configuring SoftDevice...");

    let sd_config = SdConfig {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 23 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: 1408,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: Default::default(),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: DEVICE_NAME.as_ptr() as _,
            current_len: DEVICE_NAME.len() as u16,
            max_len: DEVICE_NAME.len() as u16,
            write_perm: unsafe { core::mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    };

    link_state::dispatch(LinkEvent::InitRequested);
    let sd = Softdevice::enable(&sd_config);
    info!("SoftDevice enabled");

    let bus = SensorBus::new(p.TWISPI0, p.P0_14, p.P0_15);

    #[cfg(feature = "beacon")]
    {
        unwrap!(spawner.spawn(advertiser::beacon_task(sd)));
        unwrap!(spawner.spawn(sampler::sampler_task(bus, None)));
    }

    #[cfg(not(feature = "beacon"))]
    match Server::new(sd) {
        Ok(server) => {
            let server = SERVER.init(server);
            unwrap!(spawner.spawn(advertiser::advertiser_task(sd, server)));
            unwrap!(spawner.spawn(sampler::sampler_task(bus, Some(server))));
        }
        Err(err) => {
            // Wireless is gone for the process lifetime; sampling and
            // logging continue on their own.
            link_state::dispatch(LinkEvent::InitFailed);
            error!(
                "GATT server registration failed: {:?}",
                defmt::Debug2Format(&err)
            );
            unwrap!(spawner.spawn(sampler::sampler_task(bus, None)));
        }
    }

    // Spawn SoftDevice task (CRITICAL!). Must follow Server::new, which
    // needs &mut Softdevice; tasks don't run until main returns, so the
    // spawn order here has no runtime effect.
    unwrap!(spawner.spawn(softdevice_task(sd)));

    #[cfg(feature = "climate")]
    unwrap!(spawner.spawn(climate::climate_task(ClimateSensor::new(p.P0_16))));
}

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}
