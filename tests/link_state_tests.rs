#![no_std]
#![no_main]

mod common;

#[defmt_test::tests]
mod tests {
    use defmt::{assert, assert_eq};
    use nrf52820_multigas_firmware::ble::link_state::{
        AdvertisingProfile, LinkEvent, LinkState,
    };

    const PROFILE: AdvertisingProfile = AdvertisingProfile::Connectable;

    #[test]
    fn bring_up_reaches_advertising() {
        let state = LinkState::Uninitialized
            .on_event(LinkEvent::InitRequested)
            .on_event(LinkEvent::InitCompleted(PROFILE));
        assert_eq!(state, LinkState::Advertising(PROFILE));
        assert!(!state.is_connected());
    }

    #[test]
    fn failed_bring_up_stays_down() {
        let state = LinkState::Uninitialized
            .on_event(LinkEvent::InitRequested)
            .on_event(LinkEvent::InitFailed);
        assert_eq!(state, LinkState::Uninitialized);
    }

    #[test]
    fn connect_pauses_advertising() {
        let state = LinkState::Advertising(PROFILE).on_event(LinkEvent::PeerConnected);
        assert_eq!(state, LinkState::Connected(PROFILE));
        assert!(state.is_connected());
    }

    #[test]
    fn any_disconnect_reason_resumes_advertising() {
        for reason in [0x08u8, 0x13, 0x16, 0x3E] {
            let state =
                LinkState::Connected(PROFILE).on_event(LinkEvent::PeerDisconnected { reason });
            assert_eq!(state, LinkState::Advertising(PROFILE));
        }
    }

    #[test]
    fn beacon_profile_survives_the_lifecycle() {
        let beacon = AdvertisingProfile::Beacon;
        let state = LinkState::Advertising(beacon)
            .on_event(LinkEvent::PeerConnected)
            .on_event(LinkEvent::PeerDisconnected { reason: 0x13 });
        assert_eq!(state, LinkState::Advertising(beacon));
    }

    #[test]
    fn events_outside_the_table_are_no_ops() {
        let cases = [
            (LinkState::Uninitialized, LinkEvent::PeerConnected),
            (LinkState::Uninitialized, LinkEvent::InitCompleted(PROFILE)),
            (LinkState::Uninitialized, LinkEvent::InitFailed),
            (
                LinkState::Uninitialized,
                LinkEvent::PeerDisconnected { reason: 0x13 },
            ),
            (LinkState::Initializing, LinkEvent::InitRequested),
            (LinkState::Initializing, LinkEvent::PeerConnected),
            (
                LinkState::Initializing,
                LinkEvent::PeerDisconnected { reason: 0x13 },
            ),
            (LinkState::Advertising(PROFILE), LinkEvent::InitRequested),
            (LinkState::Advertising(PROFILE), LinkEvent::InitFailed),
            (
                LinkState::Advertising(PROFILE),
                LinkEvent::PeerDisconnected { reason: 0x13 },
            ),
            (LinkState::Connected(PROFILE), LinkEvent::PeerConnected),
            (LinkState::Connected(PROFILE), LinkEvent::InitRequested),
            (LinkState::Connected(PROFILE), LinkEvent::InitFailed),
            (
                LinkState::Connected(PROFILE),
                LinkEvent::InitCompleted(PROFILE),
            ),
        ];
        for (state, event) in cases {
            assert_eq!(state.on_event(event), state);
        }
    }
}
