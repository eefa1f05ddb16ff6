#![no_std]
#![no_main]

mod common;

#[defmt_test::tests]
mod tests {
    use defmt::{assert, assert_eq};
    use embassy_futures::block_on;
    use nrf52820_multigas_firmware::sampler::sample_all;
    use nrf52820_multigas_firmware::sensor::bus::{BusError, RegisterBus};
    use nrf52820_multigas_firmware::sensor::decode::{split_centi, UNAVAILABLE};
    use nrf52820_multigas_firmware::sensor::registers::{GasChannel, CHANNEL_COUNT};
    use nrf52820_multigas_firmware::snapshot::SnapshotStore;

    /// Scripted bus: one response per channel, in snapshot order.
    struct FakeBus {
        responses: [Result<u16, BusError>; CHANNEL_COUNT],
        reads: usize,
    }

    impl FakeBus {
        fn new(responses: [Result<u16, BusError>; CHANNEL_COUNT]) -> Self {
            Self { responses, reads: 0 }
        }
    }

    impl RegisterBus for FakeBus {
        async fn read_register(&mut self, channel: GasChannel) -> Result<u16, BusError> {
            self.reads += 1;
            self.responses[channel.index()]
        }
    }

    #[test]
    fn cycle_reads_every_channel_once() {
        let mut bus = FakeBus::new([Ok(100), Ok(200), Ok(300), Ok(400), Ok(500)]);
        let readings = block_on(sample_all(&mut bus));

        assert_eq!(bus.reads, CHANNEL_COUNT);
        assert_eq!(readings, [1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn co_raw_bytes_decode_to_ten_ppm() {
        let raw = u16::from_be_bytes([0x03, 0xE8]);
        let mut bus = FakeBus::new([Ok(raw), Ok(0), Ok(0), Ok(0), Ok(0)]);
        let readings = block_on(sample_all(&mut bus));

        assert_eq!(readings[GasChannel::Co.index()], 10.0);
        assert_eq!(split_centi(readings[GasChannel::Co.index()]), (10, 0));
    }

    #[test]
    fn one_failed_channel_does_not_disturb_the_rest() {
        let mut bus = FakeBus::new([
            Ok(1234),
            Err(BusError::Nack),
            Ok(77),
            Ok(65_535),
            Ok(42),
        ]);
        let readings = block_on(sample_all(&mut bus));

        // The failed channel carries the sentinel, nothing else changes,
        // and the cycle still visited every register.
        assert_eq!(readings[GasChannel::No2.index()], UNAVAILABLE);
        assert_eq!(split_centi(readings[GasChannel::No2.index()]), (-1, 0));
        assert_eq!(readings[GasChannel::Co.index()], 12.34);
        assert_eq!(readings[GasChannel::Nh3.index()], 0.77);
        assert_eq!(readings[GasChannel::Ch4.index()], 655.35);
        assert_eq!(readings[GasChannel::Ethanol.index()], 0.42);
        assert_eq!(bus.reads, CHANNEL_COUNT);
    }

    #[test]
    fn timeouts_degrade_the_same_way_as_nacks() {
        let mut bus = FakeBus::new([
            Err(BusError::Timeout),
            Err(BusError::Transfer),
            Ok(77),
            Ok(0),
            Ok(0),
        ]);
        let readings = block_on(sample_all(&mut bus));

        assert_eq!(readings[GasChannel::Co.index()], UNAVAILABLE);
        assert_eq!(readings[GasChannel::No2.index()], UNAVAILABLE);
        assert_eq!(readings[GasChannel::Nh3.index()], 0.77);
    }

    #[test]
    fn cycle_snapshot_is_the_notify_payload() {
        // One cycle feeds the store; the 20 bytes handed to notify are
        // exactly the encodings of that cycle's readings.
        let mut bus = FakeBus::new([Ok(1000), Err(BusError::Nack), Ok(55), Ok(1), Ok(0)]);
        let readings = block_on(sample_all(&mut bus));

        let store = SnapshotStore::new();
        store.update(&readings);
        let snapshot = store.view();

        for (i, reading) in readings.iter().enumerate() {
            assert_eq!(&snapshot[i * 4..i * 4 + 4], &reading.to_le_bytes()[..]);
        }

        // A second cycle supersedes the payload.
        let mut bus = FakeBus::new([Ok(2000), Ok(10), Ok(55), Ok(1), Ok(0)]);
        let readings = block_on(sample_all(&mut bus));
        store.update(&readings);
        assert_eq!(&store.view()[0..4], &20.0_f32.to_le_bytes()[..]);
        assert_eq!(&store.view()[4..8], &0.1_f32.to_le_bytes()[..]);
    }
}
