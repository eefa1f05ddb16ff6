//! Shared reading snapshot.
//!
//! Holds the most recent encoded reading set, shared between the sampling
//! loop and the BLE read/notify path. Double-buffered: the single writer
//! fills the back buffer and publishes it with an atomic index swap, so a
//! concurrent reader always sees a complete snapshot, either the
//! previous cycle's or the current one, never a partial overwrite.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::sensor::registers::CHANNEL_COUNT;

/// Encoded snapshot length: five channels, 4 bytes each.
pub const SNAPSHOT_LEN: usize = CHANNEL_COUNT * 4;

/// Double-buffered snapshot store.
///
/// Single-writer discipline: only the sampling loop calls [`update`];
/// the swap protocol keeps readers out of the buffer being written.
///
/// [`update`]: SnapshotStore::update
pub struct SnapshotStore {
    buffers: [UnsafeCell<[u8; SNAPSHOT_LEN]>; 2],
    front: AtomicUsize,
}

unsafe impl Sync for SnapshotStore {}

impl SnapshotStore {
    pub const fn new() -> Self {
        Self {
            buffers: [
                UnsafeCell::new([0; SNAPSHOT_LEN]),
                UnsafeCell::new([0; SNAPSHOT_LEN]),
            ],
            front: AtomicUsize::new(0),
        }
    }

    /// Encode all five readings into the back buffer and publish it.
    ///
    /// Layout: channel `i` occupies bytes `i*4 .. i*4+4` as the
    /// little-endian bit pattern of the reading.
    pub fn update(&self, readings: &[f32; CHANNEL_COUNT]) {
        let back = 1 - self.front.load(Ordering::Relaxed);

        // No reader is in the back buffer: readers only dereference the
        // index published by the store below.
        let buf = unsafe { &mut *self.buffers[back].get() };
        for (i, reading) in readings.iter().enumerate() {
            buf[i * 4..i * 4 + 4].copy_from_slice(&reading.to_le_bytes());
        }

        self.front.store(back, Ordering::Release);
    }

    /// Copy out the current snapshot.
    pub fn view(&self) -> [u8; SNAPSHOT_LEN] {
        let front = self.front.load(Ordering::Acquire);
        unsafe { *self.buffers[front].get() }
    }
}

/// Process-wide snapshot instance.
pub static SNAPSHOT: SnapshotStore = SnapshotStore::new();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_returns_the_encoded_readings_in_channel_order() {
        let store = SnapshotStore::new();
        let readings = [10.0_f32, 0.42, 7.77, 655.35, 0.0];
        store.update(&readings);

        let snapshot = store.view();
        for (i, reading) in readings.iter().enumerate() {
            assert_eq!(&snapshot[i * 4..i * 4 + 4], &reading.to_le_bytes());
        }
    }

    #[test]
    fn snapshot_round_trips_bit_for_bit() {
        let store = SnapshotStore::new();
        let readings = [1.25_f32, -1.0, 3.5, 0.01, 100.0];
        store.update(&readings);

        let snapshot = store.view();
        for (i, reading) in readings.iter().enumerate() {
            let mut group = [0u8; 4];
            group.copy_from_slice(&snapshot[i * 4..i * 4 + 4]);
            let decoded = f32::from_le_bytes(group);
            assert_eq!(decoded.to_bits(), reading.to_bits());
        }
    }

    #[test]
    fn update_supersedes_the_previous_snapshot() {
        let store = SnapshotStore::new();
        store.update(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        store.update(&[9.0, 8.0, 7.0, 6.0, 5.0]);

        let snapshot = store.view();
        assert_eq!(&snapshot[0..4], &9.0_f32.to_le_bytes());
        assert_eq!(&snapshot[16..20], &5.0_f32.to_le_bytes());
    }
}
