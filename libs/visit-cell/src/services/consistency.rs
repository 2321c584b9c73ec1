// libs/visit-cell/src/services/consistency.rs
//
// In-process serialization of bookings. Holding a BookingGuard keeps every other
// booking for the same doctor or the same patient waiting until the guard drops.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::trace;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum LockKey {
    Doctor(Uuid),
    Patient(Uuid),
}

/// Held for the whole load, validate and persist sequence of one booking.
pub struct BookingGuard {
    _doctor: OwnedMutexGuard<()>,
    _patient: OwnedMutexGuard<()>,
}

#[derive(Default)]
pub struct SchedulingLocks {
    locks: Mutex<HashMap<LockKey, Arc<AsyncMutex<()>>>>,
}

impl SchedulingLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Doctor first, then patient. Every booking takes them in this order, and
    /// no one waits for a doctor lock while holding a patient lock.
    pub async fn lock_booking(&self, doctor_id: Uuid, patient_id: Uuid) -> BookingGuard {
        let doctor = self.lock_for(LockKey::Doctor(doctor_id)).lock_owned().await;
        let patient = self.lock_for(LockKey::Patient(patient_id)).lock_owned().await;
        trace!("Booking locks held for doctor {} and patient {}", doctor_id, patient_id);

        BookingGuard {
            _doctor: doctor,
            _patient: patient,
        }
    }

    /// Number of keys currently tracked, held or awaited.
    pub fn tracked_keys(&self) -> usize {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        prune_idle(&mut locks);
        locks.len()
    }

    fn lock_for(&self, key: LockKey) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        prune_idle(&mut locks);
        Arc::clone(locks.entry(key).or_default())
    }
}

// The map holds the only reference to a lock nobody holds or waits for.
fn prune_idle(locks: &mut HashMap<LockKey, Arc<AsyncMutex<()>>>) {
    locks.retain(|_, lock| Arc::strong_count(lock) > 1);
}
