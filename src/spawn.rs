use crate::types::{Selection, ShapeId, ShapeInstance};
use rand::Rng;

const JITTER_BITS: u32 = 16;

/// Issues [`ShapeId`]s from the wall clock plus random low bits.
///
/// Ids are strictly increasing, so a burst created inside one millisecond
/// (or a clock that steps backwards) still yields distinct values.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: Option<u64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> ShapeId {
        let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
        self.next_at(now, &mut rand::thread_rng())
    }

    pub fn next_at(&mut self, millis: u64, rng: &mut impl Rng) -> ShapeId {
        let jitter: u64 = rng.gen_range(0..(1 << JITTER_BITS));
        let mut candidate = (millis << JITTER_BITS) | jitter;
        if let Some(last) = self.last {
            if candidate <= last {
                candidate = last.wrapping_add(1);
            }
        }
        self.last = Some(candidate);
        ShapeId(candidate)
    }
}

/// Build `selection.spawn_count` fresh instances from the current selection.
pub fn spawn_batch(selection: &Selection, ids: &mut IdGenerator) -> Vec<ShapeInstance> {
    (0..selection.spawn_count.get())
        .map(|_| ShapeInstance {
            id: ids.next_id(),
            shape: selection.shape,
            color: selection.color,
            animation: selection.animation,
        })
        .collect()
}
