use crate::constants::MAX_PHOTOS;
use smallvec::SmallVec;

/// Uploaded photos in submission order, capped at [`MAX_PHOTOS`].
///
/// Entries are never replaced: once the queue is full, later uploads are
/// dropped. Index `i` of the queue is shown on placard `i`.
#[derive(Clone, Debug)]
pub struct PhotoQueue<T> {
    items: SmallVec<[T; MAX_PHOTOS]>,
    capacity: usize,
}

impl<T> Default for PhotoQueue<T> {
    fn default() -> Self {
        Self::with_capacity(MAX_PHOTOS)
    }
}

impl<T> PhotoQueue<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: SmallVec::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.items.len())
    }

    /// Append as many items as fit. Returns the accepted items with their
    /// queue index, in submission order.
    pub fn extend<I>(&mut self, incoming: I) -> Vec<(usize, T)>
    where
        I: IntoIterator<Item = T>,
        T: Clone,
    {
        let mut accepted = Vec::new();
        let mut dropped = 0usize;
        for item in incoming {
            if self.is_full() {
                dropped += 1;
                continue;
            }
            accepted.push((self.items.len(), item.clone()));
            self.items.push(item);
        }
        if dropped > 0 {
            log::info!("[photos] queue full, dropped {} upload(s)", dropped);
        }
        accepted
    }
}

/// Centre square of a `width` x `height` image, no larger than `max_side`:
/// (x, y, side).
pub fn centre_crop(width: u32, height: u32, max_side: u32) -> (u32, u32, u32) {
    let side = width.min(height).min(max_side).max(1);
    (
        width.saturating_sub(side) / 2,
        height.saturating_sub(side) / 2,
        side,
    )
}
