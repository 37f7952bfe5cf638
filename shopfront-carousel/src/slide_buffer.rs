//! Clone-padded render sequence
//!
//! The padded sequence is `last k ++ real ++ first k`, so motion can run past
//! either end onto a copy before the track is silently moved back onto the
//! equivalent real slide.

/// Build the padded render sequence for `real` with `k` clones per side.
///
/// Lists shorter than `k` wrap around, so a single item padded with `k = 2`
/// appears five times. An empty list stays empty.
pub fn build<T: Clone>(real: &[T], k: usize) -> Vec<T> {
    let n = real.len();
    if n == 0 {
        return Vec::new();
    }

    let mut padded = Vec::with_capacity(n + 2 * k);
    // Trailing clones: real[n-k .. n], wrapping for short lists
    padded.extend((0..k).map(|i| real[(n * k + i - k) % n].clone()));
    padded.extend_from_slice(real);
    padded.extend((0..k).map(|i| real[i % n].clone()));
    padded
}

/// Padded sequence plus the index arithmetic between padded and real slots.
#[derive(Debug, Clone)]
pub struct SlideBuffer<T> {
    padded: Vec<T>,
    real_len: usize,
    clone_width: usize,
}

impl<T: Clone> SlideBuffer<T> {
    pub fn new(real: &[T], clone_width: usize) -> Self {
        Self {
            padded: build(real, clone_width),
            real_len: real.len(),
            clone_width,
        }
    }
}

impl<T> SlideBuffer<T> {
    /// An empty buffer; renders nothing.
    pub fn empty(clone_width: usize) -> Self {
        Self {
            padded: Vec::new(),
            real_len: 0,
            clone_width,
        }
    }

    /// Length of the padded sequence (`N + 2k`, or 0).
    pub fn len(&self) -> usize {
        self.padded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.padded.is_empty()
    }

    /// Number of real items (`N`).
    pub fn real_len(&self) -> usize {
        self.real_len
    }

    pub fn clone_width(&self) -> usize {
        self.clone_width
    }

    pub fn items(&self) -> &[T] {
        &self.padded
    }

    pub fn get(&self, padded: usize) -> Option<&T> {
        self.padded.get(padded)
    }

    /// Real index shown by a padded slot. Clones map to the item they copy.
    pub fn real_index_of(&self, padded: usize) -> Option<usize> {
        if self.real_len == 0 || padded >= self.padded.len() {
            return None;
        }
        let shifted = padded as isize - self.clone_width as isize;
        Some(shifted.rem_euclid(self.real_len as isize) as usize)
    }

    /// The real item a padded slot shows, read from the real range.
    pub fn real_item(&self, padded: usize) -> Option<&T> {
        let real = self.real_index_of(padded)?;
        self.padded.get(real + self.clone_width)
    }

    /// Padded slot of a real item inside the real range.
    pub fn padded_index_of(&self, real: usize) -> Option<usize> {
        (real < self.real_len).then_some(real + self.clone_width)
    }

    /// Whether a padded slot is a clone rather than a real item.
    pub fn is_clone(&self, padded: usize) -> bool {
        padded < self.clone_width || padded >= self.clone_width + self.real_len
    }
}
