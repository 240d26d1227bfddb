//! A vector with amortized O(1) reset, based on timestamps.

use std::ops::Index;

/// Fixed-size vector whose entries can all be reset to a default value in
/// amortized constant time.
///
/// Each entry carries a 32 bit timestamp; an entry counts as set only when
/// its timestamp matches the current one, so `reset` is a single counter
/// increment. Search state is cleared between queries through this.
#[derive(Debug)]
pub struct TimestampedVector<T> {
    data: Vec<T>,
    timestamps: Vec<u32>,
    current: u32,
    default: T,
}

impl<T: Clone> TimestampedVector<T> {
    pub fn new(size: usize, default: T) -> TimestampedVector<T> {
        TimestampedVector {
            data: vec![default.clone(); size],
            timestamps: vec![0; size],
            current: 0,
            default,
        }
    }

    /// Reset all entries to the default. Amortized O(1).
    pub fn reset(&mut self) {
        let (next, overflowed) = self.current.overflowing_add(1);
        self.current = next;

        // on wrap-around stale timestamps become current again, so clear for real
        if overflowed {
            for entry in &mut self.data {
                *entry = self.default.clone();
            }
        }
    }

    pub fn set(&mut self, index: usize, value: T) {
        self.data[index] = value;
        self.timestamps[index] = self.current;
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> Index<usize> for TimestampedVector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        if self.timestamps[index] == self.current {
            &self.data[index]
        } else {
            &self.default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_reset() {
        let mut vector = TimestampedVector::new(3, 0);
        vector.set(1, 7);
        assert_eq!(vector[0], 0);
        assert_eq!(vector[1], 7);

        vector.reset();
        assert_eq!(vector[1], 0);

        vector.set(2, 9);
        assert_eq!(vector[2], 9);
    }
}
