//! Fixed-Capacity Sample Window
//!
//! ## Overview
//!
//! The range calibrator looks at the most recent N samples of the signal,
//! where N is ten times the longest expected period. This module provides the
//! ring buffer that holds them.
//!
//! N is only known at runtime (it follows from the counter configuration), so
//! the storage is a single `Vec` allocated once at construction. After that
//! nothing in the per-sample path allocates:
//! - O(1) insertion (overwrites the oldest sample when full)
//! - O(1) access to the most recent sample
//! - O(n) iteration from oldest to newest
//!
//! ### Memory Layout
//!
//! ```text
//! SampleWindow with capacity 5, after 7 pushes (s0..s6):
//! ┌────┬────┬────┬────┬────┐
//! │ s5 │ s6 │ s2 │ s3 │ s4 │  ← physical slots
//! └────┴────┴────┴────┴────┘
//!             ↑
//!             └── write_pos = 2, also the oldest sample
//!
//! Logical view (oldest first): s2, s3, s4, s5, s6
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use retrometer_core::buffer::SampleWindow;
//!
//! let mut window = SampleWindow::with_capacity(3);
//! for value in [1.0, 2.0, 3.0, 4.0] {
//!     window.push(value);
//! }
//!
//! assert!(window.is_full());
//! assert_eq!(window.last(), Some(4.0));
//! assert_eq!(window.iter().collect::<Vec<_>>(), vec![2.0, 3.0, 4.0]);
//! ```

use alloc::vec::Vec;

/// Ring buffer holding the most recent `capacity` samples
///
/// ## Internal Invariants
///
/// - `data.len() == len` until the window fills, then `data.len() == capacity`
/// - `write_pos < capacity` once full (next slot to overwrite, oldest sample)
/// - `len <= capacity`
#[derive(Debug, Clone)]
pub struct SampleWindow {
    data: Vec<f64>,
    capacity: usize,
    write_pos: usize,
}

impl SampleWindow {
    /// Create an empty window holding up to `capacity` samples
    ///
    /// A capacity of zero is bumped to one; configuration validation rejects
    /// zero-length windows before they get here.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
            write_pos: 0,
        }
    }

    /// Add a sample, evicting the oldest one when full
    pub fn push(&mut self, value: f64) {
        if self.data.len() < self.capacity {
            self.data.push(value);
        } else {
            self.data[self.write_pos] = value;
            self.write_pos = (self.write_pos + 1) % self.capacity;
        }
    }

    /// Number of stored samples
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Maximum number of samples
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check if the window is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check if the window holds `capacity` samples
    pub fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }

    /// Most recent sample
    pub fn last(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }

        let idx = if self.is_full() {
            (self.write_pos + self.capacity - 1) % self.capacity
        } else {
            self.data.len() - 1
        };

        self.data.get(idx).copied()
    }

    /// Samples in physical storage order
    ///
    /// Cheaper than [`iter`](Self::iter) for order-independent statistics.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let (newer, older) = self.data.split_at(self.write_pos);
        older.iter().chain(newer.iter()).copied()
    }

    /// Drop all samples, keeping the allocation
    pub fn clear(&mut self) {
        self.data.clear();
        self.write_pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window() {
        let window = SampleWindow::with_capacity(5);
        assert!(window.is_empty());
        assert_eq!(window.len(), 0);
        assert_eq!(window.capacity(), 5);
        assert!(window.last().is_none());
    }

    #[test]
    fn push_and_retrieve() {
        let mut window = SampleWindow::with_capacity(5);

        window.push(25.0);
        assert_eq!(window.len(), 1);
        assert!(!window.is_empty());
        assert!(!window.is_full());
        assert_eq!(window.last(), Some(25.0));
    }

    #[test]
    fn circular_overwrite() {
        let mut window = SampleWindow::with_capacity(3);

        for i in 0..5 {
            window.push(i as f64);
        }

        // Should only have 3 items
        assert_eq!(window.len(), 3);
        assert!(window.is_full());
        assert_eq!(window.last(), Some(4.0));

        // Oldest 0, 1 were overwritten
        let values: Vec<f64> = window.iter().collect();
        assert_eq!(values, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn iterator_order_before_full() {
        let mut window = SampleWindow::with_capacity(4);

        for i in 0..3 {
            window.push(i as f64);
        }

        let values: Vec<f64> = window.iter().collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn wraps_many_times() {
        let mut window = SampleWindow::with_capacity(4);

        for i in 0..103 {
            window.push(i as f64);
        }

        let values: Vec<f64> = window.iter().collect();
        assert_eq!(values, vec![99.0, 100.0, 101.0, 102.0]);
        assert_eq!(window.last(), Some(102.0));
    }

    #[test]
    fn clear_resets() {
        let mut window = SampleWindow::with_capacity(2);
        window.push(1.0);
        window.push(2.0);
        window.push(3.0);
        window.clear();

        assert!(window.is_empty());
        window.push(7.0);
        assert_eq!(window.iter().collect::<Vec<_>>(), vec![7.0]);
    }

    #[test]
    fn zero_capacity_holds_one() {
        let mut window = SampleWindow::with_capacity(0);
        window.push(1.0);
        window.push(2.0);
        assert_eq!(window.capacity(), 1);
        assert_eq!(window.last(), Some(2.0));
    }
}
