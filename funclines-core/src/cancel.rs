//! Cooperative cancellation for long scans
//!
//! A host that re-scans on every edit hands each scan a [`ScanTicket`] from a
//! shared [`ScanGeneration`]. Issuing a newer ticket makes every older one
//! stale, and a scan holding a stale ticket stops at its next checkpoint.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Checkpoint consulted at the top of every per-byte scan loop
pub trait Interrupt {
    fn is_interrupted(&self) -> bool;
}

/// Never interrupts; the default for plain scans
#[derive(Debug, Clone, Copy, Default)]
pub struct Uninterrupted;

impl Interrupt for Uninterrupted {
    #[inline]
    fn is_interrupted(&self) -> bool {
        false
    }
}

/// Source of monotonically increasing scan tickets
#[derive(Debug, Clone, Default)]
pub struct ScanGeneration {
    latest: Arc<AtomicU64>,
}

impl ScanGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new scan, invalidating all earlier tickets
    pub fn issue(&self) -> ScanTicket {
        let id = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        ScanTicket {
            latest: Arc::clone(&self.latest),
            id,
        }
    }

    /// Id of the most recently issued ticket (0 before the first)
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }
}

/// Handle held by one scan; stale once a newer ticket exists
#[derive(Debug, Clone)]
pub struct ScanTicket {
    latest: Arc<AtomicU64>,
    id: u64,
}

impl ScanTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_stale(&self) -> bool {
        self.latest.load(Ordering::Acquire) != self.id
    }
}

impl Interrupt for ScanTicket {
    #[inline]
    fn is_interrupted(&self) -> bool {
        self.is_stale()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uninterrupted_never_stops() {
        assert!(!Uninterrupted.is_interrupted());
    }

    #[test]
    fn test_fresh_ticket_is_current() {
        let generation = ScanGeneration::new();
        let ticket = generation.issue();
        assert_eq!(ticket.id(), 1);
        assert!(!ticket.is_stale());
    }

    #[test]
    fn test_newer_ticket_invalidates_older() {
        let generation = ScanGeneration::new();
        let first = generation.issue();
        let second = generation.issue();
        assert!(first.is_interrupted());
        assert!(!second.is_interrupted());
        assert_eq!(generation.latest(), 2);
    }

    #[test]
    fn test_cloned_generation_shares_counter() {
        let generation = ScanGeneration::new();
        let other = generation.clone();
        let ticket = generation.issue();
        other.issue();
        assert!(ticket.is_stale());
    }
}
