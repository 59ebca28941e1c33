use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Platform ids that already had a lookup started.
///
/// Shared by every trigger path. An id is claimed before its lookup starts,
/// so triggers arriving while the first lookup is still in flight are dropped.
#[derive(Debug, Default)]
pub struct LookupDeduper {
    seen: Mutex<HashSet<String>>,
}

impl LookupDeduper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_trigger(&self, platform_id: &str) -> bool {
        !self.seen().contains(platform_id)
    }

    pub fn mark_triggered(&self, platform_id: &str) {
        self.seen().insert(platform_id.to_string());
    }

    /// Check and mark under one lock. Returns true for exactly one caller per id.
    pub fn try_claim(&self, platform_id: &str) -> bool {
        let mut seen = self.seen();
        if seen.contains(platform_id) {
            return false;
        }
        seen.insert(platform_id.to_string())
    }

    pub fn len(&self) -> usize {
        self.seen().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every id. Lookups already in flight still report.
    pub fn clear(&self) {
        self.seen().clear();
    }

    // A panic while holding the lock cannot leave the set half-updated.
    fn seen(&self) -> MutexGuard<'_, HashSet<String>> {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn unmarked_id_keeps_triggering() {
        let deduper = LookupDeduper::new();
        assert!(deduper.should_trigger("76561198000000000"));
        assert!(deduper.should_trigger("76561198000000000"));
    }

    #[test]
    fn marked_id_never_triggers_again() {
        let deduper = LookupDeduper::new();
        deduper.mark_triggered("76561198000000000");
        assert!(!deduper.should_trigger("76561198000000000"));
        assert!(!deduper.should_trigger("76561198000000000"));
        assert!(deduper.should_trigger("76561198000000001"));
    }

    #[test]
    fn try_claim_wins_once() {
        let deduper = LookupDeduper::new();
        assert!(deduper.try_claim("a"));
        assert!(!deduper.try_claim("a"));
        assert!(!deduper.should_trigger("a"));
        assert_eq!(deduper.len(), 1);
    }

    #[test]
    fn clear_allows_lookups_again() {
        let deduper = LookupDeduper::new();
        deduper.mark_triggered("a");
        deduper.clear();
        assert!(deduper.is_empty());
        assert!(deduper.try_claim("a"));
    }

    #[test]
    fn concurrent_claims_admit_one_winner() {
        let deduper = Arc::new(LookupDeduper::new());
        let winners: usize = (0..16)
            .map(|_| {
                let deduper = deduper.clone();
                std::thread::spawn(move || deduper.try_claim("76561198000000000"))
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|h| h.join().unwrap() as usize)
            .sum();
        assert_eq!(winners, 1);
    }
}
