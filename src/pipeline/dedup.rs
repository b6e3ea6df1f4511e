use std::collections::HashSet;

/// Tracks record identifiers already rendered in the session.
///
/// The set only grows; nothing is evicted until the session ends. Records
/// without a uuid share a single key, so only the first of them is shown.
#[derive(Debug, Clone, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
    seen_missing: bool,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time `uuid` is offered and false on every later call.
    pub fn admit(&mut self, uuid: &str) -> bool {
        if self.seen.contains(uuid) {
            return false;
        }
        self.seen.insert(uuid.to_string())
    }

    /// Admission check for an optional identifier.
    pub fn admit_record(&mut self, uuid: Option<&str>) -> bool {
        match uuid {
            Some(uuid) => self.admit(uuid),
            None => !std::mem::replace(&mut self.seen_missing, true),
        }
    }

    pub fn len(&self) -> usize {
        self.seen.len() + usize::from(self.seen_missing)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admit_once() {
        let mut dedup = Deduplicator::new();
        assert!(dedup.admit("a1"));
        for _ in 0..5 {
            assert!(!dedup.admit("a1"));
        }
        assert!(dedup.admit("a2"));
        assert_eq!(dedup.len(), 2);
    }

    #[test]
    fn test_missing_uuid_admitted_once() {
        let mut dedup = Deduplicator::new();
        assert!(dedup.admit_record(None));
        assert!(!dedup.admit_record(None));
        assert!(dedup.admit_record(Some("")));
        assert!(!dedup.admit_record(Some("")));
        assert_eq!(dedup.len(), 2);
    }

    #[test]
    fn test_fresh_deduplicator_is_empty() {
        let dedup = Deduplicator::new();
        assert!(dedup.is_empty());
    }
}
