//! Bounded per-endpoint probe history.

use std::collections::VecDeque;

use crate::monitoring::ProbeRecord;

/// Fixed-capacity sequence of probe records, oldest evicted first
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    records: VecDeque<ProbeRecord>,
    capacity: usize,
}

impl HistoryBuffer {
    /// Create an empty buffer. A capacity of 0 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { records: VecDeque::with_capacity(capacity), capacity }
    }

    /// Append a record, evicting the oldest one when full
    pub fn append(&mut self, record: ProbeRecord) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Most recent record, or the unknown sentinel when nothing was recorded
    pub fn latest(&self) -> ProbeRecord {
        self.records.back().cloned().unwrap_or_else(ProbeRecord::unknown)
    }

    /// Copy of all records, oldest first
    pub fn snapshot(&self) -> Vec<ProbeRecord> {
        self.records.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitoring::ProbeStatus;

    fn record(code: u16) -> ProbeRecord {
        ProbeRecord::responded(code, u64::from(code))
    }

    #[test]
    fn test_empty_buffer_reports_unknown() {
        let buffer = HistoryBuffer::new(3);

        assert!(buffer.is_empty());
        assert_eq!(buffer.latest().status, ProbeStatus::Unknown);
        assert!(buffer.latest().checked_at.is_none());
        assert!(buffer.snapshot().is_empty());
    }

    #[test]
    fn test_eviction_keeps_most_recent_in_order() {
        let mut buffer = HistoryBuffer::new(3);
        for code in [200, 201, 202, 203, 204] {
            buffer.append(record(code));
        }

        let codes: Vec<_> = buffer.snapshot().iter().filter_map(|r| r.http_code).collect();
        assert_eq!(buffer.len(), 3);
        assert_eq!(codes, vec![202, 203, 204]);
        assert_eq!(buffer.latest().http_code, Some(204));
    }

    #[test]
    fn test_length_never_exceeds_capacity() {
        let mut buffer = HistoryBuffer::new(50);
        for i in 0..120u16 {
            buffer.append(record(200 + i % 100));
            assert!(buffer.len() <= 50);
        }
        assert_eq!(buffer.len(), 50);
    }

    #[test]
    fn test_below_capacity_keeps_everything() {
        let mut buffer = HistoryBuffer::new(10);
        buffer.append(record(200));
        buffer.append(ProbeRecord::failed("timeout"));

        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].status, ProbeStatus::Up);
        assert_eq!(snapshot[1].status, ProbeStatus::Down);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut buffer = HistoryBuffer::new(0);
        buffer.append(record(200));
        buffer.append(record(500));

        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.latest().http_code, Some(500));
    }

    #[test]
    fn test_snapshot_is_detached_copy() {
        let mut buffer = HistoryBuffer::new(2);
        buffer.append(record(200));
        let snapshot = buffer.snapshot();
        buffer.append(record(500));
        buffer.append(record(502));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].http_code, Some(200));
    }
}
