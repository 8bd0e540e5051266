//! In-process session history with browser semantics
//!
//! Push discards forward entries, replace overwrites in place, and traversal
//! queues a popstate notification instead of reporting synchronously.

use std::collections::VecDeque;

use url::Url;

use super::{EntryMarker, NavigationError, NavigationHistory, PopStateEvent};

/// One entry in the session history
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub url: String,
    pub marker: Option<EntryMarker>,
}

/// Write counters, for asserting push/replace discipline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub pushes: usize,
    pub replaces: usize,
    pub traversals: usize,
}

#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<HistoryEntry>,
    index: usize,
    events: VecDeque<PopStateEvent>,
    stats: WriteStats,
    /// Maximum serialized marker size accepted by push/replace
    state_quota: Option<usize>,
    /// Simulates a disabled history API
    unavailable: bool,
}

impl MemoryHistory {
    /// A session whose only entry is `url`, loaded from outside the app
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_previous(Vec::<String>::new(), url)
    }

    /// A session that visited `previous` pages before landing on `url`
    pub fn with_previous(
        previous: impl IntoIterator<Item = impl Into<String>>,
        url: impl Into<String>,
    ) -> Self {
        let mut entries: Vec<HistoryEntry> = previous
            .into_iter()
            .map(|url| HistoryEntry {
                url: url.into(),
                marker: None,
            })
            .collect();
        entries.push(HistoryEntry {
            url: url.into(),
            marker: None,
        });
        let index = entries.len() - 1;

        Self {
            entries,
            index,
            events: VecDeque::new(),
            stats: WriteStats::default(),
            state_quota: None,
            unavailable: false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.index]
    }

    pub fn stats(&self) -> WriteStats {
        self.stats
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub fn set_state_quota(&mut self, quota: Option<usize>) {
        self.state_quota = quota;
    }

    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// Reload the current entry: drops pending notifications, keeps entries
    /// and their markers like a browser does.
    pub fn reload(&mut self) {
        self.events.clear();
    }

    fn check_write(&self, url: &str, marker: &EntryMarker) -> Result<(), NavigationError> {
        if self.unavailable {
            return Err(NavigationError::Unavailable);
        }
        if Url::parse(url).is_err() {
            return Err(NavigationError::InvalidUrl(url.to_string()));
        }
        if let Some(quota) = self.state_quota {
            let size = serde_json::to_vec(marker).map(|v| v.len()).unwrap_or(0);
            if size > quota {
                return Err(NavigationError::QuotaExceeded { size, quota });
            }
        }
        Ok(())
    }
}

impl NavigationHistory for MemoryHistory {
    fn location(&self) -> &str {
        &self.current().url
    }

    fn marker(&self) -> Option<&EntryMarker> {
        self.current().marker.as_ref()
    }

    fn push(&mut self, url: &str, marker: EntryMarker) -> Result<(), NavigationError> {
        self.check_write(url, &marker)?;
        self.entries.truncate(self.index + 1);
        self.entries.push(HistoryEntry {
            url: url.to_string(),
            marker: Some(marker),
        });
        self.index += 1;
        self.stats.pushes += 1;
        Ok(())
    }

    fn replace(&mut self, url: &str, marker: EntryMarker) -> Result<(), NavigationError> {
        self.check_write(url, &marker)?;
        self.entries[self.index] = HistoryEntry {
            url: url.to_string(),
            marker: Some(marker),
        };
        self.stats.replaces += 1;
        Ok(())
    }

    fn go(&mut self, delta: isize) -> Result<(), NavigationError> {
        if self.unavailable {
            return Err(NavigationError::Unavailable);
        }
        if delta == 0 {
            return Ok(());
        }

        let target = self.index as isize + delta;
        if target < 0 || target >= self.entries.len() as isize {
            return Err(NavigationError::OutOfRange {
                delta,
                index: self.index,
                len: self.entries.len(),
            });
        }

        self.index = target as usize;
        self.stats.traversals += 1;
        let entry = self.current();
        self.events.push_back(PopStateEvent {
            url: entry.url.clone(),
            marker: entry.marker.clone(),
        });
        Ok(())
    }

    fn poll_event(&mut self) -> Option<PopStateEvent> {
        self.events.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = "https://admin.local/";

    #[test]
    fn test_push_discards_forward_entries() {
        let mut history = MemoryHistory::new(HOME);
        history.push("https://admin.local/?a", EntryMarker::default()).unwrap();
        history.push("https://admin.local/?b", EntryMarker::default()).unwrap();
        history.go(-1).unwrap();
        history.push("https://admin.local/?c", EntryMarker::default()).unwrap();

        let urls: Vec<_> = history.entries().iter().map(|e| e.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![HOME, "https://admin.local/?a", "https://admin.local/?c"]
        );
        assert_eq!(history.index(), 2);
    }

    #[test]
    fn test_replace_keeps_length() {
        let mut history = MemoryHistory::new(HOME);
        history.replace("https://admin.local/?x", EntryMarker::default()).unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history.location(), "https://admin.local/?x");
        assert_eq!(history.stats().replaces, 1);
    }

    #[test]
    fn test_go_reports_asynchronously() {
        let mut history = MemoryHistory::new(HOME);
        history.push("https://admin.local/?a", EntryMarker::default()).unwrap();

        history.go(-1).unwrap();
        assert_eq!(history.location(), HOME);
        assert_eq!(history.pending_events(), 1);

        let event = history.poll_event().unwrap();
        assert_eq!(event.url, HOME);
        assert_eq!(event.marker, None);
        assert!(history.poll_event().is_none());
    }

    #[test]
    fn test_go_out_of_range_is_an_error() {
        let mut history = MemoryHistory::new(HOME);
        assert_eq!(
            history.go(-1),
            Err(NavigationError::OutOfRange {
                delta: -1,
                index: 0,
                len: 1
            })
        );
        assert_eq!(history.pending_events(), 0);
    }

    #[test]
    fn test_quota_and_unavailable_reject_writes() {
        let mut history = MemoryHistory::new(HOME);
        history.set_state_quota(Some(4));
        assert!(matches!(
            history.push(HOME, EntryMarker::default()),
            Err(NavigationError::QuotaExceeded { .. })
        ));

        history.set_state_quota(None);
        history.set_unavailable(true);
        assert_eq!(
            history.replace(HOME, EntryMarker::default()),
            Err(NavigationError::Unavailable)
        );
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_invalid_url_rejected() {
        let mut history = MemoryHistory::new(HOME);
        assert_eq!(
            history.push("::nope::", EntryMarker::default()),
            Err(NavigationError::InvalidUrl("::nope::".to_string()))
        );
    }
}
