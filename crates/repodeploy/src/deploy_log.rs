//! Human-readable record of what a deployment step did.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl LogEntry {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            message: message.into(),
        }
    }
}

/// Append-only list of log entries. Steps build their own log and hand it
/// back to the caller, which merges it with [`DeployLog::extend`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DeployLog {
    entries: Vec<LogEntry>,
}

impl DeployLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        let entry = LogEntry::new(message);
        log::debug!("{}", entry.message);
        self.entries.push(entry);
    }

    pub fn extend(&mut self, other: DeployLog) {
        self.entries.extend(other.entries);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.message.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_extend_keep_order() {
        let mut first = DeployLog::new();
        first.push("one");
        first.push("two");

        let mut second = DeployLog::new();
        second.push("three");

        first.extend(second);
        let messages: Vec<&str> = first.messages().collect();
        assert_eq!(messages, vec!["one", "two", "three"]);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_serializes_as_list() {
        let mut log = DeployLog::new();
        log.push("cloned");

        let json = serde_json::to_value(&log).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["message"], "cloned");
        assert!(json[0]["timestamp"].is_string());
    }
}
