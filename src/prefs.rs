use indexmap::IndexMap;

/// Preference key under which the selected service id is persisted
pub const SERVICE_PREF_KEY: &str = "selectedAIService";

/// Capability interface over the origin-scoped key-value preference store
///
/// Reads and writes are best-effort: an unavailable store (disabled storage,
/// quota, private browsing) is represented by an implementation that returns
/// `None` and drops writes, never by an error.
pub trait PreferenceStore {
    /// Read a preference value
    fn get(&self, key: &str) -> Option<String>;

    /// Write a preference value (silent no-op when storage is unavailable)
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory preference store
///
/// Durable for the lifetime of the process; embedding drivers back the same
/// trait with the browser's persistent store.
#[derive(Debug, Clone, Default)]
pub struct MemoryPrefs {
    values: IndexMap<String, String>,
}

impl MemoryPrefs {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPrefs {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Stand-in for an unavailable preference store
///
/// Reads always miss and writes are dropped, so callers fall back to their
/// configured defaults without a dedicated error path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPrefs;

impl PreferenceStore for NoopPrefs {
    fn get(&self, key: &str) -> Option<String> {
        log::debug!("preference store unavailable; read miss for '{}'", key);
        None
    }

    fn set(&mut self, key: &str, _value: &str) {
        log::debug!("preference store unavailable; dropping write for '{}'", key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_prefs_roundtrip() {
        let mut prefs = MemoryPrefs::new();
        assert_eq!(prefs.get(SERVICE_PREF_KEY), None);

        prefs.set(SERVICE_PREF_KEY, "claude");
        assert_eq!(prefs.get(SERVICE_PREF_KEY), Some("claude".to_string()));

        prefs.set(SERVICE_PREF_KEY, "grok");
        assert_eq!(prefs.get(SERVICE_PREF_KEY), Some("grok".to_string()));
    }

    #[test]
    fn test_noop_prefs_drops_writes() {
        let mut prefs = NoopPrefs;

        prefs.set(SERVICE_PREF_KEY, "claude");
        assert_eq!(prefs.get(SERVICE_PREF_KEY), None);
    }
}
