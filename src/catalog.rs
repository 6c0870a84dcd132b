use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One destination AI chat service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceEntry {
    /// Stable identifier, used as the persisted preference value
    pub id: String,

    /// Human-readable name shown in the service picker
    pub name: String,

    /// Destination URL prefix; the percent-encoded prompt is appended
    pub url_prefix: String,
}

impl ServiceEntry {
    /// Create a new ServiceEntry
    pub fn new(id: impl Into<String>, name: impl Into<String>, url_prefix: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url_prefix: url_prefix.into(),
        }
    }
}

/// Static ordered list of supported chat services
///
/// Uses IndexMap so picker order matches declaration order while keeping
/// O(1) lookup by id.
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    entries: IndexMap<String, ServiceEntry>,
}

impl ServiceCatalog {
    /// Build the built-in catalog
    pub fn builtin() -> Self {
        let mut catalog = Self { entries: IndexMap::new() };

        catalog.add(ServiceEntry::new("chatgpt", "ChatGPT", "https://chatgpt.com/?hints=search&q="));
        catalog.add(ServiceEntry::new("claude", "Claude", "https://claude.ai/chat?q="));
        // Gemini is left out: it does not accept a query-string prompt yet.
        catalog.add(ServiceEntry::new("perplexity", "Perplexity", "https://www.perplexity.ai/?q="));
        catalog.add(ServiceEntry::new("copilot", "Copilot", "https://copilot.microsoft.com/?q="));
        catalog.add(ServiceEntry::new("grok", "Grok", "https://grok.com/?q="));

        catalog
    }

    fn add(&mut self, entry: ServiceEntry) {
        self.entries.insert(entry.id.clone(), entry);
    }

    /// Look up a service by id
    pub fn get(&self, id: &str) -> Option<&ServiceEntry> {
        self.entries.get(id)
    }

    /// Check whether an id is in the catalog
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Id of the first catalog entry, used as the fallback of last resort
    pub fn first_id(&self) -> &str {
        self.entries
            .first()
            .map(|(id, _)| id.as_str())
            .unwrap_or_default()
    }

    /// Iterate entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &ServiceEntry> {
        self.entries.values()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
