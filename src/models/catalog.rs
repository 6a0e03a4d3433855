use log::warn;
use serde::{Deserialize, Serialize};

/// One quick-entry location and its default mileage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub miles: String,
}

impl CatalogEntry {
    pub fn new(name: &str, miles: &str) -> Self {
        Self {
            name: name.to_string(),
            miles: miles.to_string(),
        }
    }
}

/// Fixed set of known locations, in menu order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationCatalog {
    entries: Vec<CatalogEntry>,
}

impl Default for LocationCatalog {
    fn default() -> Self {
        Self {
            entries: vec![
                CatalogEntry::new("505", "5"),
                CatalogEntry::new("Baker/Edwards/HR", "1"),
                CatalogEntry::new("Buckeye", "7"),
            ],
        }
    }
}

impl LocationCatalog {
    /// Build a catalog; later duplicates of a name are dropped.
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let mut unique: Vec<CatalogEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            if unique.iter().any(|e| e.name == entry.name) {
                warn!("duplicate catalog location '{}' ignored", entry.name);
                continue;
            }
            unique.push(entry);
        }
        Self { entries: unique }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find a location by name: exact match first, then case-insensitive.
    pub fn find(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .or_else(|| self.entries.iter().find(|e| e.name.eq_ignore_ascii_case(name)))
    }

    /// Default mileage for `name`.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.find(name).map(|e| e.miles.as_str())
    }
}
