use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::models::{Opportunity, Property, ReferenceProperty};

/// Errors that can occur when reading or writing listing records
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Source of the records the engine scores
///
/// The engine never depends on a concrete backend; handlers only see this trait.
/// Every method returns an owned snapshot.
pub trait ListingStore: Send + Sync {
    fn opportunity(&self, id: &str) -> Result<Opportunity, StoreError>;

    fn property(&self, id: &str) -> Result<Property, StoreError>;

    /// All listings, ordered by id
    fn properties(&self) -> Vec<Property>;

    /// Federally-associated reference inventory, ordered by id
    fn reference_inventory(&self) -> Vec<ReferenceProperty>;

    /// Insert or replace, returning the stored record with its new version
    fn upsert_opportunity(&self, opportunity: Opportunity) -> Opportunity;

    /// Insert or replace, returning the stored record with its new version
    fn upsert_property(&self, property: Property) -> Property;
}

/// Contents of a JSON seed file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    #[serde(default)]
    pub opportunities: Vec<Opportunity>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub reference_properties: Vec<ReferenceProperty>,
}

trait Versioned: Clone {
    fn version(&self) -> u64;
    fn set_version(&mut self, version: u64);
}

impl Versioned for Opportunity {
    fn version(&self) -> u64 {
        self.version
    }

    fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}

impl Versioned for Property {
    fn version(&self) -> u64 {
        self.version
    }

    fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}

/// Versions start at 1 and grow by one on every write
fn upsert_versioned<T: Versioned>(map: &DashMap<String, T>, id: String, mut record: T) -> T {
    match map.entry(id) {
        Entry::Occupied(mut entry) => {
            record.set_version(entry.get().version() + 1);
            entry.insert(record.clone());
        }
        Entry::Vacant(entry) => {
            record.set_version(1);
            entry.insert(record.clone());
        }
    }
    record
}

/// Process-local store backed by concurrent maps
#[derive(Debug, Default)]
pub struct InMemoryStore {
    opportunities: DashMap<String, Opportunity>,
    properties: DashMap<String, Property>,
    reference: DashMap<String, ReferenceProperty>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: SeedData) -> Self {
        let store = Self::new();
        for opportunity in seed.opportunities {
            store.upsert_opportunity(opportunity);
        }
        for property in seed.properties {
            store.upsert_property(property);
        }
        for reference in seed.reference_properties {
            store.insert_reference(reference);
        }
        store
    }

    /// Load records from a JSON seed file
    pub fn from_seed_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let seed: SeedData = serde_json::from_str(&raw)?;
        tracing::info!(
            "Loaded seed data from {}: {} opportunities, {} properties, {} reference properties",
            path.as_ref().display(),
            seed.opportunities.len(),
            seed.properties.len(),
            seed.reference_properties.len()
        );
        Ok(Self::from_seed(seed))
    }

    pub fn insert_reference(&self, reference: ReferenceProperty) {
        self.reference.insert(reference.id.clone(), reference);
    }
}

impl ListingStore for InMemoryStore {
    fn opportunity(&self, id: &str) -> Result<Opportunity, StoreError> {
        self.opportunities
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound {
                kind: "Opportunity",
                id: id.to_string(),
            })
    }

    fn property(&self, id: &str) -> Result<Property, StoreError> {
        self.properties
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound {
                kind: "Property",
                id: id.to_string(),
            })
    }

    fn properties(&self) -> Vec<Property> {
        let mut properties: Vec<Property> =
            self.properties.iter().map(|entry| entry.value().clone()).collect();
        properties.sort_by(|a, b| a.id.cmp(&b.id));
        properties
    }

    fn reference_inventory(&self) -> Vec<ReferenceProperty> {
        let mut inventory: Vec<ReferenceProperty> =
            self.reference.iter().map(|entry| entry.value().clone()).collect();
        inventory.sort_by(|a, b| a.id.cmp(&b.id));
        inventory
    }

    fn upsert_opportunity(&self, opportunity: Opportunity) -> Opportunity {
        upsert_versioned(&self.opportunities, opportunity.id.clone(), opportunity)
    }

    fn upsert_property(&self, property: Property) -> Property {
        upsert_versioned(&self.properties, property.id.clone(), property)
    }
}
