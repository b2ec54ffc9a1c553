use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::types::{Listing, ListingError};

/// Fixture compiled into the binary.
const BUNDLED_FIXTURE: &str = include_str!("../../assets/listings.json");

/// Immutable, ordered set of listings loaded once at startup.
///
/// Cloning is cheap: the records and the id index are shared behind `Arc`,
/// so the feed controller and the presentation layer can each hold a handle
/// without copying data.
#[derive(Debug, Clone)]
pub struct ListingStore {
    listings: Arc<[Arc<Listing>]>,
    by_id: Arc<HashMap<String, usize>>,
}

impl ListingStore {
    /// Maximum fixture size (32 MB). A full city export is well under this.
    const MAX_FILE_SIZE: u64 = 32 * 1024 * 1024;

    /// Load the fixture that ships with the binary.
    pub fn bundled() -> Result<Self, ListingError> {
        Self::from_json(BUNDLED_FIXTURE)
    }

    /// Load a fixture from disk.
    pub fn load(path: &Path) -> Result<Self, ListingError> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > Self::MAX_FILE_SIZE {
            return Err(ListingError::TooLarge(format!(
                "{} is {} bytes (max {} bytes)",
                path.display(),
                meta.len(),
                Self::MAX_FILE_SIZE
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let store = Self::from_json(&content)?;
        tracing::info!(path = %path.display(), listings = store.len(), "Loaded listings fixture");
        Ok(store)
    }

    /// Parse a JSON array of listing objects.
    ///
    /// Only structural JSON errors and duplicate ids are rejected; individual
    /// records are otherwise taken as-is.
    pub fn from_json(json: &str) -> Result<Self, ListingError> {
        let records: Vec<Listing> = serde_json::from_str(json)?;
        Self::from_listings(records)
    }

    /// Build a store from already-parsed records, preserving their order.
    pub fn from_listings(records: Vec<Listing>) -> Result<Self, ListingError> {
        if records.is_empty() {
            return Err(ListingError::Empty);
        }

        let mut by_id = HashMap::with_capacity(records.len());
        for (idx, listing) in records.iter().enumerate() {
            if by_id.insert(listing.id.clone(), idx).is_some() {
                return Err(ListingError::DuplicateId(listing.id.clone()));
            }
        }

        let listings: Arc<[Arc<Listing>]> = records.into_iter().map(Arc::new).collect();
        tracing::debug!(listings = listings.len(), "Listing store initialized");

        Ok(Self {
            listings,
            by_id: Arc::new(by_id),
        })
    }

    /// Every listing, in fixture order.
    pub fn all(&self) -> &[Arc<Listing>] {
        &self.listings
    }

    /// Look up a listing by id.
    pub fn get(&self, id: &str) -> Option<Arc<Listing>> {
        self.by_id
            .get(id)
            .and_then(|&idx| self.listings.get(idx))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_fixture_loads() {
        let store = ListingStore::bundled().unwrap();
        assert!(!store.is_empty());
        for listing in store.all() {
            assert_eq!(store.get(&listing.id).as_deref(), Some(&**listing));
        }
    }

    #[test]
    fn bundled_fixture_covers_every_category() {
        let store = ListingStore::bundled().unwrap();
        for category in &crate::listings::CATALOG {
            assert!(
                store.all().iter().any(|l| l.is_in_category(category.name)),
                "no bundled listing tagged '{}'",
                category.name
            );
        }
    }

    #[test]
    fn preserves_fixture_order() {
        let store =
            ListingStore::from_json(r#"[{"id": "b"}, {"id": "a"}, {"id": "c"}]"#).unwrap();
        let ids: Vec<&str> = store.all().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn all_is_stable_across_calls() {
        let store = ListingStore::from_json(r#"[{"id": "1"}, {"id": "2"}]"#).unwrap();
        assert_eq!(store.all(), store.all());
        let clone = store.clone();
        assert_eq!(store.all(), clone.all());
    }

    #[test]
    fn get_unknown_id_is_none() {
        let store = ListingStore::from_json(r#"[{"id": "1"}]"#).unwrap();
        assert!(store.get("2").is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = ListingStore::from_json(r#"[{"id": "1"}, {"id": "1"}]"#);
        assert!(matches!(result, Err(ListingError::DuplicateId(id)) if id == "1"));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let result = ListingStore::from_json(r#"[{"id": "1"},"#);
        assert!(matches!(result, Err(ListingError::Parse(_))));

        // Missing the required id field
        let result = ListingStore::from_json(r#"[{"name": "nameless"}]"#);
        assert!(matches!(result, Err(ListingError::Parse(_))));
    }

    #[test]
    fn empty_array_is_rejected() {
        assert!(matches!(
            ListingStore::from_json("[]"),
            Err(ListingError::Empty)
        ));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let path = Path::new("/tmp/roost_test_nonexistent_listings.json");
        assert!(matches!(
            ListingStore::load(path),
            Err(ListingError::Io(_))
        ));
    }

    #[test]
    fn load_reads_fixture_from_disk() {
        let dir = std::env::temp_dir().join("roost_store_test_load");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("listings.json");
        std::fs::write(&path, r#"[{"id": "42", "name": "Harbour loft"}]"#).unwrap();

        let store = ListingStore::load(&path).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("42").unwrap().name, "Harbour loft");

        std::fs::remove_dir_all(&dir).ok();
    }
}
