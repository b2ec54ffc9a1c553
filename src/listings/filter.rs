use std::sync::Arc;

use super::category::CategoryId;
use super::types::Listing;

/// Select the listings relevant to a category label.
///
/// - Empty (or whitespace-only) label: every listing, in order.
/// - Catalog name: the stable subsequence of members of that category.
/// - Anything else: empty. An unknown category is not an error.
///
/// Pure and deterministic; the input is never modified.
pub fn filter(listings: &[Arc<Listing>], category: &str) -> Vec<Arc<Listing>> {
    if category.trim().is_empty() {
        return listings.to_vec();
    }

    match CategoryId::from_name(category) {
        Some(id) => filter_by(listings, Some(id)),
        None => {
            tracing::debug!(category = %category, "Unknown category, no listings match");
            Vec::new()
        }
    }
}

/// Typed variant of [`filter`]. `None` means no filter.
pub fn filter_by(listings: &[Arc<Listing>], category: Option<CategoryId>) -> Vec<Arc<Listing>> {
    let Some(id) = category else {
        return listings.to_vec();
    };

    let name = id.name();
    listings
        .iter()
        .filter(|listing| listing.is_in_category(name))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(id: &str, categories: &[&str]) -> Arc<Listing> {
        let json = serde_json::json!({
            "id": id,
            "name": format!("Listing {}", id),
            "categories": categories,
        });
        Arc::new(serde_json::from_value(json).unwrap())
    }

    fn ids(listings: &[Arc<Listing>]) -> Vec<&str> {
        listings.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn empty_category_is_identity() {
        let all = vec![tagged("1", &["Cabins"]), tagged("2", &[]), tagged("3", &["City"])];
        assert_eq!(filter(&all, ""), all);
        assert_eq!(filter(&all, "   "), all);
    }

    #[test]
    fn keeps_members_in_original_order() {
        let all = vec![
            tagged("1", &["Cabins"]),
            tagged("2", &["Beachfront"]),
            tagged("3", &["Cabins", "Countryside"]),
            tagged("4", &[]),
        ];
        assert_eq!(ids(&filter(&all, "Cabins")), vec!["1", "3"]);
        assert_eq!(ids(&filter(&all, "Countryside")), vec!["3"]);
    }

    #[test]
    fn unknown_category_yields_empty() {
        let all = vec![tagged("1", &["Unknown"])];
        // "Unknown" is not in the catalog even though a record is tagged with it.
        assert!(filter(&all, "Unknown").is_empty());
    }

    #[test]
    fn catalog_category_with_no_members_yields_empty() {
        let all = vec![tagged("1", &["Cabins"])];
        assert!(filter(&all, "Play").is_empty());
    }

    #[test]
    fn label_lookup_is_case_insensitive() {
        let all = vec![tagged("1", &["Tiny homes"]), tagged("2", &["City"])];
        assert_eq!(ids(&filter(&all, "tiny homes")), vec!["1"]);
    }

    #[test]
    fn filter_by_none_is_identity() {
        let all = vec![tagged("1", &["City"]), tagged("2", &[])];
        assert_eq!(filter_by(&all, None), all);
        assert_eq!(ids(&filter_by(&all, Some(CategoryId::City))), vec!["1"]);
    }

    #[test]
    fn input_is_left_untouched() {
        let all = vec![tagged("1", &["City"]), tagged("2", &[])];
        let before = all.clone();
        let _ = filter(&all, "City");
        assert_eq!(all, before);
    }
}
