//! Canonical option catalog built from the DTO library.

use std::collections::BTreeMap;

use serde_json::Value;

use fieldmap_core::flatten;
use fieldmap_model::CanonicalOption;

/// Snapshot of every addressable leaf across the DTO library.
///
/// Rebuilt whenever the library changes; lookups always reflect the current
/// snapshot, so displayed examples never go stale.
#[derive(Debug, Clone, Default)]
pub struct OptionCatalog {
    options: Vec<CanonicalOption>,
    by_id: BTreeMap<String, usize>,
}

impl OptionCatalog {
    /// Flattens every DTO document into its leaf options, sorted by stable
    /// id (model name first, then path).
    pub fn from_library(library: &BTreeMap<String, Value>) -> Self {
        let mut options = Vec::new();
        for (dto_name, document) in library {
            for field in flatten(document) {
                options.push(CanonicalOption {
                    dto_name: dto_name.clone(),
                    path: field.path.clone(),
                    example: field.example(),
                });
            }
        }
        options.sort_by(|a, b| a.id().cmp(&b.id()));
        let by_id = options
            .iter()
            .enumerate()
            .map(|(idx, opt)| (opt.id(), idx))
            .collect();
        Self { options, by_id }
    }

    /// Resolves a stable target id against the current snapshot.
    pub fn resolve(&self, target_id: &str) -> Option<&CanonicalOption> {
        self.by_id.get(target_id).map(|&idx| &self.options[idx])
    }

    pub fn options(&self) -> &[CanonicalOption] {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Dropdown display strings, in catalog order.
    pub fn display_options(&self) -> Vec<String> {
        self.options.iter().map(CanonicalOption::display).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn library() -> BTreeMap<String, Value> {
        let mut lib = BTreeMap::new();
        lib.insert(
            "OrderDTO".to_string(),
            json!({"order": {"id": "String", "total": "Decimal"}}),
        );
        lib.insert("CustomerDTO".to_string(), json!({"name": "String"}));
        lib
    }

    #[test]
    fn catalog_covers_all_dto_leaves() {
        let catalog = OptionCatalog::from_library(&library());
        assert_eq!(catalog.len(), 3);
        let ids: Vec<String> = catalog.options().iter().map(CanonicalOption::id).collect();
        assert_eq!(
            ids,
            [
                "[CustomerDTO] name",
                "[OrderDTO] order.id",
                "[OrderDTO] order.total"
            ]
        );
    }

    #[test]
    fn resolve_matches_on_id_not_display() {
        let catalog = OptionCatalog::from_library(&library());
        let opt = catalog.resolve("[OrderDTO] order.id").unwrap();
        assert_eq!(opt.example, "String");
        assert!(catalog.resolve("[OrderDTO] order.id | String").is_none());
        assert!(catalog.resolve("[GoneDTO] x").is_none());
    }
}
