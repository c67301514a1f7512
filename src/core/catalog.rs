//! # Map Catalog
//!
//! The pool of map categories the veto runs over. Read-only after startup:
//! either the built-in pool or one loaded from a YAML file.

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog lookup and validation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown map category: {0}")]
    UnknownCategory(String),
    #[error("map pool has no categories")]
    EmptyPool,
    #[error("category '{0}' has no maps")]
    EmptyCategory(String),
    #[error("duplicate category name: {0}")]
    DuplicateCategory(String),
    #[error("map '{0}' appears in more than one category")]
    DuplicateMap(String),
}

/// One named category and its ordered map list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapCategory {
    pub name: String,
    pub maps: Vec<String>,
}

/// Ordered category → maps catalog.
///
/// Category order is preserved from the source (file or built-in pool) so
/// menus and intersection listings render deterministically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapCatalog {
    categories: Vec<MapCategory>,
}

impl MapCatalog {
    /// Build a catalog from explicit categories, validating the pool.
    pub fn new(categories: Vec<MapCategory>) -> std::result::Result<Self, CatalogError> {
        let catalog = MapCatalog { categories };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a YAML file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read map pool file: {path}"))?;
        let catalog: MapCatalog = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse map pool file: {path}"))?;
        catalog
            .validate()
            .with_context(|| format!("invalid map pool in {path}"))?;
        Ok(catalog)
    }

    fn validate(&self) -> std::result::Result<(), CatalogError> {
        if self.categories.is_empty() {
            return Err(CatalogError::EmptyPool);
        }
        let mut seen_categories = std::collections::HashSet::new();
        let mut seen_maps = std::collections::HashSet::new();
        for category in &self.categories {
            if !seen_categories.insert(category.name.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.name.clone()));
            }
            if category.maps.is_empty() {
                return Err(CatalogError::EmptyCategory(category.name.clone()));
            }
            for map in &category.maps {
                if !seen_maps.insert(map.as_str()) {
                    return Err(CatalogError::DuplicateMap(map.clone()));
                }
            }
        }
        Ok(())
    }

    /// Category names in catalog order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// Ordered map list for a category.
    pub fn maps_for(&self, name: &str) -> std::result::Result<&[String], CatalogError> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.maps.as_slice())
            .ok_or_else(|| CatalogError::UnknownCategory(name.to_string()))
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of maps across all categories.
    pub fn map_count(&self) -> usize {
        self.categories.iter().map(|c| c.maps.len()).sum()
    }
}

impl Default for MapCatalog {
    /// The built-in Overwatch pool.
    fn default() -> Self {
        let pool: &[(&str, &[&str])] = &[
            (
                "Control",
                &[
                    "Busan",
                    "Ilios",
                    "Lijang Tower",
                    "Nepal",
                    "Oasis",
                    "Antarctic Peninsula",
                    "Samoa",
                ],
            ),
            (
                "Escort",
                &[
                    "Circuit Royal",
                    "Dorado",
                    "Havana",
                    "Junkertown",
                    "Rialto",
                    "Route 66",
                    "Shambali Monastery",
                    "Watchpoint Gibraltar",
                ],
            ),
            ("Flashpoint", &["New Junk City", "Suravasa"]),
            (
                "Hybrid",
                &[
                    "Blizzard World",
                    "Eichenwalde",
                    "Hollywood",
                    "King's Row",
                    "Midtown",
                    "Numbani",
                    "Paraiso",
                ],
            ),
            (
                "Assault",
                &[
                    "Hanamura",
                    "Horizon Lunar Colony",
                    "Paris",
                    "Temple of Anubis",
                    "Volskaya Industries",
                ],
            ),
            ("Push", &["Colosseo", "Esperanca", "New Queen Street"]),
        ];

        MapCatalog {
            categories: pool
                .iter()
                .map(|(name, maps)| MapCategory {
                    name: (*name).to_string(),
                    maps: maps.iter().map(|m| (*m).to_string()).collect(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pool_has_six_categories() {
        let catalog = MapCatalog::default();
        assert_eq!(catalog.len(), 6);
        let names: Vec<&str> = catalog.category_names().collect();
        assert_eq!(
            names,
            vec!["Control", "Escort", "Flashpoint", "Hybrid", "Assault", "Push"]
        );
    }

    #[test]
    fn default_pool_map_counts() {
        let catalog = MapCatalog::default();
        assert_eq!(catalog.maps_for("Control").unwrap().len(), 7);
        assert_eq!(catalog.maps_for("Escort").unwrap().len(), 8);
        assert_eq!(
            catalog.maps_for("Flashpoint").unwrap(),
            &["New Junk City".to_string(), "Suravasa".to_string()]
        );
        assert_eq!(catalog.maps_for("Push").unwrap().len(), 3);
    }

    #[test]
    fn unknown_category_fails_lookup() {
        let catalog = MapCatalog::default();
        assert_eq!(
            catalog.maps_for("Deathmatch"),
            Err(CatalogError::UnknownCategory("Deathmatch".to_string()))
        );
    }

    #[test]
    fn yaml_pool_parses() {
        let yaml = r#"
categories:
  - name: Control
    maps: [Busan, Ilios]
  - name: Push
    maps: [Colosseo]
"#;
        let catalog: MapCatalog = serde_yaml::from_str(yaml).unwrap();
        catalog.validate().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.maps_for("Push").unwrap(), &["Colosseo".to_string()]);
    }

    #[test]
    fn validation_rejects_duplicate_map_across_categories() {
        let result = MapCatalog::new(vec![
            MapCategory {
                name: "Control".to_string(),
                maps: vec!["Busan".to_string()],
            },
            MapCategory {
                name: "Push".to_string(),
                maps: vec!["Busan".to_string()],
            },
        ]);
        assert_eq!(result.unwrap_err(), CatalogError::DuplicateMap("Busan".to_string()));
    }

    #[test]
    fn validation_rejects_empty_category() {
        let result = MapCatalog::new(vec![MapCategory {
            name: "Control".to_string(),
            maps: vec![],
        }]);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::EmptyCategory("Control".to_string())
        );
    }

    #[test]
    fn validation_rejects_empty_pool() {
        assert_eq!(MapCatalog::new(vec![]).unwrap_err(), CatalogError::EmptyPool);
    }
}
