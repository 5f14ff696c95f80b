//! Decorative asset catalog: the creature models that can appear by the road.
//!
//! The catalog is static data, deserialized from JSON and validated once at
//! startup. Entries are never mutated afterwards.

use bevy::prelude::*;
use serde::Deserialize;

use crate::error::SceneryError;

/// Catalog shipped with the crate.
const DEFAULT_CATALOG_JSON: &str = include_str!("../data/catalog.json");

/// Rough footprint of a decorative model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

/// One decorative model that may be placed by the roadside.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecorativeAssetEntry {
    pub name: String,
    /// Model file, relative to the catalog's `base_path`.
    pub file: String,
    pub scale: f32,
    /// Lateral offset range `[min, max]` from the road centerline.
    pub distance: [f32; 2],
    pub size: SizeClass,
    /// Aerial models hover at `height` instead of standing on the ground.
    #[serde(default)]
    pub flying: bool,
    #[serde(default)]
    pub height: f32,
}

impl DecorativeAssetEntry {
    pub fn min_distance(&self) -> f32 {
        self.distance[0]
    }

    pub fn max_distance(&self) -> f32 {
        self.distance[1]
    }

    /// Ground clearance of a placed instance.
    pub fn elevation(&self) -> f32 {
        if self.flying {
            self.height
        } else {
            0.0
        }
    }

    fn validate(&self) -> Result<(), SceneryError> {
        let invalid = |what: &str| {
            Err(SceneryError::InvalidCatalog(format!(
                "entry '{}': {what}",
                self.name
            )))
        };
        if self.name.trim().is_empty() {
            return Err(SceneryError::InvalidCatalog(
                "entry with an empty name".to_string(),
            ));
        }
        if self.file.trim().is_empty() {
            return invalid("empty file name");
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return invalid("scale must be a positive number");
        }
        let [min, max] = self.distance;
        if !(min.is_finite() && max.is_finite()) || min > max {
            return invalid("distance must be a finite [min, max] range");
        }
        if !self.height.is_finite() {
            return invalid("height must be finite");
        }
        Ok(())
    }
}

/// The full decorative catalog.
#[derive(Resource, Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DecorationCatalogDef {
    #[serde(default)]
    pub base_path: String,
    pub entries: Vec<DecorativeAssetEntry>,
}

impl DecorationCatalogDef {
    /// Parse and validate a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self, SceneryError> {
        let catalog: Self = serde_json::from_str(json)?;
        for entry in &catalog.entries {
            entry.validate()?;
        }
        Ok(catalog)
    }

    /// The catalog embedded in the crate.
    pub fn builtin() -> Result<Self, SceneryError> {
        Self::from_json(DEFAULT_CATALOG_JSON)
    }

    /// Asset path of an entry's model.
    pub fn asset_path(&self, entry: &DecorativeAssetEntry) -> String {
        format!("{}{}", self.base_path, entry.file)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = DecorationCatalogDef::builtin().expect("builtin catalog must be valid");
        assert_eq!(catalog.entries.len(), 12);
        assert_eq!(catalog.entries[0].name, "Pikachu");
        assert_eq!(
            catalog.asset_path(&catalog.entries[0]),
            "models/pokemon/pikachu.glb"
        );
    }

    #[test]
    fn test_only_charizard_flies() {
        let catalog = DecorationCatalogDef::builtin().unwrap();
        let flyers: Vec<_> = catalog.entries.iter().filter(|e| e.flying).collect();
        assert_eq!(flyers.len(), 1);
        assert_eq!(flyers[0].name, "Charizard");
        assert_eq!(flyers[0].elevation(), 2.0);
        assert_eq!(flyers[0].size, SizeClass::Large);
    }

    #[test]
    fn test_height_ignored_for_ground_models() {
        let json = r#"{ "entries": [
            { "name": "Rock", "file": "rock.glb", "scale": 1.0, "distance": [1, 2],
              "size": "small", "height": 9 }
        ] }"#;
        let catalog = DecorationCatalogDef::from_json(json).unwrap();
        assert_eq!(catalog.entries[0].elevation(), 0.0);
        assert_eq!(catalog.asset_path(&catalog.entries[0]), "rock.glb");
    }

    #[test]
    fn test_inverted_distance_rejected() {
        let json = r#"{ "entries": [
            { "name": "Odd", "file": "odd.glb", "scale": 1.0, "distance": [10, 5], "size": "small" }
        ] }"#;
        let err = DecorationCatalogDef::from_json(json).unwrap_err();
        assert!(matches!(err, SceneryError::InvalidCatalog(_)), "got: {err}");
        assert!(format!("{err}").contains("Odd"));
    }

    #[test]
    fn test_non_positive_scale_rejected() {
        let json = r#"{ "entries": [
            { "name": "Flat", "file": "flat.glb", "scale": 0.0, "distance": [1, 2], "size": "medium" }
        ] }"#;
        assert!(DecorationCatalogDef::from_json(json).is_err());
    }

    #[test]
    fn test_unknown_size_is_parse_error() {
        let json = r#"{ "entries": [
            { "name": "Huge", "file": "huge.glb", "scale": 1.0, "distance": [1, 2], "size": "giant" }
        ] }"#;
        let err = DecorationCatalogDef::from_json(json).unwrap_err();
        assert!(matches!(err, SceneryError::Config(_)), "got: {err}");
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = DecorationCatalogDef::from_json(r#"{ "entries": [] }"#).unwrap();
        assert!(catalog.is_empty());
    }
}
