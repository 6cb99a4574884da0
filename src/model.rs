//! Payload types for assets, catalog views and favourites.
//!
//! Field names follow the platform's GraphQL responses (camelCase). GraphQL
//! returns `null` for absent lists, so list fields go through
//! [`null_as_default`].

use serde::{Deserialize, Deserializer, Serialize};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetKey {
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: Vec<String>,
}

impl AssetKey {
    pub fn new<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { path: path.into_iter().map(Into::into).collect() }
    }

    /// Path segments joined with `.`, the form `key:` conditions match against.
    pub fn dotted(&self) -> String {
        self.path.join(".")
    }

    /// Path segments joined with ` / ` for display and free-text search.
    pub fn display_path(&self) -> String {
        self.path.join(" / ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTag {
    pub key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub key: AssetKey,
    #[serde(default)]
    pub definition: Option<AssetDefinition>,
    #[serde(default)]
    pub asset_health: Option<AssetHealth>,
}

impl Asset {
    /// Upper-cased health status, `UNKNOWN` when the platform reported none.
    pub fn health(&self) -> String {
        self.asset_health
            .as_ref()
            .and_then(|h| h.asset_health.as_deref())
            .unwrap_or("UNKNOWN")
            .to_uppercase()
    }

    pub fn description(&self) -> Option<&str> {
        self.definition.as_ref()?.description.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDefinition {
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<AssetTag>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata_entries: Vec<MetadataEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetHealth {
    #[serde(default)]
    pub asset_health: Option<String>,
}

/// Metadata entries, discriminated by `__typename`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum MetadataEntry {
    TextMetadataEntry {
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        text: Option<String>,
    },
    TableMetadataEntry {
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        table: Option<Table>,
    },
    TableSchemaMetadataEntry {
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        schema: Option<TableSchema>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub schema: Option<TableSchema>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    #[serde(default, deserialize_with = "null_as_default")]
    pub columns: Vec<TableColumn>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<AssetTag>,
}

/// A saved catalog view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub selection: CatalogSelection,
}

/// Structured fields plus the free-text query of a catalog view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSelection {
    #[serde(default)]
    pub query_selection: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kinds: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<AssetTag>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: Vec<GroupSelector>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owners: Vec<AssetOwner>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub table_names: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub columns: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub column_tags: Vec<AssetTag>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSelector {
    pub group_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssetOwner {
    Team { team: String },
    User { email: String },
}

impl AssetOwner {
    pub fn name(&self) -> &str {
        match self {
            AssetOwner::Team { team } => team,
            AssetOwner::User { email } => email,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteAsset {
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: Vec<String>,
}

/// Everything the console filters over, as fetched from the platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub assets: Vec<Asset>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub catalog_views: Vec<CatalogView>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub favorites: Vec<FavoriteAsset>,
}

impl CatalogSnapshot {
    pub fn view(&self, id: &str) -> Option<&CatalogView> {
        self.catalog_views.iter().find(|v| v.id == id)
    }

    pub fn is_favorite(&self, asset: &Asset) -> bool {
        !asset.key.path.is_empty() && self.favorites.iter().any(|f| f.path == asset.key.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_with_nulls() {
        let json = r#"{
            "id": "a1",
            "key": {"path": ["raw", "orders"]},
            "definition": {
                "groupName": null,
                "description": null,
                "tags": null,
                "metadataEntries": [
                    {"__typename": "TextMetadataEntry", "label": "owner", "text": "team:data", "description": null},
                    {"__typename": "IntMetadataEntry", "label": "rows", "intValue": 12},
                    {"__typename": "TableSchemaMetadataEntry", "label": "dagster/column_schema",
                     "schema": {"columns": [{"name": "id", "type": "int", "tags": null}]}}
                ]
            },
            "assetHealth": null
        }"#;
        let asset: Asset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.key.dotted(), "raw.orders");
        assert_eq!(asset.health(), "UNKNOWN");
        let definition = asset.definition.unwrap();
        assert!(definition.tags.is_empty());
        assert_eq!(definition.metadata_entries.len(), 3);
        assert_eq!(definition.metadata_entries[1], MetadataEntry::Other);
    }

    #[test]
    fn test_catalog_view_selection() {
        let json = r#"{
            "id": "v1",
            "name": "dbt core",
            "selection": {
                "querySelection": "kind:\"dbt\"",
                "kinds": ["dbt"],
                "tags": [{"key": "tier", "value": "gold"}],
                "groups": [{"groupName": "core", "repositoryName": "__repository__"}],
                "owners": [{"__typename": "TeamAssetOwner", "team": "data"}, {"email": "a@b.c"}],
                "tableNames": null,
                "columnTags": null
            }
        }"#;
        let view: CatalogView = serde_json::from_str(json).unwrap();
        assert_eq!(view.selection.query_selection.as_deref(), Some("kind:\"dbt\""));
        assert_eq!(view.selection.groups[0].group_name, "core");
        let owners: Vec<_> = view.selection.owners.iter().map(AssetOwner::name).collect();
        assert_eq!(owners, vec!["data", "a@b.c"]);
        assert!(view.selection.table_names.is_empty());
        assert!(view.selection.columns.is_empty());
    }

    #[test]
    fn test_favorite_needs_exact_path() {
        let snapshot = CatalogSnapshot {
            favorites: vec![FavoriteAsset { path: vec!["raw".into(), "orders".into()] }],
            ..Default::default()
        };
        let fav = Asset { key: AssetKey::new(["raw", "orders"]), ..Default::default() };
        let prefix = Asset { key: AssetKey::new(["raw"]), ..Default::default() };
        assert!(snapshot.is_favorite(&fav));
        assert!(!snapshot.is_favorite(&prefix));
    }
}
