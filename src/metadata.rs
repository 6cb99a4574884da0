//! The flat metadata record a selection query is evaluated against.

use std::collections::BTreeSet;

use crate::ast::Field;
use crate::model::{Asset, MetadataEntry, TableColumn};

/// Tag keys with this prefix name the asset's kind.
pub const KIND_TAG_PREFIX: &str = "dagster/kind/";

/// Label of the text metadata entry that names an owner.
pub const OWNER_LABEL: &str = "owner";

/// Metadata extracted from one asset. Built per asset per filter pass and
/// dropped afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetMetadata {
    /// Dotted key path, e.g. `raw.orders`.
    pub key: String,
    pub kinds: BTreeSet<String>,
    pub groups: BTreeSet<String>,
    pub tags: BTreeSet<String>,
    pub owners: BTreeSet<String>,
    pub table_names: BTreeSet<String>,
    pub columns: BTreeSet<String>,
    pub column_tags: BTreeSet<String>,
}

impl AssetMetadata {
    pub fn from_asset(asset: &Asset) -> Self {
        let mut metadata = AssetMetadata { key: asset.key.dotted(), ..Default::default() };

        let Some(definition) = &asset.definition else {
            return metadata;
        };

        for tag in &definition.tags {
            if let Some(kind) = tag.key.strip_prefix(KIND_TAG_PREFIX) {
                metadata.kinds.insert(kind.to_string());
            }
            metadata.tags.insert(tag.key.clone());
        }

        if let Some(group) = &definition.group_name {
            metadata.groups.insert(group.clone());
        }

        for entry in &definition.metadata_entries {
            match entry {
                MetadataEntry::TextMetadataEntry { label, text } => {
                    if label.as_deref() == Some(OWNER_LABEL) {
                        if let Some(owner) = text {
                            metadata.owners.insert(owner.clone());
                        }
                    }
                }
                MetadataEntry::TableMetadataEntry { table: Some(table), .. } => {
                    if let Some(name) = &table.name {
                        metadata.table_names.insert(name.clone());
                    }
                    if let Some(schema) = &table.schema {
                        metadata.add_columns(&schema.columns);
                    }
                }
                MetadataEntry::TableSchemaMetadataEntry { schema: Some(schema), .. } => {
                    metadata.add_columns(&schema.columns);
                }
                _ => {}
            }
        }

        metadata
    }

    fn add_columns(&mut self, columns: &[TableColumn]) {
        for column in columns {
            self.columns.insert(column.name.clone());
            self.column_tags.extend(column.tags.iter().map(|t| t.key.clone()));
        }
    }

    /// The set a membership condition on `field` tests against.
    pub fn values(&self, field: Field) -> &BTreeSet<String> {
        match field {
            Field::Kind => &self.kinds,
            Field::Group => &self.groups,
            Field::Tag => &self.tags,
            Field::Owner => &self.owners,
            Field::TableName => &self.table_names,
            Field::Column => &self.columns,
            Field::ColumnTag => &self.column_tags,
        }
    }
}
