//! Catalog view membership and the asset list filter pass.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::ast::SelectionQuery;
use crate::evaluator::AssetPredicate;
use crate::metadata::AssetMetadata;
use crate::model::{Asset, CatalogSelection, CatalogSnapshot, CatalogView};
use crate::parser::parse_query;

/// A catalog view ready to test assets: structured pre-filters first, then
/// the parsed query selection.
pub struct ViewFilter<'a> {
    selection: &'a CatalogSelection,
    query: SelectionQuery,
}

impl<'a> ViewFilter<'a> {
    pub fn new(view: &'a CatalogView) -> Self {
        let selection = &view.selection;
        let query = parse_query(selection.query_selection.as_deref().unwrap_or_default());
        Self { selection, query }
    }

    pub fn query(&self) -> &SelectionQuery {
        &self.query
    }

    /// Each non-empty structured field must share at least one value with
    /// the asset.
    fn passes_structured(&self, metadata: &AssetMetadata) -> bool {
        let s = self.selection;
        intersects(s.kinds.iter().map(String::as_str), |v| metadata.kinds.contains(v))
            && intersects(s.tags.iter().map(|t| t.key.as_str()), |v| metadata.tags.contains(v))
            && intersects(s.groups.iter().map(|g| g.group_name.as_str()), |v| {
                metadata.groups.contains(v)
            })
            && intersects(s.owners.iter().map(|o| o.name()), |v| metadata.owners.contains(v))
            && intersects(s.table_names.iter().map(String::as_str), |v| {
                metadata.table_names.contains(v)
            })
            && intersects(s.columns.iter().map(String::as_str), |v| metadata.columns.contains(v))
            && intersects(s.column_tags.iter().map(|t| t.key.as_str()), |v| {
                metadata.column_tags.contains(v)
            })
    }
}

/// True when `wanted` is empty or any of its values is present.
fn intersects<'v, I, F>(wanted: I, present: F) -> bool
where
    I: IntoIterator<Item = &'v str>,
    F: Fn(&str) -> bool,
{
    let mut wanted = wanted.into_iter().peekable();
    wanted.peek().is_none() || wanted.any(|v| present(v))
}

impl AssetPredicate for ViewFilter<'_> {
    fn matches(&self, metadata: &AssetMetadata) -> bool {
        if !self.passes_structured(metadata) {
            debug!(key = %metadata.key, "rejected by structured selection");
            return false;
        }
        self.query.matches(metadata)
    }
}

/// Health states the list can be narrowed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthFilter {
    #[default]
    All,
    Healthy,
    Warning,
    Degraded,
}

impl HealthFilter {
    fn accepts(self, asset: &Asset) -> bool {
        match self {
            HealthFilter::All => true,
            other => asset.health() == other.to_string().to_uppercase(),
        }
    }
}

impl fmt::Display for HealthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HealthFilter::All => "all",
            HealthFilter::Healthy => "healthy",
            HealthFilter::Warning => "warning",
            HealthFilter::Degraded => "degraded",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownHealthFilter(pub String);

impl fmt::Display for UnknownHealthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown health filter '{}', expected all, healthy, warning or degraded", self.0)
    }
}

impl std::error::Error for UnknownHealthFilter {}

impl FromStr for HealthFilter {
    type Err = UnknownHealthFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(HealthFilter::All),
            "healthy" => Ok(HealthFilter::Healthy),
            "warning" => Ok(HealthFilter::Warning),
            "degraded" => Ok(HealthFilter::Degraded),
            _ => Err(UnknownHealthFilter(s.to_string())),
        }
    }
}

/// Which slice of the catalog is shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewSelection {
    #[default]
    All,
    Favorites,
    /// A saved catalog view, by id.
    Catalog(String),
}

impl From<&str> for ViewSelection {
    fn from(id: &str) -> Self {
        match id {
            "all" => ViewSelection::All,
            "favorites" => ViewSelection::Favorites,
            other => ViewSelection::Catalog(other.to_string()),
        }
    }
}

/// The filters applied to the asset list, in order: search, health, view.
#[derive(Debug, Clone, Default)]
pub struct AssetFilter {
    /// Case-insensitive text matched against the key path and description.
    pub search: Option<String>,
    pub health: HealthFilter,
    pub view: ViewSelection,
}

impl AssetFilter {
    pub fn apply<'a>(&self, snapshot: &'a CatalogSnapshot) -> Vec<&'a Asset> {
        let mut assets: Vec<&Asset> = snapshot.assets.iter().collect();

        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            assets.retain(|asset| matches_search(asset, &needle));
        }

        if self.health != HealthFilter::All {
            assets.retain(|asset| self.health.accepts(asset));
        }

        match &self.view {
            ViewSelection::All => {}
            ViewSelection::Favorites => assets.retain(|asset| snapshot.is_favorite(asset)),
            ViewSelection::Catalog(id) => match snapshot.view(id) {
                Some(view) => {
                    let filter = ViewFilter::new(view);
                    assets.retain(|asset| filter.matches(&AssetMetadata::from_asset(asset)));
                }
                None => warn!(view = %id, "unknown catalog view, showing all assets"),
            },
        }

        assets
    }
}

fn matches_search(asset: &Asset, needle: &str) -> bool {
    asset.key.display_path().to_lowercase().contains(needle)
        || asset.description().is_some_and(|d| d.to_lowercase().contains(needle))
}

/// The assets that satisfy an ad hoc query.
pub fn select<'a, I>(assets: I, query: &SelectionQuery) -> Vec<&'a Asset>
where
    I: IntoIterator<Item = &'a Asset>,
{
    assets
        .into_iter()
        .filter(|asset| query.matches(&AssetMetadata::from_asset(asset)))
        .collect()
}
