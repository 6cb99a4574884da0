//! 配置模块，负责加载目录快照 JSON 文件

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::model::CatalogSnapshot;

/// 默认的快照文件名
pub const DEFAULT_SNAPSHOT_FILE: &str = "catalog_snapshot.json";

/// 快照加载错误
#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "配置错误: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    pub fn new(message: String) -> Self {
        Self { message }
    }
}

/// 控制台启动配置
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// 快照文件路径
    pub snapshot_path: PathBuf,
    /// 启动时选中的视图（`all`、`favorites` 或目录视图 id）
    pub default_view: Option<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_FILE),
            default_view: None,
        }
    }
}

impl CatalogSnapshot {
    /// 从JSON文件加载快照
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();

        // 检查文件是否存在
        if !path_ref.exists() {
            return Err(ConfigError::new(format!(
                "快照文件不存在: {}",
                path_ref.display()
            )));
        }

        let content = fs::read_to_string(path_ref).map_err(|e| {
            ConfigError::new(format!("无法读取快照文件 {}: {}", path_ref.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            ConfigError::new(format!("无法解析快照文件 {}: {}", path_ref.display(), e))
        })
    }

    /// 加载快照，失败时记录警告并返回空快照
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_json_file(path.as_ref()) {
            Ok(snapshot) => {
                info!(
                    path = %path.as_ref().display(),
                    assets = snapshot.assets.len(),
                    views = snapshot.catalog_views.len(),
                    "loaded catalog snapshot"
                );
                snapshot
            }
            Err(e) => {
                warn!(error = %e, "using an empty catalog snapshot");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("asset_selector_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_load_valid_snapshot() {
        let temp_file = temp_path("valid.json");
        let mut file = fs::File::create(&temp_file).unwrap();
        writeln!(file, r#"{{
            "assets": [{{"id": "1", "key": {{"path": ["raw", "orders"]}}}}],
            "catalogViews": [{{"id": "v1", "name": "All dbt", "selection": {{"querySelection": "kind:dbt"}}}}],
            "favorites": null
        }}"#).unwrap();

        let snapshot = CatalogSnapshot::from_json_file(&temp_file).unwrap();
        assert_eq!(snapshot.assets.len(), 1);
        assert_eq!(snapshot.assets[0].key.dotted(), "raw.orders");
        assert_eq!(snapshot.view("v1").map(|v| v.name.as_str()), Some("All dbt"));
        assert!(snapshot.favorites.is_empty());

        // 清理
        fs::remove_file(&temp_file).ok();
    }

    #[test]
    fn test_invalid_json_snapshot() {
        let temp_file = temp_path("invalid.json");
        let mut file = fs::File::create(&temp_file).unwrap();
        writeln!(file, "invalid json").unwrap();

        let result = CatalogSnapshot::from_json_file(&temp_file);
        assert!(result.is_err());

        fs::remove_file(&temp_file).ok();
    }

    #[test]
    fn test_missing_file() {
        let result = CatalogSnapshot::from_json_file("non_existent_snapshot.json");
        assert!(result.unwrap_err().message.contains("non_existent_snapshot.json"));
    }

    #[test]
    fn test_missing_file_falls_back_to_empty() {
        let snapshot = CatalogSnapshot::load_or_empty("non_existent_snapshot.json");
        assert_eq!(snapshot, CatalogSnapshot::default());
    }

    #[test]
    fn test_empty_object_is_empty_snapshot() {
        let temp_file = temp_path("empty.json");
        fs::write(&temp_file, "{}").unwrap();

        let snapshot = CatalogSnapshot::from_json_file(&temp_file).unwrap();
        fs::remove_file(&temp_file).ok();
        assert!(snapshot.assets.is_empty());
        assert!(snapshot.catalog_views.is_empty());
    }

    #[test]
    fn test_default_console_config() {
        let config = ConsoleConfig::default();
        assert_eq!(config.snapshot_path, PathBuf::from(DEFAULT_SNAPSHOT_FILE));
        assert!(config.default_view.is_none());
    }
}
