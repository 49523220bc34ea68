//! アプリケーション設定管理モジュール
//!
//! XDGディレクトリを使用した設定ファイルの永続化と管理を提供します。

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::analytics::{CoachingThresholds, DEFAULT_RECENT_INTERACTIONS, DEFAULT_TOP_AGENTS};

/// データ生成設定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// 乱数シード（Noneなら起動ごとに異なるデータ）
    pub seed: Option<u64>,
}

/// ダッシュボード表示設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// 評価上位として表示する人数
    pub top_agents: usize,
    /// 直近の対応として表示する件数
    pub recent_interactions: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_agents: DEFAULT_TOP_AGENTS,
            recent_interactions: DEFAULT_RECENT_INTERACTIONS,
        }
    }
}

/// ログ設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// カスタムログディレクトリ（Noneの場合はXDGデフォルト使用）
    pub log_dir: Option<PathBuf>,
    /// ログレベル (trace/debug/info/warn/error)
    pub log_level: String,
    /// ファイル出力有効化
    pub enable_file_logging: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            log_level: "info".to_string(),
            enable_file_logging: false,
        }
    }
}

/// アプリケーション設定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,

    /// コーチング対象の判定しきい値
    #[serde(default)]
    pub coaching: CoachingThresholds,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// 設定管理マネージャー
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// XDG設定ディレクトリを使う設定マネージャーを作成
    pub fn new() -> Result<Self> {
        Self::with_path(Self::default_config_path()?)
    }

    /// 設定ファイルのパスを指定して作成
    pub fn with_path(config_path: impl Into<PathBuf>) -> Result<Self> {
        let config_path = config_path.into();

        // 設定ディレクトリを作成（存在しない場合）
        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        Ok(Self { config_path })
    }

    /// XDGディレクトリに基づく設定ファイルパスを取得
    pub fn default_config_path() -> Result<PathBuf> {
        let project_dirs = project_dirs()?;
        let config_file = project_dirs.config_dir().join("config.toml");

        debug!("Config file path: {}", config_file.display());

        Ok(config_file)
    }

    /// 設定を読み込み
    pub fn load_config(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            info!(
                "Config file not found, using default settings: {}",
                self.config_path.display()
            );
            return Ok(AppConfig::default());
        }

        let config_content = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config: AppConfig = toml::from_str(&config_content).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })?;

        info!(
            "✅ Configuration loaded from: {}",
            self.config_path.display()
        );

        Ok(config)
    }

    /// 設定を保存
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        let config_content =
            toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, config_content).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        info!("💾 Configuration saved to: {}", self.config_path.display());

        Ok(())
    }

    /// 設定ファイルパスを取得
    pub fn config_file_path(&self) -> &Path {
        &self.config_path
    }

    /// 設定をリセット（デフォルト値に戻す）
    pub fn reset_config(&self) -> Result<()> {
        self.save_config(&AppConfig::default())?;
        info!("🔄 Configuration reset to defaults");
        Ok(())
    }

    /// 設定ファイルが存在するかチェック
    pub fn config_exists(&self) -> bool {
        self.config_path.exists()
    }
}

/// ログファイルの既定ディレクトリ
pub fn default_log_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().join("logs"))
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "sifyfy", "callcoach").context("Failed to get project directories")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_default_thresholds() {
        let config = AppConfig::default();
        assert_eq!(config.coaching.negative_rate, 0.20);
        assert_eq!(config.coaching.resolution_rate, 0.60);
        assert_eq!(config.coaching.high_priority_negative_rate, 0.30);
        assert_eq!(config.dashboard.top_agents, 5);
        assert_eq!(config.dashboard.recent_interactions, 10);
        assert_eq!(config.data.seed, None);
    }

    #[test]
    fn test_config_manager_save_load() {
        let temp_dir = tempdir().unwrap();
        let manager = ConfigManager::with_path(temp_dir.path().join("nested/config.toml")).unwrap();

        let mut original_config = AppConfig::default();
        original_config.data.seed = Some(42);
        original_config.coaching.negative_rate = 0.25;

        manager.save_config(&original_config).unwrap();
        assert!(manager.config_exists());

        let loaded_config = manager.load_config().unwrap();
        assert_eq!(original_config, loaded_config);
    }

    #[test]
    fn test_config_load_nonexistent_file() {
        let temp_dir = tempdir().unwrap();
        let manager = ConfigManager::with_path(temp_dir.path().join("nonexistent.toml")).unwrap();

        // 存在しないファイルの読み込み時はデフォルトが返される
        assert_eq!(manager.load_config().unwrap(), AppConfig::default());
        assert!(!manager.config_exists());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("partial.toml");
        std::fs::write(&config_path, "[coaching]\nnegative_rate = 0.5\n").unwrap();

        let manager = ConfigManager::with_path(&config_path).unwrap();
        let config = manager.load_config().unwrap();

        assert_eq!(config.coaching.negative_rate, 0.5);
        assert_eq!(config.coaching.resolution_rate, 0.60);
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_config_load_corrupted_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("corrupted.toml");

        // 破損したTOMLファイルを作成
        std::fs::write(&config_path, "invalid toml content [unclosed section").unwrap();

        let manager = ConfigManager::with_path(&config_path).unwrap();
        let error = manager.load_config().unwrap_err();
        assert!(error.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_reset_config() {
        let temp_dir = tempdir().unwrap();
        let manager = ConfigManager::with_path(temp_dir.path().join("config.toml")).unwrap();

        let mut config = AppConfig::default();
        config.dashboard.top_agents = 2;
        manager.save_config(&config).unwrap();

        manager.reset_config().unwrap();
        assert_eq!(manager.load_config().unwrap(), AppConfig::default());
    }
}
