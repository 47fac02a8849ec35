use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};

use crate::config::defaults::DefaultConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 扫描配置
    pub scan: ScanConfig,

    /// 报告配置
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// 读缓冲区大小（字节）
    pub buffer_size: usize,

    /// 最大扫描深度
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// 输出格式
    pub format: ReportFormat,

    /// 百分比保留的小数位数
    pub precision: usize,

    /// 是否在文本报告末尾显示耗时
    pub show_duration: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// 纯文本
    #[default]
    Text,
    /// JSON 格式
    Json,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            buffer_size: DefaultConfig::BUFFER_SIZE,
            max_depth: None,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Text,
            precision: DefaultConfig::PRECISION,
            show_duration: false,
        }
    }
}

impl Config {
    /// 从文件加载配置
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件 {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("配置文件格式错误 {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        // 确保目录存在
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// 获取默认配置文件路径
    pub fn default_config_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("无法找到配置目录"))?;
        path.push(DefaultConfig::APP_DIR);
        path.push(DefaultConfig::CONFIG_FILE);
        Ok(path)
    }

    /// 加载默认位置的配置，文件不存在时使用默认值（不会写入文件）
    pub fn load_or_default() -> Self {
        match Self::default_config_path() {
            Ok(path) => Self::load_or_fallback(&path),
            Err(err) => {
                tracing::debug!("跳过默认配置文件: {}", err);
                Self::default()
            }
        }
    }

    /// 加载指定位置的配置；文件缺失或无效时退回默认值
    ///
    /// 只用于隐式的默认配置文件，显式指定的配置文件走 `load_from_file`。
    pub fn load_or_fallback(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("忽略无效的配置文件，使用默认配置: {:#}", err);
                Self::default()
            }
        }
    }

    /// 检查配置取值
    pub fn validate(&self) -> Result<()> {
        if self.scan.buffer_size == 0 {
            anyhow::bail!("scan.buffer_size 必须大于 0");
        }
        if self.report.precision > DefaultConfig::MAX_PRECISION {
            anyhow::bail!(
                "report.precision 不能超过 {}",
                DefaultConfig::MAX_PRECISION
            );
        }
        Ok(())
    }
}
