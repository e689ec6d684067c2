use std::{env, fs, path::PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// 服务配置
///
/// 先读取 `BLIO_CONFIG` 指向的 TOML 文件（可选），再用环境变量覆盖：
///
/// - `BLIO_STORE`：存储文件路径，未设置时使用内存存储
/// - `BLIO_LISTEN`：监听地址，默认 `0.0.0.0:3000`
/// - `BLIO_SAMPLE_DATA`：没有内容时是否填充示例数据，默认 `true`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: Option<PathBuf>,
    pub listen: String,
    pub sample_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: None,
            listen: "0.0.0.0:3000".to_string(),
            sample_data: true,
        }
    }
}

impl Config {
    pub fn from_toml(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(Into::into)
    }

    pub fn from_env() -> Result<Self> {
        let mut config = match env::var("BLIO_CONFIG") {
            Ok(path) => Self::from_toml(&fs::read_to_string(path)?)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(store) = var("BLIO_STORE").filter(|s| !s.is_empty()) {
            self.store = Some(PathBuf::from(store));
        }
        if let Some(listen) = var("BLIO_LISTEN").filter(|s| !s.is_empty()) {
            self.listen = listen;
        }
        if let Some(flag) = var("BLIO_SAMPLE_DATA") {
            self.sample_data = match flag.trim() {
                "1" | "true" | "TRUE" => true,
                "0" | "false" | "FALSE" => false,
                _ => return Err(Error::InvalidInput("BLIO_SAMPLE_DATA must be true or false")),
            };
        }
        Ok(())
    }
}
