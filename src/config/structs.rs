use serde::{Deserialize, Serialize};

/// 静态配置（从 TOML 加载，启动时使用）
///
/// 包含：
/// - storage: 本地存储后端、数据目录、存储键
/// - shortcode: 短码长度、生成重试次数、默认有效期
/// - logging: 本地日志配置
/// - remote_log: 远程日志客户端配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub shortcode: ShortcodeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub remote_log: RemoteLogConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config file > 默认值
    /// ENV 前缀：UK，分隔符：__
    /// 示例：UK__SHORTCODE__LENGTH=8
    pub fn load(path: Option<&str>) -> Self {
        use config::{Config, Environment, File};

        let path = path.unwrap_or("config.toml");

        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("UK")
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 本地存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// `file` or `memory`
    #[serde(default = "default_storage_backend")]
    pub backend: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Key holding the whole record set; the file backend stores it as `<key>.json`
    #[serde(default = "default_storage_key")]
    pub key: String,
}

/// 短码配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortcodeConfig {
    #[serde(default = "default_code_length")]
    pub length: usize,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_validity_minutes")]
    pub default_validity_minutes: u32,
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// 远程日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteLogConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_remote_endpoint")]
    pub endpoint: String,
    /// Bearer token; falls back to `LOGGING_API_KEY` / `API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_remote_stack")]
    pub stack: String,
    #[serde(default = "default_remote_timeout_secs")]
    pub timeout_secs: u64,
}

impl RemoteLogConfig {
    /// 配置中的 api_key 优先，其次读取环境变量
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("LOGGING_API_KEY").ok())
            .or_else(|| std::env::var("API_KEY").ok())
            .filter(|k| !k.is_empty())
    }
}

// ============================================================
// Default value functions
// ============================================================

fn default_storage_backend() -> String {
    "file".to_string()
}

fn default_data_dir() -> String {
    ".".to_string()
}

fn default_storage_key() -> String {
    "shortenedUrls".to_string()
}

fn default_code_length() -> usize {
    6
}

fn default_max_attempts() -> u32 {
    100
}

fn default_validity_minutes() -> u32 {
    30
}

fn default_max_batch_size() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    false
}

fn default_remote_endpoint() -> String {
    "http://20.244.56.144/evaluation-service/logs".to_string()
}

fn default_remote_stack() -> String {
    "frontend".to_string()
}

fn default_remote_timeout_secs() -> u64 {
    2
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            data_dir: default_data_dir(),
            key: default_storage_key(),
        }
    }
}

impl Default for ShortcodeConfig {
    fn default() -> Self {
        Self {
            length: default_code_length(),
            max_attempts: default_max_attempts(),
            default_validity_minutes: default_validity_minutes(),
            max_batch_size: default_max_batch_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl Default for RemoteLogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_remote_endpoint(),
            api_key: None,
            stack: default_remote_stack(),
            timeout_secs: default_remote_timeout_secs(),
        }
    }
}
