use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;

use crate::entities::PrizeKind;

/// 名称中出现该标记即视为谢谢参与类奖品 (区分大小写的子串匹配)。
/// 仅在播种配置未显式给出 kind 时作为兼容约定使用。
pub const CONSOLATION_NAME_MARKER: &str = "Prochaine";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub wheel: WheelConfig,
    /// 转盘播种配置, 按 display_key 对账到存储
    #[serde(default = "default_prizes")]
    pub prizes: Vec<PrizeSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://jadida.db?mode=rwc".to_string(),
            max_connections: 10,
        }
    }
}

/// 抽奖时序 (毫秒)
/// - spin_duration_ms: 动画时长; 库存扣减与历史写入推迟到动画结束
/// - spin_reset_delay_ms: 动画属性变更前的样式复位间隔, 原样回传给前端
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelConfig {
    pub spin_duration_ms: u64,
    pub spin_reset_delay_ms: u64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            spin_duration_ms: 3000,
            spin_reset_delay_ms: 50,
        }
    }
}

/// 单个奖品的播种定义
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrizeSeed {
    pub display_key: i32,
    pub name: String,
    #[serde(default)]
    pub image: String,
    /// 未给出时按名称标记推断 (含 "Prochaine" 即谢谢参与)
    #[serde(default)]
    pub kind: Option<PrizeKind>,
    pub remaining: i64,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub weight: f64,
}

fn default_active() -> bool {
    true
}

impl PrizeSeed {
    pub fn kind(&self) -> PrizeKind {
        self.kind.unwrap_or({
            if self.name.contains(CONSOLATION_NAME_MARKER) {
                PrizeKind::Consolation
            } else {
                PrizeKind::Prize
            }
        })
    }
}

/// 内置播种列表 (config.toml 未提供 [[prizes]] 时使用)
fn default_prizes() -> Vec<PrizeSeed> {
    fn seed(display_key: i32, name: &str, image: &str, remaining: i64) -> PrizeSeed {
        PrizeSeed {
            display_key,
            name: name.to_string(),
            image: image.to_string(),
            kind: None,
            remaining,
            active: true,
            weight: 0.0,
        }
    }

    vec![
        seed(1, "Air Fryer", "/images/products/airfryer.png", 1),
        seed(2, "A la Prochaine", "/images/products/prochaine.png", 999_999),
        seed(3, "Frying Pan", "/images/products/frying.png", 50),
        seed(4, "Magnet Jadida 1", "/images/products/magnet1.png", 50),
        seed(5, "Magnet", "/images/products/magnet3.png", 50),
        seed(6, "Pince", "/images/products/pince.png", 20),
        seed(7, "A la Prochaine", "/images/products/prochaine.png", 999_999),
        seed(8, "Tablier", "/images/products/tablier.png", 30),
    ]
}

impl Config {
    pub fn from_toml() -> anyhow::Result<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件, 不存在则使用默认值 + 环境变量
        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => toml::from_str(&config_str)
                .with_context(|| format!("解析配置文件失败: {config_path}"))?,
            Err(e) if e.kind() == ErrorKind::NotFound => Config {
                server: ServerConfig::default(),
                database: DatabaseConfig::default(),
                wheel: WheelConfig::default(),
                prizes: default_prizes(),
            },
            Err(e) => {
                return Err(anyhow::anyhow!("无法读取配置文件 {config_path}: {e}"));
            }
        };

        // 环境变量覆盖 (即便文件存在时也覆盖)
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("SPIN_DURATION_MS")
            && let Ok(ms) = v.parse()
        {
            config.wheel.spin_duration_ms = ms;
        }
        if let Ok(v) = env::var("SPIN_RESET_DELAY_MS")
            && let Ok(ms) = v.parse()
        {
            config.wheel.spin_reset_delay_ms = ms;
        }

        Ok(config)
    }
}
