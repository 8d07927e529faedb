#![allow(dead_code)]

use jadida_backend::config::{PrizeSeed, WheelConfig};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// 内存 SQLite + 真实迁移; 单连接保证 :memory: 库在测试期间不丢
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1).min_connections(1);

    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub fn seed(display_key: i32, name: &str, remaining: i64, weight: f64) -> PrizeSeed {
    PrizeSeed {
        display_key,
        name: name.to_string(),
        image: String::new(),
        kind: None,
        remaining,
        active: true,
        weight,
    }
}

/// 定时提交立即执行 (测试里配合 settle 使用)
pub fn instant_timing() -> WheelConfig {
    WheelConfig {
        spin_duration_ms: 0,
        spin_reset_delay_ms: 0,
    }
}
