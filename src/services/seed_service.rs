use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set, TransactionTrait,
};

use crate::config::PrizeSeed;
use crate::entities::prize_entity as prizes;
use crate::error::AppResult;
use crate::models::ReconcileSummaryResponse;

/// 播种对账服务: 把配置里的奖品列表按 display_key 对账到存储。
///
/// - 对账 (reconcile): 启动时调用; 配置里没有的 display_key 行被清除,
///   缺失的插入, 可变字段 (名称/图片/类别/启用/权重) 就地更新,
///   remaining 一律保留存储值不被重置
/// - 重载 (reload): 管理端显式触发; 清空后全量重新播种, remaining 一并重置
#[derive(Clone)]
pub struct SeedService {
    pool: DatabaseConnection,
    seeds: Vec<PrizeSeed>,
}

impl SeedService {
    pub fn new(pool: DatabaseConnection, seeds: Vec<PrizeSeed>) -> Self {
        Self { pool, seeds }
    }

    /// 对账 (幂等: 配置不变时第二次运行 0 插入 / 0 更新 / 0 清除)
    ///
    /// 配置里 display_key 重复时不做校验, 后写覆盖先写。
    pub async fn reconcile(&self) -> AppResult<ReconcileSummaryResponse> {
        let txn = self.pool.begin().await?;
        let mut summary = ReconcileSummaryResponse {
            inserted: 0,
            updated: 0,
            purged: 0,
        };

        // 清除配置中不认识的 display_key
        let configured: HashSet<i32> = self.seeds.iter().map(|s| s.display_key).collect();
        let purge = if configured.is_empty() {
            prizes::Entity::delete_many().exec(&txn).await?
        } else {
            prizes::Entity::delete_many()
                .filter(prizes::Column::DisplayKey.is_not_in(configured.iter().copied()))
                .exec(&txn)
                .await?
        };
        summary.purged = purge.rows_affected as u32;

        let mut existing: HashMap<i32, prizes::Model> = prizes::Entity::find()
            .all(&txn)
            .await?
            .into_iter()
            .map(|p| (p.display_key, p))
            .collect();

        for seed in &self.seeds {
            let kind = seed.kind();
            match existing.get(&seed.display_key) {
                Some(row) => {
                    let unchanged = row.name == seed.name
                        && row.image == seed.image
                        && row.kind == kind
                        && row.is_active == seed.active
                        && row.weight == seed.weight;
                    if unchanged {
                        continue;
                    }
                    let mut am = row.clone().into_active_model();
                    am.name = Set(seed.name.clone());
                    am.image = Set(seed.image.clone());
                    am.kind = Set(kind);
                    am.is_active = Set(seed.active);
                    am.weight = Set(seed.weight);
                    am.updated_at = Set(Some(Utc::now()));
                    let updated = am.update(&txn).await?;
                    existing.insert(seed.display_key, updated);
                    summary.updated += 1;
                }
                None => {
                    let inserted = self.insert_seed(&txn, seed).await?;
                    existing.insert(seed.display_key, inserted);
                    summary.inserted += 1;
                }
            }
        }

        txn.commit().await?;

        log::info!(
            "Prize seed reconciled: {} inserted, {} updated, {} purged",
            summary.inserted,
            summary.updated,
            summary.purged
        );
        Ok(summary)
    }

    /// 全量重载: 清空奖品表后重新播种 (remaining 重置为配置值)。
    /// 抽奖历史不受影响 (记录冗余存了奖品名)。
    pub async fn reload(&self) -> AppResult<ReconcileSummaryResponse> {
        let txn = self.pool.begin().await?;

        let purge = prizes::Entity::delete_many().exec(&txn).await?;

        // 重复 display_key 后写覆盖先写
        let mut dedup: Vec<&PrizeSeed> = Vec::new();
        for seed in &self.seeds {
            if let Some(pos) = dedup.iter().position(|s| s.display_key == seed.display_key) {
                dedup[pos] = seed;
            } else {
                dedup.push(seed);
            }
        }

        let mut inserted = 0u32;
        for seed in dedup {
            self.insert_seed(&txn, seed).await?;
            inserted += 1;
        }

        txn.commit().await?;

        log::info!(
            "Prize table reloaded from seed config: {} wiped, {} inserted",
            purge.rows_affected,
            inserted
        );
        Ok(ReconcileSummaryResponse {
            inserted,
            updated: 0,
            purged: purge.rows_affected as u32,
        })
    }

    async fn insert_seed<C: sea_orm::ConnectionTrait>(
        &self,
        conn: &C,
        seed: &PrizeSeed,
    ) -> Result<prizes::Model, sea_orm::DbErr> {
        let now = Utc::now();
        prizes::ActiveModel {
            display_key: Set(seed.display_key),
            name: Set(seed.name.clone()),
            image: Set(seed.image.clone()),
            kind: Set(seed.kind()),
            remaining: Set(seed.remaining.max(0)),
            is_active: Set(seed.active),
            weight: Set(seed.weight),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(conn)
        .await
    }
}
