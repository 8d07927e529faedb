use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
};

use crate::entities::prize_entity as prizes;
use crate::error::{AppError, AppResult};
use crate::models::{AdminPrizeListResponse, PrizeResponse};

/// 奖品管理服务 (管理端库存 / 权重 / 启用开关)
#[derive(Clone)]
pub struct PrizeService {
    pool: DatabaseConnection,
}

impl PrizeService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 全部奖品 (含停用), 附带权重合计供管理端对照 100% 展示
    pub async fn list_all(&self) -> AppResult<AdminPrizeListResponse> {
        let list = prizes::Entity::find()
            .order_by_asc(prizes::Column::DisplayKey)
            .all(&self.pool)
            .await?;

        let weight_total = list.iter().map(|p| p.weight).sum();
        Ok(AdminPrizeListResponse {
            prizes: list.into_iter().map(Into::into).collect(),
            weight_total,
        })
    }

    /// 设置剩余库存 (负数拒绝)
    pub async fn set_remaining(&self, id: i64, remaining: i64) -> AppResult<PrizeResponse> {
        if remaining < 0 {
            return Err(AppError::ValidationError(
                "remaining must not be negative".to_string(),
            ));
        }
        let prize = self.find(id).await?;
        let mut am = prize.into_active_model();
        am.remaining = Set(remaining);
        am.updated_at = Set(Some(Utc::now()));
        Ok(am.update(&self.pool).await?.into())
    }

    /// 设置选择权重 (负数 / 非有限值拒绝)
    pub async fn set_weight(&self, id: i64, weight: f64) -> AppResult<PrizeResponse> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(AppError::ValidationError(
                "weight must be a non-negative number".to_string(),
            ));
        }
        let prize = self.find(id).await?;
        let mut am = prize.into_active_model();
        am.weight = Set(weight);
        am.updated_at = Set(Some(Utc::now()));
        Ok(am.update(&self.pool).await?.into())
    }

    /// 启用 / 停用奖品 (停用后不在转盘上展示也不可被抽中, 库存保留)
    pub async fn set_active(&self, id: i64, active: bool) -> AppResult<PrizeResponse> {
        let prize = self.find(id).await?;
        let mut am = prize.into_active_model();
        am.is_active = Set(active);
        am.updated_at = Set(Some(Utc::now()));
        Ok(am.update(&self.pool).await?.into())
    }

    async fn find(&self, id: i64) -> AppResult<prizes::Model> {
        prizes::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("prize {id} not found")))
    }
}
