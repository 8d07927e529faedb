use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::PrizeResponse;

/// 管理端奖品列表 (含停用奖品)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminPrizeListResponse {
    /// 全部奖品, 按 display_key 升序
    pub prizes: Vec<PrizeResponse>,
    /// 权重合计 (仅展示参考, 期望 100 但不强制)
    pub weight_total: f64,
}

/// 修改剩余库存
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpdateRemainingRequest {
    pub remaining: i64,
}

/// 修改选择权重
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpdateWeightRequest {
    pub weight: f64,
}

/// 设置启用状态
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SetActiveRequest {
    pub active: bool,
}

/// 播种对账结果
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReconcileSummaryResponse {
    /// 新插入的奖品数
    pub inserted: u32,
    /// 就地更新的奖品数
    pub updated: u32,
    /// 清除的无主奖品数
    pub purged: u32,
}

/// 清空抽奖历史结果
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClearHistoryResponse {
    pub deleted: u64,
}
