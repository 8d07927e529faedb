use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::engine::SpinPhase;
use crate::entities::{PrizeKind, prize_entity, spin_record_entity};

/// 转盘上的一个扇区奖品
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeResponse {
    /// 奖品ID
    pub id: i64,
    /// 转盘顺序键 (升序即扇区顺序)
    pub display_key: i32,
    /// 名称
    pub name: String,
    /// 图片引用
    pub image: String,
    /// 类别 (prize / consolation)
    pub kind: PrizeKind,
    /// 剩余库存 (0 = 已抽完, 仍展示但不可被抽中)
    pub remaining: i64,
    /// 是否参与转盘
    pub is_active: bool,
    /// 选择权重 (百分比约定)
    pub weight: f64,
}

impl From<prize_entity::Model> for PrizeResponse {
    fn from(m: prize_entity::Model) -> Self {
        PrizeResponse {
            id: m.id,
            display_key: m.display_key,
            name: m.name,
            image: m.image,
            kind: m.kind,
            remaining: m.remaining,
            is_active: m.is_active,
            weight: m.weight,
        }
    }
}

/// 转盘快照 (kiosk 主页面渲染用)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WheelSnapshotResponse {
    /// 启用的奖品, 按 display_key 升序 (含库存为 0 的扇区)
    pub prizes: Vec<PrizeResponse>,
    /// 所有奖品库存耗尽 (或无奖品): 前端应展示终态页而不再发起抽奖
    pub exhausted: bool,
    /// 当前抽奖阶段
    pub phase: SpinPhase,
    /// 转盘当前角度 [0, 360)
    pub angle_deg: f64,
}

/// 抽奖后返回给前端的中奖奖品 (隐藏库存等管理字段)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WonPrizeResponse {
    /// 奖品ID
    pub id: i64,
    /// 名称
    pub name: String,
    /// 图片引用
    pub image: String,
}

impl From<prize_entity::Model> for WonPrizeResponse {
    fn from(m: prize_entity::Model) -> Self {
        WonPrizeResponse {
            id: m.id,
            name: m.name,
            image: m.image,
        }
    }
}

/// 抽奖结果
/// - prize: 中奖, remaining 为动画结束落库后的预计剩余库存
/// - consolation: 谢谢参与, 不落库
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpinOutcomeResponse {
    Prize {
        prize: WonPrizeResponse,
        remaining: i64,
    },
    Consolation,
}

/// 旋转动画目标
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RotationPlanResponse {
    /// 动画终点角度 (在当前角度上单调累加)
    pub target_angle_deg: f64,
    /// 本次旋转总角度
    pub total_rotation_deg: f64,
    /// 动画时长 (毫秒); 结果落库在该时长后发生
    pub duration_ms: u64,
    /// 动画属性变更前的样式复位间隔 (毫秒)
    pub reset_delay_ms: u64,
}

/// 抽奖 (Spin) 响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SpinResponse {
    /// 抽奖事务ID
    pub spin_id: Uuid,
    /// 中奖扇区在转盘顺序中的下标
    pub winner_index: u32,
    /// 抽奖结果
    pub outcome: SpinOutcomeResponse,
    /// 旋转动画目标
    pub rotation: RotationPlanResponse,
}

/// 抽奖历史记录响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SpinRecordResponse {
    /// 记录ID
    pub id: i64,
    /// 奖品ID
    pub prize_id: i64,
    /// 奖品名称 (历史快照)
    pub prize_name: String,
    /// 本次抽奖后的剩余库存
    pub stock_after: i64,
    /// 抽奖时间
    pub created_at: DateTime<Utc>,
}

impl From<spin_record_entity::Model> for SpinRecordResponse {
    fn from(m: spin_record_entity::Model) -> Self {
        SpinRecordResponse {
            id: m.id,
            prize_id: m.prize_id,
            prize_name: m.prize_name,
            stock_after: m.stock_after,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// 抽奖历史查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct HistoryQuery {
    /// 页码 (默认 1)
    pub page: Option<u32>,
    /// 每页数量 (默认 20)
    pub per_page: Option<u32>,
}
