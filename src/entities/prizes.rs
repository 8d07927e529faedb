use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 奖品类别
/// - prize: 真实奖品, 中奖后扣库存并写入历史
/// - consolation: 谢谢参与 (A la Prochaine), 不扣库存、不写历史
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "snake_case")]
pub enum PrizeKind {
    #[sea_orm(string_value = "prize")]
    Prize,
    #[sea_orm(string_value = "consolation")]
    Consolation,
}

impl std::fmt::Display for PrizeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrizeKind::Prize => write!(f, "prize"),
            PrizeKind::Consolation => write!(f, "consolation"),
        }
    }
}

/// 转盘奖品实体
/// 概念说明:
/// - display_key: 稳定的转盘顺序键 (升序即为转盘扇区顺序), 与自增 id 无关,
///   配置播种按它对账, 存储迁移后顺序不变
/// - weight: 选择权重, 按百分比约定 (最多两位小数), 不强制合计 100
/// - remaining: 剩余库存; 0 表示已抽完, 仍在转盘上展示但不可被抽中
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "prizes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 转盘顺序键 (唯一)
    pub display_key: i32,
    /// 奖品名称
    pub name: String,
    /// 图片引用 (由前端渲染, 谢谢参与类不展示图片)
    pub image: String,
    /// 类别 (prize / consolation)
    pub kind: PrizeKind,
    /// 剩余库存
    pub remaining: i64,
    /// 是否参与转盘
    pub is_active: bool,
    /// 选择权重
    pub weight: f64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    /// 是否还有库存
    pub fn is_available(&self) -> bool {
        self.remaining > 0
    }

    /// 是否是谢谢参与类
    pub fn is_consolation(&self) -> bool {
        matches!(self.kind, PrizeKind::Consolation)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
