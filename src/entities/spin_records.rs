use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 抽奖历史实体
/// 说明:
/// - 每次非谢谢参与的抽奖产生且仅产生一条记录, 只追加不修改
/// - prize_name 冗余存储抽奖时刻的奖品名 (奖品配置后续修改或清除仍可回溯)
/// - stock_after 记录本次扣减后的剩余库存
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "spin_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 奖品ID (指向 prizes.id, 无外键约束)
    pub prize_id: i64,
    /// 奖品名称 (历史快照)
    pub prize_name: String,
    /// 本次抽奖后的剩余库存
    pub stock_after: i64,
    /// 抽奖时间
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
