use sea_orm::{DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryOrder, QuerySelect};

use crate::entities::spin_record_entity as records;
use crate::error::AppResult;
use crate::models::{
    HistoryQuery, PaginatedResponse, PaginationParams, SpinRecordResponse,
};
use crate::utils::csv;

/// 抽奖历史服务: 分页查询、CSV 导出、清空
#[derive(Clone)]
pub struct HistoryService {
    pool: DatabaseConnection,
}

impl HistoryService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 分页获取抽奖历史 (倒序)
    pub async fn list(
        &self,
        query: &HistoryQuery,
    ) -> AppResult<PaginatedResponse<SpinRecordResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let total = records::Entity::find().count(&self.pool).await?;

        let items = records::Entity::find()
            .order_by(records::Column::CreatedAt, Order::Desc)
            .order_by(records::Column::Id, Order::Desc)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?
            .into_iter()
            .map(SpinRecordResponse::from)
            .collect();

        Ok(PaginatedResponse::new(items, &params, total))
    }

    /// 导出全部历史为 CSV (倒序, 列与管理端表格一致)
    pub async fn export_csv(&self) -> AppResult<String> {
        let rows = records::Entity::find()
            .order_by(records::Column::CreatedAt, Order::Desc)
            .order_by(records::Column::Id, Order::Desc)
            .all(&self.pool)
            .await?;

        let mut out = String::from("Product,Date,Time,Stock After Spin\n");
        for row in rows {
            let record = SpinRecordResponse::from(row);
            let date = record.created_at.format("%Y-%m-%d").to_string();
            let time = record.created_at.format("%H:%M:%S").to_string();
            let stock = record.stock_after.to_string();
            out.push_str(&csv::write_row(&[
                &record.prize_name,
                &date,
                &time,
                &stock,
            ]));
            out.push('\n');
        }
        Ok(out)
    }

    /// 清空全部抽奖历史, 返回删除条数
    pub async fn clear(&self) -> AppResult<u64> {
        let result = records::Entity::delete_many().exec(&self.pool).await?;
        log::info!("Spin history cleared: {} records deleted", result.rows_affected);
        Ok(result.rows_affected)
    }
}
