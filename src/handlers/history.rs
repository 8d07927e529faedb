use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::HistoryService;

#[utoipa::path(
    get,
    path = "/admin/history",
    tag = "history",
    params(
        ("page" = Option<u32>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认20)")
    ),
    responses(
        (status = 200, description = "获取抽奖历史成功", body = PaginatedResponse<SpinRecordResponse>)
    )
)]
/// 分页获取抽奖历史 (倒序)
pub async fn get_history(
    service: web::Data<HistoryService>,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse> {
    match service.list(&query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/history/export",
    tag = "history",
    responses(
        (status = 200, description = "导出 CSV 成功", content_type = "text/csv", body = String)
    )
)]
/// 导出全部抽奖历史为 CSV 附件
pub async fn export_history(service: web::Data<HistoryService>) -> Result<HttpResponse> {
    match service.export_csv().await {
        Ok(body) => Ok(HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                "attachment; filename=\"spin_history.csv\"",
            ))
            .body(body)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/history",
    tag = "history",
    responses(
        (status = 200, description = "清空历史成功", body = ClearHistoryResponse)
    )
)]
/// 清空全部抽奖历史
pub async fn clear_history(service: web::Data<HistoryService>) -> Result<HttpResponse> {
    match service.clear().await {
        Ok(deleted) => Ok(HttpResponse::Ok()
            .json(json!({ "success": true, "data": ClearHistoryResponse { deleted } }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn history_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin/history")
            .route("", web::get().to(get_history))
            .route("", web::delete().to(clear_history))
            .route("/export", web::get().to(export_history)),
    );
}
