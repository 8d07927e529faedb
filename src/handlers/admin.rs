use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::{PrizeService, SeedService};

#[utoipa::path(
    get,
    path = "/admin/prizes",
    tag = "admin",
    responses(
        (status = 200, description = "获取奖品列表成功", body = AdminPrizeListResponse)
    )
)]
/// 获取全部奖品 (含停用), 附带权重合计供对照 100% 展示
pub async fn list_prizes(service: web::Data<PrizeService>) -> Result<HttpResponse> {
    match service.list_all().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/prizes/{id}/remaining",
    tag = "admin",
    params(("id" = i64, Path, description = "奖品ID")),
    request_body = UpdateRemainingRequest,
    responses(
        (status = 200, description = "更新库存成功", body = PrizeResponse),
        (status = 400, description = "库存为负"),
        (status = 404, description = "奖品不存在")
    )
)]
/// 设置奖品剩余库存
pub async fn update_remaining(
    service: web::Data<PrizeService>,
    path: web::Path<i64>,
    body: web::Json<UpdateRemainingRequest>,
) -> Result<HttpResponse> {
    match service
        .set_remaining(path.into_inner(), body.remaining)
        .await
    {
        Ok(prize) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": prize }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/prizes/{id}/weight",
    tag = "admin",
    params(("id" = i64, Path, description = "奖品ID")),
    request_body = UpdateWeightRequest,
    responses(
        (status = 200, description = "更新权重成功", body = PrizeResponse),
        (status = 400, description = "权重非法"),
        (status = 404, description = "奖品不存在")
    )
)]
/// 设置奖品选择权重 (百分比约定, 合计是否为 100 仅在管理端提示)
pub async fn update_weight(
    service: web::Data<PrizeService>,
    path: web::Path<i64>,
    body: web::Json<UpdateWeightRequest>,
) -> Result<HttpResponse> {
    match service.set_weight(path.into_inner(), body.weight).await {
        Ok(prize) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": prize }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/prizes/{id}/active",
    tag = "admin",
    params(("id" = i64, Path, description = "奖品ID")),
    request_body = SetActiveRequest,
    responses(
        (status = 200, description = "更新启用状态成功", body = PrizeResponse),
        (status = 404, description = "奖品不存在")
    )
)]
/// 启用 / 停用奖品
pub async fn update_active(
    service: web::Data<PrizeService>,
    path: web::Path<i64>,
    body: web::Json<SetActiveRequest>,
) -> Result<HttpResponse> {
    match service.set_active(path.into_inner(), body.active).await {
        Ok(prize) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": prize }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/prizes/reload",
    tag = "admin",
    responses(
        (status = 200, description = "重载成功", body = ReconcileSummaryResponse)
    )
)]
/// 从播种配置全量重载奖品表 (清空后重建, 库存一并重置; 抽奖历史不受影响)
pub async fn reload_prizes(service: web::Data<SeedService>) -> Result<HttpResponse> {
    match service.reload().await {
        Ok(summary) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": summary }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin/prizes")
            .route("", web::get().to(list_prizes))
            .route("/reload", web::post().to(reload_prizes))
            .route("/{id}/remaining", web::put().to(update_remaining))
            .route("/{id}/weight", web::put().to(update_weight))
            .route("/{id}/active", web::put().to(update_active)),
    );
}
