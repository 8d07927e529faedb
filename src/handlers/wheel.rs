use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::SpinService;

#[utoipa::path(
    get,
    path = "/wheel",
    tag = "wheel",
    responses(
        (status = 200, description = "获取转盘快照成功", body = WheelSnapshotResponse)
    )
)]
/// 获取转盘快照: 启用的奖品按扇区顺序排列 (含库存为 0 的扇区),
/// exhausted 为真时前端应展示终态页而不再发起抽奖
pub async fn get_wheel(service: web::Data<SpinService>) -> Result<HttpResponse> {
    match service.wheel().await {
        Ok(snapshot) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": snapshot }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/wheel/spin",
    tag = "wheel",
    responses(
        (status = 200, description = "抽奖成功, 返回结果与旋转目标", body = SpinResponse),
        (status = 409, description = "抽奖进行中或奖品已抽完")
    )
)]
/// 进行一次抽奖:
/// 1. 重新读取转盘快照并按权重选出中奖者
/// 2. 计算让中奖扇区停在指针下的旋转目标
/// 3. 立即返回; 库存扣减与历史写入在动画时长后由后台任务提交
pub async fn spin(service: web::Data<SpinService>) -> Result<HttpResponse> {
    match service.spin().await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": result }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn wheel_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/wheel")
            .route("", web::get().to(get_wheel))
            .route("/spin", web::post().to(spin)),
    );
}
