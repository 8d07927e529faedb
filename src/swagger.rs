use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::engine::SpinPhase;
use crate::entities::PrizeKind;
use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::wheel::get_wheel,
        handlers::wheel::spin,
        handlers::admin::list_prizes,
        handlers::admin::update_remaining,
        handlers::admin::update_weight,
        handlers::admin::update_active,
        handlers::admin::reload_prizes,
        handlers::history::get_history,
        handlers::history::export_history,
        handlers::history::clear_history,
    ),
    components(
        schemas(
            PrizeKind,
            SpinPhase,
            PrizeResponse,
            WheelSnapshotResponse,
            WonPrizeResponse,
            SpinOutcomeResponse,
            RotationPlanResponse,
            SpinResponse,
            SpinRecordResponse,
            HistoryQuery,
            AdminPrizeListResponse,
            UpdateRemainingRequest,
            UpdateWeightRequest,
            SetActiveRequest,
            ReconcileSummaryResponse,
            ClearHistoryResponse,
        )
    ),
    tags(
        (name = "wheel", description = "转盘与抽奖"),
        (name = "admin", description = "奖品管理"),
        (name = "history", description = "抽奖历史")
    ),
    info(
        title = "Jadida Prize Wheel API",
        description = "转盘抽奖 kiosk 后端接口文档"
    )
)]
struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
