use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::config::WheelConfig;
use crate::engine::{self, WheelState};
use crate::entities::{prize_entity as prizes, spin_record_entity as records};
use crate::error::{AppError, AppResult};
use crate::models::{
    RotationPlanResponse, SpinOutcomeResponse, SpinResponse, WheelSnapshotResponse,
    WonPrizeResponse,
};
use crate::tasks::{self, SpinTicket};

/// 落库后的实际结果 (区别于响应里的预计值)
enum SpinOutcome {
    Prize { remaining: i64 },
    Consolation,
}

struct Shared {
    state: WheelState,
    ticket: Option<SpinTicket>,
}

/// 抽奖服务: 转盘快照与整个抽奖事务的编排。
///
/// 一次抽奖:
/// 1. 状态机 Idle -> Selecting (非 Idle 拒绝, 单机同一时刻只有一次抽奖)
/// 2. 重新读取转盘快照 (不跨抽奖周期缓存), 过滤出有库存的候选
/// 3. 按权重选出中奖者, 以其在转盘顺序中的下标计算旋转目标 -> Animating
/// 4. 立即返回结果与旋转目标; 库存扣减与历史写入由定时任务推迟到动画
///    结束时执行 (扣减与奖品揭晓在感知上同时发生)
/// 5. 落库成功与否, 状态机都回到 Idle
#[derive(Clone)]
pub struct SpinService {
    pool: DatabaseConnection,
    timing: WheelConfig,
    shared: Arc<Mutex<Shared>>,
}

impl SpinService {
    pub fn new(pool: DatabaseConnection, timing: WheelConfig) -> Self {
        Self {
            pool,
            timing,
            shared: Arc::new(Mutex::new(Shared {
                state: WheelState::new(),
                ticket: None,
            })),
        }
    }

    /// 转盘快照: 启用的奖品按 display_key 升序 (含库存为 0 的扇区)
    pub async fn wheel(&self) -> AppResult<WheelSnapshotResponse> {
        let wheel = self.load_wheel().await?;
        let exhausted = !wheel.iter().any(|p| p.is_available());

        let (phase, angle_deg) = {
            let shared = self.shared.lock().unwrap();
            (shared.state.phase(), shared.state.angle_deg())
        };

        Ok(WheelSnapshotResponse {
            prizes: wheel.into_iter().map(Into::into).collect(),
            exhausted,
            phase,
            angle_deg,
        })
    }

    /// 进行一次抽奖
    pub async fn spin(&self) -> AppResult<SpinResponse> {
        let spin_id = Uuid::new_v4();
        {
            let mut shared = self.shared.lock().unwrap();
            if !shared.state.begin(spin_id) {
                return Err(AppError::SpinInProgress);
            }
        }

        match self.start_spin(spin_id).await {
            Ok(response) => Ok(response),
            Err(e) => {
                // 动画尚未开始的失败: 立即释放, 角度不变
                self.shared.lock().unwrap().state.abort(spin_id);
                Err(e)
            }
        }
    }

    async fn start_spin(&self, spin_id: Uuid) -> AppResult<SpinResponse> {
        // 快照须反映最新提交状态, 每次抽奖前重新读取
        let wheel = self.load_wheel().await?;
        let candidates: Vec<prizes::Model> = wheel
            .iter()
            .filter(|p| p.is_available())
            .cloned()
            .collect();
        if candidates.is_empty() {
            return Err(AppError::WheelExhausted);
        }

        let winner = {
            let mut rng = rand::thread_rng();
            engine::select_winner(&mut rng, &candidates)
                .cloned()
                .ok_or_else(|| {
                    AppError::InternalError("selection over empty candidate set".to_string())
                })?
        };

        let winner_index = wheel
            .iter()
            .position(|p| p.display_key == winner.display_key)
            .ok_or_else(|| {
                AppError::InternalError(format!(
                    "winner display_key {} missing from wheel order",
                    winner.display_key
                ))
            })?;

        let plan = {
            let mut shared = self.shared.lock().unwrap();
            let plan = engine::plan_rotation(winner_index, wheel.len(), shared.state.angle_deg());
            if !shared.state.mark_animating(spin_id) {
                return Err(AppError::InternalError(
                    "spin state changed while selecting".to_string(),
                ));
            }
            plan
        };

        log::info!(
            "Spin {spin_id}: winner '{}' (index {winner_index}/{}), rotating {:.1} deg to {:.1}",
            winner.name,
            wheel.len(),
            plan.total_rotation_deg,
            plan.target_angle_deg
        );

        let ticket = tasks::schedule_spin(
            spin_id,
            Duration::from_millis(self.timing.spin_reset_delay_ms),
            Duration::from_millis(self.timing.spin_duration_ms),
            async move {
                log::debug!("Spin {spin_id}: rotation transition applied");
            },
            {
                let service = self.clone();
                let winner = winner.clone();
                let target_angle_deg = plan.target_angle_deg;
                async move {
                    service
                        .commit_outcome(spin_id, winner, target_angle_deg)
                        .await;
                }
            },
        );
        self.shared.lock().unwrap().ticket = Some(ticket);

        let outcome = if winner.is_consolation() {
            SpinOutcomeResponse::Consolation
        } else {
            let projected = (winner.remaining - 1).max(0);
            SpinOutcomeResponse::Prize {
                prize: WonPrizeResponse::from(winner),
                remaining: projected,
            }
        };

        Ok(SpinResponse {
            spin_id,
            winner_index: winner_index as u32,
            outcome,
            rotation: RotationPlanResponse {
                target_angle_deg: plan.target_angle_deg,
                total_rotation_deg: plan.total_rotation_deg,
                duration_ms: self.timing.spin_duration_ms,
                reset_delay_ms: self.timing.spin_reset_delay_ms,
            },
        })
    }

    /// 动画结束后的落库 (定时任务调用)。
    /// 无论成败, 最后都释放状态机并记录动画终点角度。
    async fn commit_outcome(&self, spin_id: Uuid, winner: prizes::Model, target_angle_deg: f64) {
        {
            let mut shared = self.shared.lock().unwrap();
            if !shared.state.mark_committing(spin_id) {
                log::warn!("Spin {spin_id}: commit fired against stale state, applying anyway");
            }
        }

        match self.apply_outcome(&winner).await {
            Ok(SpinOutcome::Prize { remaining }) => {
                log::info!(
                    "Spin {spin_id}: committed '{}', stock left {remaining}",
                    winner.name
                );
            }
            Ok(SpinOutcome::Consolation) => {
                log::info!("Spin {spin_id}: consolation outcome, nothing persisted");
            }
            Err(e) => {
                // 不自动重试; 转盘不能因一次失败的写入被锁死
                log::error!("Spin {spin_id}: commit failed: {e}");
            }
        }

        let mut shared = self.shared.lock().unwrap();
        shared.state.release(spin_id, target_angle_deg);
    }

    /// 中奖结果落库: 谢谢参与类不产生任何写入;
    /// 真实奖品在同一事务里扣库存 (0 封底) 并追加一条历史。
    async fn apply_outcome(&self, winner: &prizes::Model) -> AppResult<SpinOutcome> {
        if winner.is_consolation() {
            return Ok(SpinOutcome::Consolation);
        }

        let txn = self.pool.begin().await?;

        // 条件扣减: 库存已为 0 时不再减 (防重复提交把库存打成负数)
        prizes::Entity::update_many()
            .col_expr(
                prizes::Column::Remaining,
                Expr::col(prizes::Column::Remaining).sub(1),
            )
            .col_expr(prizes::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(prizes::Column::Id.eq(winner.id))
            .filter(prizes::Column::Remaining.gt(0))
            .exec(&txn)
            .await?;

        let remaining = prizes::Entity::find_by_id(winner.id)
            .one(&txn)
            .await?
            .map(|p| p.remaining)
            .unwrap_or(0);

        records::ActiveModel {
            prize_id: Set(winner.id),
            prize_name: Set(winner.name.clone()),
            stock_after: Set(remaining),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(SpinOutcome::Prize { remaining })
    }

    async fn load_wheel(&self) -> AppResult<Vec<prizes::Model>> {
        let wheel = prizes::Entity::find()
            .filter(prizes::Column::IsActive.eq(true))
            .order_by_asc(prizes::Column::DisplayKey)
            .all(&self.pool)
            .await?;
        Ok(wheel)
    }

    /// 等待进行中抽奖的定时提交全部执行完 (测试与收尾用)
    pub async fn settle(&self) {
        let ticket = self.shared.lock().unwrap().ticket.take();
        if let Some(ticket) = ticket {
            ticket.join().await;
        }
    }
}
