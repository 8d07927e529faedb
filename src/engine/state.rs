use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// 一次抽奖的阶段
/// Idle -> Selecting (收到抽奖请求)
///      -> Animating (选出中奖者并算出旋转目标)
///      -> Committing (动画时长已过, 开始落库)
///      -> Idle (落库完成或失败)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SpinPhase {
    Idle,
    Selecting,
    Animating,
    Committing,
}

/// 转盘运行状态: 当前阶段 + 进行中的抽奖事务 id + 转盘当前角度
///
/// 非 Idle 阶段的重入抽奖请求一律拒绝 (单机 kiosk, 同一时刻只有一次抽奖)。
/// 所有带事务 id 的转换都校验 id, 防止迟到的定时任务动到下一次抽奖的状态。
#[derive(Debug)]
pub struct WheelState {
    phase: SpinPhase,
    spin_id: Option<Uuid>,
    angle_deg: f64,
}

impl WheelState {
    pub fn new() -> Self {
        Self {
            phase: SpinPhase::Idle,
            spin_id: None,
            angle_deg: 0.0,
        }
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn spin_id(&self) -> Option<Uuid> {
        self.spin_id
    }

    /// 转盘当前角度, 始终归一在 [0, 360)
    pub fn angle_deg(&self) -> f64 {
        self.angle_deg
    }

    /// Idle -> Selecting; 非 Idle 时拒绝 (返回 false)
    pub fn begin(&mut self, spin_id: Uuid) -> bool {
        if self.phase != SpinPhase::Idle {
            return false;
        }
        self.phase = SpinPhase::Selecting;
        self.spin_id = Some(spin_id);
        true
    }

    /// Selecting -> Animating
    pub fn mark_animating(&mut self, spin_id: Uuid) -> bool {
        if self.phase != SpinPhase::Selecting || self.spin_id != Some(spin_id) {
            return false;
        }
        self.phase = SpinPhase::Animating;
        true
    }

    /// Animating -> Committing
    pub fn mark_committing(&mut self, spin_id: Uuid) -> bool {
        if self.phase != SpinPhase::Animating || self.spin_id != Some(spin_id) {
            return false;
        }
        self.phase = SpinPhase::Committing;
        true
    }

    /// 任意非 Idle 阶段 -> Idle, 记录动画终点角度。
    /// 落库成功与否都必须走到这里, 转盘不能因一次失败的写入被永久锁死。
    pub fn release(&mut self, spin_id: Uuid, final_angle_deg: f64) -> bool {
        if self.spin_id != Some(spin_id) {
            return false;
        }
        self.phase = SpinPhase::Idle;
        self.spin_id = None;
        self.angle_deg = final_angle_deg.rem_euclid(360.0);
        true
    }

    /// 动画开始前失败 (快照为空、选择失败等): 回到 Idle, 角度不变
    pub fn abort(&mut self, spin_id: Uuid) -> bool {
        if self.spin_id != Some(spin_id) {
            return false;
        }
        self.phase = SpinPhase::Idle;
        self.spin_id = None;
        true
    }
}

impl Default for WheelState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_spin_cycle() {
        let mut state = WheelState::new();
        let id = Uuid::new_v4();

        assert_eq!(state.phase(), SpinPhase::Idle);
        assert!(state.begin(id));
        assert_eq!(state.phase(), SpinPhase::Selecting);
        assert!(state.mark_animating(id));
        assert_eq!(state.phase(), SpinPhase::Animating);
        assert!(state.mark_committing(id));
        assert_eq!(state.phase(), SpinPhase::Committing);
        assert!(state.release(id, 3150.0));
        assert_eq!(state.phase(), SpinPhase::Idle);
        assert_eq!(state.spin_id(), None);
        assert_eq!(state.angle_deg(), 3150.0_f64.rem_euclid(360.0));
    }

    #[test]
    fn test_reentrant_begin_rejected() {
        let mut state = WheelState::new();
        let first = Uuid::new_v4();
        assert!(state.begin(first));

        for phase in ["selecting", "animating", "committing"] {
            assert!(!state.begin(Uuid::new_v4()), "re-entry allowed in {phase}");
            match phase {
                "selecting" => assert!(state.mark_animating(first)),
                "animating" => assert!(state.mark_committing(first)),
                _ => {}
            }
        }
    }

    #[test]
    fn test_stale_spin_id_ignored() {
        let mut state = WheelState::new();
        let current = Uuid::new_v4();
        let stale = Uuid::new_v4();

        assert!(state.begin(current));
        assert!(!state.mark_animating(stale));
        assert!(!state.release(stale, 90.0));
        assert_eq!(state.phase(), SpinPhase::Selecting);

        assert!(state.mark_animating(current));
        assert!(!state.mark_committing(stale));
        assert!(state.mark_committing(current));
    }

    #[test]
    fn test_abort_keeps_angle() {
        let mut state = WheelState::new();
        let id = Uuid::new_v4();
        assert!(state.begin(id));
        assert!(state.release(id, 100.0));

        let second = Uuid::new_v4();
        assert!(state.begin(second));
        assert!(state.abort(second));
        assert_eq!(state.phase(), SpinPhase::Idle);
        assert_eq!(state.angle_deg(), 100.0);
    }

    #[test]
    fn test_release_from_any_phase() {
        // 提前失败时也能释放 (如动画期间进程被要求收尾)
        let mut state = WheelState::new();
        let id = Uuid::new_v4();
        assert!(state.begin(id));
        assert!(state.mark_animating(id));
        assert!(state.release(id, 720.0));
        assert_eq!(state.phase(), SpinPhase::Idle);
        assert_eq!(state.angle_deg(), 0.0);
    }
}
