/// 指针固定在屏幕 270° 位置
pub const POINTER_ANGLE_DEG: f64 = 270.0;

/// 第一个扇区的视觉零点相对数学 0° 轴的固定偏移
pub const SEGMENT_BIAS_DEG: f64 = -112.5;

/// 每次旋转至少转满的整圈数
pub const MIN_REVOLUTIONS: f64 = 8.0;

/// 一次旋转的目标
/// - target_angle_deg: 动画终点角度 (在当前角度上单调累加, 永不回绕)
/// - total_rotation_deg: 本次旋转的总角度增量, 区间 (2880, 3240]
#[derive(Debug, Clone, Copy)]
pub struct RotationPlan {
    pub target_angle_deg: f64,
    pub total_rotation_deg: f64,
}

/// 计算让中奖扇区精确停在指针下的旋转目标
///
/// 1. productAngle = winnerIndex * segmentAngle + segmentAngle/2 - 112.5, 归一到 [0, 360)
/// 2. 当前角度归一到 [0, 360), 得到扇区当前的屏幕位置
/// 3. neededRotation = (270 - 当前位置) mod 360; 恰为 0 时替换为 360,
///    保证动画永远有可见的转动
/// 4. 在 neededRotation 上加 8 整圈得到总增量
///
/// 对任意 winner_index / segment_count > 0 / 任意历史角度,
/// 旋转后中奖扇区的屏幕位置恒等于 270° (mod 360)。
pub fn plan_rotation(
    winner_index: usize,
    segment_count: usize,
    current_angle_deg: f64,
) -> RotationPlan {
    debug_assert!(segment_count > 0, "wheel must have at least one segment");
    debug_assert!(winner_index < segment_count, "winner index out of range");

    let segment_angle = 360.0 / segment_count as f64;
    let product_angle = (winner_index as f64 * segment_angle + segment_angle / 2.0
        + SEGMENT_BIAS_DEG)
        .rem_euclid(360.0);

    let current = current_angle_deg.rem_euclid(360.0);
    let product_position = (product_angle + current).rem_euclid(360.0);

    let mut needed_rotation = (POINTER_ANGLE_DEG - product_position).rem_euclid(360.0);
    if needed_rotation == 0.0 {
        needed_rotation = 360.0;
    }

    let total_rotation = MIN_REVOLUTIONS * 360.0 + needed_rotation;

    RotationPlan {
        target_angle_deg: current + total_rotation,
        total_rotation_deg: total_rotation,
    }
}
