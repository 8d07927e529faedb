//! 转盘核心: 加权选择、旋转目标计算、抽奖状态机。
//! 这里只做纯计算, 不碰数据库; 落库与定时提交在 services/spin_service。

pub mod rotation;
pub mod selection;
pub mod state;

pub use rotation::{RotationPlan, plan_rotation};
pub use selection::select_winner;
pub use state::{SpinPhase, WheelState};
