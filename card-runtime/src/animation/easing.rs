//! # Easing 模块
//!
//! 时间曲线：把线性时间进度映射为属性插值进度。
//!
//! 两类曲线：
//! - `EasingFunction`：普通缓动（三次贝塞尔近似的多项式）
//! - `TimingCurve::Spring`：按阻尼比参数化的弹簧响应，时长归一化到 [0, 1]

use serde::{Deserialize, Serialize};

/// 弹簧自然角频率（归一化时间下）
///
/// 取 10 时临界阻尼弹簧在 t = 1 处残差约 5e-4，视觉上已停稳。
const SPRING_OMEGA: f32 = 10.0;

/// 缓动函数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// 线性（匀速）
    #[default]
    Linear,
    /// 缓入（Cubic）
    EaseIn,
    /// 缓出（Cubic）
    EaseOut,
    /// 缓入缓出（Cubic）
    EaseInOut,
    /// 二次缓出
    EaseOutQuad,
    /// 二次缓入缓出
    EaseInOutQuad,
}

impl EasingFunction {
    /// 计算缓动值
    ///
    /// 输入会先被限制在 [0, 1]。
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseIn => t * t * t,
            EasingFunction::EaseOut => 1.0 - (1.0 - t).powi(3),
            EasingFunction::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            EasingFunction::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            EasingFunction::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// 动画时间曲线
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimingCurve {
    /// 缓动曲线
    Easing { easing: EasingFunction },
    /// 阻尼弹簧
    ///
    /// - `damping_ratio >= 1`：无回弹（过阻尼按临界阻尼处理）
    /// - `0 < damping_ratio < 1`：带回弹
    Spring { damping_ratio: f32 },
}

impl Default for TimingCurve {
    fn default() -> Self {
        Self::linear()
    }
}

impl TimingCurve {
    pub fn linear() -> Self {
        Self::Easing {
            easing: EasingFunction::Linear,
        }
    }

    pub fn easing(easing: EasingFunction) -> Self {
        Self::Easing { easing }
    }

    pub fn spring(damping_ratio: f32) -> Self {
        Self::Spring { damping_ratio }
    }

    /// 曲线参数是否合法
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Easing { .. } => true,
            Self::Spring { damping_ratio } => damping_ratio.is_finite() && *damping_ratio > 0.0,
        }
    }

    /// 计算曲线值
    ///
    /// 端点固定：`apply(0) == 0`，`apply(1) == 1`。弹簧欠阻尼时中间值可能超过 1。
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return 1.0;
        }

        match *self {
            Self::Easing { easing } => easing.apply(t),
            Self::Spring { damping_ratio } => spring_response(t, damping_ratio),
        }
    }
}

/// 归一化弹簧阶跃响应
fn spring_response(t: f32, damping_ratio: f32) -> f32 {
    let omega_t = SPRING_OMEGA * t;

    if damping_ratio >= 1.0 {
        return 1.0 - (1.0 + omega_t) * (-omega_t).exp();
    }

    let zeta = damping_ratio.max(f32::EPSILON);
    let damped = (1.0 - zeta * zeta).sqrt();
    let decay = (-zeta * omega_t).exp();
    let phase = damped * omega_t;
    1.0 - decay * (phase.cos() + zeta / damped * phase.sin())
}
