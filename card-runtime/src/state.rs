//! # State 模块
//!
//! 定义卡片的二元状态与控制器的可观察阶段。
//!
//! ## 设计原则
//!
//! - 状态必须**显式建模**，任意时刻恰好一个状态为当前状态
//! - 过渡进行中，当前状态保持为过渡**之前**的状态，只在过渡完成时翻转

use serde::{Deserialize, Serialize};

/// 卡片状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardState {
    /// 展开（卡片完整可见，背景模糊）
    Expanded,
    /// 收起（只露出把手区域）
    #[default]
    Collapsed,
}

impl CardState {
    /// 下一次过渡的目标状态
    pub fn opposite(self) -> Self {
        match self {
            Self::Expanded => Self::Collapsed,
            Self::Collapsed => Self::Expanded,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == Self::Expanded
    }
}

impl std::fmt::Display for CardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expanded => write!(f, "expanded"),
            Self::Collapsed => write!(f, "collapsed"),
        }
    }
}

/// 控制器阶段
///
/// ```text
/// Idle(Collapsed) ──toggle/begin──► Transitioning ──完成──► Idle(Expanded)
///        ▲                              │  ▲                     │
///        │                              └──┘ update / 再次 begin   │
///        └──────────────────────完成──────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum ControllerPhase {
    /// 空闲，停在某个终态
    Idle { state: CardState },
    /// 有一个过渡正在进行（播放中或被手势冻结）
    Transitioning {
        /// 过渡目标
        target: CardState,
        /// 是否处于手势交互中（动画已暂停）
        interactive: bool,
    },
}

impl ControllerPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle { .. })
    }
}
