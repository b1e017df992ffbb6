//! # Input 模块
//!
//! 定义手势源向控制器传递的输入事件。
//!
//! ## 设计说明
//!
//! - `GestureEvent` 是宿主识别手势后传给控制器的语义化输入
//! - 控制器不处理原始指针事件，只处理 tap / pan 的阶段事件
//! - 连续手势携带的是**自手势开始以来**的累计位移，而不是帧间增量

use serde::{Deserialize, Serialize};

/// 手势事件
///
/// 控制器通过 `handle_gesture(event)` 接收这些输入：
///
/// - `Tap`：离散触发，直接播放完整过渡
/// - `Began` / `Changed` / `Ended`：连续拖拽，冻结并拖动同一组动画
/// - `Cancelled`：与 `Ended` 等价处理，提交到终态
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEvent {
    /// 点击把手区域
    Tap,

    /// 拖拽开始
    Began,

    /// 拖拽位移更新
    ///
    /// `dx`/`dy` 为相对按下点的累计位移（逻辑像素，y 轴向下为正）。
    /// 控制器只使用卡片行程方向（竖直）的分量。
    Changed { dx: f32, dy: f32 },

    /// 拖拽结束
    Ended,

    /// 拖拽被系统取消
    Cancelled,
}

impl GestureEvent {
    /// 创建拖拽位移事件
    pub fn changed(dx: f32, dy: f32) -> Self {
        Self::Changed { dx, dy }
    }

    /// 是否为连续手势的结束事件
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gesture_creation() {
        assert_eq!(
            GestureEvent::changed(1.0, -20.0),
            GestureEvent::Changed { dx: 1.0, dy: -20.0 }
        );
        assert!(GestureEvent::Ended.is_terminal());
        assert!(GestureEvent::Cancelled.is_terminal());
        assert!(!GestureEvent::Tap.is_terminal());
    }

    #[test]
    fn test_gesture_serialization() {
        let event = GestureEvent::changed(0.0, -120.0);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"changed","dx":0.0,"dy":-120.0}"#);
        let back: GestureEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
