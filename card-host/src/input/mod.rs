//! # Input 模块
//!
//! 手势识别，负责把原始指针事件转换为 `GestureEvent`。
//!
//! ## 设计说明
//!
//! - 按下点必须落在把手区域内，区域随卡片当前位置移动
//! - 移动距离超过触摸容差才开始拖拽；未超过就松手视为点击
//! - 拖拽位移相对按下点累计，y 轴向下为正

use card_runtime::{GestureEvent, Rect};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// 原始指针事件
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    /// 按下
    Down { x: f32, y: f32 },
    /// 移动
    Move { x: f32, y: f32 },
    /// 抬起
    Up,
    /// 系统取消（来电、手势被抢占等）
    Cancel,
}

/// 识别器阶段
#[derive(Debug, Clone, Copy, PartialEq)]
enum RecognizerPhase {
    /// 没有按下
    Idle,
    /// 已在把手区域按下，尚未超过容差
    Pressed { origin: (f32, f32) },
    /// 拖拽中
    Panning { origin: (f32, f32) },
}

/// 把手区域的 tap + pan 识别器
#[derive(Debug)]
pub struct GestureRecognizer {
    touch_slop: f32,
    phase: RecognizerPhase,
}

impl GestureRecognizer {
    pub fn new(touch_slop: f32) -> Self {
        Self {
            touch_slop: touch_slop.max(0.0),
            phase: RecognizerPhase::Idle,
        }
    }

    /// 是否正在拖拽
    pub fn is_panning(&self) -> bool {
        matches!(self.phase, RecognizerPhase::Panning { .. })
    }

    /// 处理一个指针事件
    ///
    /// # 参数
    /// - `event`: 指针事件
    /// - `handle_area`: 把手区域的当前位置（只在按下时使用）
    ///
    /// # 返回
    /// 识别出的手势事件，可能为空，也可能一次产生 `Began` + `Changed`
    pub fn handle(&mut self, event: &PointerEvent, handle_area: Rect) -> Vec<GestureEvent> {
        let mut out = Vec::new();

        match (*event, self.phase) {
            (PointerEvent::Down { x, y }, RecognizerPhase::Idle) => {
                if handle_area.contains(x, y) {
                    self.phase = RecognizerPhase::Pressed { origin: (x, y) };
                } else {
                    trace!(x, y, "按下点不在把手区域内");
                }
            }
            (PointerEvent::Down { .. }, _) => {
                // 多指按下：保持当前手势
            }
            (PointerEvent::Move { x, y }, RecognizerPhase::Pressed { origin }) => {
                let (dx, dy) = (x - origin.0, y - origin.1);
                if dx.hypot(dy) > self.touch_slop {
                    self.phase = RecognizerPhase::Panning { origin };
                    out.push(GestureEvent::Began);
                    out.push(GestureEvent::changed(dx, dy));
                }
            }
            (PointerEvent::Move { x, y }, RecognizerPhase::Panning { origin }) => {
                out.push(GestureEvent::changed(x - origin.0, y - origin.1));
            }
            (PointerEvent::Up, RecognizerPhase::Pressed { .. }) => {
                self.phase = RecognizerPhase::Idle;
                out.push(GestureEvent::Tap);
            }
            (PointerEvent::Up, RecognizerPhase::Panning { .. }) => {
                self.phase = RecognizerPhase::Idle;
                out.push(GestureEvent::Ended);
            }
            (PointerEvent::Cancel, RecognizerPhase::Panning { .. }) => {
                self.phase = RecognizerPhase::Idle;
                out.push(GestureEvent::Cancelled);
            }
            (PointerEvent::Cancel, _) => {
                self.phase = RecognizerPhase::Idle;
            }
            (PointerEvent::Move { .. } | PointerEvent::Up, RecognizerPhase::Idle) => {}
        }

        out
    }
}
