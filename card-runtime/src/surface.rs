//! # Surface 模块
//!
//! 被动画驱动的视觉表面。
//!
//! 控制器只**写入**属性值，从不读取渲染结果；
//! 表面自己决定如何使用这些值（布局、绘制、导出轨迹……）。

use std::cell::Cell;

use serde::{Deserialize, Serialize};

/// 可动画属性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardProperty {
    /// 卡片顶边的纵向位置（逻辑像素，自屏幕顶部向下）
    OffsetY,
    /// 卡片圆角半径
    CornerRadius,
    /// 背景模糊遮罩强度（0.0 无模糊，1.0 完全模糊）
    OverlayBlur,
}

impl CardProperty {
    pub const ALL: [CardProperty; 3] = [Self::OffsetY, Self::CornerRadius, Self::OverlayBlur];

    pub fn name(&self) -> &'static str {
        match self {
            Self::OffsetY => "offset_y",
            Self::CornerRadius => "corner_radius",
            Self::OverlayBlur => "overlay_blur",
        }
    }
}

impl std::fmt::Display for CardProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 视觉表面接口
///
/// 通过 `&self` 写入，实现方使用内部可变性，
/// 这样表面可以同时被控制器和宿主（读取用于绘制）持有。
pub trait CardSurface {
    /// 设置属性值
    fn set_property(&self, property: CardProperty, value: f32);

    /// 获取属性当前值
    fn get_property(&self, property: CardProperty) -> f32;
}

/// 卡片视觉值快照
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VisualSnapshot {
    pub offset_y: f32,
    pub corner_radius: f32,
    pub overlay_blur: f32,
}

/// 基于 `Cell<f32>` 的卡片视觉状态
///
/// 单线程共享，通常包在 `Rc` 里由控制器与宿主共同持有。
#[derive(Debug, Default)]
pub struct CardVisuals {
    offset_y: Cell<f32>,
    corner_radius: Cell<f32>,
    overlay_blur: Cell<f32>,
}

impl CardVisuals {
    pub fn new(initial: VisualSnapshot) -> Self {
        Self {
            offset_y: Cell::new(initial.offset_y),
            corner_radius: Cell::new(initial.corner_radius),
            overlay_blur: Cell::new(initial.overlay_blur),
        }
    }

    pub fn snapshot(&self) -> VisualSnapshot {
        VisualSnapshot {
            offset_y: self.offset_y.get(),
            corner_radius: self.corner_radius.get(),
            overlay_blur: self.overlay_blur.get(),
        }
    }

    fn cell(&self, property: CardProperty) -> &Cell<f32> {
        match property {
            CardProperty::OffsetY => &self.offset_y,
            CardProperty::CornerRadius => &self.corner_radius,
            CardProperty::OverlayBlur => &self.overlay_blur,
        }
    }
}

impl CardSurface for CardVisuals {
    fn set_property(&self, property: CardProperty, value: f32) {
        self.cell(property).set(value);
    }

    fn get_property(&self, property: CardProperty) -> f32 {
        self.cell(property).get()
    }
}
