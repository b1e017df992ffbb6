//! # Geometry 模块
//!
//! 卡片布局常量与由此推导出的各状态目标值。
//!
//! ```text
//! ┌──────────────┐ 0
//! │              │
//! │   (模糊遮罩)  │
//! ├──────────────┤ screen_height - card_height          ← Expanded
//! │ ▔▔ handle ▔▔ │
//! │              │
//! ├──────────────┤ screen_height - handle_area_height    ← Collapsed
//! │ ▔▔ handle ▔▔ │
//! └──────────────┘ screen_height
//! ```

use serde::{Deserialize, Serialize};

use crate::animation::TimingCurve;
use crate::error::{CardError, CardResult};
use crate::run::AnimationSpec;
use crate::state::CardState;
use crate::surface::{CardProperty, VisualSnapshot};

/// 轴对齐矩形
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// 点是否落在矩形内（左上闭、右下开）
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// 卡片几何参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardGeometry {
    /// 屏幕宽度
    #[serde(default = "default_screen_width")]
    pub screen_width: f32,

    /// 屏幕高度
    #[serde(default = "default_screen_height")]
    pub screen_height: f32,

    /// 卡片总高度
    #[serde(default = "default_card_height")]
    pub card_height: f32,

    /// 把手区域高度（收起时露出的部分）
    #[serde(default = "default_handle_area_height")]
    pub handle_area_height: f32,

    /// 展开时的圆角半径
    #[serde(default = "default_expanded_corner_radius")]
    pub expanded_corner_radius: f32,

    /// 展开时的遮罩模糊强度
    #[serde(default = "default_expanded_overlay_blur")]
    pub expanded_overlay_blur: f32,
}

fn default_screen_width() -> f32 {
    390.0
}

fn default_screen_height() -> f32 {
    844.0
}

fn default_card_height() -> f32 {
    600.0
}

fn default_handle_area_height() -> f32 {
    65.0
}

fn default_expanded_corner_radius() -> f32 {
    12.0
}

fn default_expanded_overlay_blur() -> f32 {
    1.0
}

impl Default for CardGeometry {
    fn default() -> Self {
        Self {
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
            card_height: default_card_height(),
            handle_area_height: default_handle_area_height(),
            expanded_corner_radius: default_expanded_corner_radius(),
            expanded_overlay_blur: default_expanded_overlay_blur(),
        }
    }
}

impl CardGeometry {
    /// 验证几何参数
    pub fn validate(&self) -> CardResult<()> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("card_height", self.card_height),
            ("handle_area_height", self.handle_area_height),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CardError::InvalidGeometry {
                    field,
                    message: format!("必须为正数，实际 {value}"),
                });
            }
        }

        if self.handle_area_height >= self.card_height {
            return Err(CardError::InvalidGeometry {
                field: "handle_area_height",
                message: "必须小于 card_height，否则卡片没有行程".to_string(),
            });
        }

        if self.card_height > self.screen_height {
            return Err(CardError::InvalidGeometry {
                field: "card_height",
                message: "不能超过 screen_height".to_string(),
            });
        }

        if !self.expanded_corner_radius.is_finite() || self.expanded_corner_radius < 0.0 {
            return Err(CardError::InvalidGeometry {
                field: "expanded_corner_radius",
                message: "不能为负数".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.expanded_overlay_blur) {
            return Err(CardError::InvalidGeometry {
                field: "expanded_overlay_blur",
                message: "必须在 0.0 - 1.0 之间".to_string(),
            });
        }

        Ok(())
    }

    /// 某状态下卡片顶边位置
    pub fn offset_for(&self, state: CardState) -> f32 {
        match state {
            CardState::Expanded => self.screen_height - self.card_height,
            CardState::Collapsed => self.screen_height - self.handle_area_height,
        }
    }

    /// 卡片在两个终态之间的行程
    pub fn travel_distance(&self) -> f32 {
        self.card_height - self.handle_area_height
    }

    /// 顶边位于 `offset_y` 时的卡片矩形
    pub fn card_frame(&self, offset_y: f32) -> Rect {
        Rect::new(0.0, offset_y, self.screen_width, self.card_height)
    }

    /// 顶边位于 `offset_y` 时的把手区域
    pub fn handle_area(&self, offset_y: f32) -> Rect {
        Rect::new(0.0, offset_y, self.screen_width, self.handle_area_height)
    }

    /// 某状态下全部视觉属性的终值
    pub fn visuals_for(&self, state: CardState) -> VisualSnapshot {
        match state {
            CardState::Expanded => VisualSnapshot {
                offset_y: self.offset_for(state),
                corner_radius: self.expanded_corner_radius,
                overlay_blur: self.expanded_overlay_blur,
            },
            CardState::Collapsed => VisualSnapshot {
                offset_y: self.offset_for(state),
                corner_radius: 0.0,
                overlay_blur: 0.0,
            },
        }
    }

    /// 卡片过渡使用的动画组
    ///
    /// - 位置：临界阻尼弹簧
    /// - 圆角、模糊：线性
    pub fn animation_specs(&self) -> Vec<AnimationSpec> {
        let expanded = self.visuals_for(CardState::Expanded);
        let collapsed = self.visuals_for(CardState::Collapsed);

        vec![
            AnimationSpec::new(
                CardProperty::OffsetY,
                expanded.offset_y,
                collapsed.offset_y,
                TimingCurve::spring(1.0),
            ),
            AnimationSpec::new(
                CardProperty::CornerRadius,
                expanded.corner_radius,
                collapsed.corner_radius,
                TimingCurve::linear(),
            ),
            AnimationSpec::new(
                CardProperty::OverlayBlur,
                expanded.overlay_blur,
                collapsed.overlay_blur,
                TimingCurve::linear(),
            ),
        ]
    }
}
