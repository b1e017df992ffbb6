//! # Card Runtime
//!
//! 底部卡片展开/收起交互的核心逻辑库。
//!
//! ## 架构概述
//!
//! `card-runtime` 是纯逻辑核心，不依赖任何 IO、窗口或渲染引擎。
//! 宿主层（Host）负责识别手势、驱动帧循环并绘制表面：
//!
//! ```text
//! Host                               Runtime
//!   │                                   │
//!   │──── GestureEvent ───────────────►│ handle_gesture()
//!   │──── dt ─────────────────────────►│ tick()
//!   │◄─── CardSurface::set_property ───│
//!   │◄─── Vec<TransitionEvent> ────────│ drain_events()
//! ```
//!
//! ## 核心类型
//!
//! - [`TransitionController`]：可中断过渡状态机
//! - [`CardState`] / [`ControllerPhase`]：状态与阶段
//! - [`GestureEvent`]：宿主传入的手势
//! - [`TransitionEvent`]：控制器产生的事件
//! - [`AnimationSpec`] / [`TransitionRun`]：动画组的配置与运行态
//! - [`AnimationExecutor`] / [`AnimationHandle`]：可替换的动画执行器
//!
//! ## 使用示例
//!
//! ```ignore
//! use card_runtime::{CardGeometry, CardState, CardVisuals, GestureEvent, TransitionController};
//!
//! let visuals = Rc::new(CardVisuals::default());
//! let mut controller =
//!     TransitionController::new(&CardGeometry::default(), CardState::Collapsed, visuals.clone())?;
//!
//! controller.handle_gesture(&GestureEvent::Began);
//! controller.handle_gesture(&GestureEvent::changed(0.0, -200.0));
//! controller.handle_gesture(&GestureEvent::Ended);
//!
//! // 帧循环
//! while controller.is_transitioning() {
//!     controller.tick(1.0 / 60.0);
//!     draw(visuals.snapshot());
//! }
//! ```

pub mod animation;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod input;
pub mod run;
pub mod state;
pub mod surface;

// 重导出核心类型
pub use animation::{
    AnimationExecutor, AnimationHandle, EasingFunction, Timeline, TimelineExecutor, TimingCurve,
};
pub use controller::{
    DEFAULT_TRANSITION_DURATION, TransitionController, TransitionEvent, effective_fraction,
};
pub use error::{CardError, CardResult};
pub use geometry::{CardGeometry, Rect};
pub use input::GestureEvent;
pub use run::{AnimationSpec, TransitionRun};
pub use state::{CardState, ControllerPhase};
pub use surface::{CardProperty, CardSurface, CardVisuals, VisualSnapshot};
