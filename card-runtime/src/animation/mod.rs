//! # Animation 模块
//!
//! 单属性动画的时间轴部分：曲线、句柄、执行器。
//!
//! ## 核心概念
//!
//! - `TimingCurve` / `EasingFunction`: 时间曲线
//! - `AnimationHandle`: 可暂停、可拖动进度、可继续播放的句柄
//! - `AnimationExecutor`: 启动句柄的执行器，控制器把它当作不透明的时间轴工厂
//! - `Timeline` / `TimelineExecutor`: 内置实现，由宿主帧调度器推进
//!
//! ```rust,ignore
//! let mut executor = TimelineExecutor;
//! let mut handle = executor.start(0.0, 1.0, 0.9, TimingCurve::spring(1.0));
//! handle.pause();
//! handle.set_fraction(0.4);
//! handle.resume();
//! while handle.advance(1.0 / 60.0) {}
//! ```

mod easing;
mod timeline;

pub use easing::{EasingFunction, TimingCurve};
pub use timeline::{
    AnimationExecutor, AnimationHandle, MIN_DURATION, Timeline, TimelineExecutor, TimelineState,
    sanitize_duration,
};
