//! # Timeline 模块
//!
//! 可暂停、可拖动进度的单属性动画。
//!
//! 时间轴只关心 f32 值在 `duration` 内从 `from` 走到 `to`，
//! 进度由宿主的帧调度器通过 `advance(dt)` 推进。

use super::TimingCurve;

/// 最短时长（秒），避免除零
pub const MIN_DURATION: f32 = 0.01;

/// 把任意输入时长规整为可用值
pub fn sanitize_duration(duration: f32) -> f32 {
    if duration.is_finite() {
        duration.max(MIN_DURATION)
    } else {
        MIN_DURATION
    }
}

/// 可拖动的动画句柄
///
/// 由 [`AnimationExecutor`] 启动产生，对控制器而言是一条不透明的时间轴。
pub trait AnimationHandle {
    /// 暂停并返回当前进度
    fn pause(&mut self) -> f32;

    /// 直接设置进度（0.0 - 1.0，超出部分被限制）
    fn set_fraction(&mut self, fraction: f32);

    /// 从当前进度以原速度继续播放，剩余时长为 `(1 - fraction) * duration`
    fn resume(&mut self);

    /// 推进 `dt` 秒
    ///
    /// # 返回
    /// - `true`: 动画仍在进行中（包括暂停）
    /// - `false`: 动画已结束
    fn advance(&mut self, dt: f32) -> bool;

    /// 当前时间进度（未应用曲线）
    fn fraction_complete(&self) -> f32;

    /// 当前属性值（已应用曲线）
    fn current_value(&self) -> f32;

    /// 起始值
    fn initial_value(&self) -> f32;

    /// 是否已结束
    fn is_finished(&self) -> bool;
}

/// 动画执行器
///
/// 给定起止值、时长与曲线，产生一个正在播放的句柄。
pub trait AnimationExecutor {
    type Handle: AnimationHandle;

    fn start(&mut self, from: f32, to: f32, duration: f32, curve: TimingCurve) -> Self::Handle;
}

/// 时间轴状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimelineState {
    /// 正在播放
    #[default]
    Playing,
    /// 已暂停（可拖动进度）
    Paused,
    /// 已完成
    Completed,
}

/// 内置时间轴实现
#[derive(Debug, Clone)]
pub struct Timeline {
    from: f32,
    to: f32,
    duration: f32,
    curve: TimingCurve,
    state: TimelineState,
    /// 已经过的时间（秒），暂停拖动时由 fraction 反算
    elapsed: f32,
}

impl Timeline {
    pub fn new(from: f32, to: f32, duration: f32, curve: TimingCurve) -> Self {
        Self {
            from,
            to,
            duration: sanitize_duration(duration),
            curve,
            state: TimelineState::Playing,
            elapsed: 0.0,
        }
    }

    pub fn state(&self) -> TimelineState {
        self.state
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn final_value(&self) -> f32 {
        self.to
    }

    /// 剩余播放时长（秒）
    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }
}

impl AnimationHandle for Timeline {
    fn pause(&mut self) -> f32 {
        if self.state == TimelineState::Playing {
            self.state = TimelineState::Paused;
        }
        self.fraction_complete()
    }

    fn set_fraction(&mut self, fraction: f32) {
        if self.state == TimelineState::Completed {
            return;
        }
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.elapsed = fraction * self.duration;
    }

    fn resume(&mut self) {
        if self.state == TimelineState::Paused {
            self.state = TimelineState::Playing;
        }
    }

    fn advance(&mut self, dt: f32) -> bool {
        match self.state {
            TimelineState::Paused => true,
            TimelineState::Completed => false,
            TimelineState::Playing => {
                self.elapsed += dt.max(0.0);
                if self.elapsed >= self.duration {
                    self.elapsed = self.duration;
                    self.state = TimelineState::Completed;
                    false
                } else {
                    true
                }
            }
        }
    }

    fn fraction_complete(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    fn current_value(&self) -> f32 {
        if self.state == TimelineState::Completed {
            return self.to;
        }
        self.from + (self.to - self.from) * self.curve.apply(self.fraction_complete())
    }

    fn initial_value(&self) -> f32 {
        self.from
    }

    fn is_finished(&self) -> bool {
        self.state == TimelineState::Completed
    }
}

/// 产生 [`Timeline`] 的执行器
#[derive(Debug, Clone, Copy, Default)]
pub struct TimelineExecutor;

impl AnimationExecutor for TimelineExecutor {
    type Handle = Timeline;

    fn start(&mut self, from: f32, to: f32, duration: f32, curve: TimingCurve) -> Timeline {
        Timeline::new(from, to, duration, curve)
    }
}
