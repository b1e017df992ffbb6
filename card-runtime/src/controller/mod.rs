//! # Controller 模块
//!
//! 可中断过渡状态机。
//!
//! ## 控制流
//!
//! - 离散手势（tap）：`toggle` 直接播放整组动画
//! - 连续手势（drag）：`begin_interactive` → `update`* → `end_interactive`，
//!   拖动的正是 tap 路径会直接播放的同一组动画
//! - 宿主每帧调用 `tick(dt)` 推进动画，并通过 `drain_events` 观察状态变化
//!
//! ## 线程模型
//!
//! 所有方法必须在同一个事件处理上下文中调用（控制器持有 `Rc`，不是 `Send`）。
//! 多线程宿主需要把调用汇入一个串行队列。
//!
//! ## 乱序容忍
//!
//! 手势识别器在失败路径上不保证严格的 began → changed → ended 顺序，
//! 因此没有活跃过渡时的 `update` / `end_interactive` 静默忽略，不报错。

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::animation::{AnimationExecutor, TimelineExecutor};
use crate::error::{CardError, CardResult};
use crate::geometry::CardGeometry;
use crate::input::GestureEvent;
use crate::run::{AnimationSpec, TransitionRun, validate_specs};
use crate::state::{CardState, ControllerPhase};
use crate::surface::CardSurface;

/// 默认过渡时长（秒）
pub const DEFAULT_TRANSITION_DURATION: f32 = 0.9;

/// 控制器事件
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TransitionEvent {
    /// 新过渡开始
    Started {
        target: CardState,
        interactive: bool,
    },
    /// 过渡被手势冻结
    Paused { fraction: f32 },
    /// 过渡从冻结处继续播放
    Resumed { fraction: f32 },
    /// 过渡完成，`state` 为新的当前状态
    Completed { state: CardState },
    /// 零位移拖拽松手，过渡被撤销，`state` 保持不变
    Cancelled { state: CardState },
}

/// 手势交互期间的附加状态
#[derive(Debug, Clone, Copy)]
struct Interaction {
    /// 过渡是否由本次 begin 创建（而不是抓住一个已在播放的过渡）
    fresh_run: bool,
    /// 是否收到过非零位移
    displaced: bool,
}

/// 由 `current_state`、暂停时捕获的进度与原始位移计算实际进度
///
/// 展开状态下位移取反，使"拖向另一个状态"总是增大进度；结果限制在 [0, 1]。
pub fn effective_fraction(current_state: CardState, paused_fraction: f32, raw_fraction: f32) -> f32 {
    let raw = if raw_fraction.is_finite() {
        raw_fraction
    } else {
        0.0
    };
    let signed = match current_state {
        CardState::Expanded => -raw,
        CardState::Collapsed => raw,
    };
    (paused_fraction + signed).clamp(0.0, 1.0)
}

/// 可中断过渡控制器
pub struct TransitionController<E: AnimationExecutor = TimelineExecutor> {
    specs: Vec<AnimationSpec>,
    executor: E,
    surface: Rc<dyn CardSurface>,
    travel_distance: f32,
    default_duration: f32,
    current_state: CardState,
    /// 至多一个活跃过渡
    active_run: Option<TransitionRun<E::Handle>>,
    paused_fraction: f32,
    interaction: Option<Interaction>,
    events: Vec<TransitionEvent>,
}

impl<E: AnimationExecutor> std::fmt::Debug for TransitionController<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionController")
            .field("current_state", &self.current_state)
            .field("transitioning", &self.active_run.is_some())
            .field("paused_fraction", &self.paused_fraction)
            .field("tracks", &self.specs.len())
            .finish()
    }
}

impl TransitionController<TimelineExecutor> {
    /// 用内置时间轴创建控制器
    pub fn new(
        geometry: &CardGeometry,
        initial_state: CardState,
        surface: Rc<dyn CardSurface>,
    ) -> CardResult<Self> {
        Self::with_executor(geometry, initial_state, surface, TimelineExecutor)
    }
}

impl<E: AnimationExecutor> TransitionController<E> {
    /// 用自定义执行器创建控制器
    ///
    /// 创建时把 `initial_state` 对应的终值写入表面。
    pub fn with_executor(
        geometry: &CardGeometry,
        initial_state: CardState,
        surface: Rc<dyn CardSurface>,
        executor: E,
    ) -> CardResult<Self> {
        geometry.validate()?;
        let specs = geometry.animation_specs();
        Self::from_parts(
            specs,
            geometry.travel_distance(),
            initial_state,
            surface,
            executor,
        )
    }

    /// 用任意动画组创建控制器
    pub fn from_parts(
        specs: Vec<AnimationSpec>,
        travel_distance: f32,
        initial_state: CardState,
        surface: Rc<dyn CardSurface>,
        executor: E,
    ) -> CardResult<Self> {
        validate_specs(&specs)?;
        if !travel_distance.is_finite() || travel_distance <= 0.0 {
            return Err(CardError::InvalidGeometry {
                field: "travel_distance",
                message: format!("必须为正数，实际 {travel_distance}"),
            });
        }

        for spec in &specs {
            surface.set_property(spec.property, spec.value_for(initial_state));
        }

        Ok(Self {
            specs,
            executor,
            surface,
            travel_distance,
            default_duration: DEFAULT_TRANSITION_DURATION,
            current_state: initial_state,
            active_run: None,
            paused_fraction: 0.0,
            interaction: None,
            events: Vec::new(),
        })
    }

    /// 设置 `handle_gesture` 使用的过渡时长
    pub fn with_default_duration(mut self, duration: f32) -> CardResult<Self> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(CardError::InvalidDuration(duration));
        }
        self.default_duration = duration;
        Ok(self)
    }

    // ========== 查询 ==========

    /// 当前状态（过渡进行中时为过渡之前的状态）
    pub fn current_state(&self) -> CardState {
        self.current_state
    }

    pub fn phase(&self) -> ControllerPhase {
        match &self.active_run {
            None => ControllerPhase::Idle {
                state: self.current_state,
            },
            Some(run) => ControllerPhase::Transitioning {
                target: run.target(),
                interactive: self.interaction.is_some(),
            },
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.active_run.is_some()
    }

    pub fn is_interactive(&self) -> bool {
        self.interaction.is_some()
    }

    /// 最近一次暂停时捕获的进度
    pub fn paused_fraction(&self) -> f32 {
        self.paused_fraction
    }

    /// 活跃过渡的当前进度，空闲时为 `None`
    pub fn fraction_complete(&self) -> Option<f32> {
        self.active_run.as_ref().map(|run| run.fraction_complete())
    }

    pub fn travel_distance(&self) -> f32 {
        self.travel_distance
    }

    pub fn default_duration(&self) -> f32 {
        self.default_duration
    }

    // ========== 过渡控制 ==========

    /// 离散触发：向相反状态播放完整过渡
    ///
    /// 已有过渡时忽略（不排队、不反向）。
    ///
    /// # 返回
    /// 是否启动了新过渡
    pub fn toggle(&mut self, duration: f32) -> bool {
        if self.active_run.is_some() {
            return false;
        }

        let run = self.start_run(duration);
        run.apply(self.surface.as_ref());
        self.events.push(TransitionEvent::Started {
            target: run.target(),
            interactive: false,
        });
        self.active_run = Some(run);
        true
    }

    /// 连续手势开始
    ///
    /// - 空闲：创建过渡并立即冻结在进度 0
    /// - 过渡中：原地冻结，记录当前进度（不重新开始）
    pub fn begin_interactive(&mut self, duration: f32) {
        let fresh_run = self.active_run.is_none();
        if fresh_run {
            let run = self.start_run(duration);
            run.apply(self.surface.as_ref());
            self.events.push(TransitionEvent::Started {
                target: run.target(),
                interactive: true,
            });
            self.active_run = Some(run);
        }

        if let Some(run) = self.active_run.as_mut() {
            self.paused_fraction = run.pause();
        }

        // 连续两次 begin 沿用第一次的交互记录
        let interaction = self.interaction.unwrap_or(Interaction {
            fresh_run,
            displaced: false,
        });
        self.interaction = Some(interaction);
        self.events.push(TransitionEvent::Paused {
            fraction: self.paused_fraction,
        });
    }

    /// 连续手势位移更新
    ///
    /// `raw_fraction` 为沿行程方向（向上为正）的位移除以行程。
    pub fn update(&mut self, raw_fraction: f32) {
        let Some(run) = self.active_run.as_mut() else {
            return;
        };

        let fraction = effective_fraction(self.current_state, self.paused_fraction, raw_fraction);
        run.scrub(fraction);
        run.apply(self.surface.as_ref());

        if let Some(interaction) = self.interaction.as_mut() {
            if raw_fraction != 0.0 && raw_fraction.is_finite() {
                interaction.displaced = true;
            }
        }
    }

    /// 连续手势结束：以剩余时长继续播放到终态
    ///
    /// 由本次手势创建、且从未发生位移的过渡会被撤销，当前状态保持不变。
    pub fn end_interactive(&mut self) {
        let Some(run) = self.active_run.as_mut() else {
            return;
        };
        let interaction = self.interaction.take();

        if interaction.is_some_and(|i| i.fresh_run && !i.displaced) {
            run.restore(self.surface.as_ref());
            self.active_run = None;
            self.paused_fraction = 0.0;
            self.events.push(TransitionEvent::Cancelled {
                state: self.current_state,
            });
            return;
        }

        let fraction = run.fraction_complete();
        run.resume();
        self.events.push(TransitionEvent::Resumed { fraction });
    }

    /// 按手势事件分发
    pub fn handle_gesture(&mut self, event: &GestureEvent) {
        let duration = self.default_duration;
        match *event {
            GestureEvent::Tap => {
                self.toggle(duration);
            }
            GestureEvent::Began => self.begin_interactive(duration),
            GestureEvent::Changed { dy, .. } => {
                // 向上拖（dy < 0）为正
                self.update(-dy / self.travel_distance);
            }
            GestureEvent::Ended | GestureEvent::Cancelled => self.end_interactive(),
        }
    }

    // ========== 帧调度 ==========

    /// 推进活跃过渡 `dt` 秒
    ///
    /// 全部动画结束时翻转状态、丢弃过渡，并恰好产生一次 `Completed`。
    pub fn tick(&mut self, dt: f32) {
        let Some(run) = self.active_run.as_mut() else {
            return;
        };

        let alive = run.advance(dt);
        run.apply(self.surface.as_ref());

        if !alive && run.is_finished() {
            let target = run.target();
            self.active_run = None;
            self.interaction = None;
            self.paused_fraction = 0.0;
            self.current_state = target;
            self.events.push(TransitionEvent::Completed { state: target });
        }
    }

    /// 取出并清空待处理事件
    pub fn drain_events(&mut self) -> Vec<TransitionEvent> {
        std::mem::take(&mut self.events)
    }

    fn start_run(&mut self, duration: f32) -> TransitionRun<E::Handle> {
        TransitionRun::start(
            &mut self.executor,
            &self.specs,
            self.current_state.opposite(),
            duration,
        )
    }
}

#[cfg(test)]
mod tests;
