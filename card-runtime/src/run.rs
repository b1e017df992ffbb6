//! # Run 模块
//!
//! 一次过渡 = 一组并行的单属性动画，共享目标状态与时长。

use serde::{Deserialize, Serialize};

use crate::animation::{AnimationExecutor, AnimationHandle, TimingCurve, sanitize_duration};
use crate::error::{CardError, CardResult};
use crate::state::CardState;
use crate::surface::{CardProperty, CardSurface};

/// 单属性动画的静态配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationSpec {
    /// 被动画的属性
    pub property: CardProperty,
    /// 展开状态下的值
    pub expanded: f32,
    /// 收起状态下的值
    pub collapsed: f32,
    /// 时间曲线
    #[serde(default)]
    pub curve: TimingCurve,
}

impl AnimationSpec {
    pub fn new(property: CardProperty, expanded: f32, collapsed: f32, curve: TimingCurve) -> Self {
        Self {
            property,
            expanded,
            collapsed,
            curve,
        }
    }

    pub fn value_for(&self, state: CardState) -> f32 {
        match state {
            CardState::Expanded => self.expanded,
            CardState::Collapsed => self.collapsed,
        }
    }

    pub fn validate(&self) -> CardResult<()> {
        if !self.expanded.is_finite() || !self.collapsed.is_finite() {
            return Err(CardError::InvalidAnimation {
                property: self.property,
                message: "终值必须是有限数".to_string(),
            });
        }
        if !self.curve.is_valid() {
            return Err(CardError::InvalidAnimation {
                property: self.property,
                message: format!("无效的时间曲线 {:?}", self.curve),
            });
        }
        Ok(())
    }
}

/// 验证一组动画配置：每条合法，且每个属性最多出现一次
pub fn validate_specs(specs: &[AnimationSpec]) -> CardResult<()> {
    for (i, spec) in specs.iter().enumerate() {
        spec.validate()?;
        if specs[..i].iter().any(|s| s.property == spec.property) {
            return Err(CardError::DuplicateProperty(spec.property));
        }
    }
    Ok(())
}

/// 一个属性的运行中动画
#[derive(Debug)]
struct Track<H> {
    property: CardProperty,
    handle: H,
}

/// 一次进行中的过渡
///
/// 由控制器独占；完成或取消时整体丢弃，句柄随之释放。
#[derive(Debug)]
pub struct TransitionRun<H> {
    target: CardState,
    duration: f32,
    tracks: Vec<Track<H>>,
}

impl<H: AnimationHandle> TransitionRun<H> {
    /// 从 `target.opposite()` 出发，向 `target` 启动全部动画
    pub fn start<E>(executor: &mut E, specs: &[AnimationSpec], target: CardState, duration: f32) -> Self
    where
        E: AnimationExecutor<Handle = H>,
    {
        let duration = sanitize_duration(duration);
        let origin = target.opposite();
        let tracks = specs
            .iter()
            .map(|spec| Track {
                property: spec.property,
                handle: executor.start(
                    spec.value_for(origin),
                    spec.value_for(target),
                    duration,
                    spec.curve,
                ),
            })
            .collect();

        Self {
            target,
            duration,
            tracks,
        }
    }

    pub fn target(&self) -> CardState {
        self.target
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// 当前进度
    ///
    /// 所有句柄同步推进，取第一条即可；空组视为已完成。
    pub fn fraction_complete(&self) -> f32 {
        self.tracks
            .first()
            .map(|t| t.handle.fraction_complete())
            .unwrap_or(1.0)
    }

    /// 暂停全部句柄，返回捕获到的进度
    pub fn pause(&mut self) -> f32 {
        let mut captured = None;
        for track in &mut self.tracks {
            let fraction = track.handle.pause();
            captured.get_or_insert(fraction);
        }
        captured.unwrap_or(1.0)
    }

    /// 把全部句柄设到同一进度
    pub fn scrub(&mut self, fraction: f32) {
        for track in &mut self.tracks {
            track.handle.set_fraction(fraction);
        }
    }

    /// 从当前进度继续播放
    pub fn resume(&mut self) {
        for track in &mut self.tracks {
            track.handle.resume();
        }
    }

    /// 推进全部句柄
    ///
    /// # 返回
    /// - `true`: 至少还有一条动画未结束
    /// - `false`: 全部结束
    pub fn advance(&mut self, dt: f32) -> bool {
        let mut alive = false;
        for track in &mut self.tracks {
            if !track.handle.is_finished() {
                alive |= track.handle.advance(dt);
            }
        }
        alive
    }

    pub fn is_finished(&self) -> bool {
        self.tracks.iter().all(|t| t.handle.is_finished())
    }

    /// 把当前值写入表面
    pub fn apply(&self, surface: &dyn CardSurface) {
        for track in &self.tracks {
            surface.set_property(track.property, track.handle.current_value());
        }
    }

    /// 把起始值写回表面（取消过渡时使用）
    pub fn restore(&self, surface: &dyn CardSurface) {
        for track in &self.tracks {
            surface.set_property(track.property, track.handle.initial_value());
        }
    }
}
