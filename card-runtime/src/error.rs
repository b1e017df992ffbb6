//! # Error 模块
//!
//! 定义 card-runtime 中使用的错误类型。
//!
//! 控制器操作本身从不返回错误（乱序调用一律静默忽略），
//! 错误只出现在构造阶段：几何参数与动画参数的校验。

use thiserror::Error;

use crate::surface::CardProperty;

/// 卡片配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CardError {
    /// 几何参数非法
    #[error("无效的几何参数 '{field}': {message}")]
    InvalidGeometry {
        field: &'static str,
        message: String,
    },

    /// 动画参数非法
    #[error("属性 '{property}' 的动画参数无效: {message}")]
    InvalidAnimation {
        property: CardProperty,
        message: String,
    },

    /// 同一属性配置了多条动画
    #[error("属性 '{0}' 重复配置")]
    DuplicateProperty(CardProperty),

    /// 过渡时长非法
    #[error("无效的过渡时长 {0}，必须为正数")]
    InvalidDuration(f32),
}

/// Result 类型别名
pub type CardResult<T> = Result<T, CardError>;
