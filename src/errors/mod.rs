//! 错误类型定义
//!
//! 本crate的所有可恢复错误都汇总为[`MlpError`]。
//! 注意：训练发散（代价变为非有限值）不是错误，而是训练结果的一种状态，
//! 见`nn::TrainStatus::Diverged`；early stopping同理，属于计划内的终止。

use thiserror::Error;

/// MLP相关错误
#[derive(Debug, Error)]
pub enum MlpError {
    /// 形状不匹配（如输入批次的列数与层的输入维度不一致）
    #[error("形状不匹配: 期望 {expected:?}, 实际 {got:?}（{message}）")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        message: String,
    },

    /// 非法配置（如学习率非正、层宽为零、批大小为零）
    #[error("非法配置: {0}")]
    InvalidConfig(String),

    /// IO 错误（模型保存/加载）
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON（反）序列化错误（模型保存/加载）
    #[error("JSON 错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 加载的checkpoint与当前模型结构不一致
    #[error("checkpoint不匹配: 期望 {expected}, 实际 {got}")]
    CheckpointMismatch { expected: String, got: String },
}

impl MlpError {
    /// 构造`ShapeMismatch`的便捷方法
    pub fn shape_mismatch(expected: &[usize], got: &[usize], message: &str) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
            message: message.to_string(),
        }
    }
}
