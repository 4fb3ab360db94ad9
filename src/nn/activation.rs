/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : 激活函数（tanh / sigmoid）
 *
 * 用显式的枚举变体在构造时选定激活函数，同一个值同时决定：
 * - 前向计算的逐元素非线性映射
 * - Xavier初始化的取值界 r（见 Init::Xavier）
 * 二者必须一致，否则初始化尺度与激活函数不匹配。
 */

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// 激活函数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    /// tanh(a) = (e^a - e^(-a)) / (e^a + e^(-a))，值域 (-1, 1)
    Tanh,
    /// sigmoid(a) = 1 / (1 + e^(-a))，值域 (0, 1)
    Sigmoid,
}

impl Activation {
    /// 逐元素应用激活函数
    pub fn apply(&self, a: &Array2<f32>) -> Array2<f32> {
        match self {
            Self::Tanh => a.mapv(f32::tanh),
            Self::Sigmoid => a.mapv(|v| 1.0 / (1.0 + (-v).exp())),
        }
    }

    /// 由激活输出 h 计算导数（逐元素）
    ///
    /// - tanh:    d/da = 1 - h²
    /// - sigmoid: d/da = h(1 - h)
    ///
    /// 反向传播时前向输出已有，从输出算导数可省去一次激活计算。
    pub fn derive_from_output(&self, h: &Array2<f32>) -> Array2<f32> {
        match self {
            Self::Tanh => h.mapv(|v| 1.0 - v * v),
            Self::Sigmoid => h.mapv(|v| v * (1.0 - v)),
        }
    }

    /// Xavier/Glorot 均匀初始化的取值界 r
    ///
    /// - tanh:    r = sqrt(6 / (fan_in + fan_out))
    /// - sigmoid: r = 4 * sqrt(6 / (fan_in + fan_out))
    ///
    /// 使初期训练的激活值落在高梯度区，并平衡前向/反向信号方差。
    /// 该公式是固定策略而非可调默认值：训练曲线的可复现性依赖于它。
    pub fn xavier_bound(&self, fan_in: usize, fan_out: usize) -> f32 {
        let base = (6.0 / (fan_in + fan_out) as f32).sqrt();
        match self {
            Self::Tanh => base,
            Self::Sigmoid => 4.0 * base,
        }
    }
}
