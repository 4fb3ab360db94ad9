/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : Linear (全连接仿射) 层
 */

use crate::errors::MlpError;
use crate::nn::Init;
use ndarray::{Array1, Array2, ArrayView2};
use rand::rngs::StdRng;

/// Linear (全连接仿射) 层
///
/// 计算 `output = x @ W + b`，偏置 b 沿batch维广播。
///
/// # 输入/输出形状
/// - 输入：[batch_size, in_features]
/// - 输出：[batch_size, out_features]
#[derive(Debug, Clone)]
pub struct Linear {
    /// 权重参数 [in_features, out_features]
    weights: Array2<f32>,
    /// 偏置参数 [out_features]
    bias: Array1<f32>,
}

impl Linear {
    /// 创建新的 Linear 层
    ///
    /// # 参数
    /// - `in_features`: 输入特征维度
    /// - `out_features`: 输出特征维度
    /// - `weight_init`: 权重初始化策略
    /// - `rng`: 随机数生成器（由调用方seed，确保可重复性）
    ///
    /// 偏置固定初始化为全零。
    pub fn new(
        in_features: usize,
        out_features: usize,
        weight_init: Init,
        rng: &mut StdRng,
    ) -> Result<Self, MlpError> {
        if in_features == 0 || out_features == 0 {
            return Err(MlpError::InvalidConfig(format!(
                "Linear 层的维度必须大于 0，得到 {in_features} -> {out_features}"
            )));
        }
        Ok(Self {
            weights: weight_init.generate_with_rng((in_features, out_features), rng),
            bias: Array1::zeros(out_features),
        })
    }

    /// 前向传播：`x @ W + b`
    ///
    /// # 参数
    /// - `x`: 输入，形状 [batch_size, in_features]
    ///
    /// # 返回
    /// 输出矩阵，形状 [batch_size, out_features]；
    /// 输入列数与 in_features 不一致时返回 `ShapeMismatch`。
    pub fn forward(&self, x: ArrayView2<f32>) -> Result<Array2<f32>, MlpError> {
        if x.ncols() != self.in_features() {
            return Err(MlpError::shape_mismatch(
                &[self.in_features()],
                &[x.ncols()],
                "输入批次的列数与 Linear 层的输入维度不一致",
            ));
        }
        Ok(x.dot(&self.weights) + &self.bias)
    }

    /// 输入特征维度
    pub fn in_features(&self) -> usize {
        self.weights.nrows()
    }

    /// 输出特征维度
    pub fn out_features(&self) -> usize {
        self.weights.ncols()
    }

    /// 权重引用
    pub fn weights(&self) -> &Array2<f32> {
        &self.weights
    }

    /// 权重可变引用（训练器原地更新用）
    pub fn weights_mut(&mut self) -> &mut Array2<f32> {
        &mut self.weights
    }

    /// 偏置引用
    pub fn bias(&self) -> &Array1<f32> {
        &self.bias
    }

    /// 偏置可变引用（训练器原地更新用）
    pub fn bias_mut(&mut self) -> &mut Array1<f32> {
        &mut self.bias
    }

    /// 同时取得权重与偏置的可变引用（一次借用拆成两个字段）
    pub fn params_mut(&mut self) -> (&mut Array2<f32>, &mut Array1<f32>) {
        (&mut self.weights, &mut self.bias)
    }
}
