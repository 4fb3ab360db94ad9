/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : 隐藏层 = Linear + 激活函数
 */

use super::Linear;
use crate::errors::MlpError;
use crate::nn::{Activation, Init};
use ndarray::{Array1, Array2, ArrayView2};
use rand::rngs::StdRng;

/// 隐藏层：仿射变换后接逐元素非线性
///
/// `output(x) = activation(x @ W1 + b1)`
///
/// 权重使用 Xavier 均匀初始化，取值界由激活函数决定；偏置为全零。
/// 参数顺序固定为 `[W1, b1]`，梯度与参数按此顺序对应。
#[derive(Debug, Clone)]
pub struct HiddenLayer {
    linear: Linear,
    activation: Activation,
}

impl HiddenLayer {
    /// 创建新的隐藏层
    ///
    /// # 参数
    /// - `n_in`: 输入维度 D（fan_in）
    /// - `n_hidden`: 隐藏单元数 Dh（fan_out）
    /// - `activation`: 激活函数，同时决定初始化尺度
    /// - `rng`: 随机数生成器
    pub fn new(
        n_in: usize,
        n_hidden: usize,
        activation: Activation,
        rng: &mut StdRng,
    ) -> Result<Self, MlpError> {
        let linear = Linear::new(n_in, n_hidden, Init::Xavier { activation }, rng)?;
        Ok(Self { linear, activation })
    }

    /// 前向传播：`activation(x @ W1 + b1)`
    ///
    /// # 返回
    /// 输出矩阵，形状 [batch_size, n_hidden]
    pub fn output(&self, x: ArrayView2<f32>) -> Result<Array2<f32>, MlpError> {
        Ok(self.activation.apply(&self.linear.forward(x)?))
    }

    /// 激活函数
    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// 输入维度
    pub fn n_in(&self) -> usize {
        self.linear.in_features()
    }

    /// 隐藏单元数
    pub fn n_hidden(&self) -> usize {
        self.linear.out_features()
    }

    /// 权重 W1 引用
    pub fn weights(&self) -> &Array2<f32> {
        self.linear.weights()
    }

    /// 权重 W1 可变引用
    pub fn weights_mut(&mut self) -> &mut Array2<f32> {
        self.linear.weights_mut()
    }

    /// 偏置 b1 引用
    pub fn bias(&self) -> &Array1<f32> {
        self.linear.bias()
    }

    /// 偏置 b1 可变引用
    pub fn bias_mut(&mut self) -> &mut Array1<f32> {
        self.linear.bias_mut()
    }

    /// 同时取得 W1、b1 的可变引用
    pub fn params_mut(&mut self) -> (&mut Array2<f32>, &mut Array1<f32>) {
        self.linear.params_mut()
    }
}
