/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : LogisticRegression - softmax输出层
 *
 * 数值稳定计算（log-sum-exp 技巧）：
 * softmax(x)_i = exp(x_i - max(x)) / Σ exp(x_j - max(x))
 * nll = -mean_b [ x_{b,y_b} - max(x_b) - log(Σ exp(x_{b,j} - max(x_b))) ]
 */

use super::Linear;
use crate::errors::MlpError;
use crate::nn::Init;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::rngs::StdRng;

/// softmax输出层（多分类线性分类器）
///
/// 计算 `p(y|x) = softmax(x @ W2 + b2)`，并提供负对数似然损失与错误率。
/// W2、b2 均零初始化（线性分类阶段的惯例）。
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    linear: Linear,
}

impl LogisticRegression {
    /// 创建新的输出层
    ///
    /// # 参数
    /// - `n_in`: 输入维度（隐藏层宽度 Dh）
    /// - `n_out`: 类别数 Dout
    pub fn new(n_in: usize, n_out: usize) -> Result<Self, MlpError> {
        // 零初始化不需要随机数；seed任意
        let mut rng = <StdRng as rand::SeedableRng>::seed_from_u64(0);
        let linear = Linear::new(n_in, n_out, Init::Zeros, &mut rng)?;
        Ok(Self { linear })
    }

    /// 各类别的后验概率 `softmax(x @ W2 + b2)`
    ///
    /// # 返回
    /// 概率矩阵，形状 [batch_size, n_out]，每行和为1
    pub fn p_y_given_x(&self, x: ArrayView2<f32>) -> Result<Array2<f32>, MlpError> {
        let logits = self.linear.forward(x)?;
        Ok(stable_softmax(&logits))
    }

    /// 负对数似然损失（对batch取均值）
    pub fn negative_log_likelihood(
        &self,
        x: ArrayView2<f32>,
        y: ArrayView1<usize>,
    ) -> Result<f32, MlpError> {
        let logits = self.linear.forward(x)?;
        let batch_size = logits.nrows();
        check_labels(y, batch_size, self.linear.out_features())?;

        let mut total_loss = 0.0_f32;
        for (b, row) in logits.rows().into_iter().enumerate() {
            let max_val = row.fold(f32::NEG_INFINITY, |m, &v| m.max(v));
            let sum_exp: f32 = row.iter().map(|&v| (v - max_val).exp()).sum();
            total_loss -= row[y[b]] - max_val - sum_exp.ln();
        }
        Ok(total_loss / batch_size as f32)
    }

    /// 错误率：batch中预测类别与标签不一致的样本比例，取值 [0, 1]
    pub fn errors(&self, x: ArrayView2<f32>, y: ArrayView1<usize>) -> Result<f32, MlpError> {
        let predicted = self.predict(x)?;
        check_labels(y, predicted.len(), self.linear.out_features())?;
        let wrong = predicted
            .iter()
            .zip(y.iter())
            .filter(|(p, t)| p != t)
            .count();
        Ok(wrong as f32 / predicted.len() as f32)
    }

    /// 预测类别（每行logits的argmax）
    pub fn predict(&self, x: ArrayView2<f32>) -> Result<Array1<usize>, MlpError> {
        let logits = self.linear.forward(x)?;
        let predicted = logits
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .max_by(|(_, a), (_, b)| a.total_cmp(b))
                    .map_or(0, |(i, _)| i)
            })
            .collect::<Vec<_>>();
        Ok(Array1::from_vec(predicted))
    }

    /// 输入维度
    pub fn n_in(&self) -> usize {
        self.linear.in_features()
    }

    /// 类别数
    pub fn n_out(&self) -> usize {
        self.linear.out_features()
    }

    /// 权重 W2 引用
    pub fn weights(&self) -> &Array2<f32> {
        self.linear.weights()
    }

    /// 权重 W2 可变引用
    pub fn weights_mut(&mut self) -> &mut Array2<f32> {
        self.linear.weights_mut()
    }

    /// 偏置 b2 引用
    pub fn bias(&self) -> &Array1<f32> {
        self.linear.bias()
    }

    /// 偏置 b2 可变引用
    pub fn bias_mut(&mut self) -> &mut Array1<f32> {
        self.linear.bias_mut()
    }

    /// 同时取得 W2、b2 的可变引用
    pub fn params_mut(&mut self) -> (&mut Array2<f32>, &mut Array1<f32>) {
        self.linear.params_mut()
    }
}

/// 数值稳定的逐行softmax（先减去行最大值再指数化）
pub(crate) fn stable_softmax(logits: &Array2<f32>) -> Array2<f32> {
    let mut result = logits.clone();
    for mut row in result.rows_mut() {
        let max_val = row.fold(f32::NEG_INFINITY, |m, &v| m.max(v));
        row.mapv_inplace(|v| (v - max_val).exp());
        let sum_exp = row.sum();
        row.mapv_inplace(|v| v / sum_exp);
    }
    result
}

/// 校验标签长度与取值范围
fn check_labels(y: ArrayView1<usize>, batch_size: usize, n_out: usize) -> Result<(), MlpError> {
    if y.len() != batch_size {
        return Err(MlpError::shape_mismatch(
            &[batch_size],
            &[y.len()],
            "标签数量与输入批次的样本数不一致",
        ));
    }
    if let Some(&bad) = y.iter().find(|&&label| label >= n_out) {
        return Err(MlpError::InvalidConfig(format!(
            "标签 {bad} 超出类别数 {n_out}"
        )));
    }
    Ok(())
}
