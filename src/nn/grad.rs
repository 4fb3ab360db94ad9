/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : 梯度提供者 - 对带正则代价函数求各参数的梯度
 *
 * 训练器只依赖 GradientProvider 这一抽象接口：
 * - Backprop：本网络（两层、结构固定）的闭式反向传播，精确梯度
 * - FiniteDiff：中心差分数值梯度，量级 O(参数个数)，仅用于测试对照
 *
 * 两者都在“单一参数快照”上求值：求梯度过程中不修改任何参数。
 */

use super::Mlp;
use crate::errors::MlpError;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// 各参数的梯度，形状与参数一一对应，顺序 `[W1, b1, W2, b2]`
#[derive(Debug, Clone)]
pub struct ParamGrads {
    pub w1: Array2<f32>,
    pub b1: Array1<f32>,
    pub w2: Array2<f32>,
    pub b2: Array1<f32>,
}

/// 梯度提供者：给定模型当前参数与一个batch，返回代价对各参数的梯度
pub trait GradientProvider {
    /// 计算 `∂cost/∂p`，`cost = nll + λ1·L1 + λ2·L2_sqr`
    fn gradients(
        &self,
        model: &Mlp,
        x: ArrayView2<f32>,
        y: ArrayView1<usize>,
        l1_reg: f32,
        l2_reg: f32,
    ) -> Result<ParamGrads, MlpError>;
}

// ==================== Backprop（闭式反向传播）====================

/// 两层网络的闭式反向传播
///
/// 推导（softmax + NLL 对batch取均值）：
/// ```text
/// d_logits = (softmax(h @ W2 + b2) - onehot(y)) / batch
/// dW2 = hᵀ @ d_logits + λ1·sign(W2) + 2λ2·W2
/// db2 = Σ_rows d_logits
/// d_h  = d_logits @ W2ᵀ
/// d_z1 = d_h ⊙ act'(h)       （act'由激活输出表示：tanh为1-h²，sigmoid为h(1-h)）
/// dW1 = xᵀ @ d_z1 + λ1·sign(W1) + 2λ2·W1
/// db1 = Σ_rows d_z1
/// ```
/// L1 项在 0 处取次梯度 sign(0) = 0。
#[derive(Debug, Clone, Copy, Default)]
pub struct Backprop;

impl GradientProvider for Backprop {
    fn gradients(
        &self,
        model: &Mlp,
        x: ArrayView2<f32>,
        y: ArrayView1<usize>,
        l1_reg: f32,
        l2_reg: f32,
    ) -> Result<ParamGrads, MlpError> {
        let batch_size = x.nrows();
        if y.len() != batch_size {
            return Err(MlpError::shape_mismatch(
                &[batch_size],
                &[y.len()],
                "标签数量与输入批次的样本数不一致",
            ));
        }

        // 前向：隐藏层输出与各类别概率
        let h = model.hidden_output(x)?;
        let mut d_logits = model.output().p_y_given_x(h.view())?;

        // d_logits = (softmax - onehot) / batch
        for (b, &label) in y.iter().enumerate() {
            if label >= model.config().n_out {
                return Err(MlpError::InvalidConfig(format!(
                    "标签 {label} 超出类别数 {}",
                    model.config().n_out
                )));
            }
            d_logits[[b, label]] -= 1.0;
        }
        d_logits.mapv_inplace(|v| v / batch_size as f32);

        // 输出层梯度
        let w2 = model.output().weights();
        let d_w2 = h.t().dot(&d_logits) + l1_reg * &sign(w2) + 2.0 * l2_reg * w2;
        let d_b2 = d_logits.sum_axis(Axis(0));

        // 传回隐藏层
        let d_h = d_logits.dot(&w2.t());
        let d_z1 = d_h * model.hidden().activation().derive_from_output(&h);

        // 隐藏层梯度
        let w1 = model.hidden().weights();
        let d_w1 = x.t().dot(&d_z1) + l1_reg * &sign(w1) + 2.0 * l2_reg * w1;
        let d_b1 = d_z1.sum_axis(Axis(0));

        Ok(ParamGrads {
            w1: d_w1,
            b1: d_b1,
            w2: d_w2,
            b2: d_b2,
        })
    }
}

/// 逐元素符号函数，sign(0) = 0
fn sign(w: &Array2<f32>) -> Array2<f32> {
    w.mapv(|v| {
        if v > 0.0 {
            1.0
        } else if v < 0.0 {
            -1.0
        } else {
            0.0
        }
    })
}

// ==================== FiniteDiff（数值梯度）====================

/// 中心差分数值梯度：`(cost(p+ε) - cost(p-ε)) / 2ε`
///
/// 每个标量参数需要两次完整的代价求值，只适合在测试里
/// 对照验证 [`Backprop`] 的正确性。
#[derive(Debug, Clone, Copy)]
pub struct FiniteDiff {
    /// 扰动量 ε
    pub epsilon: f32,
}

impl Default for FiniteDiff {
    fn default() -> Self {
        // f32 精度下中心差分的合理扰动量
        Self { epsilon: 1e-2 }
    }
}

impl FiniteDiff {
    /// 对单个标量参数做中心差分
    fn central_diff<F>(
        &self,
        model: &Mlp,
        x: ArrayView2<f32>,
        y: ArrayView1<usize>,
        l1_reg: f32,
        l2_reg: f32,
        perturb: F,
    ) -> Result<f32, MlpError>
    where
        F: Fn(&mut Mlp, f32),
    {
        let mut plus = model.clone();
        perturb(&mut plus, self.epsilon);
        let cost_plus = plus.cost(x, y, l1_reg, l2_reg)?;

        let mut minus = model.clone();
        perturb(&mut minus, -self.epsilon);
        let cost_minus = minus.cost(x, y, l1_reg, l2_reg)?;

        Ok((cost_plus - cost_minus) / (2.0 * self.epsilon))
    }
}

impl GradientProvider for FiniteDiff {
    fn gradients(
        &self,
        model: &Mlp,
        x: ArrayView2<f32>,
        y: ArrayView1<usize>,
        l1_reg: f32,
        l2_reg: f32,
    ) -> Result<ParamGrads, MlpError> {
        let config = *model.config();
        let mut grads = ParamGrads {
            w1: Array2::zeros((config.n_in, config.n_hidden)),
            b1: Array1::zeros(config.n_hidden),
            w2: Array2::zeros((config.n_hidden, config.n_out)),
            b2: Array1::zeros(config.n_out),
        };

        for i in 0..config.n_in {
            for j in 0..config.n_hidden {
                grads.w1[[i, j]] = self.central_diff(model, x, y, l1_reg, l2_reg, |m, eps| {
                    m.params_mut().w1[[i, j]] += eps;
                })?;
            }
        }
        for j in 0..config.n_hidden {
            grads.b1[j] = self.central_diff(model, x, y, l1_reg, l2_reg, |m, eps| {
                m.params_mut().b1[j] += eps;
            })?;
        }
        for i in 0..config.n_hidden {
            for j in 0..config.n_out {
                grads.w2[[i, j]] = self.central_diff(model, x, y, l1_reg, l2_reg, |m, eps| {
                    m.params_mut().w2[[i, j]] += eps;
                })?;
            }
        }
        for j in 0..config.n_out {
            grads.b2[j] = self.central_diff(model, x, y, l1_reg, l2_reg, |m, eps| {
                m.params_mut().b2[j] += eps;
            })?;
        }

        Ok(grads)
    }
}
