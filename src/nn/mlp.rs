/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : Mlp - 单隐藏层多层感知机
 *
 * 组合一个隐藏层（Linear + 激活）和一个 LogisticRegression 输出层。
 * L1/L2 正则项只对权重 W1、W2 求和（偏置不参与），
 * 且每次调用都从当前参数值重新计算，不做缓存。
 */

use super::Activation;
use super::layer::{HiddenLayer, LogisticRegression};
use crate::errors::MlpError;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// MLP 结构配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MlpConfig {
    /// 输入维度 D
    pub n_in: usize,
    /// 隐藏单元数 Dh
    pub n_hidden: usize,
    /// 类别数 Dout
    pub n_out: usize,
    /// 隐藏层激活函数
    pub activation: Activation,
}

impl MlpConfig {
    /// 创建配置
    pub fn new(n_in: usize, n_hidden: usize, n_out: usize, activation: Activation) -> Self {
        Self {
            n_in,
            n_hidden,
            n_out,
            activation,
        }
    }

    /// 校验配置合法性
    pub fn validate(&self) -> Result<(), MlpError> {
        for (name, v) in [
            ("n_in", self.n_in),
            ("n_hidden", self.n_hidden),
            ("n_out", self.n_out),
        ] {
            if v == 0 {
                return Err(MlpError::InvalidConfig(format!("{name} 必须大于 0")));
            }
        }
        Ok(())
    }
}

/// 可变参数视图，按固定顺序 `[W1, b1, W2, b2]`
pub struct ParamsMut<'a> {
    pub w1: &'a mut Array2<f32>,
    pub b1: &'a mut Array1<f32>,
    pub w2: &'a mut Array2<f32>,
    pub b2: &'a mut Array1<f32>,
}

/// 单隐藏层MLP：`输入 -> 隐藏层 -> LogisticRegression`
#[derive(Debug, Clone)]
pub struct Mlp {
    config: MlpConfig,
    hidden: HiddenLayer,
    output: LogisticRegression,
}

impl Mlp {
    /// 创建新的MLP
    ///
    /// 隐藏层权重按 Xavier 均匀初始化（尺度由激活函数决定），
    /// 输出层 W2、b2 零初始化。
    pub fn new(config: MlpConfig, rng: &mut StdRng) -> Result<Self, MlpError> {
        config.validate()?;
        let hidden = HiddenLayer::new(config.n_in, config.n_hidden, config.activation, rng)?;
        let output = LogisticRegression::new(config.n_hidden, config.n_out)?;
        Ok(Self {
            config,
            hidden,
            output,
        })
    }

    /// 创建新的MLP（带种子，确保可重复性）
    pub fn new_seeded(config: MlpConfig, seed: u64) -> Result<Self, MlpError> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(config, &mut rng)
    }

    /// 隐藏层输出 `activation(x @ W1 + b1)`
    pub fn hidden_output(&self, x: ArrayView2<f32>) -> Result<Array2<f32>, MlpError> {
        self.hidden.output(x)
    }

    /// 负对数似然损失（经隐藏层后委托给输出层）
    pub fn negative_log_likelihood(
        &self,
        x: ArrayView2<f32>,
        y: ArrayView1<usize>,
    ) -> Result<f32, MlpError> {
        let h = self.hidden.output(x)?;
        self.output.negative_log_likelihood(h.view(), y)
    }

    /// 错误率：batch中误分类样本的比例
    pub fn errors(&self, x: ArrayView2<f32>, y: ArrayView1<usize>) -> Result<f32, MlpError> {
        let h = self.hidden.output(x)?;
        self.output.errors(h.view(), y)
    }

    /// 预测类别
    pub fn predict(&self, x: ArrayView2<f32>) -> Result<Array1<usize>, MlpError> {
        let h = self.hidden.output(x)?;
        self.output.predict(h.view())
    }

    /// L1 正则项：|W1|₁ + |W2|₁（偏置不参与）
    pub fn l1(&self) -> f32 {
        abs_sum(self.hidden.weights()) + abs_sum(self.output.weights())
    }

    /// L2 正则项（平方和）：‖W1‖₂² + ‖W2‖₂²（偏置不参与）
    pub fn l2_sqr(&self) -> f32 {
        sqr_sum(self.hidden.weights()) + sqr_sum(self.output.weights())
    }

    /// 带正则的整体代价
    ///
    /// `cost = nll + λ1·L1 + λ2·L2_sqr`
    ///
    /// 是当前参数值与给定batch的纯函数：同一状态下重复求值结果相同。
    pub fn cost(
        &self,
        x: ArrayView2<f32>,
        y: ArrayView1<usize>,
        l1_reg: f32,
        l2_reg: f32,
    ) -> Result<f32, MlpError> {
        Ok(self.negative_log_likelihood(x, y)? + l1_reg * self.l1() + l2_reg * self.l2_sqr())
    }

    /// 结构配置
    pub fn config(&self) -> &MlpConfig {
        &self.config
    }

    /// 隐藏层引用
    pub fn hidden(&self) -> &HiddenLayer {
        &self.hidden
    }

    /// 输出层引用
    pub fn output(&self) -> &LogisticRegression {
        &self.output
    }

    /// 按固定顺序 `[W1, b1, W2, b2]` 取得所有参数的可变引用
    ///
    /// 训练器只通过这里原地更新参数内容，不替换张量本身。
    pub fn params_mut(&mut self) -> ParamsMut<'_> {
        let (w1, b1) = self.hidden.params_mut();
        let (w2, b2) = self.output.params_mut();
        ParamsMut { w1, b1, w2, b2 }
    }

    /// 检查所有参数是否均为有限值（发散检测用）
    pub fn params_finite(&self) -> bool {
        self.hidden.weights().iter().all(|v| v.is_finite())
            && self.hidden.bias().iter().all(|v| v.is_finite())
            && self.output.weights().iter().all(|v| v.is_finite())
            && self.output.bias().iter().all(|v| v.is_finite())
    }

    // ==================== 模型保存/加载 ====================

    /// 保存模型到 JSON 文件（结构配置 + 四个参数张量）
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), MlpError> {
        let checkpoint = Checkpoint {
            config: self.config,
            w1: self.hidden.weights().clone(),
            b1: self.hidden.bias().clone(),
            w2: self.output.weights().clone(),
            b2: self.output.bias().clone(),
        };
        let json = serde_json::to_string(&checkpoint)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// 从 JSON 文件加载模型
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MlpError> {
        let json = std::fs::read_to_string(path)?;
        let checkpoint: Checkpoint = serde_json::from_str(&json)?;
        checkpoint.into_mlp()
    }
}

/// 模型checkpoint：结构配置 + 四个参数张量
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub config: MlpConfig,
    pub w1: Array2<f32>,
    pub b1: Array1<f32>,
    pub w2: Array2<f32>,
    pub b2: Array1<f32>,
}

impl Checkpoint {
    /// 把checkpoint还原成模型，形状与配置不一致时拒绝
    pub fn into_mlp(self) -> Result<Mlp, MlpError> {
        let c = &self.config;
        let expected = [
            (self.w1.shape(), vec![c.n_in, c.n_hidden], "W1"),
            (self.b1.shape(), vec![c.n_hidden], "b1"),
            (self.w2.shape(), vec![c.n_hidden, c.n_out], "W2"),
            (self.b2.shape(), vec![c.n_out], "b2"),
        ];
        for (got, want, name) in expected {
            if got != want.as_slice() {
                return Err(MlpError::CheckpointMismatch {
                    expected: format!("{name} 形状 {want:?}"),
                    got: format!("{got:?}"),
                });
            }
        }

        // 先按配置建模型，再用checkpoint里的参数覆盖
        let mut model = Mlp::new_seeded(self.config, 0)?;
        {
            let params = model.params_mut();
            params.w1.assign(&self.w1);
            params.b1.assign(&self.b1);
            params.w2.assign(&self.w2);
            params.b2.assign(&self.b2);
        }
        Ok(model)
    }
}

fn abs_sum(w: &Array2<f32>) -> f32 {
    w.iter().map(|v| v.abs()).sum()
}

fn sqr_sum(w: &Array2<f32>) -> f32 {
    w.iter().map(|v| v * v).sum()
}
