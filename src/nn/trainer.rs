/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : Trainer - 带early stopping的小批量梯度下降
 *
 * 每个minibatch：求代价 -> 发散检测 -> 从同一参数快照取梯度 -> 原地更新 θ = θ - α·∇θ。
 * 每个epoch：用验证集错误率跟踪最优模型，显著改善时延长耐心（patience）；
 * epoch数达到耐心或上限时终止。报告的测试错误率取自验证最优的那个epoch，
 * 而不是最后一个epoch（二者可能不同）。
 */

use super::grad::GradientProvider;
use super::mlp::{Mlp, ParamsMut};
use crate::data::DataSplits;
use crate::errors::MlpError;

/// 训练配置
///
/// 耐心相关的三个量（`patience`、`patience_increase`、`improvement_threshold`）
/// 是超参数策略而非结构性常量，全部由配置给出，训练循环里不出现硬编码数值。
#[derive(Debug, Clone, Copy)]
pub struct TrainConfig {
    /// 学习率 α
    pub learning_rate: f32,
    /// L1 正则权重 λ1
    pub l1_reg: f32,
    /// L2 正则权重 λ2
    pub l2_reg: f32,
    /// minibatch 大小
    pub batch_size: usize,
    /// 最大epoch数
    pub max_epochs: usize,
    /// 初始耐心（单位：epoch）
    pub patience: usize,
    /// 显著改善时的耐心延长倍数：patience = max(patience, epoch * patience_increase)
    pub patience_increase: f32,
    /// 相对改善阈值：new_err < best_err * improvement_threshold 才算显著改善
    pub improvement_threshold: f32,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            l1_reg: 0.0,
            l2_reg: 1e-4,
            batch_size: 20,
            max_epochs: 1000,
            patience: 10,
            patience_increase: 2.0,
            improvement_threshold: 0.995,
        }
    }
}

impl TrainConfig {
    /// 校验配置合法性，非法配置在训练开始前拒绝
    pub fn validate(&self) -> Result<(), MlpError> {
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(MlpError::InvalidConfig(format!(
                "学习率必须为正的有限值，得到 {}",
                self.learning_rate
            )));
        }
        for (name, v) in [("l1_reg", self.l1_reg), ("l2_reg", self.l2_reg)] {
            if !(v >= 0.0 && v.is_finite()) {
                return Err(MlpError::InvalidConfig(format!(
                    "{name} 必须为非负的有限值，得到 {v}"
                )));
            }
        }
        for (name, v) in [
            ("batch_size", self.batch_size),
            ("max_epochs", self.max_epochs),
            ("patience", self.patience),
        ] {
            if v == 0 {
                return Err(MlpError::InvalidConfig(format!("{name} 必须大于 0")));
            }
        }
        if !(self.patience_increase >= 1.0 && self.patience_increase.is_finite()) {
            return Err(MlpError::InvalidConfig(format!(
                "patience_increase 必须 ≥ 1.0，得到 {}",
                self.patience_increase
            )));
        }
        if !(self.improvement_threshold > 0.0 && self.improvement_threshold <= 1.0) {
            return Err(MlpError::InvalidConfig(format!(
                "improvement_threshold 必须在 (0, 1] 内，得到 {}",
                self.improvement_threshold
            )));
        }
        Ok(())
    }
}

/// 训练终止状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrainStatus {
    /// 验证错误率长期无显著改善，耐心耗尽
    EarlyStopped,
    /// 达到最大epoch数
    ReachedMaxEpochs,
    /// 代价或参数变为非有限值，训练中止
    ///
    /// 这是用户可见的运行状态，训练器不做重试或回滚。
    Diverged { epoch: usize, cost: f32 },
}

/// 单个epoch的记录
#[derive(Debug, Clone, Copy)]
pub struct EpochRecord {
    /// epoch 序号（从1开始）
    pub epoch: usize,
    /// 本epoch各minibatch代价的均值（更新前求值）
    pub mean_train_cost: f32,
    /// 验证集错误率
    pub valid_err: f32,
}

/// 训练结果报告
#[derive(Debug, Clone)]
pub struct TrainReport {
    /// 终止状态
    pub status: TrainStatus,
    /// 实际运行的epoch数
    pub epochs_run: usize,
    /// 最佳验证错误率（从未评估过验证集时为 +∞）
    pub best_valid_err: f32,
    /// 取得最佳验证错误率的epoch
    pub best_epoch: usize,
    /// 最佳验证epoch对应的测试错误率（注意：不是最后一个epoch的测试错误率）
    pub test_err_at_best: f32,
    /// 每个epoch的记录
    pub records: Vec<EpochRecord>,
}

/// 小批量梯度下降训练器
///
/// 泛型参数 `P` 是梯度提供者（见 [`GradientProvider`]），
/// 常规训练用 [`super::Backprop`]。
///
/// # 使用示例
/// ```ignore
/// let trainer = Trainer::new(TrainConfig::default(), Backprop)?;
/// let report = trainer.fit(&mut model, &splits)?;
/// ```
pub struct Trainer<P: GradientProvider> {
    config: TrainConfig,
    provider: P,
}

impl<P: GradientProvider> Trainer<P> {
    /// 创建训练器，配置非法时立即报错
    pub fn new(config: TrainConfig, provider: P) -> Result<Self, MlpError> {
        config.validate()?;
        Ok(Self { config, provider })
    }

    /// 训练配置
    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// 在给定数据划分上训练模型
    ///
    /// 训练期间本方法独占`&mut Mlp`：参数只在这里被原地修改，
    /// 每个epoch边界上参数都处于一致状态。
    pub fn fit(&self, model: &mut Mlp, splits: &DataSplits) -> Result<TrainReport, MlpError> {
        let cfg = &self.config;
        self.check_splits(model, splits)?;
        let n_train_batches = splits.train.n_batches(cfg.batch_size);

        let mut patience = cfg.patience;
        let mut best_valid_err = f32::INFINITY;
        let mut best_epoch = 0;
        let mut test_err_at_best = f32::NAN;
        let mut records = Vec::new();
        let mut epochs_run = 0;
        let mut status = TrainStatus::ReachedMaxEpochs;

        'training: for epoch in 1..=cfg.max_epochs {
            epochs_run = epoch;

            // ========== minibatch 扫描 ==========
            let mut cost_sum = 0.0_f32;
            for batch in 0..n_train_batches {
                let (x, y) = splits.train.minibatch(batch, cfg.batch_size);

                // 更新前求代价：既是训练记录，也是发散检测
                let cost = model.cost(x, y, cfg.l1_reg, cfg.l2_reg)?;
                if !cost.is_finite() {
                    status = TrainStatus::Diverged { epoch, cost };
                    break 'training;
                }
                cost_sum += cost;

                // 所有梯度来自同一参数快照，之后才做更新
                let grads = self
                    .provider
                    .gradients(model, x, y, cfg.l1_reg, cfg.l2_reg)?;
                let ParamsMut { w1, b1, w2, b2 } = model.params_mut();
                w1.scaled_add(-cfg.learning_rate, &grads.w1);
                b1.scaled_add(-cfg.learning_rate, &grads.b1);
                w2.scaled_add(-cfg.learning_rate, &grads.w2);
                b2.scaled_add(-cfg.learning_rate, &grads.b2);
            }
            if !model.params_finite() {
                status = TrainStatus::Diverged {
                    epoch,
                    cost: f32::NAN,
                };
                break 'training;
            }

            // ========== epoch 评估 ==========
            let (valid_x, valid_y) = splits.valid.full_batch();
            let valid_err = model.errors(valid_x, valid_y)?;
            records.push(EpochRecord {
                epoch,
                mean_train_cost: cost_sum / n_train_batches as f32,
                valid_err,
            });

            if valid_err < best_valid_err {
                // 显著改善才延长耐心；小幅改善只更新最优记录
                if valid_err < best_valid_err * cfg.improvement_threshold {
                    // 延长量以 max_epochs 为上界；已配置的耐心不会被缩短
                    let extended = (epoch as f32 * cfg.patience_increase) as usize;
                    patience = patience.max(extended.min(cfg.max_epochs));
                }
                best_valid_err = valid_err;
                best_epoch = epoch;

                let (test_x, test_y) = splits.test.full_batch();
                test_err_at_best = model.errors(test_x, test_y)?;
            }

            if epoch >= patience {
                status = TrainStatus::EarlyStopped;
                break;
            }
        }

        Ok(TrainReport {
            status,
            epochs_run,
            best_valid_err,
            best_epoch,
            test_err_at_best,
            records,
        })
    }

    /// 训练开始前的数据/模型一致性检查
    fn check_splits(&self, model: &Mlp, splits: &DataSplits) -> Result<(), MlpError> {
        let n_in = model.config().n_in;
        if splits.train.n_features() != n_in {
            return Err(MlpError::shape_mismatch(
                &[n_in],
                &[splits.train.n_features()],
                "训练集特征维度与模型输入维度不一致",
            ));
        }
        for (name, split) in [
            ("train", &splits.train),
            ("valid", &splits.valid),
            ("test", &splits.test),
        ] {
            if split.is_empty() {
                return Err(MlpError::InvalidConfig(format!("{name} 划分为空")));
            }
        }
        if splits.train.n_batches(self.config.batch_size) == 0 {
            return Err(MlpError::InvalidConfig(format!(
                "训练集样本数 {} 不足一个batch（batch_size = {}）",
                splits.train.len(),
                self.config.batch_size
            )));
        }
        Ok(())
    }
}
