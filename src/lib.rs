//! # Only MLP
//!
//! `only_mlp`是一个小型的单隐藏层MLP（多层感知机）训练库，
//! 用于MNIST这类多分类任务：`输入 -> Linear -> tanh/sigmoid -> LogisticRegression`。
//!
//! 核心组成：
//! - [`nn::layer::Linear`]：全连接仿射层 `y = x @ W + b`
//! - [`nn::layer::HiddenLayer`]：仿射层 + 激活函数
//! - [`nn::layer::LogisticRegression`]：softmax输出层（负对数似然 + 错误率）
//! - [`nn::Mlp`]：组合以上各层，并提供L1/L2正则项与整体代价函数
//! - [`nn::Trainer`]：带early stopping的小批量梯度下降训练器
//!
//! # 使用示例
//!
//! ```ignore
//! use only_mlp::data::DataSplits;
//! use only_mlp::nn::{Activation, Backprop, Mlp, MlpConfig, TrainConfig, Trainer};
//!
//! let config = MlpConfig::new(784, 500, 10, Activation::Tanh);
//! let mut model = Mlp::new_seeded(config, 1234)?;
//!
//! let trainer = Trainer::new(TrainConfig::default(), Backprop)?;
//! let report = trainer.fit(&mut model, &splits)?;
//! println!("最佳验证错误率: {:.2}%", report.best_valid_err * 100.0);
//! ```

pub mod data;
pub mod errors;
pub mod nn;
