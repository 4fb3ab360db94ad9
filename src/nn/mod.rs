/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : 负责神经网络（neural network）的构建与训练
 */

mod activation;
mod grad;
mod init;
pub mod layer;
mod mlp;
mod trainer;

pub use activation::Activation;
pub use grad::{Backprop, FiniteDiff, GradientProvider, ParamGrads};
pub use init::Init;
pub use mlp::{Checkpoint, Mlp, MlpConfig, ParamsMut};
pub use trainer::{EpochRecord, TrainConfig, TrainReport, TrainStatus, Trainer};

#[cfg(test)]
mod tests;
