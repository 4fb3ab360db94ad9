//! 数据模块
//!
//! 提供训练所需的数据集抽象与合成数据生成器。
//!
//! # 主要组件
//!
//! - [`Dataset`]: 持有特征矩阵和整数标签的数据集，支持按连续下标切出minibatch
//! - [`DataSplits`]: 训练/验证/测试三个固定划分
//! - [`synthetic`]: 合成数据生成函数（高斯团、XOR），用于测试与演示
//!
//! 注：MNIST等数据集文件的下载/解析不在本crate范围内，
//! 调用方只需把数据整理成`Dataset`即可。

mod dataset;
pub mod synthetic;

#[cfg(test)]
mod tests;

// Re-exports
pub use dataset::{DataSplits, Dataset};
