/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : 参数初始化策略
 */

use super::Activation;
use ndarray::{Array1, Array2};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;

/// 参数初始化策略
#[derive(Debug, Clone, Copy)]
pub enum Init {
    /// 全零
    Zeros,
    /// 常数初始化
    Constant(f32),
    /// 均匀分布 [low, high]
    Uniform { low: f32, high: f32 },
    /// Xavier/Glorot 均匀初始化（适用于 Sigmoid/Tanh）
    ///
    /// 每个元素独立地从 [-r, r] 均匀采样，r 由激活函数决定
    /// （见 [`Activation::xavier_bound`]）。
    Xavier { activation: Activation },
}

impl Init {
    /// 生成初始化后的矩阵（使用指定的 RNG）
    ///
    /// # 参数
    /// - `shape`: (行数, 列数)；Xavier 把行数当作 fan_in、列数当作 fan_out
    /// - `rng`: 随机数生成器（由调用方seed，确保可重复性）
    pub fn generate_with_rng(&self, shape: (usize, usize), rng: &mut StdRng) -> Array2<f32> {
        let (rows, cols) = shape;
        match self {
            Self::Zeros => Array2::zeros(shape),
            Self::Constant(v) => Array2::from_elem(shape, *v),
            Self::Uniform { low, high } => sample_uniform(shape, *low, *high, rng),
            Self::Xavier { activation } => {
                let r = activation.xavier_bound(rows, cols);
                sample_uniform(shape, -r, r, rng)
            }
        }
    }

    /// 生成初始化后的向量（偏置等一维参数）
    ///
    /// 注：Xavier 只对权重矩阵有意义，偏置按惯例使用 `Zeros`。
    pub fn generate_vec_with_rng(&self, len: usize, rng: &mut StdRng) -> Array1<f32> {
        match self {
            Self::Zeros => Array1::zeros(len),
            Self::Constant(v) => Array1::from_elem(len, *v),
            Self::Uniform { low, high } => {
                let dist = Uniform::new_inclusive(*low, *high);
                Array1::from_iter((0..len).map(|_| dist.sample(rng)))
            }
            Self::Xavier { .. } => Array1::zeros(len),
        }
    }
}

fn sample_uniform(shape: (usize, usize), low: f32, high: f32, rng: &mut StdRng) -> Array2<f32> {
    let dist = Uniform::new_inclusive(low, high);
    let data = (0..shape.0 * shape.1)
        .map(|_| dist.sample(rng))
        .collect::<Vec<_>>();
    Array2::from_shape_vec(shape, data).expect("采样长度与形状一致")
}
