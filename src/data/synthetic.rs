/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : 合成数据生成器（高斯团、XOR），用于测试与演示
 */

use crate::data::Dataset;
use ndarray::{Array1, Array2};
use rand::SeedableRng;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;

/// 生成若干个二维高斯团组成的分类数据集
///
/// 第`c`类的中心为`centers[c]`，每类`per_class`个样本，
/// 各维独立加上标准差为`std_dev`的高斯噪声。
///
/// # 参数
/// - `centers`: 每个类别的中心点（决定类别数与特征维度）
/// - `per_class`: 每个类别的样本数
/// - `std_dev`: 噪声标准差
/// - `seed`: 随机种子（确保可重复性）
pub fn gaussian_blobs(
    centers: &[Vec<f32>],
    per_class: usize,
    std_dev: f32,
    seed: u64,
) -> Dataset {
    let n_features = centers[0].len();
    let n_samples = centers.len() * per_class;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut features = Array2::<f32>::zeros((n_samples, n_features));
    let mut labels = Array1::<usize>::zeros(n_samples);

    let mut row = 0;
    for (class, center) in centers.iter().enumerate() {
        for _ in 0..per_class {
            for (col, &c) in center.iter().enumerate() {
                features[[row, col]] = c + std_dev * sample_standard_normal(&mut rng);
            }
            labels[row] = class;
            row += 1;
        }
    }

    // 类间交错排列，使任意连续区间都近似等比例包含各类样本
    interleave_classes(features, labels, centers.len(), per_class)
}

/// 生成XOR数据集：4个角点各重复`repeat`次
///
/// 标签为两个输入的异或；线性不可分，是隐藏层必要性的最小示例。
pub fn xor(repeat: usize) -> Dataset {
    let corners: [([f32; 2], usize); 4] = [
        ([0.0, 0.0], 0),
        ([0.0, 1.0], 1),
        ([1.0, 0.0], 1),
        ([1.0, 1.0], 0),
    ];
    let n_samples = 4 * repeat;
    let mut features = Array2::<f32>::zeros((n_samples, 2));
    let mut labels = Array1::<usize>::zeros(n_samples);
    for i in 0..n_samples {
        let (xy, label) = corners[i % 4];
        features[[i, 0]] = xy[0];
        features[[i, 1]] = xy[1];
        labels[i] = label;
    }
    Dataset::new(features, labels).expect("XOR数据集构造不会失败")
}

/// Box-Muller法采样标准正态分布
fn sample_standard_normal(rng: &mut StdRng) -> f32 {
    let unit = Uniform::new(0.0f32, 1.0);
    loop {
        let u1 = unit.sample(rng);
        let u2 = unit.sample(rng);
        if u1 <= f32::EPSILON {
            continue;
        }
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos();
        if z.is_finite() {
            return z;
        }
    }
}

/// 把“按类分块”的样本重排为“类间交错”的顺序
fn interleave_classes(
    features: Array2<f32>,
    labels: Array1<usize>,
    n_classes: usize,
    per_class: usize,
) -> Dataset {
    let n_features = features.ncols();
    let n_samples = features.nrows();
    let mut out_x = Array2::<f32>::zeros((n_samples, n_features));
    let mut out_y = Array1::<usize>::zeros(n_samples);

    let mut dst = 0;
    for i in 0..per_class {
        for class in 0..n_classes {
            let src = class * per_class + i;
            out_x.row_mut(dst).assign(&features.row(src));
            out_y[dst] = labels[src];
            dst += 1;
        }
    }
    Dataset::new(out_x, out_y).expect("交错重排不改变样本数")
}
