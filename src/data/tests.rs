/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : data 模块单元测试
 */

use crate::data::{DataSplits, Dataset, synthetic};
use crate::errors::MlpError;
use ndarray::{Array1, Array2, array};

// ==================== Dataset 基础测试 ====================

/// 测试 Dataset 创建与基本属性
#[test]
fn test_dataset_creation() -> Result<(), MlpError> {
    let features = Array2::<f32>::zeros((10, 3));
    let labels = Array1::<usize>::zeros(10);
    let dataset = Dataset::new(features, labels)?;

    assert_eq!(dataset.len(), 10);
    assert_eq!(dataset.n_features(), 3);
    assert!(!dataset.is_empty());
    Ok(())
}

/// 测试样本数不一致时报错
#[test]
fn test_dataset_misaligned_labels() {
    let features = Array2::<f32>::zeros((10, 3));
    let labels = Array1::<usize>::zeros(8);
    let result = Dataset::new(features, labels);
    assert!(matches!(result, Err(MlpError::ShapeMismatch { .. })));
}

/// 测试minibatch切片：按连续下标区间、零拷贝
#[test]
fn test_dataset_minibatch() -> Result<(), MlpError> {
    let features = array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0], [4.0, 4.0]];
    let labels = array![0_usize, 1, 2, 3, 4];
    let dataset = Dataset::new(features, labels)?;

    // 5个样本、batch=2：只有2个完整batch，尾部1个样本丢弃
    assert_eq!(dataset.n_batches(2), 2);

    let (x, y) = dataset.minibatch(1, 2);
    assert_eq!(x.shape(), &[2, 2]);
    assert_eq!(x[[0, 0]], 2.0);
    assert_eq!(x[[1, 0]], 3.0);
    assert_eq!(y[0], 2);
    assert_eq!(y[1], 3);
    Ok(())
}

/// 测试 DataSplits 的维度一致性校验
#[test]
fn test_splits_feature_dim_check() -> Result<(), MlpError> {
    let make = |cols: usize| {
        Dataset::new(Array2::<f32>::zeros((4, cols)), Array1::<usize>::zeros(4)).unwrap()
    };

    assert!(DataSplits::new(make(3), make(3), make(3)).is_ok());
    assert!(matches!(
        DataSplits::new(make(3), make(2), make(3)),
        Err(MlpError::ShapeMismatch { .. })
    ));
    Ok(())
}

// ==================== 合成数据测试 ====================

/// 测试高斯团生成：形状、标签范围、可重复性
#[test]
fn test_gaussian_blobs() {
    let centers = vec![vec![0.0, 0.0], vec![4.0, 4.0]];
    let a = synthetic::gaussian_blobs(&centers, 25, 0.5, 42);
    let b = synthetic::gaussian_blobs(&centers, 25, 0.5, 42);

    assert_eq!(a.len(), 50);
    assert_eq!(a.n_features(), 2);
    assert!(a.labels().iter().all(|&y| y < 2));
    // 相同种子生成完全相同的数据
    assert_eq!(a.features(), b.features());
    assert_eq!(a.labels(), b.labels());
}

/// 测试高斯团的类间交错：任意连续的偶数长度前缀都包含等量的两类样本
#[test]
fn test_gaussian_blobs_interleaved() {
    let centers = vec![vec![0.0], vec![1.0]];
    let dataset = synthetic::gaussian_blobs(&centers, 10, 0.1, 7);
    let labels = dataset.labels();
    for i in 0..10 {
        let ones = labels.iter().take(2 * (i + 1)).filter(|&&y| y == 1).count();
        assert_eq!(ones, i + 1);
    }
}

/// 测试XOR数据集
#[test]
fn test_xor_dataset() {
    let dataset = synthetic::xor(8);
    assert_eq!(dataset.len(), 32);
    assert_eq!(dataset.n_features(), 2);
    for i in 0..dataset.len() {
        let x0 = dataset.features()[[i, 0]] as usize;
        let x1 = dataset.features()[[i, 1]] as usize;
        assert_eq!(dataset.labels()[i], x0 ^ x1);
    }
}
