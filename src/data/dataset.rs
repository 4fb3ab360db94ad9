/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : Dataset - 持有特征和整数标签的数据集
 *
 * 与DataLoader不同，这里不做shuffle：训练器按连续下标区间
 * 切出minibatch（x[k*bs..(k+1)*bs]），不足一个batch的尾部样本丢弃。
 */

use crate::errors::MlpError;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, s};

/// Dataset - 持有特征矩阵和整数类别标签的数据集
///
/// # 示例
/// ```ignore
/// let dataset = Dataset::new(features, labels)?;
/// let (x, y) = dataset.minibatch(0, 32);
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    /// 特征矩阵 [n_samples, n_features]
    features: Array2<f32>,
    /// 类别标签 [n_samples]，取值为 0..n_classes
    labels: Array1<usize>,
}

impl Dataset {
    /// 创建新的 Dataset
    ///
    /// # 参数
    /// - `features`: 特征矩阵，每行一个样本
    /// - `labels`: 整数标签向量，长度必须与 features 的行数一致
    pub fn new(features: Array2<f32>, labels: Array1<usize>) -> Result<Self, MlpError> {
        if features.nrows() != labels.len() {
            return Err(MlpError::shape_mismatch(
                &[features.nrows()],
                &[labels.len()],
                "features 和 labels 的样本数必须一致",
            ));
        }
        Ok(Self { features, labels })
    }

    /// 获取样本数量
    pub fn len(&self) -> usize {
        self.features.nrows()
    }

    /// 检查数据集是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 获取特征维度（每个样本的列数）
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// 完整minibatch的个数（尾部不足一个batch的样本丢弃）
    pub fn n_batches(&self, batch_size: usize) -> usize {
        self.len() / batch_size
    }

    /// 按连续下标区间切出第`index`个minibatch（零拷贝视图）
    ///
    /// # 返回
    /// `(x, y)`：x 形状 [batch_size, n_features]，y 形状 [batch_size]
    ///
    /// # Panics
    /// 若区间越界（调用方须先用`n_batches`确定范围）
    pub fn minibatch(&self, index: usize, batch_size: usize) -> (ArrayView2<f32>, ArrayView1<usize>) {
        let start = index * batch_size;
        let end = start + batch_size;
        (
            self.features.slice(s![start..end, ..]),
            self.labels.slice(s![start..end]),
        )
    }

    /// 整个数据集作为一个batch的视图
    pub fn full_batch(&self) -> (ArrayView2<f32>, ArrayView1<usize>) {
        (self.features.view(), self.labels.view())
    }

    /// 获取特征矩阵引用
    pub fn features(&self) -> &Array2<f32> {
        &self.features
    }

    /// 获取标签向量引用
    pub fn labels(&self) -> &Array1<usize> {
        &self.labels
    }
}

/// 训练/验证/测试三个固定划分
#[derive(Debug, Clone)]
pub struct DataSplits {
    pub train: Dataset,
    pub valid: Dataset,
    pub test: Dataset,
}

impl DataSplits {
    /// 创建新的 DataSplits，三个划分的特征维度必须一致
    pub fn new(train: Dataset, valid: Dataset, test: Dataset) -> Result<Self, MlpError> {
        let n_features = train.n_features();
        for (name, split) in [("valid", &valid), ("test", &test)] {
            if split.n_features() != n_features {
                return Err(MlpError::shape_mismatch(
                    &[n_features],
                    &[split.n_features()],
                    &format!("{name} 划分的特征维度与 train 不一致"),
                ));
            }
        }
        Ok(Self { train, valid, test })
    }
}
