//! 网络层：全连接仿射层、隐藏层、softmax输出层

mod hidden;
mod linear;
mod logistic;

pub use hidden::HiddenLayer;
pub use linear::Linear;
pub use logistic::LogisticRegression;
