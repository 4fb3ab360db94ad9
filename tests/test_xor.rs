/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : XOR 集成测试
 *
 * XOR 是线性不可分的最小例子：没有隐藏层的线性分类器错误率不会低于50%，
 * 带 tanh 隐藏层的MLP则可以学会它。
 */

use only_mlp::data::{DataSplits, synthetic};
use only_mlp::errors::MlpError;
use only_mlp::nn::{Activation, Backprop, Mlp, MlpConfig, TrainConfig, Trainer};

#[test]
fn test_xor() -> Result<(), MlpError> {
    println!("\n=== XOR 集成测试 ===");

    // XOR 四个角点循环排列，任意连续4个样本恰好覆盖全部角点
    let dataset = synthetic::xor(16);
    let splits = DataSplits::new(dataset.clone(), dataset.clone(), dataset)?;

    // 构建网络: 2 -> 8 (tanh) -> 2
    let config = MlpConfig::new(2, 8, 2, Activation::Tanh);
    let mut model = Mlp::new_seeded(config, 42)?;

    let trainer = Trainer::new(
        TrainConfig {
            learning_rate: 0.3,
            l1_reg: 0.0,
            l2_reg: 0.0,
            batch_size: 4,
            max_epochs: 2000,
            patience: 2000,
            ..TrainConfig::default()
        },
        Backprop,
    )?;

    let report = trainer.fit(&mut model, &splits)?;

    println!(
        "训练结束: {:?}，共 {} 个 epoch，最佳验证错误率 {:.2}%",
        report.status,
        report.epochs_run,
        report.best_valid_err * 100.0
    );

    // 线性模型只能到 50%；学到任何非线性结构都会显著低于它
    assert!(
        report.best_valid_err <= 0.25,
        "XOR 错误率应明显低于线性模型（50%），得到 {:.2}%",
        report.best_valid_err * 100.0
    );

    // 训练代价应有实质性下降
    let first = report.records.first().unwrap().mean_train_cost;
    let last = report.records.last().unwrap().mean_train_cost;
    println!("训练代价: {first:.4} -> {last:.4}");
    assert!(last < first);

    Ok(())
}
