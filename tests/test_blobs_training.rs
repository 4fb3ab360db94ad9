/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : 三分类高斯团端到端训练测试
 *
 * 走完完整流程：构建数据划分 -> 构建MLP -> 带early stopping的
 * 小批量梯度下降 -> 检查报告 -> 保存/加载后预测一致。
 */

use only_mlp::data::{DataSplits, synthetic};
use only_mlp::errors::MlpError;
use only_mlp::nn::{
    Activation, Backprop, Mlp, MlpConfig, TrainConfig, TrainStatus, Trainer,
};

#[test]
fn test_blobs_training() -> Result<(), MlpError> {
    println!("\n{}", "=".repeat(50));
    println!("=== 三分类高斯团训练测试 ===");
    println!("{}", "=".repeat(50));

    // ========== 1. 数据 ==========
    let centers = vec![vec![0.0, 0.0], vec![6.0, 0.0], vec![0.0, 6.0]];
    let splits = DataSplits::new(
        synthetic::gaussian_blobs(&centers, 200, 1.0, 11),
        synthetic::gaussian_blobs(&centers, 60, 1.0, 22),
        synthetic::gaussian_blobs(&centers, 60, 1.0, 33),
    )?;
    println!(
        "[1/3] 数据: 训练 {} / 验证 {} / 测试 {}",
        splits.train.len(),
        splits.valid.len(),
        splits.test.len()
    );

    // ========== 2. 训练 ==========
    let config = MlpConfig::new(2, 16, 3, Activation::Tanh);
    let mut model = Mlp::new_seeded(config, 1234)?;
    println!("[2/3] 构建 MLP: 2 -> 16 (tanh) -> 3，开始训练...");

    let trainer = Trainer::new(
        TrainConfig {
            learning_rate: 0.1,
            l1_reg: 0.0,
            l2_reg: 1e-4,
            batch_size: 20,
            max_epochs: 200,
            patience: 20,
            patience_increase: 2.0,
            improvement_threshold: 0.995,
        },
        Backprop,
    )?;
    let report = trainer.fit(&mut model, &splits)?;

    for record in report.records.iter().take(3) {
        println!(
            "  epoch {:>3}: 训练代价 {:.4}，验证错误率 {:.2}%",
            record.epoch,
            record.mean_train_cost,
            record.valid_err * 100.0
        );
    }
    println!(
        "  ... 共 {} 个 epoch，状态 {:?}",
        report.epochs_run, report.status
    );
    println!(
        "  最佳验证错误率 {:.2}%（epoch {}），对应测试错误率 {:.2}%",
        report.best_valid_err * 100.0,
        report.best_epoch,
        report.test_err_at_best * 100.0
    );

    // ========== 3. 检查 ==========
    assert!(
        matches!(
            report.status,
            TrainStatus::EarlyStopped | TrainStatus::ReachedMaxEpochs
        ),
        "不应发散: {:?}",
        report.status
    );
    assert!(report.epochs_run <= 200);
    // 类间距6、噪声σ=1，几乎完全可分
    assert!(report.best_valid_err < 0.05);
    assert!(report.test_err_at_best < 0.10);

    // 保存/加载后预测一致
    let path = std::env::temp_dir().join(format!("only_mlp_blobs_{}.json", std::process::id()));
    model.save(&path)?;
    let loaded = Mlp::load(&path)?;
    std::fs::remove_file(&path)?;

    let (test_x, test_y) = splits.test.full_batch();
    assert_eq!(loaded.predict(test_x)?, model.predict(test_x)?);
    assert_eq!(loaded.errors(test_x, test_y)?, model.errors(test_x, test_y)?);
    println!("[3/3] 保存/加载后预测一致 ✓");

    Ok(())
}
