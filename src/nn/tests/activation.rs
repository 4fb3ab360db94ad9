/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : Activation 单元测试
 */

use crate::nn::Activation;
use approx::assert_abs_diff_eq;
use ndarray::array;

/// 测试 tanh 前向计算
#[test]
fn test_tanh_apply() {
    let a = array![[-1.0_f32, 0.0, 0.3]];
    let h = Activation::Tanh.apply(&a);
    assert_abs_diff_eq!(h[[0, 0]], -0.7615942, epsilon = 1e-6);
    assert_abs_diff_eq!(h[[0, 1]], 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(h[[0, 2]], 0.29131261, epsilon = 1e-6);
}

/// 测试 sigmoid 前向计算
#[test]
fn test_sigmoid_apply() {
    let a = array![[-1.0_f32, 0.0, 2.0]];
    let h = Activation::Sigmoid.apply(&a);
    assert_abs_diff_eq!(h[[0, 0]], 0.26894143, epsilon = 1e-6);
    assert_abs_diff_eq!(h[[0, 1]], 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(h[[0, 2]], 0.8807971, epsilon = 1e-6);
}

/// 测试由输出表示的导数：tanh 为 1-h²，sigmoid 为 h(1-h)
#[test]
fn test_derive_from_output() {
    let a = array![[0.5_f32, -0.8]];

    let h = Activation::Tanh.apply(&a);
    let d = Activation::Tanh.derive_from_output(&h);
    assert_abs_diff_eq!(d[[0, 0]], 1.0 - h[[0, 0]] * h[[0, 0]], epsilon = 1e-7);

    let h = Activation::Sigmoid.apply(&a);
    let d = Activation::Sigmoid.derive_from_output(&h);
    assert_abs_diff_eq!(d[[0, 1]], h[[0, 1]] * (1.0 - h[[0, 1]]), epsilon = 1e-7);
}

/// 测试 Xavier 取值界：tanh 为 sqrt(6/(fan_in+fan_out))，sigmoid 为其4倍
#[test]
fn test_xavier_bound() {
    let tanh_bound = Activation::Tanh.xavier_bound(2, 100);
    assert_abs_diff_eq!(tanh_bound, (6.0_f32 / 102.0).sqrt(), epsilon = 1e-7);

    let sigmoid_bound = Activation::Sigmoid.xavier_bound(2, 100);
    assert_abs_diff_eq!(sigmoid_bound, 4.0 * tanh_bound, epsilon = 1e-6);
}
