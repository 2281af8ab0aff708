//! ReLU 与 Sine 激活层测试

use approx::assert_abs_diff_eq;
use ndarray::array;

use crate::errors::ReconError;
use crate::nn::{LayerOps, Relu, Sine};

#[test]
fn test_relu_forward_backward() {
    let mut relu = Relu::new("relu");
    let x = array![[-1.0, 0.0, 2.0], [3.0, -0.5, 0.1]];
    assert_eq!(relu.forward(&x), array![[0.0, 0.0, 2.0], [3.0, 0.0, 0.1]]);

    let g = array![[1.0, 1.0, 1.0], [2.0, 2.0, 2.0]];
    assert_eq!(
        relu.backward(&g).unwrap(),
        array![[0.0, 0.0, 1.0], [2.0, 0.0, 2.0]]
    );
}

#[test]
fn test_sine_forward_backward() {
    let omega = 30.0_f32;
    let mut sine = Sine::new("sin", omega);
    let x = array![[0.0, 0.01], [-0.02, 0.05]];
    let y = sine.forward(&x);
    for (got, &input) in y.iter().zip(x.iter()) {
        assert_abs_diff_eq!(*got, (omega * input).sin(), epsilon = 1e-6);
    }

    let g = array![[1.0, 0.5], [-1.0, 2.0]];
    let dx = sine.backward(&g).unwrap();
    for ((got, &input), &grad) in dx.iter().zip(x.iter()).zip(g.iter()) {
        assert_abs_diff_eq!(*got, grad * omega * (omega * input).cos(), epsilon = 1e-4);
    }
}

#[test]
fn test_activation_backward_before_forward() {
    let g = array![[1.0]];
    assert!(matches!(
        Relu::new("relu").backward(&g),
        Err(ReconError::BackwardBeforeForward(_))
    ));
    assert!(matches!(
        Sine::new("sin", 1.0).backward(&g),
        Err(ReconError::BackwardBeforeForward(_))
    ));
}

#[test]
fn test_clear_cache_drops_forward_state() {
    let mut sine = Sine::new("sin", 1.0);
    sine.forward(&array![[0.3]]);
    sine.clear_cache();
    assert!(sine.backward(&array![[1.0]]).is_err());
}
