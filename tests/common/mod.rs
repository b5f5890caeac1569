//! Common test utilities
#![allow(dead_code)]

use foreach_route::dtype::DType;
use foreach_route::runtime::Device;
use foreach_route::tensor::TensorView;

/// Install a test-writer subscriber so `RUST_LOG=foreach_route=debug` shows routing decisions
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// `n` contiguous tensors of one shape, dtype and device
pub fn uniform_list(n: usize, shape: &[usize], dtype: DType, device: Device) -> Vec<TensorView> {
    (0..n)
        .map(|_| TensorView::contiguous(shape, dtype, device))
        .collect()
}

/// Contiguous CPU tensors with the given shapes
pub fn cpu_list(shapes: &[&[usize]], dtype: DType) -> Vec<TensorView> {
    shapes
        .iter()
        .map(|shape| TensorView::contiguous(shape, dtype, Device::cpu()))
        .collect()
}
