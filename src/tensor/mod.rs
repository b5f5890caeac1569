//! Tensor metadata types
//!
//! This module provides the read-only `TensorView` the foreach checks operate
//! on, and the `Layout` (shape, strides) it is built from.

mod layout;
mod view;

pub use layout::{Layout, Shape, Strides};
pub use view::{LayoutKind, TensorView};
