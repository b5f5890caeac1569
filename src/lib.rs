//! # foreach-route
//!
//! **Fast-route eligibility checks for batched ("foreach") elementwise tensor operations.**
//!
//! A foreach operation applies one elementwise op across whole lists of
//! tensors (`foreach_add(params, grads)`, `foreach_mul(params, 0.9)`, ...).
//! A backend can run such a call as a single batched kernel, but only when the
//! batch is homogeneous; otherwise the op must be looped tensor by tensor.
//! This crate makes that decision. It never reads or writes tensor data.
//!
//! ## Features
//!
//! - **Validation**: non-empty lists, matching lengths, matching co-indexed shapes
//! - **Classification**: device, dtype, layout, density and stride homogeneity
//! - **Type promotion**: detects scalars that would change the result dtype
//! - **Injected capability**: the batched-kernel flag is configuration, not a `cfg`
//!
//! ## Quick Start
//!
//! ```rust
//! use foreach_route::prelude::*;
//!
//! let params = vec![TensorView::contiguous(&[16, 16], DType::I32, Device::cuda(0)); 3];
//! let grads = params.clone();
//!
//! let args = ForeachArgs::binary(&params, &grads).division(true);
//! args.validate()?;
//!
//! let route = classify(&args, &FastRouteConfig::default());
//! assert!(!route.is_fast()); // integer division yields floats
//! # Ok::<(), foreach_route::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `hip`: build for a backend without batched kernels; the default
//!   [`foreach::FastRouteConfig`] then disables the fast route

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dtype;
pub mod error;
pub mod foreach;
pub mod runtime;
pub mod scalar;
pub mod tensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::DType;
    pub use crate::error::{Error, Result};
    pub use crate::foreach::{
        FastRouteConfig, ForeachArgs, Rejection, Route, ScalarOperand, TensorLists,
        can_use_fast_route, classify, has_same_attributes, validate, will_promote,
    };
    pub use crate::runtime::{Device, DeviceKind};
    pub use crate::scalar::{Scalar, ScalarKind};
    pub use crate::tensor::{Layout, LayoutKind, TensorView};
}
