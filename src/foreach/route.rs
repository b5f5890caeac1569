//! Fast-route classification
//!
//! The batched kernels assume every tensor of a call lives on one device,
//! has one dtype, is a dense strided block, and that the result has the
//! input's dtype. Anything else must take the per-tensor path, which is
//! always correct. The classifier only ever answers "fast" when the batched
//! kernel would produce exactly what the per-tensor path produces.

use super::{FastRouteConfig, ForeachArgs, ScalarOperand, TensorLists};
use crate::dtype::DType;
use crate::runtime::Device;
use crate::scalar::{Scalar, ScalarKind};
use crate::tensor::TensorView;
use std::fmt;

/// Why a call was sent down the per-tensor path
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// This build has no batched kernels
    BackendUnavailable,
    /// Arguments that would not pass validation (empty or ragged lists)
    Malformed,
    /// Device, dtype, layout, density or strides differ at `index`
    AttributeMismatch {
        /// Element index within the lists
        index: usize,
    },
    /// The scalar operand would change the result dtype at `index`
    Promotion {
        /// Element index within the lists
        index: usize,
    },
    /// Division of an integral tensor at `index` produces a float
    IntegerDivision {
        /// Element index within the lists
        index: usize,
    },
    /// Complex scalar or tensor in a scalar-list call at `index`
    ComplexScalarList {
        /// Element index within the lists
        index: usize,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BackendUnavailable => write!(f, "batched kernels unavailable"),
            Self::Malformed => write!(f, "malformed arguments"),
            Self::AttributeMismatch { index } => write!(f, "attribute mismatch at index {index}"),
            Self::Promotion { index } => write!(f, "scalar promotes tensor at index {index}"),
            Self::IntegerDivision { index } => write!(f, "integer division at index {index}"),
            Self::ComplexScalarList { index } => {
                write!(f, "complex scalar list element at index {index}")
            }
        }
    }
}

/// Execution route chosen for a foreach call
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// One batched kernel over the whole call
    Fast,
    /// Per-tensor fallback
    Slow(Rejection),
}

impl Route {
    /// Whether the batched kernel may be used
    #[inline]
    pub fn is_fast(&self) -> bool {
        matches!(self, Self::Fast)
    }

    /// Why the fast route was refused, if it was
    #[inline]
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Fast => None,
            Self::Slow(reason) => Some(*reason),
        }
    }
}

// ============================================================================
// Predicates
// ============================================================================

/// Check that every tensor of `group` is batch compatible
///
/// True iff each tensor has `expected_dtype`, lives on `expected_device`, is
/// strided, non-overlapping and dense, and has the same strides as the first
/// tensor of the group. An empty group is trivially compatible.
pub fn has_same_attributes(
    expected_device: Device,
    expected_dtype: DType,
    group: &[&TensorView],
) -> bool {
    let Some(first) = group.first() else {
        return true;
    };
    let expected_strides = first.strides();

    group.iter().all(|t| {
        t.dtype() == expected_dtype
            && t.device() == expected_device
            && t.is_strided()
            && t.is_non_overlapping_and_dense()
            && t.strides() == expected_strides
    })
}

/// Check whether combining `tensor` with `scalar` changes the result dtype
///
/// Rules are evaluated in order, first match wins:
///
/// | Scalar | Tensor | Result |
/// |--------|--------|--------|
/// | complex | integral or bool | complex |
/// | complex | float | complex |
/// | float | integral or bool | float |
/// | integral (not bool) | bool | integral |
/// | any, division | integral or bool | float |
pub fn will_promote(tensor: &TensorView, scalar: &Scalar, is_division: bool) -> bool {
    will_promote_dtype(tensor.dtype(), scalar, is_division)
}

fn will_promote_dtype(dtype: DType, scalar: &Scalar, is_division: bool) -> bool {
    let integral = dtype.is_integral(true);

    let promotes = match scalar.kind() {
        ScalarKind::Complex => integral || dtype.is_float(),
        ScalarKind::Floating => integral,
        ScalarKind::Integral => dtype.is_bool(),
        ScalarKind::Bool => false,
    };
    promotes || (is_division && integral)
}

// ============================================================================
// Route Selection
// ============================================================================

/// Decide whether a foreach call may use the batched kernel
///
/// Expects arguments that already passed [`super::validate`]; malformed
/// arguments are answered with `false`, never a panic.
pub fn can_use_fast_route(args: &ForeachArgs<'_>, config: &FastRouteConfig) -> bool {
    classify(args, config).is_fast()
}

/// Like [`can_use_fast_route`], reporting why the fast route was refused
pub fn classify(args: &ForeachArgs<'_>, config: &FastRouteConfig) -> Route {
    let route = match select(args, config) {
        Ok(()) => Route::Fast,
        Err(reason) => Route::Slow(reason),
    };

    match route {
        Route::Fast => tracing::trace!(
            lists = args.lists().count(),
            len = args.len(),
            "foreach fast route"
        ),
        Route::Slow(reason) => tracing::debug!(
            lists = args.lists().count(),
            len = args.len(),
            %reason,
            "foreach slow route"
        ),
    }
    route
}

fn select(args: &ForeachArgs<'_>, config: &FastRouteConfig) -> Result<(), Rejection> {
    if !config.batched_kernels() {
        return Err(Rejection::BackendUnavailable);
    }

    let lists = args.lists();
    let first = lists.first().first().ok_or(Rejection::Malformed)?;
    let expected_device = first.device();
    let expected_dtype = first.dtype();
    let division = args.is_division();

    let scalars = match (lists, args.scalars()) {
        (TensorLists::One(tensors), ScalarOperand::List(scalars)) => {
            return select_scalar_list(tensors, scalars, division);
        }
        // Routed on the tensor lists alone, as if no scalars were given
        (TensorLists::Three(..), ScalarOperand::List(_)) if !config.strict_scalar_lists() => {
            ScalarOperand::Absent
        }
        (_, scalars) => scalars,
    };

    for index in 0..args.len() {
        let group = lists.group(index).ok_or(Rejection::Malformed)?;
        if !has_same_attributes(expected_device, expected_dtype, &group) {
            return Err(Rejection::AttributeMismatch { index });
        }

        let lead = group[0];
        match scalars {
            ScalarOperand::Absent => {
                if division && lead.dtype().is_integral(true) {
                    return Err(Rejection::IntegerDivision { index });
                }
            }
            ScalarOperand::Single(scalar) => {
                if will_promote(lead, &scalar, division) {
                    return Err(Rejection::Promotion { index });
                }
            }
            ScalarOperand::List(scalars) => {
                let scalar = scalars.get(index).ok_or(Rejection::Malformed)?;
                check_scalar_list_element(index, lead, scalar, division)?;
            }
        }
    }

    Ok(())
}

/// One list with one scalar per tensor
///
/// Each tensor is checked against its own device and dtype, so the list may
/// mix dtypes and devices as long as each element is a dense strided block.
fn select_scalar_list(
    tensors: &[TensorView],
    scalars: &[Scalar],
    division: bool,
) -> Result<(), Rejection> {
    if scalars.len() < tensors.len() {
        return Err(Rejection::Malformed);
    }

    for (index, (tensor, scalar)) in tensors.iter().zip(scalars).enumerate() {
        if !has_same_attributes(tensor.device(), tensor.dtype(), &[tensor]) {
            return Err(Rejection::AttributeMismatch { index });
        }
        check_scalar_list_element(index, tensor, scalar, division)?;
    }
    Ok(())
}

fn check_scalar_list_element(
    index: usize,
    tensor: &TensorView,
    scalar: &Scalar,
    division: bool,
) -> Result<(), Rejection> {
    if will_promote(tensor, scalar, division) {
        return Err(Rejection::Promotion { index });
    }
    // Batched kernels take scalar lists as real values only
    if scalar.is_complex() || tensor.dtype().is_complex() {
        return Err(Rejection::ComplexScalarList { index });
    }
    Ok(())
}
