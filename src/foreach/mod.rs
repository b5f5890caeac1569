//! Argument checks for foreach (list-of-tensors) elementwise operations
//!
//! A foreach operation applies one elementwise op to every tensor of one or
//! more equal-length tensor lists, optionally combined with a scalar or a
//! per-element scalar list. Before dispatching, the caller:
//!
//! 1. runs [`validate`], which rejects structurally malformed arguments
//!    (empty lists, length mismatches, co-indexed shape mismatches), then
//! 2. runs [`can_use_fast_route`] (or [`classify`] for the reason), which
//!    decides whether the whole batch may go to a single batched kernel or
//!    must be looped tensor by tensor through the generic elementwise path.
//!
//! # Example
//!
//! ```
//! use foreach_route::prelude::*;
//!
//! let params: Vec<TensorView> = (1..=3)
//!     .map(|n| TensorView::contiguous(&[n, 4], DType::F32, Device::cpu()))
//!     .collect();
//!
//! let args = ForeachArgs::unary(&params).with_scalar(0.5f32);
//! args.validate()?;
//! assert!(can_use_fast_route(&args, &FastRouteConfig::new(true)));
//! # Ok::<(), foreach_route::error::Error>(())
//! ```

mod config;
mod route;
mod validate;

pub use config::FastRouteConfig;
pub use route::{Rejection, Route, can_use_fast_route, classify, has_same_attributes, will_promote};
pub use validate::validate;

use crate::error::Result;
use crate::scalar::Scalar;
use crate::tensor::TensorView;
use smallvec::SmallVec;

/// Co-indexed tensors drawn from every list of a call
pub type Group<'a> = SmallVec<[&'a TensorView; 3]>;

/// The tensor lists of a foreach call
#[derive(Copy, Clone, Debug)]
pub enum TensorLists<'a> {
    /// One list, e.g. `foreach_neg(tensors)`
    One(&'a [TensorView]),
    /// Two lists, e.g. `foreach_add(tensors1, tensors2)`
    Two(&'a [TensorView], &'a [TensorView]),
    /// Three lists, e.g. `foreach_addcmul(tensors1, tensors2, tensors3)`
    Three(&'a [TensorView], &'a [TensorView], &'a [TensorView]),
}

impl<'a> TensorLists<'a> {
    /// The first list; expected device and dtype are taken from its head
    #[inline]
    pub fn first(&self) -> &'a [TensorView] {
        match *self {
            Self::One(t) | Self::Two(t, _) | Self::Three(t, _, _) => t,
        }
    }

    /// Number of lists (1, 2 or 3)
    #[inline]
    pub fn count(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Two(..) => 2,
            Self::Three(..) => 3,
        }
    }

    /// Tensors at `index` of every list, in list order
    ///
    /// Returns `None` if any list is shorter than `index + 1`.
    pub fn group(&self, index: usize) -> Option<Group<'a>> {
        let mut group = Group::new();
        match *self {
            Self::One(t1) => group.push(t1.get(index)?),
            Self::Two(t1, t2) => {
                group.push(t1.get(index)?);
                group.push(t2.get(index)?);
            }
            Self::Three(t1, t2, t3) => {
                group.push(t1.get(index)?);
                group.push(t2.get(index)?);
                group.push(t3.get(index)?);
            }
        }
        Some(group)
    }
}

/// The scalar operand of a foreach call
#[derive(Copy, Clone, Debug, Default)]
pub enum ScalarOperand<'a> {
    /// No scalar
    #[default]
    Absent,
    /// One scalar shared by every element, e.g. `foreach_mul(tensors, 2.0)`
    Single(Scalar),
    /// One scalar per element of the tensor lists
    List(&'a [Scalar]),
}

/// All arguments of one foreach call
///
/// Every combination of one to three tensor lists with no scalar, a single
/// scalar, or a scalar list is representable. The division flag tells the
/// classifier that integer inputs would produce a floating point result.
#[derive(Copy, Clone, Debug)]
pub struct ForeachArgs<'a> {
    lists: TensorLists<'a>,
    scalars: ScalarOperand<'a>,
    division: bool,
}

impl<'a> ForeachArgs<'a> {
    fn from_lists(lists: TensorLists<'a>) -> Self {
        Self {
            lists,
            scalars: ScalarOperand::Absent,
            division: false,
        }
    }

    /// Arguments with a single tensor list
    pub fn unary(tensors: &'a [TensorView]) -> Self {
        Self::from_lists(TensorLists::One(tensors))
    }

    /// Arguments with two tensor lists
    pub fn binary(tensors1: &'a [TensorView], tensors2: &'a [TensorView]) -> Self {
        Self::from_lists(TensorLists::Two(tensors1, tensors2))
    }

    /// Arguments with three tensor lists
    pub fn ternary(
        tensors1: &'a [TensorView],
        tensors2: &'a [TensorView],
        tensors3: &'a [TensorView],
    ) -> Self {
        Self::from_lists(TensorLists::Three(tensors1, tensors2, tensors3))
    }

    /// Attach one scalar shared by every element
    pub fn with_scalar(mut self, scalar: impl Into<Scalar>) -> Self {
        self.scalars = ScalarOperand::Single(scalar.into());
        self
    }

    /// Attach one scalar per element
    pub fn with_scalars(mut self, scalars: &'a [Scalar]) -> Self {
        self.scalars = ScalarOperand::List(scalars);
        self
    }

    /// Mark the operation as a division
    pub fn division(mut self, division: bool) -> Self {
        self.division = division;
        self
    }

    /// The tensor lists
    #[inline]
    pub fn lists(&self) -> TensorLists<'a> {
        self.lists
    }

    /// The scalar operand
    #[inline]
    pub fn scalars(&self) -> ScalarOperand<'a> {
        self.scalars
    }

    /// Whether the operation is a division
    #[inline]
    pub fn is_division(&self) -> bool {
        self.division
    }

    /// Number of tensors in the first list
    #[inline]
    pub fn len(&self) -> usize {
        self.lists.first().len()
    }

    /// Whether the first list is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lists.first().is_empty()
    }

    /// Check structural restrictions, see [`validate`]
    pub fn validate(&self) -> Result<()> {
        validate(self)
    }

    /// Pick the execution route, see [`classify`]
    pub fn route(&self, config: &FastRouteConfig) -> Route {
        classify(self, config)
    }
}
