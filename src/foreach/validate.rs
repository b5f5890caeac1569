//! Structural restrictions on foreach arguments
//!
//! These are programmer errors from the caller's point of view: the whole
//! call is rejected before any tensor is touched.

use super::{ForeachArgs, ScalarOperand, TensorLists};
use crate::error::{Error, Result};
use crate::scalar::Scalar;
use crate::tensor::TensorView;

/// Validate the structure of a foreach call
///
/// - every tensor list is non-empty
/// - all tensor lists have the same length
/// - co-indexed tensors across lists have identical shapes
/// - a scalar list, if present, has one scalar per tensor
///
/// # Errors
///
/// `InvalidArgument` naming the first violated restriction. Shape mismatches
/// report the index and both shapes.
pub fn validate(args: &ForeachArgs<'_>) -> Result<()> {
    match args.lists() {
        TensorLists::One(tensors) => check_list(tensors, "tensors")?,
        TensorLists::Two(tensors1, tensors2) => check_pair(tensors1, tensors2)?,
        TensorLists::Three(tensors1, tensors2, tensors3) => {
            check_triple(tensors1, tensors2, tensors3)?
        }
    }

    if let ScalarOperand::List(scalars) = args.scalars() {
        check_scalar_count(args.lists().first(), scalars)?;
    }

    Ok(())
}

// ============================================================================
// List Restrictions
// ============================================================================

fn check_list(tensors: &[TensorView], arg: &'static str) -> Result<()> {
    if tensors.is_empty() {
        return Err(Error::invalid_argument(
            arg,
            "Tensor list must have at least one tensor.",
        ));
    }
    Ok(())
}

fn check_pair(tensors1: &[TensorView], tensors2: &[TensorView]) -> Result<()> {
    check_list(tensors1, "tensors1")?;
    check_list(tensors2, "tensors2")?;
    check_same_length(tensors1, tensors2, "tensors2")?;

    for (i, (t1, t2)) in tensors1.iter().zip(tensors2).enumerate() {
        check_same_shape(i, t1, t2, "tensors2")?;
    }
    Ok(())
}

fn check_triple(
    tensors1: &[TensorView],
    tensors2: &[TensorView],
    tensors3: &[TensorView],
) -> Result<()> {
    check_list(tensors1, "tensors1")?;
    check_list(tensors2, "tensors2")?;
    check_list(tensors3, "tensors3")?;
    check_same_length(tensors1, tensors2, "tensors2")?;
    check_same_length(tensors1, tensors3, "tensors3")?;

    for (i, ((t1, t2), t3)) in tensors1.iter().zip(tensors2).zip(tensors3).enumerate() {
        check_same_shape(i, t1, t2, "tensors2")?;
        check_same_shape(i, t1, t3, "tensors3")?;
    }
    Ok(())
}

fn check_same_length(lhs: &[TensorView], rhs: &[TensorView], arg: &'static str) -> Result<()> {
    if lhs.len() != rhs.len() {
        return Err(Error::invalid_argument(
            arg,
            format!(
                "Tensor lists must have the same number of tensors, got {} and {}",
                lhs.len(),
                rhs.len()
            ),
        ));
    }
    Ok(())
}

fn check_same_shape(
    index: usize,
    lhs: &TensorView,
    rhs: &TensorView,
    arg: &'static str,
) -> Result<()> {
    if lhs.shape() != rhs.shape() {
        return Err(Error::invalid_argument(
            arg,
            format!(
                "Corresponding tensors in lists must have the same size, got {:?} and {:?} at index {}",
                lhs.shape(),
                rhs.shape(),
                index
            ),
        ));
    }
    Ok(())
}

// ============================================================================
// Scalar List Restrictions
// ============================================================================

fn check_scalar_count(tensors: &[TensorView], scalars: &[Scalar]) -> Result<()> {
    if tensors.len() != scalars.len() {
        return Err(Error::invalid_argument(
            "scalars",
            format!(
                "Tensor list must have same number of elements as scalar list, got {} and {}",
                tensors.len(),
                scalars.len()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DType;
    use crate::runtime::Device;

    fn t(shape: &[usize]) -> TensorView {
        TensorView::contiguous(shape, DType::F32, Device::cpu())
    }

    fn reason(err: Error) -> String {
        match err {
            Error::InvalidArgument { reason, .. } => reason,
        }
    }

    #[test]
    fn test_single_list() {
        assert!(validate(&ForeachArgs::unary(&[t(&[2]), t(&[3, 3])])).is_ok());

        let err = validate(&ForeachArgs::unary(&[])).unwrap_err();
        assert_eq!(
            err,
            Error::invalid_argument("tensors", "Tensor list must have at least one tensor.")
        );
        assert_eq!(err.arg(), "tensors");
        assert_eq!(reason(err), "Tensor list must have at least one tensor.");
    }

    #[test]
    fn test_single_scalar_needs_no_count() {
        let a = [t(&[2]), t(&[2])];
        assert!(validate(&ForeachArgs::unary(&a).with_scalar(1.0)).is_ok());
        assert!(validate(&ForeachArgs::binary(&a, &a).with_scalar(1.0)).is_ok());
    }

    #[test]
    fn test_scalar_list_count() {
        let a = [t(&[2]), t(&[2])];
        let ok = [Scalar::Int(1), Scalar::Int(2)];
        let short = [Scalar::Int(1)];

        assert!(validate(&ForeachArgs::unary(&a).with_scalars(&ok)).is_ok());

        let err = validate(&ForeachArgs::unary(&a).with_scalars(&short)).unwrap_err();
        assert_eq!(err.arg(), "scalars");
        assert_eq!(
            reason(err),
            "Tensor list must have same number of elements as scalar list, got 2 and 1"
        );
    }

    #[test]
    fn test_empty_list_checked_before_scalar_count() {
        let err = validate(&ForeachArgs::unary(&[]).with_scalars(&[Scalar::Int(1)])).unwrap_err();
        assert_eq!(err.arg(), "tensors");
    }

    #[test]
    fn test_pair_length_mismatch() {
        let a = [t(&[2]), t(&[2])];
        let b = [t(&[2])];
        let err = validate(&ForeachArgs::binary(&a, &b)).unwrap_err();
        assert_eq!(err.arg(), "tensors2");
        assert_eq!(
            reason(err),
            "Tensor lists must have the same number of tensors, got 2 and 1"
        );
    }

    #[test]
    fn test_pair_empty_second() {
        let a = [t(&[2])];
        let err = validate(&ForeachArgs::binary(&a, &[])).unwrap_err();
        assert_eq!(err.arg(), "tensors2");
    }

    #[test]
    fn test_pair_shape_mismatch() {
        let a = [t(&[2, 3]), t(&[4])];
        let b = [t(&[2, 3]), t(&[5])];
        let err = validate(&ForeachArgs::binary(&a, &b)).unwrap_err();
        assert_eq!(
            reason(err),
            "Corresponding tensors in lists must have the same size, got [4] and [5] at index 1"
        );
    }

    #[test]
    fn test_triple() {
        let a = [t(&[2]), t(&[3])];
        let b = [t(&[2]), t(&[3])];
        let c = [t(&[2]), t(&[1, 3])];
        assert!(validate(&ForeachArgs::ternary(&a, &b, &b)).is_ok());

        let err = validate(&ForeachArgs::ternary(&a, &b, &c)).unwrap_err();
        assert_eq!(err.arg(), "tensors3");
        assert!(reason(err).contains("got [3] and [1, 3] at index 1"));

        let err = validate(&ForeachArgs::ternary(&a, &b, &c[..1])).unwrap_err();
        assert_eq!(reason(err), "Tensor lists must have the same number of tensors, got 2 and 1");
    }

    #[test]
    fn test_triple_with_scalar_list() {
        let a = [t(&[2]), t(&[3])];
        let scalars = [Scalar::Float(1.0), Scalar::Float(2.0), Scalar::Float(3.0)];
        let err = validate(&ForeachArgs::ternary(&a, &a, &a).with_scalars(&scalars)).unwrap_err();
        assert_eq!(err.arg(), "scalars");
        assert!(reason(err).ends_with("got 2 and 3"));
    }

    #[test]
    fn test_pair_with_scalar_list() {
        let a = [t(&[2])];
        let scalars = [Scalar::Float(1.0)];
        assert!(validate(&ForeachArgs::binary(&a, &a).with_scalars(&scalars)).is_ok());
        assert!(validate(&ForeachArgs::binary(&a, &a).with_scalars(&[])).is_err());
    }
}
