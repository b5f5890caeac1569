//! Layout: shape and strides for tensor memory layout

use smallvec::SmallVec;
use std::fmt;

/// Stack allocation threshold for dimensions
/// Most tensors have 4 or fewer dimensions, so we stack-allocate up to 4
const STACK_DIMS: usize = 4;

/// Shape type: dimensions of a tensor
pub type Shape = SmallVec<[usize; STACK_DIMS]>;

/// Strides type: element offsets between consecutive elements along each dimension
/// Signed to support negative strides (e.g., for flip operations)
/// NOTE: Strides are in ELEMENTS, not bytes
pub type Strides = SmallVec<[isize; STACK_DIMS]>;

/// Shape and strides of a strided tensor
///
/// Address of element at indices [i0, i1, ..., in] relative to the storage start:
///   i0 * strides[0] + i1 * strides[1] + ... + in * strides[n]
#[derive(Clone, PartialEq, Eq)]
pub struct Layout {
    /// Shape: size along each dimension
    shape: Shape,
    /// Strides: offset (in elements) between consecutive elements along each dimension
    strides: Strides,
}

impl Layout {
    /// Create a new contiguous (row-major/C-order) layout from a shape
    ///
    /// # Example
    /// ```
    /// use foreach_route::tensor::Layout;
    /// let layout = Layout::contiguous(&[2, 3, 4]);
    /// assert_eq!(layout.shape(), &[2, 3, 4]);
    /// assert_eq!(layout.strides(), &[12, 4, 1]);
    /// ```
    pub fn contiguous(shape: &[usize]) -> Self {
        let shape: Shape = shape.iter().copied().collect();
        let strides = Self::compute_contiguous_strides(&shape);
        Self { shape, strides }
    }

    /// Create a layout with explicit shape and strides
    pub fn new(shape: Shape, strides: Strides) -> Self {
        debug_assert_eq!(shape.len(), strides.len());
        Self { shape, strides }
    }

    /// Create a layout from shape and stride slices
    pub fn strided(shape: &[usize], strides: &[isize]) -> Self {
        Self::new(
            shape.iter().copied().collect(),
            strides.iter().copied().collect(),
        )
    }

    /// Compute contiguous strides for a given shape (row-major order)
    ///
    /// Strides that do not fit in `isize` saturate at `isize::MAX`.
    fn compute_contiguous_strides(shape: &[usize]) -> Strides {
        let mut strides: Strides = SmallVec::with_capacity(shape.len());
        let mut stride = 1isize;

        // Compute strides from last dimension to first
        for &dim in shape.iter().rev() {
            strides.push(stride);
            stride = isize::try_from(dim)
                .ok()
                .and_then(|dim| stride.checked_mul(dim))
                .unwrap_or(isize::MAX);
        }

        strides.reverse();
        strides
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Get the strides
    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Number of dimensions (rank)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Check if the elements fill a gap-free, alias-free block of storage
    ///
    /// Any dimension order is accepted, so a transposed row-major layout is
    /// still dense. Size-1 dimensions carry arbitrary strides and are ignored.
    /// Layouts whose extent does not fit in `isize` are never dense.
    pub fn is_non_overlapping_and_dense(&self) -> bool {
        match self.ndim() {
            0 => return true,
            1 => return self.shape[0] < 2 || self.strides[0] == 1,
            _ => {}
        }

        // Innermost (smallest stride) first, degenerate dims last
        let mut perm: SmallVec<[usize; STACK_DIMS]> = (0..self.ndim()).collect();
        perm.sort_by_key(|&d| (self.shape[d] < 2, self.strides[d]));

        let mut required = 1isize;
        for &d in &perm {
            let size = self.shape[d];
            if size < 2 {
                return true;
            }
            if self.strides[d] != required {
                return false;
            }
            let next = isize::try_from(size)
                .ok()
                .and_then(|size| required.checked_mul(size));
            match next {
                Some(next) => required = next,
                None => return false,
            }
        }
        true
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Layout {{ shape: {:?}, strides: {:?} }}",
            self.shape.as_slice(),
            self.strides.as_slice()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguous_layout() {
        let layout = Layout::contiguous(&[2, 3, 4]);
        assert_eq!(layout.shape(), &[2, 3, 4]);
        assert_eq!(layout.strides(), &[12, 4, 1]);
        assert_eq!(layout.ndim(), 3);
        assert!(layout.is_non_overlapping_and_dense());
    }

    #[test]
    fn test_zero_dim_layout_is_dense() {
        let layout = Layout::contiguous(&[]);
        assert_eq!(layout.ndim(), 0);
        assert!(layout.strides().is_empty());
        assert!(layout.is_non_overlapping_and_dense());
    }

    #[test]
    fn test_permuted_layout_is_dense() {
        // [2, 3, 4] row-major with the last two dims swapped
        let layout = Layout::strided(&[2, 4, 3], &[12, 1, 4]);
        assert_ne!(layout, Layout::contiguous(&[2, 4, 3]));
        assert!(layout.is_non_overlapping_and_dense());
    }

    #[test]
    fn test_one_dim_density() {
        assert!(Layout::strided(&[5], &[1]).is_non_overlapping_and_dense());
        assert!(!Layout::strided(&[5], &[2]).is_non_overlapping_and_dense());
        // A single element may carry any stride
        assert!(Layout::strided(&[1], &[7]).is_non_overlapping_and_dense());
        assert!(Layout::strided(&[0], &[3]).is_non_overlapping_and_dense());
    }

    #[test]
    fn test_gaps_are_not_dense() {
        // Every other column of a [4, 8] buffer
        let sliced = Layout::strided(&[4, 4], &[8, 2]);
        assert!(!sliced.is_non_overlapping_and_dense());

        // Row padding
        let padded = Layout::strided(&[3, 4], &[5, 1]);
        assert!(!padded.is_non_overlapping_and_dense());
    }

    #[test]
    fn test_overlap_is_not_dense() {
        // Broadcast (expanded) dimension aliases elements
        let expanded = Layout::strided(&[3, 4], &[0, 1]);
        assert!(!expanded.is_non_overlapping_and_dense());
    }

    #[test]
    fn test_negative_stride_is_not_dense() {
        let flipped = Layout::strided(&[2, 3], &[3, -1]);
        assert!(!flipped.is_non_overlapping_and_dense());
    }

    #[test]
    fn test_size_one_dims_ignored() {
        let layout = Layout::strided(&[3, 1, 4], &[4, 99, 1]);
        assert!(layout.is_non_overlapping_and_dense());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_huge_extent_does_not_overflow() {
        let huge = 1usize << 32;
        let layout = Layout::strided(&[huge, huge], &[1 << 32, 1]);
        assert!(!layout.is_non_overlapping_and_dense());

        let layout = Layout::contiguous(&[huge, huge, huge]);
        assert_eq!(layout.strides()[2], 1);
        assert_eq!(layout.strides()[1], 1 << 32);
        assert_eq!(layout.strides()[0], isize::MAX);
        assert!(!layout.is_non_overlapping_and_dense());
    }
}
