//! Read-only tensor metadata consumed by the foreach checks

use super::Layout;
use crate::dtype::DType;
use crate::runtime::Device;
use std::fmt;

/// Memory layout family of a tensor
///
/// Only `Strided` tensors are described by a [`Layout`]'s shape and strides;
/// every other kind is opaque to the batched kernels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum LayoutKind {
    /// Dense buffer addressed through shape and strides
    #[default]
    Strided,
    /// Sparse COO
    Sparse,
    /// Sparse CSR
    SparseCsr,
    /// Opaque blocked layout owned by a vendor library
    Mkldnn,
}

/// Metadata view of one tensor argument
///
/// Carries everything the validator and classifier look at: device, dtype,
/// layout kind, shape and strides. No storage is attached, so building a view
/// never touches device memory.
///
/// # Example
///
/// ```
/// use foreach_route::prelude::*;
///
/// let t = TensorView::contiguous(&[2, 3], DType::F32, Device::cpu());
/// assert!(t.is_non_overlapping_and_dense());
/// assert_eq!(t.strides(), &[3, 1]);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct TensorView {
    device: Device,
    dtype: DType,
    kind: LayoutKind,
    layout: Layout,
    /// Cached from the layout; always false for non-strided kinds
    dense: bool,
}

impl TensorView {
    /// Create a strided view from an explicit layout
    pub fn from_layout(layout: Layout, dtype: DType, device: Device) -> Self {
        let dense = layout.is_non_overlapping_and_dense();
        Self {
            device,
            dtype,
            kind: LayoutKind::Strided,
            layout,
            dense,
        }
    }

    /// Create a row-major contiguous view
    pub fn contiguous(shape: &[usize], dtype: DType, device: Device) -> Self {
        Self::from_layout(Layout::contiguous(shape), dtype, device)
    }

    /// Create a view with explicit strides (in elements)
    pub fn strided(shape: &[usize], strides: &[isize], dtype: DType, device: Device) -> Self {
        Self::from_layout(Layout::strided(shape, strides), dtype, device)
    }

    /// Replace the layout kind
    pub fn with_layout_kind(mut self, kind: LayoutKind) -> Self {
        self.kind = kind;
        self.dense = kind == LayoutKind::Strided && self.layout.is_non_overlapping_and_dense();
        self
    }

    /// Device holding this tensor
    #[inline]
    pub fn device(&self) -> Device {
        self.device
    }

    /// Element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Layout kind
    #[inline]
    pub fn layout_kind(&self) -> LayoutKind {
        self.kind
    }

    /// Shape and strides
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Get the strides
    #[inline]
    pub fn strides(&self) -> &[isize] {
        self.layout.strides()
    }

    /// Number of dimensions
    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Whether this is a strided tensor
    #[inline]
    pub fn is_strided(&self) -> bool {
        self.kind == LayoutKind::Strided
    }

    /// Whether the elements fill a gap-free, alias-free block of storage
    #[inline]
    pub fn is_non_overlapping_and_dense(&self) -> bool {
        self.dense
    }
}

impl fmt::Debug for TensorView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TensorView")
            .field("device", &self.device)
            .field("dtype", &self.dtype)
            .field("kind", &self.kind)
            .field("shape", &self.layout.shape())
            .field("strides", &self.layout.strides())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguous_view() {
        let t = TensorView::contiguous(&[4, 5], DType::F16, Device::cuda(0));
        assert_eq!(t.shape(), &[4, 5]);
        assert_eq!(t.strides(), &[5, 1]);
        assert_eq!(t.dtype(), DType::F16);
        assert_eq!(t.device(), Device::cuda(0));
        assert!(t.is_strided());
        assert!(t.is_non_overlapping_and_dense());
    }

    #[test]
    fn test_strided_view_with_gap() {
        let t = TensorView::strided(&[4], &[2], DType::F32, Device::cpu());
        assert!(!t.is_non_overlapping_and_dense());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_view_with_huge_extent() {
        let t = TensorView::strided(&[1 << 32, 1 << 32], &[1 << 32, 1], DType::F32, Device::cpu());
        assert_eq!(t.ndim(), 2);
        assert!(!t.is_non_overlapping_and_dense());
    }

    #[test]
    fn test_sparse_view_is_never_dense() {
        let t = TensorView::contiguous(&[8], DType::F32, Device::cpu())
            .with_layout_kind(LayoutKind::Sparse);
        assert!(!t.is_strided());
        assert!(!t.is_non_overlapping_and_dense());

        let back = t.with_layout_kind(LayoutKind::Strided);
        assert!(back.is_non_overlapping_and_dense());
    }
}
