//! Fast-route configuration

/// Knobs injected into the fast-route classifier
///
/// # Default
///
/// Derived from the build: batched kernels are available unless the crate is
/// compiled with the `hip` feature, whose backend ships none. Callers that
/// know better (e.g. a CPU-only process in a `hip` build) construct their own.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FastRouteConfig {
    batched_kernels: bool,
    strict_scalar_lists: bool,
}

impl FastRouteConfig {
    /// Create a config with the given batched-kernel capability
    pub const fn new(batched_kernels: bool) -> Self {
        Self {
            batched_kernels,
            strict_scalar_lists: false,
        }
    }

    /// Config matching the enabled cargo features
    pub const fn for_build() -> Self {
        Self::new(!cfg!(feature = "hip"))
    }

    /// Set whether batched kernels exist on this build
    pub const fn with_batched_kernels(mut self, batched_kernels: bool) -> Self {
        self.batched_kernels = batched_kernels;
        self
    }

    /// Apply the per-element scalar-list rules to three-list calls too
    ///
    /// Off by default: three lists with a scalar list are then routed on the
    /// tensor attributes alone, ignoring promotion against the scalars.
    pub const fn with_strict_scalar_lists(mut self, strict: bool) -> Self {
        self.strict_scalar_lists = strict;
        self
    }

    /// Whether batched kernels exist on this build
    #[inline]
    pub const fn batched_kernels(&self) -> bool {
        self.batched_kernels
    }

    /// Whether three-list scalar-list calls get the scalar-list checks
    #[inline]
    pub const fn strict_scalar_lists(&self) -> bool {
        self.strict_scalar_lists
    }
}

impl Default for FastRouteConfig {
    fn default() -> Self {
        Self::for_build()
    }
}
