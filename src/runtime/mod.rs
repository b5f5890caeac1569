//! Device identity for tensor views
//!
//! The classifier only compares devices for identity, so a device is a
//! plain `(kind, index)` pair rather than a handle onto a live backend.
//!
//! ```text
//! Device
//! ├── DeviceKind (which backend owns the memory)
//! └── index      (which unit of that backend, e.g. GPU 0, GPU 1)
//! ```

use std::fmt;

/// Compute backend that owns a tensor's memory
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DeviceKind {
    /// Host CPU
    Cpu,
    /// NVIDIA CUDA
    Cuda,
    /// AMD ROCm / HIP
    Rocm,
    /// Cross-platform GPU via WebGPU
    Wgpu,
}

impl DeviceKind {
    /// Short name used in device display (e.g. "cuda")
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Cuda => "cuda",
            Self::Rocm => "rocm",
            Self::Wgpu => "wgpu",
        }
    }
}

/// A specific compute unit
///
/// Two devices are the same iff both kind and index match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Device {
    kind: DeviceKind,
    index: usize,
}

impl Device {
    /// Create a device of the given kind and index
    pub const fn new(kind: DeviceKind, index: usize) -> Self {
        Self { kind, index }
    }

    /// The host CPU (there's only one)
    pub const fn cpu() -> Self {
        Self::new(DeviceKind::Cpu, 0)
    }

    /// CUDA device `index`
    pub const fn cuda(index: usize) -> Self {
        Self::new(DeviceKind::Cuda, index)
    }

    /// Backend kind
    #[inline]
    pub const fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// Unit index within the backend
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }
}

impl Default for Device {
    fn default() -> Self {
        Self::cpu()
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DeviceKind::Cpu => write!(f, "cpu"),
            kind => write!(f, "{}:{}", kind.name(), self.index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_identity() {
        assert_eq!(Device::cuda(0), Device::cuda(0));
        assert_ne!(Device::cuda(0), Device::cuda(1));
        assert_ne!(Device::cpu(), Device::new(DeviceKind::Wgpu, 0));
        assert_eq!(Device::default(), Device::cpu());
    }

    #[test]
    fn test_device_display() {
        assert_eq!(Device::cpu().to_string(), "cpu");
        assert_eq!(Device::cuda(1).to_string(), "cuda:1");
        assert_eq!(Device::new(DeviceKind::Rocm, 2).to_string(), "rocm:2");
    }
}
