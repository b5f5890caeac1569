//! Scalar operands of foreach operations
//!
//! A scalar only matters to the classifier through its numeric category, so
//! integers are widened to `i64` and reals to `f64` on construction.

use std::fmt;

/// Numeric category of a scalar operand
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `true` / `false`
    Bool,
    /// Signed or unsigned integer
    Integral,
    /// Real floating point
    Floating,
    /// Complex number
    Complex,
}

/// A single scalar operand
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Scalar {
    /// Boolean scalar
    Bool(bool),
    /// Integer scalar
    Int(i64),
    /// Real floating point scalar
    Float(f64),
    /// Complex scalar
    Complex {
        /// Real part
        re: f64,
        /// Imaginary part
        im: f64,
    },
}

impl Scalar {
    /// Create a complex scalar
    pub fn complex(re: f64, im: f64) -> Self {
        Self::Complex { re, im }
    }

    /// Numeric category of this scalar
    #[inline]
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Bool(_) => ScalarKind::Bool,
            Self::Int(_) => ScalarKind::Integral,
            Self::Float(_) => ScalarKind::Floating,
            Self::Complex { .. } => ScalarKind::Complex,
        }
    }

    /// Returns true if this is a complex scalar
    #[inline]
    pub fn is_complex(&self) -> bool {
        matches!(self, Self::Complex { .. })
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Complex { re, im } if *im < 0.0 => write!(f, "{re}-{}i", -im),
            Self::Complex { re, im } => write!(f, "{re}+{im}i"),
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Scalar {
                fn from(v: $t) -> Self {
                    Self::Int(v as i64)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Scalar {
    fn from(v: f32) -> Self {
        Self::Float(v as f64)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_kind() {
        assert_eq!(Scalar::from(true).kind(), ScalarKind::Bool);
        assert_eq!(Scalar::from(3u8).kind(), ScalarKind::Integral);
        assert_eq!(Scalar::from(1.5f32).kind(), ScalarKind::Floating);
        assert_eq!(Scalar::complex(1.0, -1.0).kind(), ScalarKind::Complex);
    }

    #[test]
    fn test_complex_kind() {
        assert!(Scalar::complex(0.0, 0.0).is_complex());
        assert!(!Scalar::Float(0.0).is_complex());
        assert_eq!(Scalar::from(-7i64).kind(), ScalarKind::Integral);
    }

    #[test]
    fn test_display() {
        assert_eq!(Scalar::Int(-4).to_string(), "-4");
        assert_eq!(Scalar::complex(1.0, 2.0).to_string(), "1+2i");
        assert_eq!(Scalar::complex(1.0, -2.0).to_string(), "1-2i");
    }
}
