/// The triangulator's result type.
pub type TriangulationResult = Result<crate::Triangulation, TriangulationError>;

/// Describes an unexpected error happening during triangulation.
///
/// These indicate either adversarial input geometry or a bug; callers are
/// expected to skip the offending path and keep rendering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InternalError {
    /// The intersection sweep kept finding new intersections without
    /// converging. Typically requires adversarial input.
    SimplificationFailed,
    /// The triangle count would not fit the vertex budget.
    VertexCountOverflow,
}

#[cfg(feature = "std")]
impl core::fmt::Display for InternalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InternalError::SimplificationFailed => {
                std::write!(f, "Mesh simplification failed to converge")
            }
            InternalError::VertexCountOverflow => {
                std::write!(f, "Too many triangle vertices")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InternalError {}

/// The triangulator's error enumeration.
#[derive(Clone, Debug, PartialEq)]
pub enum TriangulationError {
    UnsupportedParameter(UnsupportedParameter),
    Internal(InternalError),
}

#[cfg(feature = "std")]
impl core::fmt::Display for TriangulationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TriangulationError::UnsupportedParameter(e) => {
                std::write!(f, "Unsupported parameter: {}", e)
            }
            TriangulationError::Internal(e) => {
                std::write!(f, "Internal error: {}", e)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TriangulationError {}

impl core::convert::From<InternalError> for TriangulationError {
    fn from(value: InternalError) -> Self {
        Self::Internal(value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum UnsupportedParameter {
    ToleranceIsNaN,
}

#[cfg(feature = "std")]
impl core::fmt::Display for UnsupportedParameter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            UnsupportedParameter::ToleranceIsNaN => {
                std::write!(f, "Tolerance threshold is not a number")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnsupportedParameter {}
