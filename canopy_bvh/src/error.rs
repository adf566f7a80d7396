// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for set population and builder configuration.

/// Errors reported by [`PrimitiveSet::add`](crate::PrimitiveSet::add) and
/// [`LinearBuilder::new`](crate::LinearBuilder::new).
///
/// All of these are invalid-argument conditions surfaced synchronously at the
/// call site; nothing in the build itself can fail.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// A void (empty) box was passed to `add`; a box-less primitive cannot be
    /// indexed spatially.
    VoidBox,
    /// `leaf_size` must be at least 1.
    ZeroLeafSize,
    /// `max_depth` must be at least 1.
    ZeroMaxDepth,
}

impl core::fmt::Display for BuildError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::VoidBox => write!(f, "void box cannot be added to a primitive set"),
            Self::ZeroLeafSize => write!(f, "leaf_size must be at least 1"),
            Self::ZeroMaxDepth => write!(f, "max_depth must be at least 1"),
        }
    }
}

impl core::error::Error for BuildError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_messages() {
        assert!(BuildError::VoidBox.to_string().contains("void box"));
        assert!(BuildError::ZeroLeafSize.to_string().contains("leaf_size"));
        assert!(BuildError::ZeroMaxDepth.to_string().contains("max_depth"));
    }
}
