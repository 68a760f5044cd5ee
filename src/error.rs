use core::fmt::{self, Display};

use cfg_if::cfg_if;

/// The error type for heap operations that need an existing greatest element.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HeapError {
    kind: HeapErrorKind,
}

impl HeapError {
    pub(crate) const fn empty(operation: &'static str) -> Self {
        Self { kind: HeapErrorKind::Empty { operation } }
    }

    /// Details about the operation that failed.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> HeapErrorKind {
        self.kind.clone()
    }
}

/// Details of the failure behind a [`HeapError`].
#[derive(Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub enum HeapErrorKind {
    /// The heap had no root to take: the sequence was empty.
    Empty {
        /// Name of the operation that was attempted.
        operation: &'static str,
    },
}

impl From<HeapErrorKind> for HeapError {
    #[inline]
    fn from(kind: HeapErrorKind) -> Self {
        Self { kind }
    }
}

impl Display for HeapError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            HeapErrorKind::Empty { operation } => {
                write!(fmt, "{operation} on an empty heap: index 0 is out of range")
            }
        }
    }
}

cfg_if! {
    if #[cfg(feature = "error_in_core")] {
        impl core::error::Error for HeapError {}
    } else if #[cfg(feature = "std")] {
        impl std::error::Error for HeapError {}
    }
}
