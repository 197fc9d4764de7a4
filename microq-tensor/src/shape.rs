use crate::error::{AllocationFailure, TensorError};
use std::fmt;

/// Validated tensor dimensions.
///
/// Rank is at least 1, every dimension is positive and the element count fits
/// in `usize`. The dimensions are copied from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Vec<usize>,
    element_count: usize,
}

impl Shape {
    pub fn new(dims: &[usize]) -> Result<Self, TensorError> {
        if dims.is_empty() {
            return Err(TensorError::allocation(dims, AllocationFailure::EmptyShape));
        }

        let mut element_count = 1usize;
        for (axis, &dim) in dims.iter().enumerate() {
            if dim == 0 {
                return Err(TensorError::allocation(
                    dims,
                    AllocationFailure::ZeroDimension { axis },
                ));
            }
            element_count = element_count.checked_mul(dim).ok_or_else(|| {
                TensorError::allocation(dims, AllocationFailure::ElementCountOverflow)
            })?;
        }

        Ok(Self {
            dims: dims.to_vec(),
            element_count,
        })
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Product of all dimensions.
    pub fn element_count(&self) -> usize {
        self.element_count
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, dim) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", dim)?;
        }
        write!(f, "]")
    }
}
