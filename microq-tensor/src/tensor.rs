use crate::error::TensorError;
use crate::shape::Shape;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Element representation held by a [`Tensor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageKind {
    Float32,
    Int8,
}

impl StorageKind {
    /// Bytes per element.
    pub fn element_size(self) -> usize {
        match self {
            StorageKind::Float32 => std::mem::size_of::<f32>(),
            StorageKind::Int8 => std::mem::size_of::<i8>(),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::Float32 => write!(f, "Float32"),
            StorageKind::Int8 => write!(f, "Int8"),
        }
    }
}

/// Affine mapping between real values and int8 codes:
/// `q = round(real / scale) + zero_point`, `real ≈ (q - zero_point) * scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantParams {
    scale: f32,
    zero_point: i32,
}

impl QuantParams {
    pub fn new(scale: f32, zero_point: i32) -> Result<Self, TensorError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(TensorError::InvalidScale(scale));
        }
        Ok(Self { scale, zero_point })
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn zero_point(&self) -> i32 {
        self.zero_point
    }
}

/// Owned element storage. Exactly one representation is live per tensor.
#[derive(Debug, Clone, PartialEq)]
pub enum Storage {
    Float32(Vec<f32>),
    Int8 {
        data: Vec<i8>,
        /// Set once the buffer holds quantized codes.
        params: Option<QuantParams>,
    },
}

impl Storage {
    pub fn kind(&self) -> StorageKind {
        match self {
            Storage::Float32(_) => StorageKind::Float32,
            Storage::Int8 { .. } => StorageKind::Int8,
        }
    }

    fn len(&self) -> usize {
        match self {
            Storage::Float32(data) => data.len(),
            Storage::Int8 { data, .. } => data.len(),
        }
    }
}

/// Dense row-major tensor owning its storage.
///
/// Construct through [`BufferStore`](crate::BufferStore); the shape is fixed at
/// construction and `storage` always holds `shape.element_count()` elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    shape: Shape,
    storage: Storage,
}

impl Tensor {
    pub(crate) fn from_parts(shape: Shape, storage: Storage) -> Self {
        debug_assert_eq!(shape.element_count(), storage.len());
        Self { shape, storage }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    pub fn element_count(&self) -> usize {
        self.shape.element_count()
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn storage_kind(&self) -> StorageKind {
        self.storage.kind()
    }

    /// Bytes occupied by the element data (shape metadata excluded).
    pub fn byte_size(&self) -> usize {
        self.element_count() * self.storage_kind().element_size()
    }

    /// Quantization parameters, present only on quantized `Int8` tensors.
    pub fn quant_params(&self) -> Option<QuantParams> {
        match &self.storage {
            Storage::Int8 { params, .. } => *params,
            Storage::Float32(_) => None,
        }
    }

    /// Attach the affine parameters that produced this tensor's codes.
    pub fn set_quant_params(&mut self, new_params: QuantParams) -> Result<(), TensorError> {
        match &mut self.storage {
            Storage::Int8 { params, .. } => {
                *params = Some(new_params);
                Ok(())
            }
            Storage::Float32(_) => Err(TensorError::StorageMismatch {
                expected: StorageKind::Int8,
                got: StorageKind::Float32,
            }),
        }
    }

    pub fn as_f32(&self) -> Result<&[f32], TensorError> {
        match &self.storage {
            Storage::Float32(data) => Ok(data),
            Storage::Int8 { .. } => Err(self.mismatch(StorageKind::Float32)),
        }
    }

    pub fn as_f32_mut(&mut self) -> Result<&mut [f32], TensorError> {
        let got = self.storage_kind();
        match &mut self.storage {
            Storage::Float32(data) => Ok(data),
            Storage::Int8 { .. } => Err(TensorError::StorageMismatch {
                expected: StorageKind::Float32,
                got,
            }),
        }
    }

    pub fn as_i8(&self) -> Result<&[i8], TensorError> {
        match &self.storage {
            Storage::Int8 { data, .. } => Ok(data),
            Storage::Float32(_) => Err(self.mismatch(StorageKind::Int8)),
        }
    }

    pub fn as_i8_mut(&mut self) -> Result<&mut [i8], TensorError> {
        let got = self.storage_kind();
        match &mut self.storage {
            Storage::Int8 { data, .. } => Ok(data),
            Storage::Float32(_) => Err(TensorError::StorageMismatch {
                expected: StorageKind::Int8,
                got,
            }),
        }
    }

    pub fn get_f32(&self, index: usize) -> Result<f32, TensorError> {
        let data = self.as_f32()?;
        data.get(index)
            .copied()
            .ok_or(TensorError::IndexOutOfBounds {
                index,
                len: data.len(),
            })
    }

    pub fn set_f32(&mut self, index: usize, value: f32) -> Result<(), TensorError> {
        let data = self.as_f32_mut()?;
        let len = data.len();
        let slot = data
            .get_mut(index)
            .ok_or(TensorError::IndexOutOfBounds { index, len })?;
        *slot = value;
        Ok(())
    }

    pub fn get_i8(&self, index: usize) -> Result<i8, TensorError> {
        let data = self.as_i8()?;
        data.get(index)
            .copied()
            .ok_or(TensorError::IndexOutOfBounds {
                index,
                len: data.len(),
            })
    }

    fn mismatch(&self, expected: StorageKind) -> TensorError {
        TensorError::StorageMismatch {
            expected,
            got: self.storage_kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float_tensor(dims: &[usize]) -> Tensor {
        let shape = Shape::new(dims).unwrap();
        let storage = Storage::Float32(vec![0.0; shape.element_count()]);
        Tensor::from_parts(shape, storage)
    }

    fn int8_tensor(dims: &[usize]) -> Tensor {
        let shape = Shape::new(dims).unwrap();
        let storage = Storage::Int8 {
            data: vec![0; shape.element_count()],
            params: None,
        };
        Tensor::from_parts(shape, storage)
    }

    #[test]
    fn test_indexed_writes() {
        let mut t = float_tensor(&[2, 2]);
        t.set_f32(3, 1.5).unwrap();
        assert_eq!(t.get_f32(3).unwrap(), 1.5);
        assert_eq!(t.as_f32().unwrap(), &[0.0, 0.0, 0.0, 1.5]);

        let err = t.set_f32(4, 1.0).unwrap_err();
        assert_eq!(err, TensorError::IndexOutOfBounds { index: 4, len: 4 });
    }

    #[test]
    fn test_wrong_representation() {
        let t = float_tensor(&[3]);
        assert_eq!(
            t.as_i8().unwrap_err(),
            TensorError::StorageMismatch {
                expected: StorageKind::Int8,
                got: StorageKind::Float32
            }
        );
        assert!(t.quant_params().is_none());

        let mut q = int8_tensor(&[3]);
        assert!(q.as_f32_mut().is_err());
        assert!(q.set_f32(0, 1.0).is_err());
    }

    #[test]
    fn test_quant_params_attach_to_int8_only() {
        let params = QuantParams::new(0.5, -3).unwrap();

        let mut q = int8_tensor(&[4]);
        assert!(q.quant_params().is_none());
        q.set_quant_params(params).unwrap();
        assert_eq!(q.quant_params(), Some(params));

        let mut f = float_tensor(&[4]);
        assert!(f.set_quant_params(params).is_err());
    }

    #[test]
    fn test_scale_must_be_positive() {
        assert_eq!(QuantParams::new(0.0, 0), Err(TensorError::InvalidScale(0.0)));
        assert!(QuantParams::new(-1.0, 0).is_err());
        assert!(QuantParams::new(f32::NAN, 0).is_err());
        assert!(QuantParams::new(f32::INFINITY, 0).is_err());
    }

    #[test]
    fn test_byte_size_follows_kind() {
        assert_eq!(float_tensor(&[5, 5]).byte_size(), 100);
        assert_eq!(int8_tensor(&[5, 5]).byte_size(), 25);
    }
}
