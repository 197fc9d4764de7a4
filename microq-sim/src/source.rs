use crate::SourceError;

/// Supplier of float samples.
pub trait DataSource {
    fn next_value(&mut self) -> f32;

    fn fill(&mut self, out: &mut [f32]) {
        for slot in out.iter_mut() {
            *slot = self.next_value();
        }
    }
}

/// Yields the same value forever.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantSource(pub f32);

impl DataSource for ConstantSource {
    fn next_value(&mut self) -> f32 {
        self.0
    }
}

/// Cycles through a fixed list of values.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<f32>) -> Result<Self, SourceError> {
        if values.is_empty() {
            return Err(SourceError::EmptySequence);
        }
        Ok(Self { values, cursor: 0 })
    }
}

impl DataSource for SequenceSource {
    fn next_value(&mut self) -> f32 {
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}
