use crate::core::Record;

/// The client's copy of the remote collection.
///
/// Only ever replaced wholesale; there is no API for patching individual
/// records.
#[derive(Debug, Clone, Default)]
pub struct Cache {
    records: Vec<Record>,
    generation: u64,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of successful loads applied so far. Zero means never loaded.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn replace(&mut self, records: Vec<Record>) {
        self.records = records;
        self.generation += 1;
    }
}
