//! Per-token classification results.

use serde::Serialize;

use crate::validation::address::AddressRecord;

/// Final classification for one candidate token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    /// The token exactly as the user supplied it.
    pub input: String,
    pub valid: bool,
    /// Present only for valid outcomes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<AddressRecord>,
}

impl Outcome {
    pub fn valid(input: String, record: AddressRecord) -> Self {
        Self { input, valid: true, record: Some(record) }
    }

    pub fn invalid(input: String) -> Self {
        Self { input, valid: false, record: None }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Positionally ordered outcomes of one batch run.
///
/// Outcome order always matches candidate token order, regardless of the
/// order in which the underlying lookups settled. The valid and invalid
/// accessors partition the outcome set exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    outcomes: Vec<Outcome>,
}

impl BatchReport {
    pub fn new(outcomes: Vec<Outcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn valid(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|outcome| outcome.is_valid())
    }

    pub fn invalid(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_valid())
    }

    pub fn valid_count(&self) -> usize {
        self.valid().count()
    }

    pub fn invalid_count(&self) -> usize {
        self.invalid().count()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
