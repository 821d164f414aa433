use serde::{Deserialize, Serialize};

/// Entities recognized in a span of text, grouped by category.
///
/// Shape mirrors the external NLU service contract; missing categories
/// decode as empty lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedEntities {
    pub procedures: Vec<String>,
    pub anatomy: Vec<String>,
    pub instruments: Vec<String>,
    pub complications: Vec<String>,
    pub techniques: Vec<String>,
    pub medications: Vec<String>,
}

impl ExtractedEntities {
    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
            && self.anatomy.is_empty()
            && self.instruments.is_empty()
            && self.complications.is_empty()
            && self.techniques.is_empty()
            && self.medications.is_empty()
    }

    /// Every recognized name across all categories.
    pub fn all_names(&self) -> Vec<String> {
        self.procedures
            .iter()
            .chain(&self.anatomy)
            .chain(&self.instruments)
            .chain(&self.complications)
            .chain(&self.techniques)
            .chain(&self.medications)
            .cloned()
            .collect()
    }
}
