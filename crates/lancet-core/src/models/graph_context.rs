use serde::{Deserialize, Serialize};

/// Everything the graph knows about one procedure, grouped by neighbor type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcedureContext {
    pub procedure: String,
    pub description: Option<String>,
    pub anatomy: Vec<String>,
    pub instruments: Vec<String>,
    pub complications: Vec<String>,
    pub techniques: Vec<String>,
    pub medications: Vec<String>,
}

impl ProcedureContext {
    /// Render the context as the text body of a synthetic retrieved item.
    pub fn render(&self) -> String {
        let mut parts = vec![format!("Procedure: {}", self.procedure)];
        if let Some(description) = &self.description {
            if !description.is_empty() {
                parts.push(format!("Description: {description}"));
            }
        }
        let sections = [
            ("Anatomical Structures", &self.anatomy),
            ("Required Instruments", &self.instruments),
            ("Potential Complications", &self.complications),
            ("Techniques", &self.techniques),
            ("Medications", &self.medications),
        ];
        for (label, names) in sections {
            if !names.is_empty() {
                parts.push(format!("{label}: {}", names.join(", ")));
            }
        }
        parts.join("\n")
    }
}

/// A procedure reachable from another through shared entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedProcedure {
    pub name: String,
    /// Traversal distance in edges (1 = direct neighbor).
    pub distance: usize,
}
