use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Certification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub abbreviation: String,
    pub issuer: String,
}

impl Certification {
    fn reference(name: &str, abbreviation: &str, issuer: &str) -> Self {
        Certification {
            id: None,
            name: name.to_string(),
            abbreviation: abbreviation.to_string(),
            issuer: issuer.to_string(),
        }
    }
}

/// Reference list served by the static source and written by the seeder.
pub fn reference_certifications() -> Vec<Certification> {
    vec![
        Certification::reference(
            "Six Sigma Black Belt",
            "SSBB",
            "American Society for Quality (ASQ)",
        ),
        Certification::reference(
            "Certified in Planning and Inventory Management",
            "CPIM",
            "Association for Supply Chain Management (ASCM/APICS)",
        ),
        Certification::reference(
            "Certified Professional",
            "CP",
            "Association of Clinical Research Professionals (ACRP)",
        ),
    ]
}
