use serde::{Deserialize, Serialize};

/// A pet owned by the current user, as offered in the booking form.
///
/// Listing endpoints disagree on field names (`_id` vs `id`, `img` vs `image`,
/// `type` vs `kind`); the aliases absorb that at the HTTP boundary.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PetRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type", alias = "kind", default)]
    pub kind: String,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(rename = "img", alias = "image", default)]
    pub image: Option<String>,
}

impl PetRecord {
    pub fn label(&self) -> String {
        match &self.breed {
            Some(breed) if !breed.is_empty() => format!("{} ({}, {})", self.name, self.kind, breed),
            _ if self.kind.is_empty() => self.name.clone(),
            _ => format!("{} ({})", self.name, self.kind),
        }
    }
}
