use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How precisely a postal code was resolved for a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum PostalKind {
    /// Reverse lookup at the exact point returned a postcode.
    #[serde(rename = "exato")]
    Exact,
    /// Found by widening the search box around the point.
    #[serde(rename = "aproximado")]
    Approximate,
    /// Only a city-level postcode could be resolved.
    #[serde(rename = "cidade")]
    City,
    /// No postcode found at any tier.
    #[serde(rename = "nenhum")]
    NotFound,
    /// Resolution failed (network or upstream error).
    #[serde(rename = "erro")]
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PostalInfo {
    #[serde(rename = "cep")]
    pub code: String,
    #[serde(rename = "tipo")]
    pub kind: PostalKind,
}

impl PostalInfo {
    pub fn new(code: impl Into<String>, kind: PostalKind) -> Self {
        Self {
            code: code.into(),
            kind,
        }
    }

    pub fn not_found() -> Self {
        Self::new("Não encontrado", PostalKind::NotFound)
    }

    pub fn failed() -> Self {
        Self::new("Erro ao obter CEP", PostalKind::Failed)
    }

    /// User-facing text: the code, with a qualifier for the imprecise kinds.
    pub fn display_text(&self) -> String {
        match self.kind {
            PostalKind::Approximate => format!("{} (aproximado)", self.code),
            PostalKind::City => format!("{} (cidade)", self.code),
            _ => self.code.clone(),
        }
    }
}
