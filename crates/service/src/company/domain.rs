use serde::Deserialize;

/// Body of `POST /companies`. Fields stay optional so missing and `null`
/// values reach validation instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct CreateCompanyInput {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `PUT /companies/:code`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCompanyInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
