use serde::{Deserialize, Serialize};

/// A brokerage account the holdings collaborator can report positions for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub account_id_key: String,
    pub institution_type: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Account {
    pub fn new(account_id_key: impl Into<String>, institution_type: impl Into<String>) -> Self {
        Self {
            account_id_key: account_id_key.into(),
            institution_type: institution_type.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
