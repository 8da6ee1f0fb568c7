use std::str::FromStr;

use crate::common::{Error, InvalidImportIdSnafu};

/// Composite import identifier, `sourceType:domainId:recordId`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportId {
    pub source_type: String,
    pub domain_id: String,
    pub record_id: String,
}

impl FromStr for ImportId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [source_type, domain_id, record_id]
                if !source_type.is_empty() && !domain_id.is_empty() && !record_id.is_empty() =>
            {
                Ok(Self {
                    source_type: source_type.to_string(),
                    domain_id: domain_id.to_string(),
                    record_id: record_id.to_string(),
                })
            }
            _ => InvalidImportIdSnafu { id: s }.fail(),
        }
    }
}

impl std::fmt::Display for ImportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.source_type, self.domain_id, self.record_id)
    }
}
