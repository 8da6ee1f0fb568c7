use snafu::prelude::*;

use crate::common::{Client, DecodeSnafu, MissingIdentifierSnafu, Result};

use super::import::ImportId;
use super::models::ARecordConfig;
use super::payload::ARecordPayload;
use super::response::{parse_created_id, parse_record};

/// Reconciles declared A records against the API.
///
/// Every operation takes the declared state and returns the state the host
/// should persist. A returned config with `id == None` means the record no
/// longer exists.
pub struct ARecordResource<C: Client> {
    client: C,
}

fn record_id<'a>(config: &'a ARecordConfig, operation: &str) -> Result<&'a str> {
    match config.id.as_deref() {
        Some(id) if !id.is_empty() => Ok(id),
        _ => MissingIdentifierSnafu { operation }.fail(),
    }
}

fn encode(config: &ARecordConfig) -> Result<serde_json::Value> {
    serde_json::to_value(ARecordPayload::from(config)).context(DecodeSnafu {
        message: "Failed to serialize A record",
    })
}

impl<C: Client> ARecordResource<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn create(&self, config: &ARecordConfig) -> Result<ARecordConfig> {
        let span = tracing::info_span!("a_record", op = "create", tracing_id = %uuid::Uuid::new_v4());
        let _guard = span.enter();

        let path = config.collection_path();
        let body = encode(config)?;
        tracing::info!(path = path.as_str(), name = config.name.as_deref(), "Creating record");

        let resp = self.client.save(&body, &path)?;
        let id = parse_created_id(&resp)?;
        tracing::info!(path = path.as_str(), record_id = id.as_str(), "Created record");

        let created = ARecordConfig {
            id: Some(id),
            ..config.clone()
        };
        self.refresh(&created)
    }

    pub fn read(&self, config: &ARecordConfig) -> Result<ARecordConfig> {
        let span = tracing::info_span!("a_record", op = "read", tracing_id = %uuid::Uuid::new_v4());
        let _guard = span.enter();

        self.refresh(config)
    }

    pub fn update(&self, config: &ARecordConfig) -> Result<ARecordConfig> {
        let span = tracing::info_span!("a_record", op = "update", tracing_id = %uuid::Uuid::new_v4());
        let _guard = span.enter();

        let id = record_id(config, "Update")?;
        let path = config.record_path(id);
        let body = encode(config)?;
        tracing::info!(path = path.as_str(), record_id = id, "Updating record");

        self.client.update_by_id(&body, &path)?;
        tracing::debug!(path = path.as_str(), record_id = id, "Updated record");

        self.refresh(config)
    }

    pub fn delete(&self, config: &ARecordConfig) -> Result<ARecordConfig> {
        let span = tracing::info_span!("a_record", op = "delete", tracing_id = %uuid::Uuid::new_v4());
        let _guard = span.enter();

        let id = record_id(config, "Delete")?;
        let path = config.record_path(id);
        tracing::info!(path = path.as_str(), record_id = id, "Deleting record");

        self.client.delete_by_id(&path)?;
        tracing::debug!(path = path.as_str(), record_id = id, "Deleted record");

        Ok(ARecordConfig {
            id: None,
            ..config.clone()
        })
    }

    /// Build the full declared state of an existing record from its
    /// `sourceType:domainId:recordId` identifier.
    pub fn import(&self, import_id: &str) -> Result<ARecordConfig> {
        let span = tracing::info_span!("a_record", op = "import", tracing_id = %uuid::Uuid::new_v4());
        let _guard = span.enter();

        let id: ImportId = import_id.parse()?;
        let base = ARecordConfig::new(&id.source_type, &id.domain_id, 0);
        let path = base.record_path(&id.record_id);
        tracing::info!(path = path.as_str(), import_id, "Importing record");

        let resp = self.client.get_by_id(&path)?;
        let config = parse_record(&resp)?.apply_to(&base);
        tracing::debug!(path = path.as_str(), record_id = config.id.as_deref(), "Imported record");

        Ok(config)
    }

    fn refresh(&self, config: &ARecordConfig) -> Result<ARecordConfig> {
        let id = record_id(config, "Read")?;
        let path = config.record_path(id);
        tracing::debug!(path = path.as_str(), record_id = id, "Reading record");

        let resp = match self.client.get_by_id(&path) {
            Ok(resp) => resp,
            Err(err) if err.is_not_found() => {
                tracing::warn!(path = path.as_str(), record_id = id, "Record no longer exists, clearing ID");
                return Ok(ARecordConfig {
                    id: None,
                    ..config.clone()
                });
            }
            Err(err) => return Err(err),
        };

        Ok(parse_record(&resp)?.apply_to(config))
    }
}
