use serde::{Deserialize, Deserializer};
use snafu::prelude::*;

use crate::common::{DecodeSnafu, ResponseSnafu, Result};

use super::models::{ARecordConfig, FailoverValue, GeoLocation, RoundRobinValue};

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A record as returned by the API.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ARecordResponse {
    pub id: serde_json::Number,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ttl: Option<i64>,
    #[serde(default)]
    pub geolocation: Option<GeolocationResponse>,
    #[serde(default)]
    pub record_option: Option<String>,
    #[serde(default)]
    pub no_answer: Option<bool>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub gtd_region: Option<i64>,
    #[serde(default, rename = "type")]
    pub record_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact_ids: Vec<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pools: Vec<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub round_robin: Vec<RoundRobinResponse>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub round_robin_failover: Vec<FailoverResponse>,
    #[serde(default)]
    pub record_failover: Option<RecordFailoverResponse>,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(untagged)]
pub enum RegionFilter {
    Single(i64),
    List(Vec<i64>),
}

impl RegionFilter {
    fn first(&self) -> Option<i64> {
        match self {
            RegionFilter::Single(region) => Some(*region),
            RegionFilter::List(regions) => regions.first().copied(),
        }
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeolocationResponse {
    #[serde(default)]
    pub geoip_filter: Option<RegionFilter>,
    #[serde(default)]
    pub drop: Option<bool>,
    #[serde(default)]
    pub geoip_failover: Option<bool>,
    #[serde(default)]
    pub geoip_proximity: Option<i64>,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRobinResponse {
    pub value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disable_flag: bool,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailoverResponse {
    pub value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disable_flag: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sort_order: i64,
    #[serde(default)]
    pub check_id: Option<i64>,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFailoverResponse {
    #[serde(default)]
    pub failover_type: Option<i64>,
    #[serde(default)]
    pub disabled: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub values: Vec<FailoverResponse>,
}

impl From<FailoverResponse> for FailoverValue {
    fn from(value: FailoverResponse) -> Self {
        Self {
            value: value.value,
            disable_flag: value.disable_flag,
            sort_order: value.sort_order,
            check_id: value.check_id,
        }
    }
}

impl From<GeolocationResponse> for GeoLocation {
    fn from(value: GeolocationResponse) -> Self {
        Self {
            geo_ip_user_region: value.geoip_filter.as_ref().and_then(RegionFilter::first),
            drop: value.drop,
            geo_ip_proximity: value.geoip_proximity,
            geo_ip_failover: value.geoip_failover,
        }
    }
}

/// Render a numeric record ID as a decimal string with no fractional part.
pub fn render_id(id: &serde_json::Number) -> String {
    if let Some(id) = id.as_u64() {
        return id.to_string();
    }
    if let Some(id) = id.as_i64() {
        return id.to_string();
    }
    format!("{:.0}", id.as_f64().unwrap_or_default())
}

pub fn parse_record(body: &[u8]) -> Result<ARecordResponse> {
    serde_json::from_slice(body).context(DecodeSnafu {
        message: "Failed to deserialize A record",
    })
}

/// Extract the record ID from a create response.
///
/// The body is either the record object, a JSON string holding the encoded
/// object, or a list holding it.
pub fn parse_created_id(body: &[u8]) -> Result<String> {
    #[derive(serde::Deserialize)]
    struct Created {
        id: serde_json::Number,
    }

    let mut value: serde_json::Value = serde_json::from_slice(body).context(DecodeSnafu {
        message: "Failed to deserialize create response",
    })?;

    if let serde_json::Value::String(inner) = value {
        value = serde_json::from_str(&inner).context(DecodeSnafu {
            message: "Failed to deserialize quoted create response",
        })?;
    }
    if let serde_json::Value::Array(items) = value {
        value = match items.into_iter().next() {
            Some(first) => first,
            None => {
                return ResponseSnafu {
                    message: "Create response holds no record",
                }
                .fail()
            }
        };
    }

    let created: Created = serde_json::from_value(value).context(DecodeSnafu {
        message: "Create response has no numeric id",
    })?;
    Ok(render_id(&created.id))
}

impl ARecordResponse {
    /// Overlay the remote state onto `base`.
    ///
    /// `domain_id` and `source_type` are never part of the response and come
    /// from `base`. Record failover type and disable flag are kept from `base`
    /// when the response has no failover section.
    pub fn apply_to(self, base: &ARecordConfig) -> ARecordConfig {
        let mut config = base.clone();

        config.id = Some(render_id(&self.id));
        config.name = self.name;
        if let Some(ttl) = self.ttl {
            config.ttl = ttl;
        }
        config.record_option = self.record_option;
        config.noanswer = self.no_answer;
        config.note = self.note;
        config.gtd_region = self.gtd_region;
        config.record_type = self.record_type;
        config.pools = self.pools;
        config.contact_ids = self.contact_ids;
        config.geo_location = self
            .geolocation
            .map(GeoLocation::from)
            .filter(|geo| !geo.is_empty());
        config.roundrobin = self
            .round_robin
            .into_iter()
            .map(|rr| RoundRobinValue {
                value: rr.value,
                disable_flag: rr.disable_flag,
            })
            .collect();
        config.roundrobin_failover = self
            .round_robin_failover
            .into_iter()
            .map(FailoverValue::from)
            .collect();

        config.record_failover_values = Vec::new();
        if let Some(failover) = self.record_failover {
            config.record_failover_type = failover.failover_type;
            config.record_failover_disable_flag = failover.disabled;
            config.record_failover_values =
                failover.values.into_iter().map(FailoverValue::from).collect();
        }

        config
    }
}
