use std::collections::BTreeMap;

use crate::common::{parse_bool, parse_int, Error, InvalidAttributeSnafu, Result};

use super::models::{ARecordConfig, FailoverValue, GeoLocation, RoundRobinValue};

const GEO_USER_REGION: &str = "geo_ip_user_region";
const GEO_DROP: &str = "drop";
const GEO_PROXIMITY: &str = "geo_ip_proximity";
const GEO_FAILOVER: &str = "geo_ip_failover";

/// Record state as the host persists it.
///
/// Mirrors the host schema, where map entries, disable flags, sort orders and
/// the failover type are strings.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HostState {
    #[serde(default)]
    pub id: String,
    pub domain_id: String,
    pub source_type: String,
    pub ttl: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub geo_location: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_option: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noanswer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gtd_region: Option<i64>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contact_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roundrobin: Vec<HostRoundRobin>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roundrobin_failover: Vec<HostFailover>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub record_failover_values: Vec<HostFailover>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_failover_failover_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_failover_disable_flag: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pools: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HostRoundRobin {
    pub value: String,
    #[serde(default)]
    pub disable_flag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HostFailover {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_flag: Option<String>,
    pub sort_order: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_id: Option<i64>,
}

fn required_flag(attribute: &str, value: Option<&str>) -> Result<bool> {
    match value {
        Some(value) => parse_bool(attribute, value),
        None => InvalidAttributeSnafu {
            attribute,
            value: "",
            message: "value is required",
        }
        .fail(),
    }
}

fn geo_location(map: &BTreeMap<String, String>) -> Result<Option<GeoLocation>> {
    let attribute = |key: &str| format!("geo_location.{key}");

    let mut geo = GeoLocation::default();
    for (key, value) in map {
        let key = key.as_str();
        match key {
            GEO_USER_REGION => geo.geo_ip_user_region = Some(parse_int(&attribute(key), value)?),
            GEO_DROP => geo.drop = Some(parse_bool(&attribute(key), value)?),
            GEO_PROXIMITY => geo.geo_ip_proximity = Some(parse_int(&attribute(key), value)?),
            GEO_FAILOVER => geo.geo_ip_failover = Some(parse_bool(&attribute(key), value)?),
            _ => {
                return InvalidAttributeSnafu {
                    attribute: attribute(key),
                    value: value.as_str(),
                    message: "unknown geo_location key",
                }
                .fail()
            }
        }
    }

    Ok((!geo.is_empty()).then_some(geo))
}

fn failover_values(
    attribute: &str,
    values: &[HostFailover],
    flag_required: bool,
) -> Result<Vec<FailoverValue>> {
    values
        .iter()
        .enumerate()
        .map(|(idx, entry)| -> Result<FailoverValue> {
            let flag_attribute = format!("{attribute}.{idx}.disable_flag");
            let disable_flag = match (entry.disable_flag.as_deref(), flag_required) {
                (Some(flag), _) => parse_bool(&flag_attribute, flag)?,
                (None, true) => required_flag(&flag_attribute, None)?,
                (None, false) => false,
            };
            Ok(FailoverValue {
                value: entry.value.clone(),
                disable_flag,
                sort_order: parse_int(&format!("{attribute}.{idx}.sort_order"), &entry.sort_order)?,
                check_id: entry.check_id,
            })
        })
        .collect()
}

impl TryFrom<&HostState> for ARecordConfig {
    type Error = Error;

    fn try_from(state: &HostState) -> Result<Self> {
        let roundrobin = state
            .roundrobin
            .iter()
            .enumerate()
            .map(|(idx, entry)| -> Result<RoundRobinValue> {
                Ok(RoundRobinValue {
                    value: entry.value.clone(),
                    disable_flag: required_flag(
                        &format!("roundrobin.{idx}.disable_flag"),
                        entry.disable_flag.as_deref(),
                    )?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let record_failover_type = state
            .record_failover_failover_type
            .as_deref()
            .map(|value| parse_int("record_failover_failover_type", value))
            .transpose()?;
        let record_failover_disable_flag = state
            .record_failover_disable_flag
            .as_deref()
            .map(|value| parse_bool("record_failover_disable_flag", value))
            .transpose()?;

        Ok(Self {
            id: (!state.id.is_empty()).then(|| state.id.clone()),
            domain_id: state.domain_id.clone(),
            source_type: state.source_type.clone(),
            ttl: state.ttl,
            name: state.name.clone(),
            record_type: state.record_type.clone(),
            record_option: state.record_option.clone(),
            noanswer: state.noanswer,
            note: state.note.clone(),
            gtd_region: state.gtd_region,
            geo_location: geo_location(&state.geo_location)?,
            contact_ids: state.contact_ids.clone(),
            pools: state.pools.clone(),
            roundrobin,
            roundrobin_failover: failover_values(
                "roundrobin_failover",
                &state.roundrobin_failover,
                false,
            )?,
            record_failover_type,
            record_failover_disable_flag,
            record_failover_values: failover_values(
                "record_failover_values",
                &state.record_failover_values,
                true,
            )?,
        })
    }
}

impl TryFrom<HostState> for ARecordConfig {
    type Error = Error;

    fn try_from(state: HostState) -> Result<Self> {
        Self::try_from(&state)
    }
}

fn host_failover(values: &[FailoverValue]) -> Vec<HostFailover> {
    values
        .iter()
        .map(|entry| HostFailover {
            value: entry.value.clone(),
            disable_flag: Some(entry.disable_flag.to_string()),
            sort_order: entry.sort_order.to_string(),
            check_id: entry.check_id,
        })
        .collect()
}

impl From<&ARecordConfig> for HostState {
    fn from(config: &ARecordConfig) -> Self {
        let mut geo_location = BTreeMap::new();
        if let Some(geo) = &config.geo_location {
            if let Some(region) = geo.geo_ip_user_region {
                geo_location.insert(GEO_USER_REGION.to_string(), region.to_string());
            }
            if let Some(drop) = geo.drop {
                geo_location.insert(GEO_DROP.to_string(), drop.to_string());
            }
            if let Some(proximity) = geo.geo_ip_proximity {
                geo_location.insert(GEO_PROXIMITY.to_string(), proximity.to_string());
            }
            if let Some(failover) = geo.geo_ip_failover {
                geo_location.insert(GEO_FAILOVER.to_string(), failover.to_string());
            }
        }

        Self {
            id: config.id.clone().unwrap_or_default(),
            domain_id: config.domain_id.clone(),
            source_type: config.source_type.clone(),
            ttl: config.ttl,
            name: config.name.clone(),
            geo_location,
            record_option: config.record_option.clone(),
            noanswer: config.noanswer,
            note: config.note.clone(),
            gtd_region: config.gtd_region,
            record_type: config.record_type.clone(),
            contact_ids: config.contact_ids.clone(),
            roundrobin: config
                .roundrobin
                .iter()
                .map(|entry| HostRoundRobin {
                    value: entry.value.clone(),
                    disable_flag: Some(entry.disable_flag.to_string()),
                })
                .collect(),
            roundrobin_failover: host_failover(&config.roundrobin_failover),
            record_failover_values: host_failover(&config.record_failover_values),
            record_failover_failover_type: config.record_failover_type.map(|t| t.to_string()),
            record_failover_disable_flag: config
                .record_failover_disable_flag
                .map(|flag| flag.to_string()),
            pools: config.pools.clone(),
        }
    }
}
