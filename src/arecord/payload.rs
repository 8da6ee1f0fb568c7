use super::models::{ARecordConfig, FailoverValue, GeoLocation, RoundRobinValue};
use super::ordering::sort_by_sort_order;

/// Request body for create and update calls.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ARecordPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub ttl: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geolocation: Option<GeolocationPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_option: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_answer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtd_region: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contact_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub round_robin: Vec<RoundRobinPayload>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub round_robin_failover: Vec<FailoverPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_failover: Option<RecordFailoverPayload>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pools: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeolocationPayload {
    /// Only ever a single region.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub geoip_user_region: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geoip_proximity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geoip_failover: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRobinPayload {
    pub value: String,
    pub disable_flag: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailoverPayload {
    pub value: String,
    pub disable_flag: bool,
    pub sort_order: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFailoverPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failover_type: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    pub values: Vec<FailoverPayload>,
}

impl From<&GeoLocation> for GeolocationPayload {
    fn from(value: &GeoLocation) -> Self {
        Self {
            geoip_user_region: value.geo_ip_user_region.into_iter().collect(),
            drop: value.drop,
            geoip_proximity: value.geo_ip_proximity,
            geoip_failover: value.geo_ip_failover,
        }
    }
}

impl From<&RoundRobinValue> for RoundRobinPayload {
    fn from(value: &RoundRobinValue) -> Self {
        Self {
            value: value.value.clone(),
            disable_flag: value.disable_flag,
        }
    }
}

impl From<FailoverValue> for FailoverPayload {
    fn from(value: FailoverValue) -> Self {
        Self {
            value: value.value,
            disable_flag: value.disable_flag,
            sort_order: value.sort_order,
            check_id: value.check_id,
        }
    }
}

fn sorted_failover(values: &[FailoverValue]) -> Vec<FailoverPayload> {
    sort_by_sort_order(values.to_vec())
        .into_iter()
        .map(FailoverPayload::from)
        .collect()
}

impl From<&ARecordConfig> for ARecordPayload {
    fn from(config: &ARecordConfig) -> Self {
        // Failover settings are meaningless without values to fail over to
        let record_failover = (!config.record_failover_values.is_empty()).then(|| {
            RecordFailoverPayload {
                failover_type: config.record_failover_type,
                disabled: config.record_failover_disable_flag,
                values: sorted_failover(&config.record_failover_values),
            }
        });

        Self {
            name: config.name.clone(),
            ttl: config.ttl,
            geolocation: config
                .geo_location
                .as_ref()
                .filter(|geo| !geo.is_empty())
                .map(GeolocationPayload::from),
            record_option: config.record_option.clone(),
            no_answer: config.noanswer,
            note: config.note.clone(),
            gtd_region: config.gtd_region,
            record_type: config.record_type.clone(),
            contact_ids: config.contact_ids.clone(),
            round_robin: config.roundrobin.iter().map(RoundRobinPayload::from).collect(),
            round_robin_failover: sorted_failover(&config.roundrobin_failover),
            record_failover,
            pools: config.pools.clone(),
        }
    }
}
