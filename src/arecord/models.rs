/// Record type path segment used by the API for A records.
pub const RECORD_PATH: &str = "a";

/// Declared configuration of one A record, in native types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ARecordConfig {
    /// Server assigned record ID, `None` while the record is absent.
    pub id: Option<String>,
    pub domain_id: String,
    pub source_type: String,
    pub ttl: i64,
    pub name: Option<String>,
    pub record_type: Option<String>,
    pub record_option: Option<String>,
    pub noanswer: Option<bool>,
    pub note: Option<String>,
    pub gtd_region: Option<i64>,
    pub geo_location: Option<GeoLocation>,
    pub contact_ids: Vec<i64>,
    pub pools: Vec<i64>,
    pub roundrobin: Vec<RoundRobinValue>,
    pub roundrobin_failover: Vec<FailoverValue>,
    pub record_failover_type: Option<i64>,
    pub record_failover_disable_flag: Option<bool>,
    pub record_failover_values: Vec<FailoverValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoLocation {
    pub geo_ip_user_region: Option<i64>,
    pub drop: Option<bool>,
    pub geo_ip_proximity: Option<i64>,
    pub geo_ip_failover: Option<bool>,
}

impl GeoLocation {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRobinValue {
    pub value: String,
    pub disable_flag: bool,
}

/// Entry of a prioritised failover list. Lower `sort_order` is served first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailoverValue {
    pub value: String,
    pub disable_flag: bool,
    pub sort_order: i64,
    pub check_id: Option<i64>,
}

impl ARecordConfig {
    pub fn new(source_type: &str, domain_id: &str, ttl: i64) -> Self {
        Self {
            source_type: source_type.to_string(),
            domain_id: domain_id.to_string(),
            ttl,
            ..Default::default()
        }
    }

    /// Collection path, `v1/{sourceType}/{domainId}/records/a`.
    pub fn collection_path(&self) -> String {
        format!(
            "v1/{}/{}/records/{RECORD_PATH}",
            self.source_type, self.domain_id
        )
    }

    pub fn record_path(&self, record_id: &str) -> String {
        format!("{}/{record_id}", self.collection_path())
    }
}
