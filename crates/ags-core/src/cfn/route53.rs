use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSet {
    #[serde(rename = "AliasTarget")]
    pub alias_target: AliasTarget,
    #[serde(rename = "HostedZoneName")]
    pub hosted_zone_name: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AliasTarget {
    #[serde(rename = "DNSName")]
    pub dns_name: String,
    #[serde(rename = "HostedZoneId")]
    pub hosted_zone_id: String,
}
