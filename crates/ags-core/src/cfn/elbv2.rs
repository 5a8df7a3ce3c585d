use serde::Serialize;

use super::{Expr, Tag};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadBalancer {
    #[serde(rename = "IpAddressType")]
    pub ip_address_type: String,
    #[serde(rename = "Scheme")]
    pub scheme: String,
    #[serde(rename = "Subnets")]
    pub subnets: Vec<String>,
    #[serde(rename = "Tags", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(rename = "Type")]
    pub load_balancer_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetGroup {
    #[serde(rename = "HealthCheckIntervalSeconds")]
    pub health_check_interval_seconds: i64,
    #[serde(rename = "HealthCheckPort")]
    pub health_check_port: String,
    #[serde(rename = "HealthCheckProtocol")]
    pub health_check_protocol: String,
    #[serde(rename = "HealthCheckTimeoutSeconds")]
    pub health_check_timeout_seconds: i64,
    #[serde(rename = "HealthyThresholdCount")]
    pub healthy_threshold_count: i64,
    #[serde(rename = "Port")]
    pub port: u16,
    #[serde(rename = "Protocol")]
    pub protocol: String,
    #[serde(rename = "Tags", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(rename = "TargetType")]
    pub target_type: String,
    #[serde(rename = "Targets", skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<TargetDescription>,
    #[serde(rename = "UnhealthyThresholdCount")]
    pub unhealthy_threshold_count: i64,
    #[serde(rename = "VpcId")]
    pub vpc_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetDescription {
    #[serde(rename = "Id")]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listener {
    #[serde(rename = "DefaultActions")]
    pub default_actions: Vec<ListenerAction>,
    #[serde(rename = "LoadBalancerArn")]
    pub load_balancer_arn: Expr,
    #[serde(rename = "Port")]
    pub port: u16,
    #[serde(rename = "Protocol")]
    pub protocol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListenerAction {
    #[serde(rename = "TargetGroupArn")]
    pub target_group_arn: Expr,
    #[serde(rename = "Type")]
    pub action_type: String,
}
