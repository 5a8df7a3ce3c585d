use serde::Serialize;

use super::Expr;

/// A single WebACL rule, carried opaquely from configuration to template.
pub type WebAclRule = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebAcl {
    #[serde(rename = "DefaultAction")]
    pub default_action: DefaultAction,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Name")]
    pub name: Expr,
    #[serde(rename = "Rules", skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<WebAclRule>,
    #[serde(rename = "Scope")]
    pub scope: String,
    #[serde(rename = "VisibilityConfig")]
    pub visibility_config: VisibilityConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DefaultAction {
    #[serde(rename = "Allow")]
    pub allow: AllowAction,
}

/// Serializes as the empty `{}` action object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AllowAction {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibilityConfig {
    #[serde(rename = "CloudWatchMetricsEnabled")]
    pub cloudwatch_metrics_enabled: bool,
    #[serde(rename = "MetricName")]
    pub metric_name: Expr,
    #[serde(rename = "SampledRequestsEnabled")]
    pub sampled_requests_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebAclAssociation {
    #[serde(rename = "ResourceArn")]
    pub resource_arn: Expr,
    #[serde(rename = "WebACLArn")]
    pub web_acl_arn: Expr,
}
