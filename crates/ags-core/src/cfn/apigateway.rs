use indexmap::IndexMap;
use serde::Serialize;

use super::iam::PolicyDocument;
use super::Expr;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestApi {
    #[serde(rename = "ApiKeySourceType")]
    pub api_key_source_type: String,
    #[serde(rename = "EndpointConfiguration")]
    pub endpoint_configuration: EndpointConfiguration,
    #[serde(rename = "MinimumCompressionSize", skip_serializing_if = "Option::is_none")]
    pub minimum_compression_size: Option<i64>,
    #[serde(rename = "Name")]
    pub name: Expr,
    #[serde(rename = "Policy")]
    pub policy: PolicyDocument,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointConfiguration {
    #[serde(rename = "Types")]
    pub types: Vec<String>,
}

/// One node of the REST resource tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    #[serde(rename = "ParentId")]
    pub parent_id: Expr,
    #[serde(rename = "PathPart")]
    pub path_part: String,
    #[serde(rename = "RestApiId")]
    pub rest_api_id: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Method {
    #[serde(rename = "ApiKeyRequired")]
    pub api_key_required: bool,
    #[serde(rename = "AuthorizationType")]
    pub authorization_type: String,
    #[serde(rename = "HttpMethod")]
    pub http_method: String,
    #[serde(rename = "Integration")]
    pub integration: Integration,
    #[serde(rename = "RequestParameters", skip_serializing_if = "IndexMap::is_empty")]
    pub request_parameters: IndexMap<String, bool>,
    #[serde(rename = "ResourceId")]
    pub resource_id: Expr,
    #[serde(rename = "RestApiId")]
    pub rest_api_id: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Integration {
    #[serde(rename = "ConnectionId")]
    pub connection_id: Expr,
    #[serde(rename = "ConnectionType")]
    pub connection_type: String,
    #[serde(rename = "IntegrationHttpMethod")]
    pub integration_http_method: String,
    #[serde(rename = "PassthroughBehavior")]
    pub passthrough_behavior: String,
    #[serde(rename = "RequestParameters", skip_serializing_if = "IndexMap::is_empty")]
    pub request_parameters: IndexMap<String, String>,
    #[serde(rename = "TimeoutInMillis")]
    pub timeout_in_millis: i64,
    #[serde(rename = "Type")]
    pub integration_type: String,
    #[serde(rename = "Uri")]
    pub uri: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deployment {
    #[serde(rename = "RestApiId")]
    pub rest_api_id: Expr,
    #[serde(rename = "StageDescription")]
    pub stage_description: StageDescription,
    #[serde(rename = "StageName")]
    pub stage_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageDescription {
    #[serde(rename = "CacheClusterEnabled")]
    pub cache_cluster_enabled: bool,
    #[serde(rename = "CacheClusterSize", skip_serializing_if = "Option::is_none")]
    pub cache_cluster_size: Option<String>,
    #[serde(rename = "CacheDataEncrypted")]
    pub cache_data_encrypted: bool,
    #[serde(rename = "MethodSettings", skip_serializing_if = "Vec::is_empty")]
    pub method_settings: Vec<MethodSetting>,
}

/// Per-method stage override, keyed by escaped resource path and verb.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodSetting {
    #[serde(rename = "CachingEnabled")]
    pub caching_enabled: bool,
    #[serde(rename = "HttpMethod")]
    pub http_method: String,
    #[serde(rename = "ResourcePath")]
    pub resource_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Authorizer {
    #[serde(rename = "AuthorizerCredentials", skip_serializing_if = "Option::is_none")]
    pub authorizer_credentials: Option<Expr>,
    #[serde(rename = "AuthorizerResultTtlInSeconds")]
    pub authorizer_result_ttl_in_seconds: i64,
    #[serde(rename = "AuthorizerUri", skip_serializing_if = "Option::is_none")]
    pub authorizer_uri: Option<Expr>,
    #[serde(rename = "AuthType", skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<String>,
    #[serde(rename = "IdentitySource", skip_serializing_if = "Option::is_none")]
    pub identity_source: Option<String>,
    #[serde(
        rename = "IdentityValidationExpression",
        skip_serializing_if = "Option::is_none"
    )]
    pub identity_validation_expression: Option<String>,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "ProviderARNs", skip_serializing_if = "Vec::is_empty")]
    pub provider_arns: Vec<String>,
    #[serde(rename = "RestApiId")]
    pub rest_api_id: Expr,
    #[serde(rename = "Type")]
    pub authorizer_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsagePlan {
    #[serde(rename = "ApiStages", skip_serializing_if = "Vec::is_empty")]
    pub api_stages: Vec<ApiStage>,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "Quota")]
    pub quota: QuotaSettings,
    #[serde(rename = "Throttle")]
    pub throttle: ThrottleSettings,
    #[serde(rename = "UsagePlanName")]
    pub usage_plan_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiStage {
    #[serde(rename = "ApiId")]
    pub api_id: Expr,
    #[serde(rename = "Stage")]
    pub stage: String,
    #[serde(rename = "Throttle", skip_serializing_if = "IndexMap::is_empty")]
    pub throttle: IndexMap<String, ThrottleSettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotaSettings {
    #[serde(rename = "Limit")]
    pub limit: i64,
    #[serde(rename = "Offset")]
    pub offset: i64,
    #[serde(rename = "Period")]
    pub period: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThrottleSettings {
    #[serde(rename = "BurstLimit")]
    pub burst_limit: i64,
    #[serde(rename = "RateLimit")]
    pub rate_limit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiKey {
    #[serde(rename = "CustomerId")]
    pub customer_id: String,
    #[serde(rename = "Enabled")]
    pub enabled: bool,
    #[serde(rename = "GenerateDistinctId")]
    pub generate_distinct_id: bool,
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsagePlanKey {
    #[serde(rename = "KeyId")]
    pub key_id: Expr,
    #[serde(rename = "KeyType")]
    pub key_type: String,
    #[serde(rename = "UsagePlanId")]
    pub usage_plan_id: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainName {
    #[serde(rename = "CertificateArn", skip_serializing_if = "Option::is_none")]
    pub certificate_arn: Option<String>,
    #[serde(rename = "DomainName")]
    pub domain_name: String,
    #[serde(rename = "EndpointConfiguration")]
    pub endpoint_configuration: EndpointConfiguration,
    #[serde(rename = "RegionalCertificateArn", skip_serializing_if = "Option::is_none")]
    pub regional_certificate_arn: Option<String>,
    #[serde(rename = "SecurityPolicy", skip_serializing_if = "Option::is_none")]
    pub security_policy: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasePathMapping {
    #[serde(rename = "BasePath", skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    #[serde(rename = "DomainName")]
    pub domain_name: String,
    #[serde(rename = "RestApiId")]
    pub rest_api_id: Expr,
    #[serde(rename = "Stage")]
    pub stage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VpcLink {
    #[serde(rename = "Name")]
    pub name: Expr,
    #[serde(rename = "TargetArns")]
    pub target_arns: Vec<Expr>,
}
