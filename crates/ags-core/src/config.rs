use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Cache cluster size applied when caching is enabled without a size.
pub const DEFAULT_CACHE_SIZE: &str = "0.5";

/// Config file name the CLI looks for when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "ags.yaml";

/// Declarative description of one ingress: routing paths, network
/// placement, and optional gateway features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    pub network: Network,
    #[serde(default)]
    pub paths: Vec<HttpIngressPath>,
    pub stage_name: String,
    pub node_port: u16,
    #[serde(default)]
    pub arns: Vec<String>,
    #[serde(default)]
    pub request_timeout_ms: i64,
    #[serde(default)]
    pub endpoint_type: EndpointType,
    #[serde(default)]
    pub minimum_compression_size: i64,
    #[serde(default)]
    pub custom_domain_name: Option<String>,
    #[serde(default)]
    pub custom_domain_base_path: Option<String>,
    #[serde(default)]
    pub certificate_arn: Option<String>,
    #[serde(default)]
    pub tls_policy: Option<String>,
    #[serde(default)]
    pub waf_enabled: bool,
    #[serde(default)]
    pub waf_scope: Option<WafScope>,
    #[serde(default)]
    pub waf_rules_json: Option<String>,
    #[serde(default)]
    pub waf_association: bool,
    #[serde(default)]
    pub caching_enabled: bool,
    #[serde(default)]
    pub caching_size: Option<String>,
    #[serde(default)]
    pub usage_plans: Vec<UsagePlan>,
    #[serde(default)]
    pub api_resources: Vec<ApiResource>,
    #[serde(default)]
    pub api_definitions: Vec<ApiDefinition>,
}

impl TemplateConfig {
    /// Resolves the interdependent optional settings. A caching size
    /// implies caching; caching without a size gets [`DEFAULT_CACHE_SIZE`];
    /// an enabled WAF without a scope defaults to REGIONAL.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        let size_set = self.caching_size.as_deref().is_some_and(|s| !s.is_empty());
        if size_set && !self.caching_enabled {
            self.caching_enabled = true;
        }
        if self.caching_enabled && !size_set {
            self.caching_size = Some(DEFAULT_CACHE_SIZE.to_string());
        }
        if self.waf_enabled && self.waf_scope.is_none() {
            self.waf_scope = Some(WafScope::Regional);
        }
        self
    }

    /// The custom domain feature is active only when both the domain name
    /// and the certificate ARN are present and non-empty.
    pub fn custom_domain(&self) -> Option<(&str, &str)> {
        let name = self.custom_domain_name.as_deref().filter(|s| !s.is_empty())?;
        let certificate = self.certificate_arn.as_deref().filter(|s| !s.is_empty())?;
        Some((name, certificate))
    }

    /// Number of REST APIs to synthesize: one per definition, or a single
    /// anonymous API when no definitions are configured.
    pub fn api_count(&self) -> usize {
        if self.api_definitions.is_empty() {
            1
        } else {
            self.api_definitions.len()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub vpc_id: String,
    pub cidr_block: String,
    #[serde(default)]
    pub subnet_ids: Vec<String>,
    #[serde(default)]
    pub security_group_ids: Vec<String>,
    #[serde(default)]
    pub instance_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpIngressPath {
    pub path: String,
    pub backend: ServiceBackend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBackend {
    pub service_name: String,
    pub service_port: u16,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndpointType {
    #[default]
    #[serde(rename = "EDGE")]
    Edge,
    #[serde(rename = "REGIONAL")]
    Regional,
}

impl EndpointType {
    pub fn as_str(self) -> &'static str {
        match self {
            EndpointType::Edge => "EDGE",
            EndpointType::Regional => "REGIONAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WafScope {
    #[serde(rename = "REGIONAL")]
    Regional,
    #[serde(rename = "CLOUDFRONT")]
    Cloudfront,
}

impl WafScope {
    pub fn as_str(self) -> &'static str {
        match self {
            WafScope::Regional => "REGIONAL",
            WafScope::Cloudfront => "CLOUDFRONT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsagePlan {
    pub plan_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub api_keys: Vec<ApiKey>,
    #[serde(default)]
    pub quota_limit: i64,
    #[serde(default)]
    pub quota_offset: i64,
    #[serde(default)]
    pub quota_period: String,
    #[serde(default)]
    pub throttle_burst_limit: i64,
    #[serde(default)]
    pub throttle_rate_limit: f64,
    #[serde(default)]
    pub method_throttling_parameters: Vec<MethodThrottlingParameters>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub name: String,
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub generate_distinct_id: bool,
}

/// Per-path throttle override within a usage plan stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodThrottlingParameters {
    pub path: String,
    #[serde(default)]
    pub burst_limit: i64,
    #[serde(default)]
    pub rate_limit: f64,
}

/// An explicitly declared REST resource, used instead of greedy proxy
/// routing when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResource {
    pub path: String,
    #[serde(default)]
    pub methods: Vec<String>,
    #[serde(default)]
    pub caching_enabled: bool,
    #[serde(default)]
    pub proxy_path_params: Vec<Param>,
    #[serde(default)]
    pub proxy_query_params: Vec<Param>,
    #[serde(default)]
    pub proxy_header_params: Vec<Param>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    pub param: String,
    #[serde(default)]
    pub required: bool,
}

/// One tenant API sharing the ingress: its own REST API, auth settings,
/// and optionally its own usage plans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDefinition {
    pub name: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub authentication_enabled: bool,
    #[serde(default)]
    pub authorization_enabled: bool,
    #[serde(default)]
    pub api_key_enabled: bool,
    #[serde(default)]
    pub authorizer_type: AuthorizerType,
    #[serde(default)]
    pub authorizer_auth_type: Option<String>,
    #[serde(default)]
    pub authorizer_uri: Option<String>,
    #[serde(default)]
    pub identity_source: Option<String>,
    #[serde(default)]
    pub identity_validation_expression: Option<String>,
    #[serde(default)]
    pub authorizer_result_ttl_seconds: i64,
    #[serde(default)]
    pub provider_arns: Vec<String>,
    #[serde(default)]
    pub usage_plans: Vec<UsagePlan>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorizerType {
    #[serde(rename = "COGNITO_USER_POOLS")]
    CognitoUserPools,
    #[serde(rename = "TOKEN")]
    Token,
    #[default]
    #[serde(rename = "REQUEST")]
    #[serde(other)]
    Request,
}

impl AuthorizerType {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthorizerType::CognitoUserPools => "COGNITO_USER_POOLS",
            AuthorizerType::Token => "TOKEN",
            AuthorizerType::Request => "REQUEST",
        }
    }
}

/// Inputs for the standalone Route53 alias template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsTemplateConfig {
    pub custom_domain_name: String,
    pub custom_domain_host_name: String,
    pub custom_domain_hosted_zone_id: String,
    #[serde(default)]
    pub hosted_zone_name: Option<String>,
}

/// Loads a [`TemplateConfig`] from a YAML or JSON file, dispatching on the
/// file extension. Anything that is not `.json` is treated as YAML.
pub fn load_config(path: &Path) -> Result<TemplateConfig, ConfigError> {
    load(path)
}

/// Loads a [`DnsTemplateConfig`]; same format rules as [`load_config`].
pub fn load_dns_config(path: &Path) -> Result<DnsTemplateConfig, ConfigError> {
    load(path)
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(serde_json::from_str(&raw)?),
        _ => Ok(serde_yaml_ng::from_str(&raw)?),
    }
}

/// Starter configuration written by `ags init`.
pub fn starter_config() -> &'static str {
    r#"# Gateway synthesis configuration.
# Network identifiers come from the cluster the gateway fronts.
network:
  vpcId: vpc-REPLACE
  cidrBlock: 10.0.0.0/16
  subnetIds: []
  securityGroupIds: []
  instanceIds: []
paths:
  - path: /api
    backend:
      serviceName: my-service
      servicePort: 8080
stageName: prod
nodePort: 30080
requestTimeoutMs: 29000
"#
}
