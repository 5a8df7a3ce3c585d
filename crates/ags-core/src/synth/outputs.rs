use indexmap::IndexMap;
use serde::Serialize;

use crate::cfn::{Expr, Output, AWS_REGION};
use crate::config::{EndpointType, TemplateConfig};

use super::naming;

// Output keys. These are read back by the collaborator that propagates
// deployed values into status, so the strings are part of the contract.
pub const REST_API_ID: &str = "RestAPIID";
pub const API_GATEWAY_ENDPOINT: &str = "APIGatewayEndpoint";
pub const API_ENDPOINT_TYPE: &str = "APIGWEndpointType";
pub const REQUEST_TIMEOUT: &str = "RequestTimeout";
pub const CLIENT_ARNS: &str = "ClientARNS";
pub const CERT_ARN: &str = "SSLCertArn";
pub const CUSTOM_DOMAIN: &str = "CustomDomainName";
pub const CUSTOM_DOMAIN_BASE_PATH: &str = "CustomDomainBasePath";
pub const CUSTOM_DOMAIN_HOSTNAME: &str = "CustomDomainHostname";
pub const CUSTOM_DOMAIN_HOSTED_ZONE_ID: &str = "CustomDomainHostedZoneID";
pub const HOSTED_ZONE: &str = "HostedZone";
pub const TLS_POLICY: &str = "TLSPolicy";
pub const MINIMUM_COMPRESSION_SIZE: &str = "MinimumCompressionSize";
pub const WAF_ENABLED: &str = "WAFEnabled";
pub const WAF_RULES: &str = "WAFRules";
pub const WAF_SCOPE: &str = "WAFScope";
pub const WAF_ASSOCIATION: &str = "WAFAssociation";
pub const USAGE_PLANS: &str = "UsagePlansData";
pub const CACHING_ENABLED: &str = "CachingEnabled";
pub const CACHING_SIZE: &str = "CachingSize";
pub const API_RESOURCES: &str = "APIResources";
pub const API_CONFIGS: &str = "AWSAPIConfigs";

/// Builds the output map for a resolved configuration. Endpoint type and
/// request timeout are always exported; per-slot and feature outputs are
/// gated by the same conditions that create the matching resources.
pub fn build_outputs(cfg: &TemplateConfig, api_count: usize) -> IndexMap<String, Output> {
    let mut outputs = IndexMap::new();
    outputs.insert(
        API_ENDPOINT_TYPE.to_string(),
        Output::new(Expr::lit(cfg.endpoint_type.as_str())),
    );
    outputs.insert(
        REQUEST_TIMEOUT.to_string(),
        Output::new(Expr::lit(cfg.request_timeout_ms.to_string())),
    );

    for slot in 0..api_count {
        let rest_api = naming::slotted(naming::REST_API, slot);
        outputs.insert(
            naming::slotted(REST_API_ID, slot),
            Output::new(Expr::reference(&*rest_api)),
        );
        outputs.insert(
            naming::slotted(API_GATEWAY_ENDPOINT, slot),
            Output::new(Expr::join(
                "",
                vec![
                    Expr::lit("https://"),
                    Expr::reference(&*rest_api),
                    Expr::lit(".execute-api."),
                    Expr::reference(AWS_REGION),
                    Expr::lit(".amazonaws.com/"),
                    Expr::lit(cfg.stage_name.clone()),
                ],
            )),
        );
        if cfg.waf_enabled && cfg.waf_association {
            outputs.insert(
                naming::slotted(WAF_ASSOCIATION, slot),
                Output::new(Expr::reference(naming::slotted(
                    naming::WAF_ASSOCIATION,
                    slot,
                ))),
            );
        }
    }

    if !cfg.usage_plans.is_empty() {
        outputs.insert(
            USAGE_PLANS.to_string(),
            Output::new(Expr::lit(json_snapshot(&cfg.usage_plans))),
        );
    }
    if !cfg.arns.is_empty() {
        outputs.insert(
            CLIENT_ARNS.to_string(),
            Output::new(Expr::lit(cfg.arns.join(","))),
        );
    }
    if cfg.minimum_compression_size > 0 {
        outputs.insert(
            MINIMUM_COMPRESSION_SIZE.to_string(),
            Output::new(Expr::lit(cfg.minimum_compression_size.to_string())),
        );
    }
    if !cfg.api_definitions.is_empty() {
        outputs.insert(
            API_CONFIGS.to_string(),
            Output::new(Expr::lit(json_snapshot(&cfg.api_definitions))),
        );
    }

    if cfg.waf_enabled {
        outputs.insert(
            WAF_ENABLED.to_string(),
            Output::new(Expr::lit(cfg.waf_enabled.to_string())),
        );
        // The configured rule JSON is echoed verbatim, valid or not.
        outputs.insert(
            WAF_RULES.to_string(),
            Output::new(Expr::lit(cfg.waf_rules_json.clone().unwrap_or_default())),
        );
        outputs.insert(
            WAF_SCOPE.to_string(),
            Output::new(Expr::lit(
                cfg.waf_scope.map(|scope| scope.as_str()).unwrap_or_default(),
            )),
        );
    }

    if let Some((domain_name, certificate_arn)) = cfg.custom_domain() {
        let (hostname_attr, zone_attr) = match cfg.endpoint_type {
            EndpointType::Edge => (
                naming::DISTRIBUTION_DOMAIN_NAME,
                naming::DISTRIBUTION_HOSTED_ZONE_ID,
            ),
            EndpointType::Regional => {
                (naming::REGIONAL_DOMAIN_NAME, naming::REGIONAL_HOSTED_ZONE_ID)
            }
        };
        outputs.insert(
            CERT_ARN.to_string(),
            Output::new(Expr::lit(certificate_arn)),
        );
        outputs.insert(
            CUSTOM_DOMAIN.to_string(),
            Output::new(Expr::lit(domain_name)),
        );
        outputs.insert(
            CUSTOM_DOMAIN_HOSTNAME.to_string(),
            Output::new(Expr::get_att(naming::CUSTOM_DOMAIN, hostname_attr)),
        );
        outputs.insert(
            CUSTOM_DOMAIN_HOSTED_ZONE_ID.to_string(),
            Output::new(Expr::get_att(naming::CUSTOM_DOMAIN, zone_attr)),
        );
        outputs.insert(
            TLS_POLICY.to_string(),
            Output::new(Expr::lit(cfg.tls_policy.clone().unwrap_or_default())),
        );
        outputs.insert(
            CUSTOM_DOMAIN_BASE_PATH.to_string(),
            Output::new(Expr::lit(
                cfg.custom_domain_base_path.clone().unwrap_or_default(),
            )),
        );
    }

    if cfg.caching_enabled {
        if let Some(size) = cfg.caching_size.as_deref().filter(|size| !size.is_empty()) {
            outputs.insert(
                CACHING_ENABLED.to_string(),
                Output::new(Expr::lit(cfg.caching_enabled.to_string())),
            );
            outputs.insert(CACHING_SIZE.to_string(), Output::new(Expr::lit(size)));
        }
    }

    if !cfg.api_resources.is_empty() {
        outputs.insert(
            API_RESOURCES.to_string(),
            Output::new(Expr::lit(json_snapshot(&cfg.api_resources))),
        );
    }

    outputs
}

/// Compact JSON echo of a configuration section. Serialization of these
/// plain records cannot fail; an empty string would only appear if it did.
fn json_snapshot<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}
