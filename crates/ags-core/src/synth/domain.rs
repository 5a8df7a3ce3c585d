use indexmap::IndexMap;

use crate::cfn::apigateway::{BasePathMapping, DomainName, EndpointConfiguration};
use crate::cfn::route53::{AliasTarget, RecordSet};
use crate::cfn::{Expr, Output, Resource, Template};
use crate::config::{DnsTemplateConfig, EndpointType};

use super::naming;
use super::outputs;

/// The certificate lands on a different field per endpoint type: EDGE
/// domains take the CloudFront certificate field, REGIONAL domains the
/// regional one plus the negotiated TLS policy.
pub fn build_custom_domain(
    domain_name: &str,
    certificate_arn: &str,
    endpoint_type: EndpointType,
    tls_policy: Option<&str>,
) -> DomainName {
    let endpoint_configuration = EndpointConfiguration {
        types: vec![endpoint_type.as_str().to_string()],
    };
    match endpoint_type {
        EndpointType::Regional => DomainName {
            certificate_arn: None,
            domain_name: domain_name.to_string(),
            endpoint_configuration,
            regional_certificate_arn: Some(certificate_arn.to_string()),
            security_policy: tls_policy
                .filter(|policy| !policy.is_empty())
                .map(str::to_string),
        },
        EndpointType::Edge => DomainName {
            certificate_arn: Some(certificate_arn.to_string()),
            domain_name: domain_name.to_string(),
            endpoint_configuration,
            regional_certificate_arn: None,
            security_policy: None,
        },
    }
}

/// Maps the domain (optionally under a base path) onto one slot's deployed
/// stage.
pub fn build_base_path_mapping(
    domain_name: &str,
    stage_name: &str,
    base_path: Option<&str>,
    slot: usize,
) -> Resource {
    let mapping = BasePathMapping {
        base_path: base_path
            .filter(|path| !path.is_empty())
            .map(str::to_string),
        domain_name: domain_name.to_string(),
        rest_api_id: Expr::reference(naming::slotted(naming::REST_API, slot)),
        stage: stage_name.to_string(),
    };
    Resource::from(mapping).with_depends_on(vec![naming::slotted(naming::DEPLOYMENT, slot)])
}

/// Standalone companion template: an alias record pointing the custom
/// domain at the gateway's distribution, plus the domain metadata outputs.
/// The record itself is only synthesized when a hosted zone is named; the
/// outputs are emitted either way.
pub fn synthesize_dns(config: &DnsTemplateConfig) -> Template {
    let mut template = Template::new();

    if let Some(zone) = config
        .hosted_zone_name
        .as_deref()
        .filter(|zone| !zone.is_empty())
    {
        let record = RecordSet {
            alias_target: AliasTarget {
                dns_name: config.custom_domain_host_name.clone(),
                hosted_zone_id: config.custom_domain_hosted_zone_id.clone(),
            },
            hosted_zone_name: zone.to_string(),
            name: config.custom_domain_name.clone(),
            record_type: "A".to_string(),
        };
        template
            .resources
            .insert(naming::ROUTE53_RECORD_SET.to_string(), record.into());
    }

    let mut dns_outputs = IndexMap::new();
    dns_outputs.insert(
        outputs::CUSTOM_DOMAIN_HOSTNAME.to_string(),
        Output::new(Expr::lit(config.custom_domain_host_name.clone())),
    );
    dns_outputs.insert(
        outputs::CUSTOM_DOMAIN_HOSTED_ZONE_ID.to_string(),
        Output::new(Expr::lit(config.custom_domain_hosted_zone_id.clone())),
    );
    dns_outputs.insert(
        outputs::CUSTOM_DOMAIN.to_string(),
        Output::new(Expr::lit(config.custom_domain_name.clone())),
    );
    dns_outputs.insert(
        outputs::HOSTED_ZONE.to_string(),
        Output::new(Expr::lit(
            config.hosted_zone_name.clone().unwrap_or_default(),
        )),
    );
    template.outputs = dns_outputs;

    template
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfn::ResourceType;

    #[test]
    fn edge_domain_uses_distribution_certificate_field() {
        let domain = build_custom_domain(
            "api.example.com",
            "arn:aws:acm:us-east-1:123:certificate/x",
            EndpointType::Edge,
            Some("TLS_1_2"),
        );
        assert_eq!(
            domain.certificate_arn.as_deref(),
            Some("arn:aws:acm:us-east-1:123:certificate/x")
        );
        assert_eq!(domain.regional_certificate_arn, None);
        assert_eq!(domain.security_policy, None);
        assert_eq!(domain.endpoint_configuration.types, vec!["EDGE"]);
    }

    #[test]
    fn regional_domain_uses_regional_certificate_and_policy() {
        let domain = build_custom_domain(
            "api.example.com",
            "arn:aws:acm:eu-west-1:123:certificate/y",
            EndpointType::Regional,
            Some("TLS_1_2"),
        );
        assert_eq!(domain.certificate_arn, None);
        assert_eq!(
            domain.regional_certificate_arn.as_deref(),
            Some("arn:aws:acm:eu-west-1:123:certificate/y")
        );
        assert_eq!(domain.security_policy.as_deref(), Some("TLS_1_2"));
        assert_eq!(domain.endpoint_configuration.types, vec!["REGIONAL"]);
    }

    #[test]
    fn base_path_mapping_binds_slot_api_and_deployment() {
        let mapping = build_base_path_mapping("api.example.com", "baz", Some("v1"), 2);
        assert_eq!(mapping.depends_on, vec!["Deployment2"]);
        match &mapping.properties {
            ResourceType::BasePathMapping(mapping) => {
                assert_eq!(mapping.base_path.as_deref(), Some("v1"));
                assert_eq!(mapping.rest_api_id, Expr::reference("RestAPI2"));
                assert_eq!(mapping.stage, "baz");
            }
            other => panic!("expected a base path mapping, got {other:?}"),
        }
    }

    #[test]
    fn empty_base_path_is_omitted() {
        let mapping = build_base_path_mapping("api.example.com", "baz", Some(""), 0);
        match &mapping.properties {
            ResourceType::BasePathMapping(mapping) => assert_eq!(mapping.base_path, None),
            other => panic!("expected a base path mapping, got {other:?}"),
        }
    }
}
