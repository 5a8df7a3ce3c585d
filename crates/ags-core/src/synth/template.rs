use crate::cfn::{Expr, Template, AWS_STACK_NAME};
use crate::config::TemplateConfig;

use super::authorizer::build_authorizer;
use super::deployment::build_deployment;
use super::domain::{build_base_path_mapping, build_custom_domain};
use super::naming;
use super::network::{
    build_lambda_invoke_role, build_listener, build_load_balancer,
    build_security_group_ingresses, build_target_group, build_vpc_link,
};
use super::outputs::build_outputs;
use super::paths::PathTree;
use super::rest_api::{build_rest_api, AuthorizationType};
use super::usage_plans::{
    build_api_keys, build_plan_key_mappings, build_usage_plan, UsagePlanSource,
};
use super::waf::{build_web_acl, build_web_acl_association, parse_waf_rules};

/// Synthesizes the gateway template for one configuration. One REST API
/// slot is produced per tenant definition (a single anonymous slot when
/// there are none), then the shared network and feature resources are
/// attached once, then the outputs.
pub fn synthesize(config: &TemplateConfig) -> Template {
    let cfg = config.clone().with_defaults();
    let authorization = AuthorizationType::derive(&cfg.arns);
    let api_count = cfg.api_count();
    let mut template = Template::new();

    for slot in 0..api_count {
        let definition = cfg.api_definitions.get(slot);

        let tree = if cfg.api_resources.is_empty() {
            PathTree::from_ingress_paths(&cfg.paths, cfg.request_timeout_ms, authorization, slot)
        } else {
            PathTree::from_api_resources(
                &cfg.api_resources,
                cfg.request_timeout_ms,
                authorization,
                slot,
            )
        };
        let PathTree {
            resources,
            method_ids,
        } = tree;
        template.resources.extend(resources);

        // A tenant that disables authentication drops the IAM policy on its
        // own API only; the methods keep the globally derived mode.
        let slot_authorization = match definition {
            Some(definition) if !definition.authentication_enabled => AuthorizationType::None,
            _ => authorization,
        };
        let api_name = match definition {
            Some(definition) => Expr::lit(definition.name.clone()),
            None => Expr::reference(AWS_STACK_NAME),
        };
        template.resources.insert(
            naming::slotted(naming::REST_API, slot),
            build_rest_api(
                &cfg.arns,
                cfg.endpoint_type,
                slot_authorization,
                cfg.minimum_compression_size,
                api_name,
            )
            .into(),
        );

        if let Some(definition) = definition {
            if definition.authorization_enabled {
                template.resources.insert(
                    naming::slotted(naming::AUTHORIZER, slot),
                    build_authorizer(definition, slot).into(),
                );
            }
        }

        template.resources.insert(
            naming::slotted(naming::DEPLOYMENT, slot),
            build_deployment(
                &cfg.stage_name,
                method_ids,
                cfg.caching_enabled,
                cfg.caching_size.clone(),
                &cfg.api_resources,
                slot,
            ),
        );

        if let Some((domain_name, _)) = cfg.custom_domain() {
            let base_path = match definition {
                Some(definition) => Some(definition.context.as_str()),
                None => cfg.custom_domain_base_path.as_deref(),
            };
            template.resources.insert(
                naming::slotted(naming::CUSTOM_DOMAIN_BASE_PATH_MAPPING, slot),
                build_base_path_mapping(domain_name, &cfg.stage_name, base_path, slot),
            );
        }

        if cfg.waf_enabled && cfg.waf_association {
            template.resources.insert(
                naming::slotted(naming::WAF_ASSOCIATION, slot),
                build_web_acl_association(&cfg.stage_name, slot),
            );
        }

        if let Some(source) = UsagePlanSource::select(definition, &cfg.usage_plans) {
            for (plan_index, plan) in source.plans().iter().enumerate() {
                for (key_index, key) in build_api_keys(plan, slot).into_iter().enumerate() {
                    template
                        .resources
                        .insert(naming::api_key_id(plan_index, key_index, slot), key.into());
                }
                template.resources.insert(
                    naming::usage_plan_id(plan_index, slot),
                    build_usage_plan(plan, &cfg.stage_name, slot),
                );
                for (key_index, mapping) in build_plan_key_mappings(plan, plan_index, slot)
                    .into_iter()
                    .enumerate()
                {
                    template.resources.insert(
                        naming::api_key_mapping_id(plan_index, key_index, slot),
                        mapping.into(),
                    );
                }
            }
        }
    }

    // Slot-independent resources, attached once after the slot loop.
    template.resources.insert(
        naming::LOAD_BALANCER.to_string(),
        build_load_balancer(&cfg.network.subnet_ids).into(),
    );
    template
        .resources
        .insert(naming::VPC_LINK.to_string(), build_vpc_link());
    template.resources.insert(
        naming::TARGET_GROUP.to_string(),
        build_target_group(&cfg.network.vpc_id, &cfg.network.instance_ids, cfg.node_port).into(),
    );
    template
        .resources
        .insert(naming::LISTENER.to_string(), build_listener().into());
    for (index, ingress) in build_security_group_ingresses(&cfg.network, cfg.node_port)
        .into_iter()
        .enumerate()
    {
        template.resources.insert(
            naming::slotted(naming::SECURITY_GROUP_INGRESS, index),
            ingress.into(),
        );
    }
    if let Some((domain_name, certificate_arn)) = cfg.custom_domain() {
        template.resources.insert(
            naming::CUSTOM_DOMAIN.to_string(),
            build_custom_domain(
                domain_name,
                certificate_arn,
                cfg.endpoint_type,
                cfg.tls_policy.as_deref(),
            )
            .into(),
        );
    }
    if cfg.waf_enabled {
        let rules = match cfg.waf_rules_json.as_deref().filter(|raw| !raw.is_empty()) {
            Some(raw) => match parse_waf_rules(raw) {
                Ok(rules) => rules,
                Err(err) => {
                    log::warn!("{err}; building the web ACL without rules");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        let scope = cfg.waf_scope.map(|scope| scope.as_str()).unwrap_or_default();
        template.resources.insert(
            naming::WAF_ACL.to_string(),
            build_web_acl(scope, rules).into(),
        );
    }
    template.resources.insert(
        naming::LAMBDA_INVOKE_ROLE.to_string(),
        build_lambda_invoke_role().into(),
    );

    template.outputs = build_outputs(&cfg, api_count);
    template
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfn::ResourceType;

    fn base_config() -> TemplateConfig {
        serde_yaml_ng::from_str::<TemplateConfig>(
            r#"
            network:
              vpcId: vpc-1
              cidrBlock: 10.0.0.0/24
              subnetIds: [subnet-a, subnet-b]
              securityGroupIds: [sg-1]
              instanceIds: [i-1]
            paths:
              - path: /api/v1/foobar
                backend:
                  serviceName: foobar-service
                  servicePort: 8080
            stageName: baz
            nodePort: 30123
            requestTimeoutMs: 10000
            "#,
        )
        .unwrap()
    }

    #[test]
    fn singleton_resources_follow_the_slot_resources() {
        let template = synthesize(&base_config());
        let ids: Vec<&str> = template.resources.keys().map(String::as_str).collect();
        let tail: Vec<&str> = ids[ids.len() - 6..].to_vec();
        assert_eq!(
            tail,
            vec![
                "LoadBalancer",
                "VPCLink",
                "TargetGroup",
                "Listener",
                "SecurityGroupIngress0",
                "LambdaInvokeRole"
            ]
        );
    }

    #[test]
    fn anonymous_slot_names_the_api_after_the_stack() {
        let template = synthesize(&base_config());
        let api = &template.resources["RestAPI0"];
        match &api.properties {
            ResourceType::RestApi(rest_api) => {
                assert_eq!(rest_api.name, Expr::reference(AWS_STACK_NAME));
            }
            other => panic!("expected a REST API, got {other:?}"),
        }
    }

    #[test]
    fn tenant_definitions_multiply_the_slots() {
        let mut config = base_config();
        config.api_definitions = serde_yaml_ng::from_str(
            r#"
            - name: first-api
              context: first
            - name: second-api
              context: second
            "#,
        )
        .unwrap();
        let template = synthesize(&config);
        assert!(template.resources.contains_key("RestAPI0"));
        assert!(template.resources.contains_key("RestAPI1"));
        assert!(template.resources.contains_key("Deployment1"));
        assert!(template.resources.contains_key("Methodapiv1foobar1"));
    }

    #[test]
    fn disabled_authentication_keeps_methods_on_the_global_mode() {
        let mut config = base_config();
        config.arns = vec!["arn:aws:iam::123:user/alice".to_string()];
        config.api_definitions = serde_yaml_ng::from_str(
            r#"
            - name: open-api
              context: open
              authenticationEnabled: false
            "#,
        )
        .unwrap();
        let template = synthesize(&config);
        match &template.resources["RestAPI0"].properties {
            ResourceType::RestApi(rest_api) => {
                let policy = serde_json::to_value(&rest_api.policy).unwrap();
                assert_eq!(policy["Statement"][0]["Principal"], "*");
            }
            other => panic!("expected a REST API, got {other:?}"),
        }
        match &template.resources["Methodapiv1foobar0"].properties {
            ResourceType::Method(method) => {
                assert_eq!(method.authorization_type, "AWS_IAM");
                assert!(!method.api_key_required);
            }
            other => panic!("expected a method, got {other:?}"),
        }
    }

    #[test]
    fn invalid_waf_rules_fall_back_to_an_empty_rule_list() {
        let mut config = base_config();
        config.waf_enabled = true;
        config.waf_rules_json = Some("wrongjson".to_string());
        let template = synthesize(&config);
        match &template.resources["WAFAcl"].properties {
            ResourceType::WebAcl(acl) => assert!(acl.rules.is_empty()),
            other => panic!("expected a web ACL, got {other:?}"),
        }
        assert_eq!(
            serde_json::to_value(&template.outputs["WAFRules"]).unwrap()["Value"],
            "wrongjson"
        );
    }

    #[test]
    fn waf_acl_without_association_still_skips_the_association() {
        let mut config = base_config();
        config.waf_enabled = true;
        let template = synthesize(&config);
        assert!(template.resources.contains_key("WAFAcl"));
        assert!(!template.resources.contains_key("WAFAssociation0"));
        assert!(!template.outputs.contains_key("WAFAssociation0"));
    }
}
