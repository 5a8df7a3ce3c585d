use indexmap::IndexMap;

use crate::cfn::apigateway::{
    ApiKey, ApiStage, QuotaSettings, ThrottleSettings, UsagePlan, UsagePlanKey,
};
use crate::cfn::{Expr, Resource};
use crate::config::{self, ApiDefinition};

use super::naming;

/// Which plan list feeds a slot. Tenant plans win when the tenant enables
/// API keys and brings its own; the two lists are never merged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UsagePlanSource<'a> {
    Global(&'a [config::UsagePlan]),
    Tenant(&'a [config::UsagePlan]),
}

impl<'a> UsagePlanSource<'a> {
    /// `None` means the slot gets no plans at all: either the tenant has
    /// API keys disabled, or no plan list applies.
    pub fn select(
        definition: Option<&'a ApiDefinition>,
        global: &'a [config::UsagePlan],
    ) -> Option<Self> {
        if let Some(definition) = definition {
            if !definition.api_key_enabled {
                return None;
            }
            if !definition.usage_plans.is_empty() {
                return Some(UsagePlanSource::Tenant(&definition.usage_plans));
            }
        }
        (!global.is_empty()).then_some(UsagePlanSource::Global(global))
    }

    pub fn plans(self) -> &'a [config::UsagePlan] {
        match self {
            UsagePlanSource::Global(plans) | UsagePlanSource::Tenant(plans) => plans,
        }
    }
}

/// Builds one plan resource bound to the slot's stage. The plan can only
/// throttle a deployed stage, hence the deployment dependency.
pub fn build_usage_plan(plan: &config::UsagePlan, stage_name: &str, slot: usize) -> Resource {
    let usage_plan = UsagePlan {
        api_stages: vec![build_api_stage(plan, stage_name, slot)],
        description: (!plan.description.is_empty()).then(|| plan.description.clone()),
        quota: QuotaSettings {
            limit: plan.quota_limit,
            offset: plan.quota_offset,
            period: plan.quota_period.clone(),
        },
        throttle: ThrottleSettings {
            burst_limit: plan.throttle_burst_limit,
            rate_limit: plan.throttle_rate_limit,
        },
        usage_plan_name: plan.plan_name.clone(),
    };
    Resource::from(usage_plan)
        .with_depends_on(vec![naming::slotted(naming::DEPLOYMENT, slot)])
}

/// Per-path overrides apply to the synthesized ANY method, so every key is
/// normalized to `<path>/ANY`.
fn build_api_stage(plan: &config::UsagePlan, stage_name: &str, slot: usize) -> ApiStage {
    let mut throttle = IndexMap::new();
    for parameters in &plan.method_throttling_parameters {
        let key = if parameters.path.ends_with('/') {
            format!("{}ANY", parameters.path)
        } else {
            format!("{}/ANY", parameters.path)
        };
        throttle.insert(
            key,
            ThrottleSettings {
                burst_limit: parameters.burst_limit,
                rate_limit: parameters.rate_limit,
            },
        );
    }
    ApiStage {
        api_id: Expr::reference(naming::slotted(naming::REST_API, slot)),
        stage: stage_name.to_string(),
        throttle,
    }
}

/// Key resources for one plan. The emitted key name carries the slot index
/// so tenant APIs do not collide on the account-wide key namespace.
pub fn build_api_keys(plan: &config::UsagePlan, slot: usize) -> Vec<ApiKey> {
    plan.api_keys
        .iter()
        .map(|key| ApiKey {
            customer_id: key.customer_id.clone(),
            enabled: true,
            generate_distinct_id: key.generate_distinct_id,
            name: format!("{}{}", key.name, slot),
        })
        .collect()
}

/// Key-to-plan mappings, one per key, referencing the ids the keys and the
/// plan are stored under.
pub fn build_plan_key_mappings(
    plan: &config::UsagePlan,
    plan_index: usize,
    slot: usize,
) -> Vec<UsagePlanKey> {
    (0..plan.api_keys.len())
        .map(|key_index| UsagePlanKey {
            key_id: Expr::reference(naming::api_key_id(plan_index, key_index, slot)),
            key_type: "API_KEY".to_string(),
            usage_plan_id: Expr::reference(naming::usage_plan_id(plan_index, slot)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfn::ResourceType;
    use crate::config::MethodThrottlingParameters;

    fn gold_plan() -> config::UsagePlan {
        config::UsagePlan {
            plan_name: "Gold".to_string(),
            description: "20 requests for 1 minute".to_string(),
            api_keys: vec![
                config::ApiKey {
                    name: "cusKey1".to_string(),
                    customer_id: "customer1".to_string(),
                    generate_distinct_id: true,
                },
                config::ApiKey {
                    name: "cusKey2".to_string(),
                    customer_id: "customer2".to_string(),
                    generate_distinct_id: true,
                },
            ],
            quota_limit: 100,
            quota_offset: 0,
            quota_period: "MONTH".to_string(),
            throttle_burst_limit: 100,
            throttle_rate_limit: 100.0,
            method_throttling_parameters: vec![MethodThrottlingParameters {
                path: "/api/v1/foobar".to_string(),
                burst_limit: 100,
                rate_limit: 100.0,
            }],
        }
    }

    fn tenant(api_key_enabled: bool, own_plans: bool) -> ApiDefinition {
        ApiDefinition {
            name: "tenant-api".to_string(),
            context: "v1".to_string(),
            authentication_enabled: true,
            authorization_enabled: false,
            api_key_enabled,
            authorizer_type: Default::default(),
            authorizer_auth_type: None,
            authorizer_uri: None,
            identity_source: None,
            identity_validation_expression: None,
            authorizer_result_ttl_seconds: 0,
            provider_arns: Vec::new(),
            usage_plans: if own_plans { vec![gold_plan()] } else { Vec::new() },
        }
    }

    #[test]
    fn tenant_plans_win_when_api_keys_enabled() {
        let global = vec![gold_plan()];
        let tenant_def = tenant(true, true);
        let source = UsagePlanSource::select(Some(&tenant_def), &global).unwrap();
        assert!(matches!(source, UsagePlanSource::Tenant(_)));
    }

    #[test]
    fn tenant_without_own_plans_falls_back_to_global() {
        let global = vec![gold_plan()];
        let tenant_def = tenant(true, false);
        let source = UsagePlanSource::select(Some(&tenant_def), &global).unwrap();
        assert!(matches!(source, UsagePlanSource::Global(_)));
    }

    #[test]
    fn api_keys_disabled_selects_nothing() {
        let global = vec![gold_plan()];
        let tenant_def = tenant(false, true);
        assert_eq!(UsagePlanSource::select(Some(&tenant_def), &global), None);
        assert_eq!(UsagePlanSource::select(None, &[]), None);
    }

    #[test]
    fn plan_carries_quota_throttle_and_stage_binding() {
        let resource = build_usage_plan(&gold_plan(), "baz", 0);
        assert_eq!(resource.depends_on, vec!["Deployment0"]);
        let plan = match &resource.properties {
            ResourceType::UsagePlan(plan) => plan,
            other => panic!("expected a usage plan, got {other:?}"),
        };
        assert_eq!(plan.usage_plan_name, "Gold");
        assert_eq!(plan.quota.limit, 100);
        assert_eq!(plan.quota.period, "MONTH");
        assert_eq!(plan.throttle.burst_limit, 100);
        assert_eq!(plan.api_stages.len(), 1);
        assert_eq!(plan.api_stages[0].api_id, Expr::reference("RestAPI0"));
        assert_eq!(plan.api_stages[0].stage, "baz");
        assert!(plan.api_stages[0].throttle.contains_key("/api/v1/foobar/ANY"));
    }

    #[test]
    fn throttle_key_normalizes_trailing_slash() {
        let mut plan = gold_plan();
        plan.method_throttling_parameters[0].path = "/api/v1/foobar/".to_string();
        let resource = build_usage_plan(&plan, "baz", 0);
        let plan = match &resource.properties {
            ResourceType::UsagePlan(plan) => plan,
            other => panic!("expected a usage plan, got {other:?}"),
        };
        let keys: Vec<_> = plan.api_stages[0].throttle.keys().collect();
        assert_eq!(keys, vec!["/api/v1/foobar/ANY"]);
    }

    #[test]
    fn key_names_carry_slot_suffix_and_mappings_line_up() {
        let plan = gold_plan();
        let keys = build_api_keys(&plan, 1);
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].name, "cusKey11");
        assert_eq!(keys[0].customer_id, "customer1");
        assert!(keys[0].enabled);
        assert!(keys[0].generate_distinct_id);
        assert_eq!(keys[1].name, "cusKey21");

        let mappings = build_plan_key_mappings(&plan, 0, 1);
        assert_eq!(mappings.len(), 2);
        assert_eq!(mappings[0].key_id, Expr::reference("APIKey001"));
        assert_eq!(mappings[0].usage_plan_id, Expr::reference("UsagePlan01"));
        assert_eq!(mappings[0].key_type, "API_KEY");
        assert_eq!(mappings[1].key_id, Expr::reference("APIKey011"));
    }
}
