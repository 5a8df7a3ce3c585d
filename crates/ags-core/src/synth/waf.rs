use crate::cfn::wafv2::{
    AllowAction, DefaultAction, VisibilityConfig, WebAcl, WebAclAssociation, WebAclRule,
};
use crate::cfn::{Expr, Resource, AWS_REGION, AWS_STACK_NAME};
use crate::error::WafRuleError;

use super::naming;

const WEB_ACL_DESCRIPTION: &str = "Web ACL synthesized for the gateway stack";

/// Parses the configured rule document. Rules are passed through opaquely;
/// only the outer list shape is validated here. The caller decides whether
/// a failure is fatal or degrades to an empty rule set.
pub fn parse_waf_rules(raw: &str) -> Result<Vec<WebAclRule>, WafRuleError> {
    Ok(serde_json::from_str(raw)?)
}

pub fn build_web_acl(scope: &str, rules: Vec<WebAclRule>) -> WebAcl {
    WebAcl {
        default_action: DefaultAction {
            allow: AllowAction::default(),
        },
        description: WEB_ACL_DESCRIPTION.to_string(),
        name: Expr::reference(AWS_STACK_NAME),
        rules,
        scope: scope.to_string(),
        visibility_config: VisibilityConfig {
            cloudwatch_metrics_enabled: true,
            metric_name: Expr::sub(format!("${{{AWS_STACK_NAME}}}WebACLMetric")),
            sampled_requests_enabled: true,
        },
    }
}

/// Associates the ACL with one deployed stage. Both the deployment and the
/// ACL must exist first; the stage ARN is only resolvable after deploy, so
/// it is assembled with `Fn::Sub`.
pub fn build_web_acl_association(stage_name: &str, slot: usize) -> Resource {
    let rest_api = naming::slotted(naming::REST_API, slot);
    let association = WebAclAssociation {
        resource_arn: Expr::sub(format!(
            "arn:aws:apigateway:${{{AWS_REGION}}}::/restapis/${{{rest_api}}}/stages/{stage_name}"
        )),
        web_acl_arn: Expr::get_att(naming::WAF_ACL, naming::ARN),
    };
    let mut depends_on = vec![
        naming::slotted(naming::DEPLOYMENT, slot),
        naming::WAF_ACL.to_string(),
    ];
    depends_on.sort();
    Resource::from(association).with_depends_on(depends_on)
}
