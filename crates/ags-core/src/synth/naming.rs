/// Characters stripped from path segments when deriving logical ids.
/// CloudFormation accepts alphanumeric logical ids only.
pub const PATH_STRIP_CHARS: [char; 6] = ['{', '}', '+', '-', '*', '_'];

/// Greedy catch-all segment appended to every ingress path in proxy mode.
pub const PROXY_SEGMENT: &str = "{proxy+}";

// Fixed logical ids for the singleton resources.
pub const LAMBDA_INVOKE_ROLE: &str = "LambdaInvokeRole";
pub const LISTENER: &str = "Listener";
pub const LOAD_BALANCER: &str = "LoadBalancer";
pub const SECURITY_GROUP_INGRESS: &str = "SecurityGroupIngress";
pub const TARGET_GROUP: &str = "TargetGroup";
pub const VPC_LINK: &str = "VPCLink";
pub const WAF_ACL: &str = "WAFAcl";
pub const CUSTOM_DOMAIN: &str = "CustomDomain";
pub const ROUTE53_RECORD_SET: &str = "Route53RecordSet";

// Kind prefixes for per-slot and per-path resources.
pub const REST_API: &str = "RestAPI";
pub const API_RESOURCE: &str = "Resource";
pub const API_METHOD: &str = "Method";
pub const AUTHORIZER: &str = "RestAPIAuthorizer";
pub const DEPLOYMENT: &str = "Deployment";
pub const USAGE_PLAN: &str = "UsagePlan";
pub const API_KEY: &str = "APIKey";
pub const API_KEY_USAGE_PLAN: &str = "APIKeyUsagePlan";
pub const CUSTOM_DOMAIN_BASE_PATH_MAPPING: &str = "CustomDomainBasePathMapping";
pub const WAF_ASSOCIATION: &str = "WAFAssociation";

// GetAtt attribute names referenced by synthesized expressions.
pub const ROOT_RESOURCE_ID: &str = "RootResourceId";
pub const DNS_NAME: &str = "DNSName";
pub const ARN: &str = "Arn";
pub const DISTRIBUTION_DOMAIN_NAME: &str = "DistributionDomainName";
pub const DISTRIBUTION_HOSTED_ZONE_ID: &str = "DistributionHostedZoneId";
pub const REGIONAL_DOMAIN_NAME: &str = "RegionalDomainName";
pub const REGIONAL_HOSTED_ZONE_ID: &str = "RegionalHostedZoneId";

pub fn strip_path_chars(segment: &str) -> String {
    segment
        .chars()
        .filter(|c| !PATH_STRIP_CHARS.contains(c))
        .collect()
}

/// Logical-name fragment for the path prefix ending at `depth`: the
/// segments concatenated without separators, special characters stripped.
pub fn segment_prefix(parts: &[&str], depth: usize) -> String {
    strip_path_chars(&parts[..=depth].concat())
}

/// A kind prefix with the API slot index appended.
pub fn slotted(kind: &str, slot: usize) -> String {
    format!("{kind}{slot}")
}

pub fn resource_id(prefix: &str, slot: usize) -> String {
    format!("{API_RESOURCE}{prefix}{slot}")
}

pub fn method_id(prefix: &str, slot: usize) -> String {
    format!("{API_METHOD}{prefix}{slot}")
}

/// Method id carrying the verb, used when methods are declared per verb.
pub fn method_verb_id(prefix: &str, verb: &str, slot: usize) -> String {
    format!("{API_METHOD}{prefix}{verb}{slot}")
}

pub fn usage_plan_id(plan: usize, slot: usize) -> String {
    format!("{USAGE_PLAN}{plan}{slot}")
}

pub fn api_key_id(plan: usize, key: usize, slot: usize) -> String {
    format!("{API_KEY}{plan}{key}{slot}")
}

pub fn api_key_mapping_id(plan: usize, key: usize, slot: usize) -> String {
    format!("{API_KEY_USAGE_PLAN}{plan}{key}{slot}")
}

/// Runtime request path for the prefix ending at `depth`, as embedded in
/// the integration URI. A trailing proxy marker renders as the `{proxy}`
/// interpolation token.
pub fn render_path(parts: &[&str], depth: usize) -> String {
    if parts[depth] == PROXY_SEGMENT {
        format!("{}/{{proxy}}", parts[..depth].join("/"))
    } else {
        parts[..=depth].join("/")
    }
}
