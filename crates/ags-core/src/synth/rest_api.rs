use crate::cfn::apigateway::{EndpointConfiguration, RestApi};
use crate::cfn::iam::{PolicyDocument, Principal, Statement};
use crate::cfn::Expr;
use crate::config::EndpointType;

const EXECUTE_API_INVOKE: &str = "execute-api:Invoke";

/// Gateway-level authorization mode, derived once from the configured
/// client ARNs and applied to every method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationType {
    AwsIam,
    None,
}

impl AuthorizationType {
    pub fn derive(arns: &[String]) -> Self {
        if arns.is_empty() {
            AuthorizationType::None
        } else {
            AuthorizationType::AwsIam
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AuthorizationType::AwsIam => "AWS_IAM",
            AuthorizationType::None => "NONE",
        }
    }
}

/// Builds one REST API with its invoke policy. IAM mode restricts invoke
/// to the configured ARNs; otherwise any principal may invoke.
pub fn build_rest_api(
    arns: &[String],
    endpoint_type: EndpointType,
    authorization: AuthorizationType,
    minimum_compression_size: i64,
    name: Expr,
) -> RestApi {
    let principal = match authorization {
        AuthorizationType::AwsIam => Principal::Aws(arns.to_vec()),
        AuthorizationType::None => Principal::Any,
    };
    RestApi {
        api_key_source_type: "HEADER".to_string(),
        endpoint_configuration: EndpointConfiguration {
            types: vec![endpoint_type.as_str().to_string()],
        },
        minimum_compression_size: (minimum_compression_size > 0).then_some(minimum_compression_size),
        name,
        policy: PolicyDocument::new(vec![Statement {
            action: vec![EXECUTE_API_INVOKE.to_string()],
            effect: "Allow".to_string(),
            principal,
            resource: vec!["*".to_string()],
        }]),
    }
}
