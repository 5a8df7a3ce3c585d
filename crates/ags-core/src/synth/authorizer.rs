use crate::cfn::apigateway::Authorizer;
use crate::cfn::{Expr, AWS_REGION};
use crate::config::{ApiDefinition, AuthorizerType};

use super::naming;

/// Applied when the definition leaves the result TTL at zero.
pub const DEFAULT_RESULT_TTL_SECONDS: i64 = 300;

/// Builds the slot's authorizer in one of three shapes. Cognito delegates
/// to user pools; TOKEN and REQUEST invoke a Lambda through the shared
/// invoke role.
pub fn build_authorizer(definition: &ApiDefinition, slot: usize) -> Authorizer {
    let ttl = if definition.authorizer_result_ttl_seconds == 0 {
        DEFAULT_RESULT_TTL_SECONDS
    } else {
        definition.authorizer_result_ttl_seconds
    };

    match definition.authorizer_type {
        AuthorizerType::CognitoUserPools => Authorizer {
            authorizer_credentials: None,
            authorizer_result_ttl_in_seconds: ttl,
            authorizer_uri: None,
            auth_type: definition.authorizer_auth_type.clone(),
            identity_source: definition.identity_source.clone(),
            identity_validation_expression: None,
            name: definition.name.clone(),
            provider_arns: definition.provider_arns.clone(),
            rest_api_id: Expr::reference(naming::slotted(naming::REST_API, slot)),
            authorizer_type: definition.authorizer_type.as_str().to_string(),
        },
        AuthorizerType::Token | AuthorizerType::Request => Authorizer {
            authorizer_credentials: Some(Expr::get_att(naming::LAMBDA_INVOKE_ROLE, naming::ARN)),
            authorizer_result_ttl_in_seconds: ttl,
            authorizer_uri: Some(lambda_invocation_uri(
                definition.authorizer_uri.as_deref().unwrap_or_default(),
            )),
            auth_type: definition.authorizer_auth_type.clone(),
            identity_source: definition.identity_source.clone(),
            identity_validation_expression: definition.identity_validation_expression.clone(),
            name: definition.name.clone(),
            provider_arns: Vec::new(),
            rest_api_id: Expr::reference(naming::slotted(naming::REST_API, slot)),
            authorizer_type: definition.authorizer_type.as_str().to_string(),
        },
    }
}

/// The gateway invokes Lambda authorizers through the regional service
/// path, not the bare function ARN.
fn lambda_invocation_uri(function: &str) -> Expr {
    Expr::join(
        "",
        vec![
            Expr::lit("arn:aws:apigateway:"),
            Expr::reference(AWS_REGION),
            Expr::lit(":lambda:path/2015-03-31/functions/"),
            Expr::lit(function),
            Expr::lit("/invocations"),
        ],
    )
}
