use indexmap::IndexMap;

use crate::cfn::apigateway::{Integration, Method};
use crate::cfn::{Expr, Resource};
use crate::config::ApiResource;

use super::naming;
use super::rest_api::AuthorizationType;

const PROXY_METHOD_PARAM: &str = "method.request.path.proxy";
const PROXY_INTEGRATION_PARAM: &str = "integration.request.path.proxy";
const ACCEPT_ENCODING_PARAM: &str = "integration.request.header.Accept-Encoding";

/// Builds one method resource proxying `path` through the VPC link to the
/// load balancer. `record` carries declared parameters in explicit mode;
/// proxy mode passes `None`.
pub fn build_method(
    resource_logical_id: &str,
    path: &str,
    request_timeout_ms: i64,
    authorization: AuthorizationType,
    verb: &str,
    record: Option<&ApiResource>,
    slot: usize,
) -> Resource {
    let mut request_parameters = IndexMap::new();
    request_parameters.insert(PROXY_METHOD_PARAM.to_string(), true);

    let mut integration_parameters = IndexMap::new();
    integration_parameters.insert(
        PROXY_INTEGRATION_PARAM.to_string(),
        PROXY_METHOD_PARAM.to_string(),
    );
    integration_parameters.insert(ACCEPT_ENCODING_PARAM.to_string(), "'identity'".to_string());

    if let Some(record) = record {
        for param in &record.proxy_path_params {
            map_request_param(
                "path",
                &param.param,
                &mut request_parameters,
                &mut integration_parameters,
            );
        }
        for param in &record.proxy_query_params {
            map_request_param(
                "query",
                &param.param,
                &mut request_parameters,
                &mut integration_parameters,
            );
        }
        for param in &record.proxy_header_params {
            map_request_param(
                "header",
                &param.param,
                &mut request_parameters,
                &mut integration_parameters,
            );
        }
    }

    let method = Method {
        api_key_required: authorization != AuthorizationType::AwsIam,
        authorization_type: authorization.as_str().to_string(),
        http_method: verb.to_string(),
        integration: Integration {
            connection_id: Expr::reference(naming::VPC_LINK),
            connection_type: "VPC_LINK".to_string(),
            integration_http_method: "ANY".to_string(),
            passthrough_behavior: "WHEN_NO_MATCH".to_string(),
            request_parameters: integration_parameters,
            timeout_in_millis: request_timeout_ms,
            integration_type: "HTTP_PROXY".to_string(),
            uri: Expr::join(
                "",
                vec![
                    Expr::lit("http://"),
                    Expr::get_att(naming::LOAD_BALANCER, naming::DNS_NAME),
                    Expr::lit(path),
                ],
            ),
        },
        request_parameters,
        resource_id: Expr::reference(resource_logical_id),
        rest_api_id: Expr::reference(naming::slotted(naming::REST_API, slot)),
    };
    Resource::from(method).with_depends_on(vec![naming::LOAD_BALANCER.to_string()])
}

fn map_request_param(
    location: &str,
    name: &str,
    request_parameters: &mut IndexMap<String, bool>,
    integration_parameters: &mut IndexMap<String, String>,
) {
    let method_param = format!("method.request.{location}.{name}");
    let integration_param = format!("integration.request.{location}.{name}");
    request_parameters.insert(method_param.clone(), true);
    integration_parameters.insert(integration_param, method_param);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfn::ResourceType;
    use crate::config::Param;

    fn method_of(resource: &Resource) -> &Method {
        match &resource.properties {
            ResourceType::Method(method) => method,
            other => panic!("expected a method, got {other:?}"),
        }
    }

    #[test]
    fn proxies_through_vpc_link_with_identity_encoding() {
        let resource = build_method(
            "Resourceapi0",
            "/api",
            10000,
            AuthorizationType::None,
            "ANY",
            None,
            0,
        );
        let method = method_of(&resource);

        assert_eq!(method.http_method, "ANY");
        assert_eq!(method.authorization_type, "NONE");
        assert!(method.api_key_required);
        assert_eq!(method.integration.connection_type, "VPC_LINK");
        assert_eq!(method.integration.integration_type, "HTTP_PROXY");
        assert_eq!(method.integration.integration_http_method, "ANY");
        assert_eq!(method.integration.passthrough_behavior, "WHEN_NO_MATCH");
        assert_eq!(method.integration.timeout_in_millis, 10000);
        assert_eq!(
            method.integration.uri,
            Expr::join(
                "",
                vec![
                    Expr::lit("http://"),
                    Expr::get_att("LoadBalancer", "DNSName"),
                    Expr::lit("/api"),
                ],
            )
        );
        assert_eq!(
            method.request_parameters.get("method.request.path.proxy"),
            Some(&true)
        );
        assert_eq!(
            method
                .integration
                .request_parameters
                .get("integration.request.path.proxy")
                .map(String::as_str),
            Some("method.request.path.proxy")
        );
        assert_eq!(
            method
                .integration
                .request_parameters
                .get("integration.request.header.Accept-Encoding")
                .map(String::as_str),
            Some("'identity'")
        );
        assert_eq!(resource.depends_on, vec!["LoadBalancer"]);
    }

    #[test]
    fn iam_authorization_disables_api_key_requirement() {
        let resource = build_method(
            "Resourceapi0",
            "/api",
            10000,
            AuthorizationType::AwsIam,
            "ANY",
            None,
            0,
        );
        let method = method_of(&resource);
        assert_eq!(method.authorization_type, "AWS_IAM");
        assert!(!method.api_key_required);
    }

    #[test]
    fn declared_params_map_bidirectionally_regardless_of_required() {
        let record = ApiResource {
            path: "/api/v1/foobar".to_string(),
            methods: vec!["GET".to_string()],
            caching_enabled: false,
            proxy_path_params: vec![Param {
                param: "fooid".to_string(),
                required: true,
            }],
            proxy_query_params: vec![Param {
                param: "page".to_string(),
                required: false,
            }],
            proxy_header_params: vec![Param {
                param: "x-trace".to_string(),
                required: false,
            }],
        };
        let resource = build_method(
            "Resourceapiv1foobar0",
            "/api/v1/foobar",
            29000,
            AuthorizationType::None,
            "GET",
            Some(&record),
            0,
        );
        let method = method_of(&resource);

        assert_eq!(
            method.request_parameters.get("method.request.path.fooid"),
            Some(&true)
        );
        assert_eq!(
            method.request_parameters.get("method.request.query.page"),
            Some(&true)
        );
        assert_eq!(
            method.request_parameters.get("method.request.header.x-trace"),
            Some(&true)
        );
        assert_eq!(
            method
                .integration
                .request_parameters
                .get("integration.request.query.page")
                .map(String::as_str),
            Some("method.request.query.page")
        );
        assert_eq!(
            method
                .integration
                .request_parameters
                .get("integration.request.header.x-trace")
                .map(String::as_str),
            Some("method.request.header.x-trace")
        );
    }
}
