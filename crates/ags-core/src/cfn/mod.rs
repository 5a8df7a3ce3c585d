pub mod apigateway;
pub mod ec2;
pub mod elbv2;
pub mod iam;
pub mod route53;
pub mod wafv2;

use indexmap::IndexMap;
use serde::Serialize;

/// Pseudo parameter resolving to the stack name at deploy time.
pub const AWS_STACK_NAME: &str = "AWS::StackName";

/// Pseudo parameter resolving to the deployment region.
pub const AWS_REGION: &str = "AWS::Region";

/// Template format version accepted by CloudFormation.
pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

/// Tag key marking resources as owned by an apigw-synth stack.
pub const STACK_TAG_KEY: &str = "com.github.apigw-synth/stack";

/// A CloudFormation string expression: either a literal or one of the
/// intrinsic functions the synthesizer emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Expr {
    Lit(String),
    Ref {
        #[serde(rename = "Ref")]
        logical_id: String,
    },
    GetAtt {
        #[serde(rename = "Fn::GetAtt")]
        target: [String; 2],
    },
    Join {
        #[serde(rename = "Fn::Join")]
        args: (String, Vec<Expr>),
    },
    Sub {
        #[serde(rename = "Fn::Sub")]
        template: String,
    },
}

impl Expr {
    pub fn lit(value: impl Into<String>) -> Self {
        Expr::Lit(value.into())
    }

    /// `{"Ref": "<logical id>"}`
    pub fn reference(logical_id: impl Into<String>) -> Self {
        Expr::Ref {
            logical_id: logical_id.into(),
        }
    }

    /// `{"Fn::GetAtt": ["<logical id>", "<attribute>"]}`
    pub fn get_att(logical_id: impl Into<String>, attribute: impl Into<String>) -> Self {
        Expr::GetAtt {
            target: [logical_id.into(), attribute.into()],
        }
    }

    /// `{"Fn::Join": ["<separator>", [...]]}`
    pub fn join(separator: impl Into<String>, parts: Vec<Expr>) -> Self {
        Expr::Join {
            args: (separator.into(), parts),
        }
    }

    /// `{"Fn::Sub": "<template>"}`
    pub fn sub(template: impl Into<String>) -> Self {
        Expr::Sub {
            template: template.into(),
        }
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::Lit(value.to_string())
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Expr::Lit(value)
    }
}

/// A key/value resource tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Value")]
    pub value: Expr,
}

/// An exported template value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Output {
    #[serde(rename = "Value")]
    pub value: Expr,
}

impl Output {
    pub fn new(value: impl Into<Expr>) -> Self {
        Output {
            value: value.into(),
        }
    }
}

/// A resource entry: typed properties plus an optional explicit ordering
/// dependency list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    #[serde(flatten)]
    pub properties: ResourceType,
    #[serde(rename = "DependsOn", skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

impl Resource {
    pub fn with_depends_on(mut self, depends_on: Vec<String>) -> Self {
        self.depends_on = depends_on;
        self
    }
}

/// The resource types the synthesizer emits, tagged with their
/// CloudFormation type names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type", content = "Properties")]
pub enum ResourceType {
    #[serde(rename = "AWS::ApiGateway::RestApi")]
    RestApi(apigateway::RestApi),
    #[serde(rename = "AWS::ApiGateway::Resource")]
    Resource(apigateway::Resource),
    #[serde(rename = "AWS::ApiGateway::Method")]
    Method(apigateway::Method),
    #[serde(rename = "AWS::ApiGateway::Deployment")]
    Deployment(apigateway::Deployment),
    #[serde(rename = "AWS::ApiGateway::Authorizer")]
    Authorizer(apigateway::Authorizer),
    #[serde(rename = "AWS::ApiGateway::UsagePlan")]
    UsagePlan(apigateway::UsagePlan),
    #[serde(rename = "AWS::ApiGateway::ApiKey")]
    ApiKey(apigateway::ApiKey),
    #[serde(rename = "AWS::ApiGateway::UsagePlanKey")]
    UsagePlanKey(apigateway::UsagePlanKey),
    #[serde(rename = "AWS::ApiGateway::DomainName")]
    DomainName(apigateway::DomainName),
    #[serde(rename = "AWS::ApiGateway::BasePathMapping")]
    BasePathMapping(apigateway::BasePathMapping),
    #[serde(rename = "AWS::ApiGateway::VpcLink")]
    VpcLink(apigateway::VpcLink),
    #[serde(rename = "AWS::EC2::SecurityGroupIngress")]
    SecurityGroupIngress(ec2::SecurityGroupIngress),
    #[serde(rename = "AWS::ElasticLoadBalancingV2::LoadBalancer")]
    LoadBalancer(elbv2::LoadBalancer),
    #[serde(rename = "AWS::ElasticLoadBalancingV2::TargetGroup")]
    TargetGroup(elbv2::TargetGroup),
    #[serde(rename = "AWS::ElasticLoadBalancingV2::Listener")]
    Listener(elbv2::Listener),
    #[serde(rename = "AWS::IAM::Role")]
    Role(iam::Role),
    #[serde(rename = "AWS::Route53::RecordSet")]
    RecordSet(route53::RecordSet),
    #[serde(rename = "AWS::WAFv2::WebACL")]
    WebAcl(wafv2::WebAcl),
    #[serde(rename = "AWS::WAFv2::WebACLAssociation")]
    WebAclAssociation(wafv2::WebAclAssociation),
}

macro_rules! impl_from_properties {
    ($($variant:ident => $properties:ty),+ $(,)?) => {
        $(impl From<$properties> for Resource {
            fn from(properties: $properties) -> Self {
                Resource {
                    properties: ResourceType::$variant(properties),
                    depends_on: Vec::new(),
                }
            }
        })+
    };
}

impl_from_properties! {
    RestApi => apigateway::RestApi,
    Resource => apigateway::Resource,
    Method => apigateway::Method,
    Deployment => apigateway::Deployment,
    Authorizer => apigateway::Authorizer,
    UsagePlan => apigateway::UsagePlan,
    ApiKey => apigateway::ApiKey,
    UsagePlanKey => apigateway::UsagePlanKey,
    DomainName => apigateway::DomainName,
    BasePathMapping => apigateway::BasePathMapping,
    VpcLink => apigateway::VpcLink,
    SecurityGroupIngress => ec2::SecurityGroupIngress,
    LoadBalancer => elbv2::LoadBalancer,
    TargetGroup => elbv2::TargetGroup,
    Listener => elbv2::Listener,
    Role => iam::Role,
    RecordSet => route53::RecordSet,
    WebAcl => wafv2::WebAcl,
    WebAclAssociation => wafv2::WebAclAssociation,
}

/// A complete template: an ordered resource map plus an ordered output map.
/// Insertion order is serialization order, so identical synthesis runs
/// serialize byte-identically.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,
    #[serde(rename = "Resources")]
    pub resources: IndexMap<String, Resource>,
    #[serde(rename = "Outputs", skip_serializing_if = "IndexMap::is_empty")]
    pub outputs: IndexMap<String, Output>,
}

impl Template {
    pub fn new() -> Self {
        Template {
            format_version: TEMPLATE_FORMAT_VERSION.to_string(),
            resources: IndexMap::new(),
            outputs: IndexMap::new(),
        }
    }
}

impl Default for Template {
    fn default() -> Self {
        Template::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lit_serializes_to_bare_string() {
        let json = serde_json::to_string(&Expr::lit("identity")).unwrap();
        assert_eq!(json, r#""identity""#);
    }

    #[test]
    fn reference_serializes_to_ref_object() {
        insta::assert_json_snapshot!(Expr::reference("RestAPI0"), @r#"
        {
          "Ref": "RestAPI0"
        }
        "#);
    }

    #[test]
    fn get_att_serializes_to_two_element_array() {
        insta::assert_json_snapshot!(Expr::get_att("LoadBalancer", "DNSName"), @r#"
        {
          "Fn::GetAtt": [
            "LoadBalancer",
            "DNSName"
          ]
        }
        "#);
    }

    #[test]
    fn join_serializes_separator_then_parts() {
        let uri = Expr::join(
            "",
            vec![
                Expr::lit("http://"),
                Expr::get_att("LoadBalancer", "DNSName"),
                Expr::lit("/api"),
            ],
        );
        insta::assert_json_snapshot!(uri, @r#"
        {
          "Fn::Join": [
            "",
            [
              "http://",
              {
                "Fn::GetAtt": [
                  "LoadBalancer",
                  "DNSName"
                ]
              },
              "/api"
            ]
          ]
        }
        "#);
    }

    #[test]
    fn resource_serializes_type_properties_and_depends_on() {
        let resource = Resource::from(ec2::SecurityGroupIngress {
            cidr_ip: "10.0.0.0/24".to_string(),
            from_port: 30123,
            group_id: "sg-foo".to_string(),
            ip_protocol: "TCP".to_string(),
            to_port: 30123,
        })
        .with_depends_on(vec!["LoadBalancer".to_string()]);

        insta::assert_json_snapshot!(resource, @r#"
        {
          "Type": "AWS::EC2::SecurityGroupIngress",
          "Properties": {
            "CidrIp": "10.0.0.0/24",
            "FromPort": 30123,
            "GroupId": "sg-foo",
            "IpProtocol": "TCP",
            "ToPort": 30123
          },
          "DependsOn": [
            "LoadBalancer"
          ]
        }
        "#);
    }

    #[test]
    fn template_serializes_resources_in_insertion_order() {
        let mut template = Template::new();
        template.resources.insert(
            "Ingress1".to_string(),
            Resource::from(ec2::SecurityGroupIngress {
                cidr_ip: "10.0.0.0/24".to_string(),
                from_port: 1,
                group_id: "sg-a".to_string(),
                ip_protocol: "TCP".to_string(),
                to_port: 1,
            }),
        );
        template.resources.insert(
            "Ingress0".to_string(),
            Resource::from(ec2::SecurityGroupIngress {
                cidr_ip: "10.0.0.0/24".to_string(),
                from_port: 2,
                group_id: "sg-b".to_string(),
                ip_protocol: "TCP".to_string(),
                to_port: 2,
            }),
        );

        let json = serde_json::to_string(&template).unwrap();
        let ingress1 = json.find("Ingress1").unwrap();
        let ingress0 = json.find("Ingress0").unwrap();
        assert!(ingress1 < ingress0, "insertion order must be preserved");
        assert!(json.starts_with(r#"{"AWSTemplateFormatVersion":"2010-09-09""#));
    }
}
