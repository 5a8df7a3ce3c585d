use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::Expr;

pub const POLICY_VERSION: &str = "2012-10-17";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Role {
    #[serde(rename = "AssumeRolePolicyDocument")]
    pub assume_role_policy_document: PolicyDocument,
    #[serde(rename = "Description")]
    pub description: Expr,
    #[serde(rename = "ManagedPolicyArns")]
    pub managed_policy_arns: Vec<String>,
    #[serde(rename = "Path")]
    pub path: String,
    #[serde(rename = "RoleName")]
    pub role_name: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyDocument {
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "Statement")]
    pub statement: Vec<Statement>,
}

impl PolicyDocument {
    pub fn new(statement: Vec<Statement>) -> Self {
        PolicyDocument {
            version: POLICY_VERSION.to_string(),
            statement,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    #[serde(rename = "Action")]
    pub action: Vec<String>,
    #[serde(rename = "Effect")]
    pub effect: String,
    #[serde(rename = "Principal")]
    pub principal: Principal,
    #[serde(rename = "Resource", skip_serializing_if = "Vec::is_empty")]
    pub resource: Vec<String>,
}

/// Policy principal: the wildcard form serializes as a bare `"*"`, the
/// scoped forms as single-key objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Any,
    Aws(Vec<String>),
    Service(Vec<String>),
}

impl Serialize for Principal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Principal::Any => serializer.serialize_str("*"),
            Principal::Aws(arns) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("AWS", arns)?;
                map.end()
            }
            Principal::Service(services) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Service", services)?;
                map.end()
            }
        }
    }
}
