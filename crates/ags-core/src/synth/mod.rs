pub mod authorizer;
pub mod deployment;
pub mod domain;
pub mod methods;
pub mod naming;
pub mod network;
pub mod outputs;
pub mod paths;
pub mod rest_api;
pub mod template;
pub mod usage_plans;
pub mod waf;

pub use domain::synthesize_dns;
pub use rest_api::AuthorizationType;
pub use template::synthesize;
