use crate::cfn::apigateway::{Deployment, MethodSetting, StageDescription};
use crate::cfn::{Expr, Resource};
use crate::config::ApiResource;

use super::naming;

/// Builds the deployment for one slot. It must wait for every method, so
/// the method ids become its dependency list.
pub fn build_deployment(
    stage_name: &str,
    mut method_ids: Vec<String>,
    caching_enabled: bool,
    cache_size: Option<String>,
    records: &[ApiResource],
    slot: usize,
) -> Resource {
    // Method ids arrive in tree-build order, which follows config order.
    // The emitted list is sorted so equal method sets serialize equally.
    method_ids.sort();

    let deployment = Deployment {
        rest_api_id: Expr::reference(naming::slotted(naming::REST_API, slot)),
        stage_description: StageDescription {
            cache_cluster_enabled: caching_enabled,
            cache_cluster_size: cache_size,
            cache_data_encrypted: caching_enabled,
            method_settings: build_method_settings(caching_enabled, records),
        },
        stage_name: stage_name.to_string(),
    };
    Resource::from(deployment).with_depends_on(method_ids)
}

/// Stage-level cache toggles per declared resource and verb. Without
/// explicit records there is nothing to override, so the list stays empty.
fn build_method_settings(caching_enabled: bool, records: &[ApiResource]) -> Vec<MethodSetting> {
    if !caching_enabled {
        return Vec::new();
    }
    records
        .iter()
        .flat_map(|record| {
            record.methods.iter().map(|verb| MethodSetting {
                caching_enabled: record.caching_enabled,
                http_method: verb.clone(),
                resource_path: escape_resource_path(&record.path),
            })
        })
        .collect()
}

/// Stage method settings address paths with `~1` in place of `/`.
pub(crate) fn escape_resource_path(path: &str) -> String {
    format!("/{}", path.replace('/', "~1"))
}
