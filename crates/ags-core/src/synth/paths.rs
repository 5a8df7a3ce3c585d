use indexmap::IndexMap;

use crate::cfn::apigateway;
use crate::cfn::{Expr, Resource};
use crate::config::{ApiResource, HttpIngressPath};

use super::methods::build_method;
use super::naming;
use super::rest_api::AuthorizationType;

/// Resource-tree nodes and methods produced for one API slot. Shared
/// prefixes across input paths collapse into a single node; insertion
/// order is first-mention order.
#[derive(Debug, Default)]
pub struct PathTree {
    pub resources: IndexMap<String, Resource>,
    /// Logical ids of every method, one entry per method resource.
    pub method_ids: Vec<String>,
}

impl PathTree {
    /// Proxy mode: each ingress path gets a greedy `{proxy+}` tail, and an
    /// ANY method is attached at every depth so partially matched requests
    /// route the same way fully wildcarded ones do.
    pub fn from_ingress_paths(
        paths: &[HttpIngressPath],
        request_timeout_ms: i64,
        authorization: AuthorizationType,
        slot: usize,
    ) -> Self {
        let mut tree = PathTree::default();
        for ingress_path in paths {
            let mut parts: Vec<&str> = ingress_path.path.split('/').collect();
            parts.push(naming::PROXY_SEGMENT);
            for depth in 1..parts.len() {
                let prefix = naming::segment_prefix(&parts, depth);
                let resource_id = naming::resource_id(&prefix, slot);
                tree.insert_resource(&parts, depth, &resource_id, slot);
                tree.insert_method(
                    naming::method_id(&prefix, slot),
                    build_method(
                        &resource_id,
                        &naming::render_path(&parts, depth),
                        request_timeout_ms,
                        authorization,
                        "ANY",
                        None,
                        slot,
                    ),
                );
            }
        }
        tree
    }

    /// Explicit mode: one node per declared segment, methods only at the
    /// leaf and only for the declared verbs.
    pub fn from_api_resources(
        records: &[ApiResource],
        request_timeout_ms: i64,
        authorization: AuthorizationType,
        slot: usize,
    ) -> Self {
        let mut tree = PathTree::default();
        for record in records {
            let parts: Vec<&str> = record.path.split('/').collect();
            for depth in 1..parts.len() {
                let prefix = naming::segment_prefix(&parts, depth);
                let resource_id = naming::resource_id(&prefix, slot);
                tree.insert_resource(&parts, depth, &resource_id, slot);
                if depth == parts.len() - 1 {
                    for verb in &record.methods {
                        tree.insert_method(
                            naming::method_verb_id(&prefix, verb, slot),
                            build_method(
                                &resource_id,
                                &naming::render_path(&parts, depth),
                                request_timeout_ms,
                                authorization,
                                verb,
                                Some(record),
                                slot,
                            ),
                        );
                    }
                }
            }
        }
        tree
    }

    fn insert_resource(&mut self, parts: &[&str], depth: usize, resource_id: &str, slot: usize) {
        let parent_id = if depth == 1 {
            Expr::get_att(
                naming::slotted(naming::REST_API, slot),
                naming::ROOT_RESOURCE_ID,
            )
        } else {
            Expr::reference(naming::resource_id(
                &naming::segment_prefix(parts, depth - 1),
                slot,
            ))
        };
        let node = apigateway::Resource {
            parent_id,
            path_part: parts[depth].to_string(),
            rest_api_id: Expr::reference(naming::slotted(naming::REST_API, slot)),
        };
        self.resources.insert(resource_id.to_string(), node.into());
    }

    fn insert_method(&mut self, method_id: String, method: Resource) {
        if self.resources.insert(method_id.clone(), method).is_none() {
            self.method_ids.push(method_id);
        }
    }
}
