use crate::cfn::apigateway::VpcLink;
use crate::cfn::ec2::SecurityGroupIngress;
use crate::cfn::elbv2::{Listener, ListenerAction, LoadBalancer, TargetDescription, TargetGroup};
use crate::cfn::iam::{PolicyDocument, Principal, Role, Statement};
use crate::cfn::{Expr, Resource, Tag, AWS_STACK_NAME, STACK_TAG_KEY};
use crate::config::Network;

use super::naming;

fn stack_tag() -> Tag {
    Tag {
        key: STACK_TAG_KEY.to_string(),
        value: Expr::reference(AWS_STACK_NAME),
    }
}

/// Internal network load balancer fronting the node port across the
/// configured subnets.
pub fn build_load_balancer(subnet_ids: &[String]) -> LoadBalancer {
    LoadBalancer {
        ip_address_type: "ipv4".to_string(),
        scheme: "internal".to_string(),
        subnets: subnet_ids.to_vec(),
        tags: vec![stack_tag()],
        load_balancer_type: "network".to_string(),
    }
}

pub fn build_target_group(vpc_id: &str, instance_ids: &[String], node_port: u16) -> TargetGroup {
    TargetGroup {
        health_check_interval_seconds: 30,
        health_check_port: "traffic-port".to_string(),
        health_check_protocol: "TCP".to_string(),
        health_check_timeout_seconds: 10,
        healthy_threshold_count: 3,
        port: node_port,
        protocol: "TCP".to_string(),
        tags: vec![stack_tag()],
        target_type: "instance".to_string(),
        targets: instance_ids
            .iter()
            .map(|id| TargetDescription { id: id.clone() })
            .collect(),
        unhealthy_threshold_count: 3,
        vpc_id: vpc_id.to_string(),
    }
}

pub fn build_listener() -> Listener {
    Listener {
        default_actions: vec![ListenerAction {
            target_group_arn: Expr::reference(naming::TARGET_GROUP),
            action_type: "forward".to_string(),
        }],
        load_balancer_arn: Expr::reference(naming::LOAD_BALANCER),
        port: 80,
        protocol: "TCP".to_string(),
    }
}

/// One ingress rule per backing security group, opening the node port to
/// the VPC CIDR so the balancer can reach the instances.
pub fn build_security_group_ingresses(network: &Network, node_port: u16) -> Vec<SecurityGroupIngress> {
    network
        .security_group_ids
        .iter()
        .map(|group_id| SecurityGroupIngress {
            cidr_ip: network.cidr_block.clone(),
            from_port: node_port,
            group_id: group_id.clone(),
            ip_protocol: "TCP".to_string(),
            to_port: node_port,
        })
        .collect()
}

pub fn build_vpc_link() -> Resource {
    let link = VpcLink {
        name: Expr::reference(AWS_STACK_NAME),
        target_arns: vec![Expr::reference(naming::LOAD_BALANCER)],
    };
    Resource::from(link).with_depends_on(vec![naming::LOAD_BALANCER.to_string()])
}

/// Shared role assumed by the gateway to invoke Lambda authorizers.
pub fn build_lambda_invoke_role() -> Role {
    Role {
        assume_role_policy_document: PolicyDocument::new(vec![Statement {
            action: vec!["sts:AssumeRole".to_string()],
            effect: "Allow".to_string(),
            principal: Principal::Service(vec![
                "apigateway.amazonaws.com".to_string(),
                "lambda.amazonaws.com".to_string(),
            ]),
            resource: Vec::new(),
        }]),
        description: Expr::sub(format!("Lambda invoke role for stack ${{{AWS_STACK_NAME}}}")),
        managed_policy_arns: vec!["arn:aws:iam::aws:policy/service-role/AWSLambdaRole".to_string()],
        path: "/".to_string(),
        role_name: Expr::sub(format!("${{{AWS_STACK_NAME}}}-LambdaInvokeRole")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network() -> Network {
        Network {
            vpc_id: "vpc-1".to_string(),
            cidr_block: "10.0.0.0/24".to_string(),
            subnet_ids: vec!["subnet-a".to_string(), "subnet-b".to_string()],
            security_group_ids: vec!["sg-1".to_string(), "sg-2".to_string()],
            instance_ids: vec!["i-aaa".to_string(), "i-bbb".to_string()],
        }
    }

    #[test]
    fn load_balancer_is_internal_network_type() {
        let balancer = build_load_balancer(&network().subnet_ids);
        assert_eq!(balancer.scheme, "internal");
        assert_eq!(balancer.load_balancer_type, "network");
        assert_eq!(balancer.ip_address_type, "ipv4");
        assert_eq!(balancer.subnets, vec!["subnet-a", "subnet-b"]);
        assert_eq!(balancer.tags[0].key, STACK_TAG_KEY);
        assert_eq!(balancer.tags[0].value, Expr::reference("AWS::StackName"));
    }

    #[test]
    fn target_group_checks_traffic_port_over_tcp() {
        let network = network();
        let group = build_target_group(&network.vpc_id, &network.instance_ids, 30123);
        assert_eq!(group.port, 30123);
        assert_eq!(group.protocol, "TCP");
        assert_eq!(group.health_check_port, "traffic-port");
        assert_eq!(group.health_check_interval_seconds, 30);
        assert_eq!(group.health_check_timeout_seconds, 10);
        assert_eq!(group.healthy_threshold_count, 3);
        assert_eq!(group.unhealthy_threshold_count, 3);
        assert_eq!(group.target_type, "instance");
        assert_eq!(
            group.targets,
            vec![
                TargetDescription { id: "i-aaa".to_string() },
                TargetDescription { id: "i-bbb".to_string() },
            ]
        );
        assert_eq!(group.vpc_id, "vpc-1");
    }

    #[test]
    fn listener_forwards_port_80_to_target_group() {
        let listener = build_listener();
        assert_eq!(listener.port, 80);
        assert_eq!(listener.protocol, "TCP");
        assert_eq!(listener.load_balancer_arn, Expr::reference("LoadBalancer"));
        assert_eq!(listener.default_actions[0].action_type, "forward");
        assert_eq!(
            listener.default_actions[0].target_group_arn,
            Expr::reference("TargetGroup")
        );
    }

    #[test]
    fn one_ingress_rule_per_security_group() {
        let ingresses = build_security_group_ingresses(&network(), 30123);
        assert_eq!(ingresses.len(), 2);
        assert_eq!(ingresses[0].group_id, "sg-1");
        assert_eq!(ingresses[1].group_id, "sg-2");
        for ingress in &ingresses {
            assert_eq!(ingress.cidr_ip, "10.0.0.0/24");
            assert_eq!(ingress.from_port, 30123);
            assert_eq!(ingress.to_port, 30123);
            assert_eq!(ingress.ip_protocol, "TCP");
        }
    }

    #[test]
    fn vpc_link_targets_and_waits_for_balancer() {
        let link = build_vpc_link();
        assert_eq!(link.depends_on, vec!["LoadBalancer"]);
        match &link.properties {
            crate::cfn::ResourceType::VpcLink(link) => {
                assert_eq!(link.name, Expr::reference("AWS::StackName"));
                assert_eq!(link.target_arns, vec![Expr::reference("LoadBalancer")]);
            }
            other => panic!("expected a VPC link, got {other:?}"),
        }
    }

    #[test]
    fn invoke_role_assumable_by_gateway_and_lambda() {
        let role = build_lambda_invoke_role();
        assert_eq!(role.path, "/");
        assert_eq!(
            role.managed_policy_arns,
            vec!["arn:aws:iam::aws:policy/service-role/AWSLambdaRole"]
        );
        let statement = &role.assume_role_policy_document.statement[0];
        assert_eq!(statement.action, vec!["sts:AssumeRole"]);
        assert_eq!(
            statement.principal,
            Principal::Service(vec![
                "apigateway.amazonaws.com".to_string(),
                "lambda.amazonaws.com".to_string(),
            ])
        );
        assert!(statement.resource.is_empty());
        assert_eq!(
            role.role_name,
            Expr::sub("${AWS::StackName}-LambdaInvokeRole")
        );
    }
}
