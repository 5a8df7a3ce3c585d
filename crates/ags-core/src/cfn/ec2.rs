use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityGroupIngress {
    #[serde(rename = "CidrIp")]
    pub cidr_ip: String,
    #[serde(rename = "FromPort")]
    pub from_port: u16,
    #[serde(rename = "GroupId")]
    pub group_id: String,
    #[serde(rename = "IpProtocol")]
    pub ip_protocol: String,
    #[serde(rename = "ToPort")]
    pub to_port: u16,
}
