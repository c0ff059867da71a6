// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use anyhow::Result;
use pretty_assertions::assert_eq;
use querysign_aws::{
    indexed_filters, indexed_param, indexed_request_param, parse_security_group_options,
    serialize_keys, FlatParams,
};
use querysign_core::key_map::{map_from_wire_case, map_to_wire_case, MappingTable};
use querysign_core::{Mapping, Value};

#[test]
fn test_security_group_ingress_params() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let options = map_to_wire_case(
        Value::from([
            ("ip_protocol", Value::from("tcp")),
            ("from_port", Value::from(80)),
            ("to_port", Value::from(80)),
            ("cidr_ip", Value::from("0.0.0.0/0")),
        ]),
        None,
    );
    let options = parse_security_group_options(Some("web-sg".into()), options.as_mapping())?;

    let mut params = FlatParams::from([("Action", "AuthorizeSecurityGroupIngress")]);
    for (key, value) in options {
        params.merge(serialize_keys(&key, value));
    }

    assert_eq!(
        params.canonical_body(),
        "Action=AuthorizeSecurityGroupIngress\
         &CidrIp=0.0.0.0%2F0\
         &FromPort=80\
         &GroupName=web-sg\
         &IpProtocol=tcp\
         &ToPort=80"
    );
    Ok(())
}

#[test]
fn test_describe_instances_params() {
    let mut params = FlatParams::from([("Action", "DescribeInstances")]);
    params.merge(indexed_param("InstanceId", vec!["i-1", "i-2"]));
    params.merge(indexed_filters(&Mapping::from([
        ("instance-state-name", Value::from(vec!["running", "pending"])),
        ("tag:Name", Value::from("web")),
    ])));

    assert_eq!(
        params.canonical_body(),
        "Action=DescribeInstances\
         &Filter.1.Name=instance-state-name\
         &Filter.1.Value.1=running\
         &Filter.1.Value.2=pending\
         &Filter.2.Name=tag%3AName\
         &Filter.2.Value.1=web\
         &InstanceId.1=i-1\
         &InstanceId.2=i-2"
    );
}

#[test]
fn test_tags_with_mapping_table() {
    let table = MappingTable::new().rename("tags", "Tag");
    let request = map_to_wire_case(
        Value::from([(
            "tags",
            Value::from(vec![
                Mapping::from([("key", "env"), ("value", "prod")]),
                Mapping::from([("key", "team"), ("value", "a b")]),
            ]),
        )]),
        Some(&table),
    );

    let mut params = FlatParams::new();
    for (key, value) in request.as_mapping().cloned().unwrap_or_default() {
        params.merge(serialize_keys(&key, value));
    }

    assert_eq!(params.get("Tag.member.1.Key"), Some("env"));
    assert_eq!(params.get("Tag.member.2.Value"), Some("a b"));
    assert!(params
        .canonical_body()
        .ends_with("Tag.member.2.Key=team&Tag.member.2.Value=a%20b"));
}

#[test]
fn test_request_param_counts_from_zero() {
    let params = indexed_request_param("AttributeName", vec!["All"]);
    assert_eq!(params.canonical_body(), "AttributeName.0=All");
}

#[test]
fn test_response_keys_back_to_snake_case() -> Result<()> {
    let response = Value::try_from(serde_json::json!({
        "GroupId": "sg-1",
        "IpPermissions": [{"FromPort": "80", "IpRanges": [{"CidrIp": "0.0.0.0/0"}]}],
    }))?;

    let table = MappingTable::new().rename("vpc_id", "VpcId").invert();
    let response = map_from_wire_case(response, Some(&table));

    assert_eq!(
        response,
        Value::from([
            ("group_id", Value::from("sg-1")),
            (
                "ip_permissions",
                Value::from(vec![Mapping::from([
                    ("from_port", Value::from("80")),
                    (
                        "ip_ranges",
                        Value::from(vec![Mapping::from([("cidr_ip", "0.0.0.0/0")])]),
                    ),
                ])]),
            ),
        ])
    );
    Ok(())
}

#[test]
fn test_json_filters_keep_document_order() -> Result<()> {
    let filters = Value::try_from(serde_json::json!({
        "zeta": ["z1", "z2"],
        "alpha": "a1",
    }))?;
    let filters = filters.as_mapping().cloned().unwrap_or_default();

    let params = indexed_filters(&filters);

    assert_eq!(params.get("Filter.1.Name"), Some("zeta"));
    assert_eq!(params.get("Filter.1.Value.2"), Some("z2"));
    assert_eq!(params.get("Filter.2.Name"), Some("alpha"));
    assert_eq!(params.get("Filter.2.Value.1"), Some("a1"));
    Ok(())
}
