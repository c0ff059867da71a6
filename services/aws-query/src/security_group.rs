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

use querysign_core::{Error, Mapping, Result};

const GROUP_NAME: &str = "GroupName";
const GROUP_ID: &str = "GroupId";

/// The leading argument of a security group operation.
///
/// EC2 operations accept either a group name followed by extra options, or
/// the options alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecurityGroupRef<'a> {
    /// Address the group by name.
    Name(&'a str),
    /// All identifiers are inside these options.
    Options(Mapping),
}

impl<'a> From<&'a str> for SecurityGroupRef<'a> {
    fn from(v: &'a str) -> Self {
        SecurityGroupRef::Name(v)
    }
}

impl From<Mapping> for SecurityGroupRef<'_> {
    fn from(v: Mapping) -> Self {
        SecurityGroupRef::Options(v)
    }
}

/// Normalize the two calling conventions into one options mapping.
///
/// - `Options` replaces `options` entirely.
/// - `Name` is added as `GroupName` to a copy of `options`; it fails with
///   `AmbiguousArgument` if `options` already carries a `GroupName`.
///
/// The result must name the group by `GroupName` or `GroupId`, otherwise
/// `MissingIdentifier` is returned. When both are present `GroupId` wins and
/// `GroupName` is dropped.
///
/// ```
/// use querysign_aws::parse_security_group_options;
/// use querysign_core::Mapping;
///
/// let options = parse_security_group_options(Some("web-sg".into()), None)?;
/// assert_eq!(options, Mapping::from([("GroupName", "web-sg")]));
/// # Ok::<(), querysign_core::Error>(())
/// ```
pub fn parse_security_group_options(
    group: Option<SecurityGroupRef<'_>>,
    options: Option<&Mapping>,
) -> Result<Mapping> {
    let mut options = match group {
        Some(SecurityGroupRef::Options(opts)) => opts,
        Some(SecurityGroupRef::Name(name)) => {
            if options.is_some_and(|o| o.contains_key(GROUP_NAME)) {
                return Err(Error::ambiguous_argument(
                    "Arguments specified both group_name and GroupName in options",
                ));
            }
            let mut opts = options.cloned().unwrap_or_default();
            opts.insert(GROUP_NAME, name);
            opts
        }
        None => options.cloned().unwrap_or_default(),
    };

    let name_specified = options.contains_key(GROUP_NAME);
    let group_id_specified = options.contains_key(GROUP_ID);
    if !name_specified && !group_id_specified {
        return Err(Error::missing_identifier(
            "Neither GroupName nor GroupId specified",
        ));
    }
    if name_specified && group_id_specified {
        options.remove(GROUP_NAME);
    }

    Ok(options)
}
