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

mod v2;
mod v4;

use chrono::TimeZone;
use querysign_aws::Credential;
use querysign_core::time::DateTime;

/// Fixed signing time shared by the signing tests.
pub fn test_time() -> DateTime {
    chrono::Utc
        .with_ymd_and_hms(2016, 11, 15, 8, 30, 0)
        .single()
        .expect("must be valid time")
}

pub fn test_credential() -> Credential {
    Credential::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
}
