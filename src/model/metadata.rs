// Copyright 2023 The HoraeDB Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Reserved keys in the metadata of a server request.

pub const REQUEST_ID: &str = "REQUEST_ID";
pub const BROKER_ID: &str = "BROKER_ID";
pub const ENABLE_TRACE: &str = "ENABLE_TRACE";
pub const ENABLE_STREAMING: &str = "ENABLE_STREAMING";
pub const PAYLOAD_TYPE: &str = "PAYLOAD_TYPE";
/// Host the proxy should forward the request to.
pub const FORWARD_HOST: &str = "FORWARD_HOST";
/// Port the proxy should forward the request to.
pub const FORWARD_PORT: &str = "FORWARD_PORT";

/// All the keys computed by the builder itself.
pub const RESERVED_KEYS: [&str; 7] = [
    REQUEST_ID,
    BROKER_ID,
    ENABLE_TRACE,
    ENABLE_STREAMING,
    PAYLOAD_TYPE,
    FORWARD_HOST,
    FORWARD_PORT,
];

pub(crate) const DEFAULT_BROKER_ID: &str = "unknown";

#[inline]
pub fn is_reserved_metadata_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}
