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

//! Options in client

use crate::model::metadata::DEFAULT_BROKER_ID;

/// Defaults applied to a freshly created
/// [`RequestBuilder`](crate::model::server_request::RequestBuilder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    /// Id of the broker issuing the requests.
    ///
    /// Default value is `unknown`.
    pub broker_id: String,
    /// Ask the server to collect the execution trace.
    ///
    /// It is disabled by default.
    pub enable_trace: bool,
    /// Ask the server to stream the results back.
    ///
    /// It is disabled by default.
    pub enable_streaming: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            broker_id: DEFAULT_BROKER_ID.to_string(),
            enable_trace: false,
            enable_streaming: false,
        }
    }
}

impl RequestOptions {
    pub fn broker_id(mut self, broker_id: impl Into<String>) -> Self {
        self.broker_id = broker_id.into();
        self
    }

    pub fn enable_trace(mut self, enable_trace: bool) -> Self {
        self.enable_trace = enable_trace;
        self
    }

    pub fn enable_streaming(mut self, enable_streaming: bool) -> Self {
        self.enable_streaming = enable_streaming;
        self
    }
}
