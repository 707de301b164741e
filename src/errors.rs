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

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Required parts of the request are missing.
    ///
    /// It is a bug of the caller, and building the same builder again will
    /// fail in the same way.
    #[error("invalid request, msg:{0}")]
    InvalidRequest(String),

    /// Only sql payload can be sent to the proxy.
    #[error("only [SQL] payload type is allowed, got:{0}")]
    UnsupportedPayloadType(String),

    /// Failed to parse the `host:port` of the forward target.
    #[error("invalid endpoint, msg:{0}")]
    InvalidEndpoint(String),

    /// The bytes received are not a valid encoded server request.
    #[error("failed to decode server request, err:{0}")]
    Decode(#[from] prost::DecodeError),
}

pub type Result<T> = std::result::Result<T, Error>;
