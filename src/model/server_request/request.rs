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

use std::collections::HashMap;

use prost::Message;

use crate::{
    errors::{Error, Result},
    model::{metadata, payload::PayloadType},
};

/// Protobuf form of [`ServerRequest`], as expected by the pinot server.
#[derive(Clone, PartialEq, Message)]
pub struct ServerRequestPb {
    #[prost(map = "string, string", tag = "1")]
    pub metadata: HashMap<String, String>,
    #[prost(string, tag = "2")]
    pub sql: String,
    #[prost(string, repeated, tag = "3")]
    pub segments: Vec<String>,
}

/// Request to be forwarded by the proxy to a pinot server.
///
/// It can only be built by
/// [`RequestBuilder`](crate::model::server_request::RequestBuilder) or decoded
/// from the wire, and cannot be modified after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRequest {
    metadata: HashMap<String, String>,
    sql: String,
    segments: Vec<String>,
}

impl ServerRequest {
    pub(crate) fn new(metadata: HashMap<String, String>, sql: String, segments: Vec<String>) -> Self {
        Self {
            metadata,
            sql,
            segments,
        }
    }

    pub fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Segments to query, in the order they were set.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// `None` if the id is missing or was overridden by a non-numeric value.
    pub fn request_id(&self) -> Option<i64> {
        self.metadata
            .get(metadata::REQUEST_ID)
            .and_then(|id| id.parse().ok())
    }

    pub fn payload_type(&self) -> Option<PayloadType> {
        self.metadata
            .get(metadata::PAYLOAD_TYPE)
            .and_then(|t| t.parse().ok())
    }

    pub fn encode_to_vec(&self) -> Vec<u8> {
        ServerRequestPb::from(self.clone()).encode_to_vec()
    }

    /// Decode a request from protobuf bytes.
    ///
    /// Decoded requests must query at least one segment, and carry sql payload
    /// if the payload type is present.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        let req_pb = ServerRequestPb::decode(buf)?;
        Self::try_from(req_pb)
    }

    pub fn into_grpc_request(self) -> tonic::Request<ServerRequestPb> {
        tonic::Request::new(self.into())
    }
}

impl From<ServerRequest> for ServerRequestPb {
    fn from(req: ServerRequest) -> Self {
        ServerRequestPb {
            metadata: req.metadata,
            sql: req.sql,
            segments: req.segments,
        }
    }
}

impl TryFrom<ServerRequestPb> for ServerRequest {
    type Error = Error;

    fn try_from(req_pb: ServerRequestPb) -> std::result::Result<Self, Self::Error> {
        if req_pb.segments.is_empty() {
            return Err(Error::InvalidRequest(
                "segments to query is empty in server request".to_string(),
            ));
        }

        if let Some(payload_type) = req_pb.metadata.get(metadata::PAYLOAD_TYPE) {
            payload_type.parse::<PayloadType>()?;
        }

        Ok(ServerRequest::new(req_pb.metadata, req_pb.sql, req_pb.segments))
    }
}
