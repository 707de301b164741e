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

use tracing::{debug, warn};

use crate::{
    errors::{Error, Result},
    model::{metadata, payload::PayloadType, route::Endpoint, server_request::ServerRequest},
    options::RequestOptions,
};

const SUPPORTED_PAYLOAD_TYPES: [PayloadType; 1] = [PayloadType::Sql];

/// Builder for [`ServerRequest`] forwarded by the pinot proxy.
///
/// The sql and the segments to query must be set before [`build`].
/// The builder can be built again after, and it keeps all the values set.
///
/// [`build`]: RequestBuilder::build
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    host_name: String,
    port: u32,
    request_id: i64,
    broker_id: String,
    enable_trace: bool,
    enable_streaming: bool,
    sql: Option<String>,
    segments: Vec<String>,
    extra_metadata: HashMap<String, String>,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::with_options(RequestOptions::default())
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(opts: RequestOptions) -> Self {
        Self {
            host_name: String::new(),
            port: 0,
            request_id: 0,
            broker_id: opts.broker_id,
            enable_trace: opts.enable_trace,
            enable_streaming: opts.enable_streaming,
            sql: None,
            segments: Vec::new(),
            extra_metadata: HashMap::new(),
        }
    }

    #[must_use]
    pub fn host_name(mut self, host_name: impl Into<String>) -> Self {
        self.host_name = host_name.into();
        self
    }

    #[must_use]
    pub fn port(mut self, port: u32) -> Self {
        self.port = port;
        self
    }

    /// Set the host and port of the forward target together.
    #[must_use]
    pub fn forward_to(self, endpoint: Endpoint) -> Self {
        self.host_name(endpoint.host).port(endpoint.port)
    }

    #[must_use]
    pub fn request_id(mut self, request_id: i64) -> Self {
        self.request_id = request_id;
        self
    }

    #[must_use]
    pub fn broker_id(mut self, broker_id: impl Into<String>) -> Self {
        self.broker_id = broker_id.into();
        self
    }

    #[must_use]
    pub fn enable_trace(mut self, enable_trace: bool) -> Self {
        self.enable_trace = enable_trace;
        self
    }

    #[must_use]
    pub fn enable_streaming(mut self, enable_streaming: bool) -> Self {
        self.enable_streaming = enable_streaming;
        self
    }

    /// Setting sql makes the payload type of the request [`PayloadType::Sql`].
    #[must_use]
    pub fn sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = Some(sql.into());
        self
    }

    /// Merge into the metadata set before, values of the same key are
    /// overwritten.
    ///
    /// Note that these entries are applied after the reserved keys in
    /// [`metadata`](crate::model::metadata), so they win on collision.
    #[must_use]
    pub fn add_extra_metadata<I, K, V>(mut self, extra_metadata: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.extra_metadata.extend(
            extra_metadata
                .into_iter()
                .map(|(k, v)| (k.into(), v.into())),
        );
        self
    }

    /// Replace the segments set before.
    #[must_use]
    pub fn segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.segments = segments.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    fn payload_type(&self) -> Option<PayloadType> {
        self.sql.as_ref().map(|_| PayloadType::Sql)
    }

    pub fn build(&self) -> Result<ServerRequest> {
        let (payload_type, sql) = match (self.payload_type(), &self.sql) {
            (Some(payload_type), Some(sql)) => (payload_type, sql),
            _ => {
                return Err(Error::InvalidRequest(
                    "query must be set before building".to_string(),
                ))
            }
        };
        if self.segments.is_empty() {
            return Err(Error::InvalidRequest(
                "segments to query must be set before building".to_string(),
            ));
        }

        if !SUPPORTED_PAYLOAD_TYPES.contains(&payload_type) {
            return Err(Error::UnsupportedPayloadType(payload_type.to_string()));
        }

        let metadata = self.build_metadata(payload_type);
        debug!(
            request_id = self.request_id,
            broker_id = %self.broker_id,
            forward_host = %self.host_name,
            forward_port = self.port,
            segment_num = self.segments.len(),
            "Build server request"
        );

        Ok(ServerRequest::new(
            metadata,
            sql.clone(),
            self.segments.clone(),
        ))
    }

    fn build_metadata(&self, payload_type: PayloadType) -> HashMap<String, String> {
        let mut metadata =
            HashMap::with_capacity(metadata::RESERVED_KEYS.len() + self.extra_metadata.len());
        metadata.insert(metadata::REQUEST_ID.to_string(), self.request_id.to_string());
        metadata.insert(metadata::BROKER_ID.to_string(), self.broker_id.clone());
        metadata.insert(
            metadata::ENABLE_TRACE.to_string(),
            self.enable_trace.to_string(),
        );
        metadata.insert(
            metadata::ENABLE_STREAMING.to_string(),
            self.enable_streaming.to_string(),
        );
        metadata.insert(
            metadata::PAYLOAD_TYPE.to_string(),
            payload_type.as_str().to_string(),
        );
        metadata.insert(metadata::FORWARD_HOST.to_string(), self.host_name.clone());
        metadata.insert(metadata::FORWARD_PORT.to_string(), self.port.to_string());

        for (key, value) in &self.extra_metadata {
            if let Some(old) = metadata.insert(key.clone(), value.clone()) {
                if old != *value {
                    warn!(key = %key, old = %old, new = %value, "Extra metadata overrides reserved key");
                }
            }
        }

        metadata
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::RequestBuilder;
    use crate::{
        errors::Error,
        model::{metadata, payload::PayloadType, route::Endpoint},
        options::RequestOptions,
    };

    fn valid_builder() -> RequestBuilder {
        RequestBuilder::new()
            .sql("SELECT 1")
            .segments(vec!["seg_0"])
    }

    #[test]
    fn test_build_server_request() {
        let req = RequestBuilder::new()
            .host_name("h1")
            .port(8089)
            .request_id(42)
            .broker_id("b1")
            .enable_trace(true)
            .sql("SELECT 1")
            .segments(vec!["seg_0", "seg_1"])
            .build()
            .expect("build server request failed");

        let expected = HashMap::from([
            (metadata::REQUEST_ID, "42"),
            (metadata::BROKER_ID, "b1"),
            (metadata::ENABLE_TRACE, "true"),
            (metadata::ENABLE_STREAMING, "false"),
            (metadata::PAYLOAD_TYPE, "SQL"),
            (metadata::FORWARD_HOST, "h1"),
            (metadata::FORWARD_PORT, "8089"),
        ]);
        assert_eq!(req.metadata().len(), expected.len());
        for (key, value) in expected {
            assert_eq!(req.metadata().get(key).unwrap(), value, "key:{key}");
        }
        assert_eq!(req.sql(), "SELECT 1");
        assert_eq!(req.segments(), ["seg_0", "seg_1"]);
        assert_eq!(req.request_id(), Some(42));
        assert_eq!(req.payload_type(), Some(PayloadType::Sql));
    }

    #[test]
    fn test_default_values() {
        let req = valid_builder().build().unwrap();

        let metadata = req.metadata();
        assert_eq!(metadata.get(metadata::REQUEST_ID).unwrap(), "0");
        assert_eq!(metadata.get(metadata::BROKER_ID).unwrap(), "unknown");
        assert_eq!(metadata.get(metadata::ENABLE_TRACE).unwrap(), "false");
        assert_eq!(metadata.get(metadata::ENABLE_STREAMING).unwrap(), "false");
        assert_eq!(metadata.get(metadata::FORWARD_HOST).unwrap(), "");
        assert_eq!(metadata.get(metadata::FORWARD_PORT).unwrap(), "0");
    }

    #[test]
    fn test_build_with_options() {
        let opts = RequestOptions::default()
            .broker_id("broker_7")
            .enable_streaming(true);
        let req = RequestBuilder::with_options(opts)
            .sql("SELECT 1")
            .segments(vec!["seg_0"])
            .enable_trace(true)
            .build()
            .unwrap();

        let metadata = req.metadata();
        assert_eq!(metadata.get(metadata::BROKER_ID).unwrap(), "broker_7");
        assert_eq!(metadata.get(metadata::ENABLE_TRACE).unwrap(), "true");
        assert_eq!(metadata.get(metadata::ENABLE_STREAMING).unwrap(), "true");
    }

    #[test]
    fn test_forward_to() {
        let endpoint: Endpoint = "pinot-server-1:8098".parse().unwrap();
        let req = valid_builder().forward_to(endpoint).build().unwrap();

        let metadata = req.metadata();
        assert_eq!(metadata.get(metadata::FORWARD_HOST).unwrap(), "pinot-server-1");
        assert_eq!(metadata.get(metadata::FORWARD_PORT).unwrap(), "8098");
    }

    #[test]
    fn test_missing_sql() {
        let build_res = RequestBuilder::new().segments(vec!["seg_0"]).build();
        assert!(matches!(build_res, Err(Error::InvalidRequest(_))));

        let build_res = RequestBuilder::new().build();
        assert!(matches!(build_res, Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn test_empty_segments() {
        let build_res = RequestBuilder::new().sql("SELECT 1").build();
        assert!(matches!(build_res, Err(Error::InvalidRequest(_))));

        let build_res = valid_builder()
            .segments(Vec::<String>::new())
            .build();
        assert!(matches!(build_res, Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn test_extra_metadata_accumulated() {
        let req = valid_builder()
            .add_extra_metadata([("k1", "v1"), ("k2", "v2")])
            .add_extra_metadata([("k2", "v2_new"), ("k3", "v3")])
            .build()
            .unwrap();

        let metadata = req.metadata();
        assert_eq!(metadata.get("k1").unwrap(), "v1");
        assert_eq!(metadata.get("k2").unwrap(), "v2_new");
        assert_eq!(metadata.get("k3").unwrap(), "v3");
        assert_eq!(metadata.len(), metadata::RESERVED_KEYS.len() + 3);
    }

    #[test]
    fn test_extra_metadata_overrides_reserved() {
        let req = valid_builder()
            .broker_id("b1")
            .request_id(1)
            .add_extra_metadata(HashMap::from([(
                metadata::BROKER_ID.to_string(),
                "b2".to_string(),
            )]))
            .build()
            .unwrap();

        let metadata = req.metadata();
        assert_eq!(metadata.get(metadata::BROKER_ID).unwrap(), "b2");
        assert_eq!(metadata.get(metadata::REQUEST_ID).unwrap(), "1");
        assert_eq!(metadata.len(), metadata::RESERVED_KEYS.len());
    }

    #[test]
    fn test_segments_replaced() {
        let req = valid_builder()
            .segments(vec!["seg_0", "seg_1"])
            .segments(vec!["seg_3", "seg_2"])
            .build()
            .unwrap();

        assert_eq!(req.segments(), ["seg_3", "seg_2"]);
    }

    #[test]
    fn test_build_again() {
        let builder = valid_builder().request_id(3);
        let first = builder.build().unwrap();
        let second = builder.build().unwrap();
        assert_eq!(first, second);

        let third = builder.request_id(4).build().unwrap();
        assert_eq!(third.request_id(), Some(4));
        assert_eq!(third.sql(), first.sql());
    }
}
