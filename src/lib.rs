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

//! Client side model of the pinot proxy grpc protocol.
//!
//! A broker builds one [`ServerRequest`] per scatter-gather query with the
//! [`RequestBuilder`], and hands it to the transport.

pub mod errors;
pub mod model;
pub mod options;

pub use crate::{
    errors::{Error, Result},
    model::{
        metadata::is_reserved_metadata_key,
        server_request::{RequestBuilder, ServerRequest, ServerRequestPb},
        Endpoint, PayloadType,
    },
    options::RequestOptions,
};
