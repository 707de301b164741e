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

use std::{fmt::Display, str::FromStr};

use crate::errors::Error;

/// Address of the server a proxy should forward the request to.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct Endpoint {
    pub host: String,
    pub port: u32,
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}:{}", self.host, self.port))
    }
}

impl Endpoint {
    pub fn new(host: String, port: u32) -> Self {
        Self { host, port }
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (host, raw_port) = s.rsplit_once(':').ok_or_else(|| {
            Error::InvalidEndpoint(format!("can't find ':' in the source string:{s}"))
        })?;

        if host.is_empty() {
            return Err(Error::InvalidEndpoint(format!(
                "empty host in the source string:{s}"
            )));
        }

        let port: u32 = raw_port.parse().map_err(|e| {
            Error::InvalidEndpoint(format!("fail to parse port:{raw_port}, err:{e}"))
        })?;
        if port > u16::MAX as u32 {
            return Err(Error::InvalidEndpoint(format!(
                "too large port:{port} (<=65535)"
            )));
        }

        Ok(Endpoint {
            host: host.to_string(),
            port,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_endpoint() {
        let normal_cases = vec![
            ("127.0.0.1:80", "127.0.0.1", 80),
            ("pinot-server-0.pinot:8098", "pinot-server-0.pinot", 8098),
            ("[::1]:8090", "[::1]", 8090),
        ];

        for (raw_endpoint, host, port) in normal_cases {
            let endpoint: Endpoint = raw_endpoint.parse().unwrap();
            assert_eq!(host, endpoint.host);
            assert_eq!(port, endpoint.port);
            assert_eq!(raw_endpoint, endpoint.to_string());
        }

        let abnormal_cases = vec!["127.0.0.1", ":1080", "", "host:", "host:abc", "0:99999999"];
        for raw_endpoint in abnormal_cases {
            let parse_res = raw_endpoint.parse::<Endpoint>();
            assert!(matches!(parse_res, Err(Error::InvalidEndpoint(_))));
        }
    }
}
