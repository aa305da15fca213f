//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::path::PathBuf;
use std::time::Duration;

use tonic::metadata::{Ascii, MetadataValue};
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint};
use tracing::{debug, debug_span, trace};

use crate::error::Error;
use crate::proto;
use crate::proto::Encoding;
use crate::proto::g_nmi_client::GNmiClient;

pub trait Client: std::fmt::Debug {
    // Retrieve the data tree rooted at the given path. Every update of every
    // returned notification becomes one entry.
    fn get(
        &mut self,
        path: &str,
        encoding: Encoding,
    ) -> Result<Vec<GetEntry>, Error>;

    // Apply the given updates in a single Set transaction, returning the
    // target's confirmation.
    fn set(&mut self, updates: &[SetUpdate]) -> Result<String, Error>;

    // Tear down the connection.
    fn close(self)
    where
        Self: Sized,
    {
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub address: String,
    pub username: String,
    pub password: String,
    pub tls: Tls,
    pub connect_timeout: Duration,
    pub timeout: Option<Duration>,
}

#[derive(Clone, Debug, Default)]
pub struct Tls {
    pub enabled: bool,
    pub ca_certificate: Option<PathBuf>,
    pub domain_name: Option<String>,
}

// Data entry returned by a Get request.
#[derive(Clone, Debug, PartialEq)]
pub struct GetEntry {
    pub path: proto::Path,
    pub payload: Vec<u8>,
}

// Leaf update sent in a Set request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SetUpdate {
    pub path: String,
    pub value: String,
    pub encoding: Encoding,
}

// The order of the fields in this struct is important. The gRPC client must
// be dropped before the runtime it was created on.
#[derive(Debug)]
pub struct GnmiClient {
    client: GNmiClient<Channel>,
    username: MetadataValue<Ascii>,
    password: MetadataValue<Ascii>,
    runtime: tokio::runtime::Runtime,
}

// ===== impl ClientConfig =====

impl ClientConfig {
    pub const DFLT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(address: &str, username: &str, password: &str) -> ClientConfig {
        ClientConfig {
            address: address.to_owned(),
            username: username.to_owned(),
            password: password.to_owned(),
            tls: Default::default(),
            connect_timeout: Self::DFLT_CONNECT_TIMEOUT,
            timeout: None,
        }
    }

    // Returns the target URI, adding a scheme when the address doesn't
    // carry one.
    pub fn uri(&self) -> String {
        if self.address.contains("://") {
            return self.address.clone();
        }
        let scheme = if self.tls.enabled { "https" } else { "http" };
        format!("{}://{}", scheme, self.address)
    }

    fn endpoint(&self) -> Result<Endpoint, Error> {
        let mut endpoint = Endpoint::from_shared(self.uri())
            .map_err(|error| {
                Error::InvalidAddress(self.address.clone(), error)
            })?
            .connect_timeout(self.connect_timeout);
        if let Some(timeout) = self.timeout {
            endpoint = endpoint.timeout(timeout);
        }

        if self.tls.enabled {
            let mut tls_config = ClientTlsConfig::new();
            tls_config = match &self.tls.ca_certificate {
                Some(path) => {
                    let pem = std::fs::read(path).map_err(|error| {
                        Error::TlsCertificate(path.clone(), error)
                    })?;
                    tls_config.ca_certificate(Certificate::from_pem(pem))
                }
                None => tls_config.with_native_roots(),
            };
            if let Some(domain_name) = &self.tls.domain_name {
                tls_config = tls_config.domain_name(domain_name.clone());
            }
            endpoint = endpoint.tls_config(tls_config).map_err(Error::Connect)?;
        }

        Ok(endpoint)
    }
}

// ===== impl GnmiClient =====

impl GnmiClient {
    pub fn connect(config: &ClientConfig) -> Result<GnmiClient, Error> {
        // Validate credentials before touching the network.
        let username = config
            .username
            .parse::<MetadataValue<Ascii>>()
            .map_err(|_| Error::InvalidCredentials)?;
        let password = config
            .password
            .parse::<MetadataValue<Ascii>>()
            .map_err(|_| Error::InvalidCredentials)?;
        let endpoint = config.endpoint()?;

        // Initialize tokio runtime.
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(Error::Runtime)?;

        // Connect to the target.
        debug!(
            address = %config.uri(),
            tls = config.tls.enabled,
            "connecting to gNMI target"
        );
        let channel =
            runtime.block_on(endpoint.connect()).map_err(Error::Connect)?;
        let client = GNmiClient::new(channel);

        Ok(GnmiClient {
            client,
            username,
            password,
            runtime,
        })
    }

    // Wraps a message in a request carrying the authentication metadata.
    fn request<T>(&self, message: T) -> tonic::Request<T> {
        let mut request = tonic::Request::new(message);
        let metadata = request.metadata_mut();
        metadata.insert("username", self.username.clone());
        metadata.insert("password", self.password.clone());
        request
    }

    fn rpc_sync_get(
        &mut self,
        request: proto::GetRequest,
    ) -> Result<tonic::Response<proto::GetResponse>, tonic::Status> {
        let request = self.request(request);
        self.runtime.block_on(self.client.get(request))
    }

    fn rpc_sync_set(
        &mut self,
        request: proto::SetRequest,
    ) -> Result<tonic::Response<proto::SetResponse>, tonic::Status> {
        let request = self.request(request);
        self.runtime.block_on(self.client.set(request))
    }
}

impl Client for GnmiClient {
    fn get(
        &mut self,
        path: &str,
        encoding: Encoding,
    ) -> Result<Vec<GetEntry>, Error> {
        let gnmi_path = path
            .parse::<proto::Path>()
            .map_err(|error| Error::InvalidPath(path.to_owned(), error))?;
        let request = proto::GetRequest {
            prefix: None,
            path: vec![gnmi_path],
            r#type: proto::get_request::DataType::All as i32,
            encoding: encoding as i32,
            use_models: vec![],
        };
        debug_span!("gnmi").in_scope(|| {
            debug!(
                %path,
                encoding = encoding.as_str_name(),
                "sending Get() request"
            );
            trace!("{:?}", request);
        });

        let response = self.rpc_sync_get(request).map_err(Error::Rpc)?;
        let response = response.into_inner();
        debug_span!("gnmi").in_scope(|| {
            debug!(
                notifications = response.notification.len(),
                "received Get() response"
            );
            trace!("{:?}", response);
        });

        response.into_entries()
    }

    fn set(&mut self, updates: &[SetUpdate]) -> Result<String, Error> {
        let update = updates
            .iter()
            .map(SetUpdate::to_proto)
            .collect::<Result<Vec<_>, _>>()?;
        let request = proto::SetRequest {
            prefix: None,
            delete: vec![],
            replace: vec![],
            update,
        };
        debug_span!("gnmi").in_scope(|| {
            debug!(updates = updates.len(), "sending Set() request");
            trace!("{:?}", request);
        });

        let response = self.rpc_sync_set(request).map_err(Error::Rpc)?;
        let response = response.into_inner();
        debug_span!("gnmi").in_scope(|| {
            debug!(timestamp = response.timestamp, "received Set() response");
            trace!("{:?}", response);
        });

        Ok(response.to_string())
    }

    fn close(self) {
        debug!("closing gNMI connection");
    }
}

// ===== impl GetResponse =====

impl proto::GetResponse {
    // Flattens all notifications into data entries, resolving each update
    // path against its notification prefix.
    pub fn into_entries(self) -> Result<Vec<GetEntry>, Error> {
        let mut entries = vec![];
        for notification in self.notification {
            let prefix = notification.prefix;
            for update in notification.update {
                let path = proto::Path::join(
                    prefix.as_ref(),
                    update.path.unwrap_or_default(),
                );
                let payload = update
                    .val
                    .and_then(|val| val.into_bytes())
                    .ok_or_else(|| Error::UnsupportedValue(path.to_string()))?;
                entries.push(GetEntry { path, payload });
            }
        }

        Ok(entries)
    }
}

// ===== impl SetUpdate =====

impl SetUpdate {
    pub fn new(path: String, value: String, encoding: Encoding) -> SetUpdate {
        SetUpdate {
            path,
            value,
            encoding,
        }
    }

    pub fn to_proto(&self) -> Result<proto::Update, Error> {
        let path = self
            .path
            .parse::<proto::Path>()
            .map_err(|error| Error::InvalidPath(self.path.clone(), error))?;
        let val = proto::TypedValue::with_encoding(&self.value, self.encoding)
            .map_err(Error::ValueEncode)?;

        Ok(proto::Update {
            path: Some(path),
            val: Some(val),
            duplicates: 0,
        })
    }
}
