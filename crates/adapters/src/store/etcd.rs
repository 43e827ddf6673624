// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! etcd v3 store

use super::{StoreConnector, StoreError, StoredRecord, Version, VersionedStore};
use async_trait::async_trait;
use etcd_client::{Client, Compare, CompareOp, ConnectOptions, Txn, TxnOp};
use std::time::Duration;

/// Connects to an etcd cluster
#[derive(Clone, Debug)]
pub struct EtcdConnector {
    endpoints: Vec<String>,
    timeout: Duration,
}

impl EtcdConnector {
    /// `timeout` bounds both connection setup and each request.
    pub fn new(endpoints: Vec<String>, timeout: Duration) -> Self {
        Self { endpoints, timeout }
    }
}

#[async_trait]
impl StoreConnector for EtcdConnector {
    type Store = EtcdStore;

    async fn connect(&self) -> Result<EtcdStore, StoreError> {
        let options = ConnectOptions::new()
            .with_connect_timeout(self.timeout)
            .with_timeout(self.timeout);
        let client = Client::connect(self.endpoints.as_slice(), Some(options)).await?;
        Ok(EtcdStore { client })
    }
}

/// One etcd client connection. Dropping it closes the channel.
pub struct EtcdStore {
    client: Client,
}

#[async_trait]
impl VersionedStore for EtcdStore {
    async fn get(&self, key: &str) -> Result<Vec<StoredRecord>, StoreError> {
        let mut kv = self.client.kv_client();
        let resp = kv.get(key, None).await?;

        Ok(resp
            .kvs()
            .iter()
            .map(|kv| StoredRecord {
                value: kv.value().to_vec(),
                version: kv.version(),
            })
            .collect())
    }

    async fn put_if_version(
        &self,
        key: &str,
        expected: Version,
        value: Vec<u8>,
    ) -> Result<bool, StoreError> {
        let mut kv = self.client.kv_client();
        let txn = Txn::new()
            .when(vec![Compare::version(key, CompareOp::Equal, expected)])
            .and_then(vec![TxnOp::put(key, value, None)]);

        let resp = kv.txn(txn).await?;
        Ok(resp.succeeded())
    }
}
