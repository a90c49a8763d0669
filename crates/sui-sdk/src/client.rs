//! SuiClient - main RPC client

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;
use sui_crypto::SerializedSignature;
use sui_primitives::{ObjectID, TransactionDigest};
use tokio::time::Instant;

use crate::config::ClientConfig;
use crate::transport::{deserialize_response, MockTransport, Transport};
use crate::types::{
    DryRunTransactionBlockResponse, ObjectDataOptions, ObjectResponse,
    TransactionBlockResponse, TransactionBlockResponseOptions,
};
use crate::{Account, SdkError, TransactionBuilder};

#[cfg(feature = "http")]
use crate::transport::HttpTransport;

/// Sui client for RPC communication
pub struct SuiClient {
    transport: Box<dyn Transport>,
    config: ClientConfig,
    chain_identifier: Option<String>,
}

impl SuiClient {
    /// Create a new client with HTTP transport
    ///
    /// Fetches the chain identifier so an unreachable node fails here.
    #[cfg(feature = "http")]
    pub async fn connect(url: &str) -> Result<Self, SdkError> {
        let config = ClientConfig {
            rpc_url: url.to_string(),
            ..ClientConfig::default()
        };
        let mut client = Self::from_config(config)?;

        let chain_identifier = client.fetch_chain_identifier().await?;
        tracing::info!(url, chain = %chain_identifier, "connected");
        client.chain_identifier = Some(chain_identifier);

        Ok(client)
    }

    /// Create a client over HTTP from configuration
    #[cfg(feature = "http")]
    pub fn from_config(config: ClientConfig) -> Result<Self, SdkError> {
        let transport = HttpTransport::with_timeout(&config.rpc_url, config.request_timeout())?;
        Ok(Self {
            transport: Box::new(transport),
            config,
            chain_identifier: None,
        })
    }

    /// Create a new client with mock transport (for testing)
    pub fn new_mock() -> Self {
        Self::with_transport(MockTransport::new())
    }

    /// Create a client with a custom transport
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self::with_transport_and_config(transport, ClientConfig::default())
    }

    /// Create a client with a custom transport and configuration
    pub fn with_transport_and_config(transport: impl Transport + 'static, config: ClientConfig) -> Self {
        Self {
            transport: Box::new(transport),
            config,
            chain_identifier: None,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// A fresh builder honoring `strict_build`
    pub fn transaction_builder(&self) -> TransactionBuilder {
        TransactionBuilder::new().strict(self.config.strict_build)
    }

    /// Helper method to make RPC request and deserialize
    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, SdkError> {
        tracing::debug!(method, "rpc request");
        let value = self.transport.request_json(method, params).await?;
        deserialize_response(value)
    }

    // ==================== Chain Info ====================

    /// Get the chain identifier
    pub async fn get_chain_identifier(&self) -> Result<String, SdkError> {
        if let Some(id) = &self.chain_identifier {
            return Ok(id.clone());
        }
        self.fetch_chain_identifier().await
    }

    async fn fetch_chain_identifier(&self) -> Result<String, SdkError> {
        self.request("sui_getChainIdentifier", vec![]).await
    }

    /// Get the reference gas price for the current epoch
    pub async fn get_reference_gas_price(&self) -> Result<u64, SdkError> {
        let value: Value = self.request("suix_getReferenceGasPrice", vec![]).await?;
        parse_u64(&value)
    }

    // ==================== Object Queries ====================

    /// Get one object
    pub async fn get_object(
        &self,
        id: ObjectID,
        options: ObjectDataOptions,
    ) -> Result<ObjectResponse, SdkError> {
        self.request(
            "sui_getObject",
            vec![Value::String(id.to_hex()), serde_json::to_value(options)?],
        )
        .await
    }

    /// Get several objects, in the order asked for
    pub async fn multi_get_objects(
        &self,
        ids: &[ObjectID],
        options: ObjectDataOptions,
    ) -> Result<Vec<ObjectResponse>, SdkError> {
        let ids: Vec<Value> = ids.iter().map(|id| Value::String(id.to_hex())).collect();
        self.request(
            "sui_multiGetObjects",
            vec![Value::Array(ids), serde_json::to_value(options)?],
        )
        .await
    }

    // ==================== Transaction Queries ====================

    /// Get an executed transaction
    pub async fn get_transaction_block(
        &self,
        digest: &TransactionDigest,
        options: TransactionBlockResponseOptions,
    ) -> Result<TransactionBlockResponse, SdkError> {
        self.request(
            "sui_getTransactionBlock",
            vec![Value::String(digest.to_base58()), serde_json::to_value(options)?],
        )
        .await
    }

    // ==================== Transaction Submission ====================

    /// Submit signed transaction bytes
    pub async fn execute_transaction_block(
        &self,
        tx_bytes: &[u8],
        signatures: &[SerializedSignature],
        options: TransactionBlockResponseOptions,
    ) -> Result<TransactionBlockResponse, SdkError> {
        if signatures.is_empty() {
            return Err(SdkError::InvalidArgument(
                "at least one signature is required".to_string(),
            ));
        }

        let signatures: Vec<Value> = signatures
            .iter()
            .map(|sig| Value::String(sig.to_base64()))
            .collect();
        let response: TransactionBlockResponse = self
            .request(
                "sui_executeTransactionBlock",
                vec![
                    Value::String(STANDARD.encode(tx_bytes)),
                    Value::Array(signatures),
                    serde_json::to_value(options)?,
                ],
            )
            .await?;

        tracing::info!(digest = %response.digest, "transaction submitted");
        Ok(response)
    }

    /// Build, sign and submit
    ///
    /// Building and signing finish before anything is sent.
    pub async fn sign_and_execute(
        &self,
        builder: &TransactionBuilder,
        account: &Account,
        options: TransactionBlockResponseOptions,
    ) -> Result<TransactionBlockResponse, SdkError> {
        let tx_bytes = builder.build()?;
        let signature = account.sign_transaction(&tx_bytes)?;
        self.execute_transaction_block(&tx_bytes, &[signature], options)
            .await
    }

    /// Execute without committing
    pub async fn dry_run_transaction_block(
        &self,
        tx_bytes: &[u8],
    ) -> Result<DryRunTransactionBlockResponse, SdkError> {
        self.request(
            "sui_dryRunTransactionBlock",
            vec![Value::String(STANDARD.encode(tx_bytes))],
        )
        .await
    }

    /// Poll until the transaction's effects are available
    ///
    /// RPC errors while polling mean the node has not indexed the
    /// transaction yet. Transport errors are returned as they are.
    pub async fn wait_for_transaction(
        &self,
        digest: &TransactionDigest,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<TransactionBlockResponse, SdkError> {
        let start = Instant::now();
        let deadline = start + timeout;

        loop {
            match self
                .get_transaction_block(digest, TransactionBlockResponseOptions::with_effects())
                .await
            {
                Ok(response) if response.effects.is_some() => {
                    tracing::info!(%digest, waited_ms = start.elapsed().as_millis() as u64, "transaction confirmed");
                    return Ok(response);
                }
                Ok(_) => tracing::debug!(%digest, "no effects yet"),
                Err(SdkError::Rpc { code, message }) => {
                    tracing::debug!(%digest, code, %message, "transaction not available yet")
                }
                Err(e) => return Err(e),
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(SdkError::Timeout {
                    digest: *digest,
                    waited: now - start,
                });
            }
            tokio::time::sleep(poll_interval.min(deadline - now)).await;
        }
    }

    /// [`wait_for_transaction`](Self::wait_for_transaction) with the configured defaults
    pub async fn wait_for_transaction_default(
        &self,
        digest: &TransactionDigest,
    ) -> Result<TransactionBlockResponse, SdkError> {
        self.wait_for_transaction(digest, self.config.wait_timeout(), self.config.poll_interval())
            .await
    }
}

// ==================== Helper Functions ====================

/// Parse a u64 sent as a decimal string or a number
fn parse_u64(value: &Value) -> Result<u64, SdkError> {
    match value {
        Value::String(s) => s
            .parse()
            .map_err(|_| SdkError::Serialization(format!("invalid u64: {}", s))),
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| SdkError::Serialization(format!("invalid u64: {}", n))),
        other => Err(SdkError::Serialization(format!("expected u64, got {}", other))),
    }
}
