//! The contract handle and the call-view entry point.

use std::sync::Arc;

use alloy_primitives::Address;
use evmbind_abi::{AbiSchema, Returns};
use evmbind_core::{AbiValue, BindError};
use evmbind_rpc::EthClient;

/// One deployed contract: its address, the shared node client, and the
/// parsed ABI schema for its family. Immutable after construction.
#[derive(Clone)]
pub struct ContractHandle {
    address: Address,
    client: Arc<EthClient>,
    schema: Arc<AbiSchema>,
}

impl ContractHandle {
    pub fn new(client: Arc<EthClient>, address: Address, schema: Arc<AbiSchema>) -> Self {
        Self {
            address,
            client,
            schema,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn client(&self) -> &Arc<EthClient> {
        &self.client
    }

    pub fn schema(&self) -> &Arc<AbiSchema> {
        &self.schema
    }

    /// Invoke a view function: encode the arguments, perform one `eth_call`
    /// round trip, decode the declared output tuple.
    ///
    /// This is the single entry point every capability method goes through.
    /// Stateless and side-effect-free beyond the network round trip.
    pub async fn call_view(
        &self,
        function: &str,
        args: &[AbiValue],
    ) -> Result<Returns, BindError> {
        let calldata = self.schema.encode_call(function, args)?;
        let raw = self.client.call(self.address, &calldata).await?;
        self.schema.decode_result(function, &raw)
    }
}
