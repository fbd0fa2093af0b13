use rstest::*;
use serde_json::{json, Value};
use zksync_primitives::alloy::primitives::{address, Address};
use zksync_primitives::alloy::signers::PrivateKeySigner;
use zksync_primitives::ChangePubKeyCreate2;
use zksync_signer::{Create2EthSigner, DefaultEthSigner, ZkSigner};

pub const DUMMY_PRIV_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

pub const RECIPIENT: Address = address!("19aa2ed8712072e918632259780e587698ef58df");
pub const SECOND_RECIPIENT: Address = address!("70997970c51812dc3a010c7d01b50e0d17dc79c8");

pub const TX_HASH: &str = "sync-tx:5b2ea1cf4a26a8b0c6e91da3dd0d1ea31bd2a7c9b2e6d9ab1a8da8d2b5f0f3c1";

#[fixture]
pub fn zk_signer() -> ZkSigner {
    ZkSigner::from_seed(&[0x42; 32]).expect("Couldn't build zk signer")
}

#[fixture]
pub fn eth_signer() -> DefaultEthSigner<PrivateKeySigner> {
    let signer: PrivateKeySigner = DUMMY_PRIV_KEY.parse().expect("Couldn't get priv key");
    DefaultEthSigner::new(signer)
}

#[fixture]
pub fn create2_signer(zk_signer: ZkSigner) -> Create2EthSigner {
    let auth_data = ChangePubKeyCreate2 {
        creator_address: "0x6E253C951A40fAf4032faFbEc19262Cd1531A5F5".into(),
        salt_arg: "0x0000000000000000000000000000000000000000000000000000000000000001".into(),
        code_hash: "0x4f063cd4b2e3a885f61fefb0988cc12487182c4f09ff5de374103f5812f33fe7".into(),
    };
    Create2EthSigner::from_zk_signer(&zk_signer, auth_data)
        .expect("Couldn't derive create2 address")
}

/// `tokens` reply with ETH and USDC.
pub fn tokens_reply() -> Value {
    json!({
        "ETH": {
            "id": 0,
            "address": "0x0000000000000000000000000000000000000000",
            "symbol": "ETH",
            "decimals": 18
        },
        "USDC": {
            "id": 2,
            "address": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
            "symbol": "USDC",
            "decimals": 6
        }
    })
}

/// `account_info` reply with the same committed and verified state.
pub fn account_reply(address: Address, id: Option<u32>, nonce: u32, pub_key_hash: &str) -> Value {
    let state = json!({
        "balances": {"ETH": "1000000000000000000"},
        "nonce": nonce,
        "pubKeyHash": pub_key_hash
    });
    json!({
        "address": address,
        "id": id,
        "depositing": {"balances": {}},
        "committed": state,
        "verified": state
    })
}

pub fn fee_reply(total_fee: &str) -> Value {
    json!({
        "gasTxAmount": "350",
        "gasPriceWei": "1000000000",
        "gasFee": "350000000000",
        "zkpFee": "1000",
        "totalFee": total_fee
    })
}
