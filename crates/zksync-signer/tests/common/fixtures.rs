use num_bigint::BigUint;
use rstest::*;
use zksync_primitives::alloy::primitives::{address, Address};
use zksync_primitives::alloy::signers::PrivateKeySigner;
use zksync_primitives::{
    ChangePubKey, ChangePubKeyCreate2, TimeRange, Token, Tokens, Transfer, ZkSyncTransaction,
};
use zksync_signer::{Create2EthSigner, DefaultEthSigner, ZkSigner};

/// Well-known development key, never holds funds.
pub const DUMMY_PRIV_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

pub const RECIPIENT: Address = address!("19aa2ed8712072e918632259780e587698ef58df");

#[fixture]
pub fn zk_signer() -> ZkSigner {
    ZkSigner::from_seed(&[0x42; 32]).expect("Couldn't build zk signer")
}

#[fixture]
pub fn default_signer() -> DefaultEthSigner<PrivateKeySigner> {
    let signer: PrivateKeySigner = DUMMY_PRIV_KEY.parse().expect("Couldn't get priv key");
    DefaultEthSigner::new(signer)
}

#[fixture]
pub fn create2_auth_data() -> ChangePubKeyCreate2 {
    ChangePubKeyCreate2 {
        creator_address: "0x6E253C951A40fAf4032faFbEc19262Cd1531A5F5".into(),
        salt_arg: "0x0000000000000000000000000000000000000000000000000000000000000001".into(),
        code_hash: "0x4f063cd4b2e3a885f61fefb0988cc12487182c4f09ff5de374103f5812f33fe7".into(),
    }
}

#[fixture]
pub fn create2_signer(zk_signer: ZkSigner, create2_auth_data: ChangePubKeyCreate2) -> Create2EthSigner {
    Create2EthSigner::from_zk_signer(&zk_signer, create2_auth_data)
        .expect("Couldn't derive create2 address")
}

#[fixture]
pub fn tokens() -> Tokens {
    Tokens::from_tokens(vec![
        Token::new(0, "0x0000000000000000000000000000000000000000", "ETH", 18),
        Token::new(2, "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48", "USDC", 6),
    ])
    .expect("Couldn't build token registry")
}

pub fn transfer(from: Address, amount: u64, fee: &str, nonce: u32) -> ZkSyncTransaction {
    Transfer {
        account_id: 17,
        from,
        to: RECIPIENT,
        token: 0,
        amount: BigUint::from(amount),
        fee: fee.into(),
        nonce,
        signature: None,
        time_range: TimeRange::default(),
    }
    .into()
}

pub fn change_pub_key(account: Address, new_pk_hash: &str) -> ChangePubKey {
    ChangePubKey {
        account_id: 17,
        account,
        new_pk_hash: new_pk_hash.into(),
        fee_token: 0,
        fee: "0".into(),
        nonce: 0,
        signature: None,
        eth_auth_data: None,
        time_range: TimeRange::default(),
    }
}
