use common::fixtures::*;
use common::helpers::*;
use num_bigint::BigUint;
use rstest::*;
use serde_json::json;
use zksync_client::{ClientError, Provider};
use zksync_primitives::{
    EthSignature, EthSignatureType, SignedTransaction, TimeRange, TransactionFeeBatchRequest,
    TransactionFeeRequest, TransactionType, Transfer, ZkSyncTransaction,
};
use zksync_signer::ZkSigner;

mod common;

fn transfer(nonce: u32) -> ZkSyncTransaction {
    Transfer {
        account_id: 17,
        from: SECOND_RECIPIENT,
        to: RECIPIENT,
        token: 0,
        amount: BigUint::from(1_000_000u64),
        fee: "0".into(),
        nonce,
        signature: None,
        time_range: TimeRange::default(),
    }
    .into()
}

fn eth_signature(byte: char) -> EthSignature {
    EthSignature {
        signature_type: EthSignatureType::Ethereum,
        signature: format!("0x{}", byte.to_string().repeat(130)),
    }
}

#[tokio::test]
async fn test_account_state_is_decoded() {
    let (transport, provider) = mock_provider(
        MockTransport::new().respond("account_info", account_reply(RECIPIENT, Some(17), 4, "sync:0000000000000000000000000000000000000000")),
    );

    let state = provider.get_state(RECIPIENT).await.unwrap();
    assert_eq!(state.id, Some(17));
    assert_eq!(state.committed.nonce, 4);
    assert_eq!(
        state.committed_balance("ETH"),
        BigUint::from(1_000_000_000_000_000_000u64)
    );

    let calls = transport.calls_to("account_info");
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0][0].as_str().unwrap().to_lowercase(),
        format!("{RECIPIENT:#x}")
    );
}

#[tokio::test]
async fn test_remote_error_is_kept_verbatim() {
    let (_, provider) =
        mock_provider(MockTransport::new().fail("account_info", 101, "Account is locked"));

    let err = provider.get_state(RECIPIENT).await.unwrap_err();
    assert!(err.is_remote());
    let rpc = err.rpc_error().unwrap();
    assert_eq!(rpc.code(), Some(101));
    assert_eq!(rpc.message(), Some("Account is locked"));
}

#[tokio::test]
async fn test_transaction_fee_sends_raw_type_and_symbol() {
    let (transport, provider) = mock_provider(
        MockTransport::new()
            .respond("tokens", tokens_reply())
            .respond("get_tx_fee", fee_reply("351000")),
    );

    // resolved by contract address, sent by symbol
    let request = TransactionFeeRequest::new(
        TransactionType::Transfer,
        RECIPIENT,
        "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
    );
    let fee = provider.get_transaction_fee(&request).await.unwrap();
    assert_eq!(fee.total_fee, BigUint::from(351_000u64));
    assert_eq!(fee.zkp_fee, BigUint::from(1000u64));

    let params = &transport.calls_to("get_tx_fee")[0];
    assert_eq!(params[0], json!("Transfer"));
    assert_eq!(params[2], json!("USDC"));
}

#[tokio::test]
async fn test_unknown_fee_token_fails_before_fee_call() {
    let (transport, provider) = mock_provider(
        MockTransport::new()
            .respond("tokens", tokens_reply())
            .respond("get_tx_fee", fee_reply("1")),
    );

    let request = TransactionFeeRequest::new(TransactionType::Withdraw, RECIPIENT, "DAI");
    let err = provider.get_transaction_fee(&request).await.unwrap_err();
    assert!(err.is_unknown_token());
    assert!(transport.calls_to("get_tx_fee").is_empty());
}

#[tokio::test]
async fn test_misaligned_batch_fee_request_makes_no_call() {
    let (transport, provider) = mock_provider(MockTransport::new());

    let request = TransactionFeeBatchRequest {
        transaction_types: vec![TransactionType::Transfer, TransactionType::Transfer],
        addresses: vec![RECIPIENT],
        token_identifier: "ETH".into(),
    };
    let err = provider.get_transaction_fee_batch(&request).await.unwrap_err();
    assert!(err.is_invalid_input());
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_batch_fee_sends_parallel_lists() {
    let (transport, provider) = mock_provider(
        MockTransport::new()
            .respond("tokens", tokens_reply())
            .respond("get_txs_batch_fee_in_wei", json!({"totalFee": "702000"})),
    );

    let request = TransactionFeeBatchRequest::new(
        vec![TransactionType::Transfer, TransactionType::FastWithdraw],
        vec![RECIPIENT, SECOND_RECIPIENT],
        "ETH",
    )
    .unwrap();
    let fee = provider.get_transaction_fee_batch(&request).await.unwrap();
    assert_eq!(fee.total_fee, BigUint::from(702_000u64));
    assert_eq!(fee.gas_fee, BigUint::default());

    let params = &transport.calls_to("get_txs_batch_fee_in_wei")[0];
    assert_eq!(params[0], json!(["Transfer", "FastWithdraw"]));
    assert_eq!(params[1].as_array().unwrap().len(), 2);
    assert_eq!(params[2], json!("ETH"));
}

#[tokio::test]
async fn test_token_registry_is_fetched_once_until_refreshed() {
    let (transport, provider) = mock_provider(MockTransport::new().respond("tokens", tokens_reply()));

    let first = provider.get_tokens().await.unwrap();
    let second = provider.get_tokens().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(transport.calls_to("tokens").len(), 1);
    assert_eq!(first.resolve("USDC").unwrap().decimals, 6);

    provider.update_token_set().await.unwrap();
    provider.get_tokens().await.unwrap();
    assert_eq!(transport.calls_to("tokens").len(), 2);
}

#[tokio::test]
async fn test_token_price_accepts_string_reply() {
    let (transport, provider) = mock_provider(
        MockTransport::new()
            .respond("tokens", tokens_reply())
            .respond("get_token_price", json!("1.0002")),
    );

    let tokens = provider.get_tokens().await.unwrap();
    let price = provider
        .get_token_price(tokens.resolve("USDC").unwrap())
        .await
        .unwrap();
    assert!((price - 1.0002).abs() < f64::EPSILON);
    assert_eq!(transport.calls_to("get_token_price")[0], vec![json!("USDC")]);
}

#[rstest]
#[tokio::test]
async fn test_unsigned_transaction_is_rejected_locally() {
    let (transport, provider) = mock_provider(MockTransport::new().respond("tx_submit", json!(TX_HASH)));

    let err = provider.submit_tx(&transfer(0), None, false).await.unwrap_err();
    assert!(matches!(err, ClientError::MissingSignatureError(_)));
    assert!(transport.calls().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_submit_sends_transaction_signature_and_flag(zk_signer: ZkSigner) {
    let (transport, provider) = mock_provider(MockTransport::new().respond("tx_submit", json!(TX_HASH)));

    let tx = zk_signer.sign_transaction(transfer(3)).unwrap();
    let signature = eth_signature('a');
    let hash = provider.submit_tx(&tx, Some(&signature), true).await.unwrap();
    assert_eq!(hash, TX_HASH);

    let params = &transport.calls_to("tx_submit")[0];
    assert_eq!(params[0]["type"], json!("Transfer"));
    assert_eq!(params[0]["nonce"], json!(3));
    assert!(params[0]["signature"]["pubKey"].is_string());
    assert_eq!(params[1]["type"], json!("EthereumSignature"));
    assert_eq!(params[2], json!(true));
}

#[rstest]
#[tokio::test]
async fn test_batch_returns_hashes_in_order(zk_signer: ZkSigner) {
    let (transport, provider) = mock_provider(
        MockTransport::new().respond("submit_txs_batch", json!(["sync-tx:01", "sync-tx:02"])),
    );

    let batch = vec![
        SignedTransaction::new(zk_signer.sign_transaction(transfer(0)).unwrap(), None),
        SignedTransaction::new(zk_signer.sign_transaction(transfer(1)).unwrap(), None),
    ];
    let signature = eth_signature('b');
    let hashes = provider
        .submit_tx_batch(&batch, Some(&signature))
        .await
        .unwrap();
    assert_eq!(hashes, vec!["sync-tx:01", "sync-tx:02"]);

    let params = &transport.calls_to("submit_txs_batch")[0];
    assert_eq!(params[0].as_array().unwrap().len(), 2);
    assert_eq!(params[0][1]["tx"]["nonce"], json!(1));
    assert_eq!(params[1]["signature"], json!(signature.signature));
}

#[rstest]
#[tokio::test]
async fn test_batch_hash_count_mismatch_is_a_transport_error(zk_signer: ZkSigner) {
    let (_, provider) = mock_provider(
        MockTransport::new().respond("submit_txs_batch", json!(["sync-tx:01"])),
    );

    let batch = vec![
        SignedTransaction::new(zk_signer.sign_transaction(transfer(0)).unwrap(), None),
        SignedTransaction::new(zk_signer.sign_transaction(transfer(1)).unwrap(), None),
    ];
    let err = provider.submit_tx_batch(&batch, None).await.unwrap_err();
    assert!(err.is_transport());
}

#[rstest]
#[tokio::test]
async fn test_batch_rejects_conflicting_signature(zk_signer: ZkSigner) {
    let (transport, provider) = mock_provider(MockTransport::new());

    let batch = vec![SignedTransaction::new(
        zk_signer.sign_transaction(transfer(0)).unwrap(),
        Some(eth_signature('c')),
    )];
    let err = provider
        .submit_tx_batch(&batch, Some(&eth_signature('d')))
        .await
        .unwrap_err();
    assert!(err.is_invalid_input());
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_empty_batch_is_rejected() {
    let (transport, provider) = mock_provider(MockTransport::new());

    let err = provider.submit_tx_batch(&[], None).await.unwrap_err();
    assert!(err.is_invalid_input());
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_operation_status_queries() {
    let (transport, provider) = mock_provider(
        MockTransport::new()
            .respond(
                "contract_address",
                json!({
                    "mainContract": "0xabcabcabcabcabcabcabcabcabcabcabcabcabca",
                    "govContract": "0x1231231231231231231231231231231231231231"
                }),
            )
            .respond(
                "tx_info",
                json!({
                    "executed": true,
                    "success": false,
                    "failReason": "Nonce mismatch",
                    "block": {"blockNumber": 12, "committed": true, "verified": false}
                }),
            )
            .respond("ethop_info", json!({"executed": false, "block": null}))
            .respond("get_confirmations_for_eth_op_amount", json!(10))
            .respond("get_eth_tx_for_withdrawal", json!("0xdeadbeef")),
    );

    let contracts = provider.contract_address().await.unwrap();
    assert_eq!(
        format!("{:#x}", contracts.gov_contract),
        "0x1231231231231231231231231231231231231231"
    );

    let details = provider.get_transaction_details(TX_HASH).await.unwrap();
    assert_eq!(details.success, Some(false));
    assert_eq!(details.fail_reason.as_deref(), Some("Nonce mismatch"));
    assert_eq!(details.block.unwrap().block_number, 12);

    let op = provider.get_eth_op_info(42).await.unwrap();
    assert!(!op.executed);
    assert!(op.block.is_none());

    assert_eq!(provider.get_confirmations_for_eth_op_amount().await.unwrap(), 10);
    assert_eq!(
        provider.get_eth_transaction_for_withdrawal(TX_HASH).await.unwrap(),
        "0xdeadbeef"
    );
    assert_eq!(transport.calls_to("ethop_info")[0], vec![json!(42)]);
}

#[tokio::test]
async fn test_unexpected_result_shape_is_a_transport_error() {
    let (_, provider) = mock_provider(MockTransport::new().respond("tx_info", json!("pending")));

    let err = provider.get_transaction_details(TX_HASH).await.unwrap_err();
    assert!(err.is_transport());
}
