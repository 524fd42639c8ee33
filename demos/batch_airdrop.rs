//! Batch airdrop example: 250 recipients of a fungible token
use smart_send_sdk::account::LocalAccount;
use smart_send_sdk::gas::DEFAULT_TOKEN_GAS_PER_ITEM;
use smart_send_sdk::smart_send::SmartSend;
use smart_send_sdk::types::utils::parse_amount;
use smart_send_sdk::{parse_address, Address, Network, NetworkConfig, Result};
use smart_send_sdk::{TransferAmount, TransferDescriptor};
//
fn main() -> Result<()> {
	tracing_subscriber::fmt::init();
	//
	let sender = parse_address("erd1qyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqsl6e0p7")?;
	// Start from the nonce the network reports for the sender
	let account = LocalAccount::new(sender, 0);
	//
	let builder = SmartSend::with_contract(
		account,
		NetworkConfig::for_network(Network::Devnet),
		"erd1qqqqqqqqqqqqqpgqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqcnjqwn",
	)?;
	//
	let reward = parse_amount("12.5", 6)?;
	let airdrop: Vec<TransferDescriptor> = (0u8..250)
		.map(|i| {
			let mut bytes = [i; 32];
			bytes[0] = 0xAA;
			TransferDescriptor::from_address(
				Address::new(bytes),
				TransferAmount::fungible("USDC-c76f1f", reward.clone(), 6),
			)
		})
		.collect();
	//
	let transactions = builder.build_fungible_transactions(&airdrop, DEFAULT_TOKEN_GAS_PER_ITEM, None)?;
	for tx in &transactions {
		println!(
			"nonce {} gas {} transfers {}",
			tx.nonce,
			tx.gas_limit,
			tx.arguments.len() / 2
		);
	}
	println!("{}", serde_json::to_string_pretty(&transactions[0])?);
	//
	Ok(())
}
