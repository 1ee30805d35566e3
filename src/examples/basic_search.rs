//! Basic Search Example
//!
//! Searches persons and companies, then looks up a phone number.
//!
//! Run with:
//! DM1881_CLIENT_ID=... DM1881_USERNAME=... DM1881_SECRET=... cargo run --example basic_search

use dm1881_rs::{Client, ConfigOverrides, QueryArguments};

fn overrides_from_env() -> ConfigOverrides {
    ConfigOverrides {
        environment: std::env::var("DM1881_ENVIRONMENT").ok(),
        client_id: std::env::var("DM1881_CLIENT_ID").ok(),
        username: std::env::var("DM1881_USERNAME").ok(),
        secret: std::env::var("DM1881_SECRET").ok(),
        ..ConfigOverrides::default()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("DM1881 Basic Search Example\n");

    let client = Client::from_overrides(overrides_from_env())?;
    println!("✅ Client ready for {}\n", client.config().base_uri());

    let result = client
        .search("Ola Nordmann", QueryArguments::new().rows(5))
        .await?;

    println!(
        "🔍 {} hits in {} ms (profile: {})",
        result.count(),
        result.query_time(),
        result.profile()
    );
    for (i, hit) in result.hits().enumerate() {
        println!("   {}. {}", i + 1, hit);
    }

    let result = client
        .search_phone("+47 800 12 345", QueryArguments::new())
        .await?;
    println!("\n📞 Phone lookup: {} hits", result.count());

    Ok(())
}
