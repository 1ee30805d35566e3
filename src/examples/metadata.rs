//! Metadata Example
//!
//! Lists the filters, sort orders and facets the API accepts.
//!
//! Run with: cargo run --example metadata

use dm1881_rs::{Client, ConfigOverrides};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let overrides = ConfigOverrides::load("dm1881.json")?;
    let client = Client::from_overrides(overrides)?;

    let meta = client.meta().await?;

    println!("Filters:");
    for filter in meta.filter.hits() {
        println!("   {}", filter);
    }

    println!("Sort orders:");
    for sorter in meta.sort_by.hits() {
        println!("   {}", sorter);
    }

    println!("Facets:");
    for facet in &meta.facet {
        println!("   {}", facet);
    }

    Ok(())
}
