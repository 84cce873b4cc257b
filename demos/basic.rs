//! Basic example demonstrating the Halon API client.
//!
//! Run with:
//! ```
//! HALON_HOST=mx1.example.com HALON_USER=admin HALON_PASSWORD=secret \
//!     cargo run --example basic
//! ```

use halonapi::{HalonClient, Pagination, RevisionId, StatsFilter};

#[tokio::main]
async fn main() -> halonapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Halon client...");
    let client = HalonClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    println!("\n--- System ---");
    println!("Version: {}", client.get_software_version().await?);
    println!("Time:    {}", client.get_system_time().await?);
    println!("Uptime:  {}s", client.get_system_uptime().await?);

    match client.get_update_status().await {
        Ok(status) => println!("Update:  {}", *status),
        Err(e) => println!("Update:  none ({e})"),
    }

    println!("\n--- Config Revisions (first page) ---");
    let revisions = client.list_config_revisions(Pagination::default()).await?;
    for revision in &revisions {
        let id = revision
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "?".to_string());
        println!(
            "  - {} {}",
            id,
            revision.message.as_deref().unwrap_or_default()
        );
    }

    let head = client.get_config_revision(RevisionId::Head, None).await?;
    println!("HEAD has {} parameters", head.config.len());

    println!("\n--- Stats ---");
    let stats = client
        .list_stats(&StatsFilter::default(), Pagination::new(0, 10))
        .await?;
    for stat in &stats {
        println!("  - {}", **stat);
    }

    println!("\n--- Graphs ---");
    let graphs = client.list_graphs(Pagination::default()).await?;
    println!("Found {} graphs", graphs.len());

    Ok(())
}
