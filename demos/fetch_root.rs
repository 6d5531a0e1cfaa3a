//! Root resource walker example
//!
//! Fetches the root of a HAL API through a caching factory and prints its
//! state, links and embedded resources, resolving CURIE documentation links.
//!
//! Run with: cargo run --example fetch_root -- http://localhost:8080/

use hal_client::{CachingBehavior, ClientConfig, HalClientFactory, ResourceObject};
use url::Url;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let base = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8080/".to_string());

    println!("HAL Root Walker Example");
    println!("=======================\n");
    println!("Fetching {}", base);

    let config = ClientConfig::default()
        .with_base_url(Url::parse(&base)?)
        .with_logging(true);
    let factory = HalClientFactory::<()>::new(config);
    let client = factory
        .create_client_cached(&(), CachingBehavior::Once)
        .await?;

    let root = client.root().await?;
    println!("Status: {}\n", root.status());
    print_resource(&root, 0);

    println!("\nDocumentation:");
    for rel in root.links().keys().chain(root.embedded().keys()) {
        if let Some(docs) = root.documentation_uri(rel)? {
            println!("  {} -> {}", rel, docs);
        }
    }

    Ok(())
}

fn print_resource(resource: &ResourceObject, depth: usize) {
    let indent = "  ".repeat(depth);

    for (name, value) in resource.state() {
        println!("{}{} ({}) = {}", indent, name, value.type_tag(), value.raw());
    }
    for (rel, links) in resource.links() {
        for link in links {
            let target = link
                .template()
                .map(str::to_string)
                .or_else(|| link.href().map(ToString::to_string))
                .unwrap_or_default();
            println!("{}link {} -> {}", indent, rel, target);
        }
    }
    for (rel, resources) in resource.embedded() {
        for embedded in resources {
            println!("{}embedded {}:", indent, rel);
            print_resource(embedded, depth + 1);
        }
    }
}
