//! Boot a page against an in-memory host document and print the lifecycle
//! logs. Run with:
//!
//! ```sh
//! RUST_LOG=debug cargo run --example boot_demo
//! ```

use std::sync::Arc;

use portico_app::{Orchestrator, ProgressConfig};
use portico_testkit::{dashboard_descriptor, registry_with, MemoryDocument};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let host = Arc::new(MemoryDocument::with_page(&dashboard_descriptor()));
    let registry = registry_with(&["Dashboard", "Settings"]);

    let orchestrator = Orchestrator::new(host.clone(), registry).with_progress_config(
        ProgressConfig {
            show_spinner: true,
            ..ProgressConfig::default()
        },
    );

    let report = orchestrator.diagnostics().await;
    println!("diagnostics: {report:?}");

    match orchestrator.start().await {
        Ok(app) => {
            println!(
                "mounted {} at {} -> {}",
                app.current_component(),
                app.current_url(),
                host.mounted("app").map(|v| v.markup).unwrap_or_default()
            );
        }
        Err(err) => {
            eprintln!("bootstrap failed: {err}");
        }
    }
}
