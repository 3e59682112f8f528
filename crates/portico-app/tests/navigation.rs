//! Re-navigation on a mounted root: swap, stale version, supersession.

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use portico_app::{
    BootstrapCause, BootstrapStage, NavigationOutcome, Orchestrator, ProgressConfig,
    ProgressSignal, ResolveError,
};
use portico_testkit::{
    dashboard_descriptor, descriptor, recording_sink, registry_with, GatedResolver, MemoryDocument,
};

fn instant_progress() -> ProgressConfig {
    ProgressConfig {
        delay: Duration::ZERO,
        ..ProgressConfig::default()
    }
}

#[tokio::test]
async fn navigate_swaps_view_and_props_in_place() {
    let host = Arc::new(MemoryDocument::with_page(&dashboard_descriptor()));
    let registry = registry_with(&["Dashboard", "Settings"]);
    let app = Orchestrator::new(host.clone(), registry)
        .start()
        .await
        .unwrap();

    let outcome = app
        .navigate(descriptor("Settings", "/settings").with_version("1"))
        .await
        .unwrap();

    assert_eq!(outcome, NavigationOutcome::Completed);
    assert_eq!(app.current_component(), "Settings");
    assert_eq!(app.current_url(), "/settings");
    assert_eq!(host.mounted("app").unwrap().component, "Settings");
}

#[tokio::test]
async fn version_change_requires_full_visit() {
    let host = Arc::new(MemoryDocument::with_page(&dashboard_descriptor()));
    let registry = registry_with(&["Dashboard", "Settings"]);
    let app = Orchestrator::new(host.clone(), registry)
        .start()
        .await
        .unwrap();
    let mounts_before = host.mount_calls();

    let outcome = app
        .navigate(descriptor("Settings", "/settings").with_version("2"))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        NavigationOutcome::StaleVersion {
            url: "/settings".to_string()
        }
    );
    // The stale-version short circuit does no resolution and no mounting.
    assert_eq!(app.current_component(), "Dashboard");
    assert_eq!(host.mount_calls(), mounts_before);
}

#[tokio::test]
async fn newer_navigation_supersedes_older_resolution() {
    let host = Arc::new(MemoryDocument::with_page(&dashboard_descriptor()));
    let resolver = GatedResolver::new(registry_with(&["Dashboard", "Slow", "Settings"]));
    let app = Arc::new(
        Orchestrator::new(host.clone(), resolver.clone())
            .start()
            .await
            .unwrap(),
    );

    let release = resolver.gate("Slow");
    let slow = {
        let app = app.clone();
        tokio::spawn(async move {
            app.navigate(descriptor("Slow", "/slow").with_version("1"))
                .await
        })
    };
    // Let the slow navigation park inside its resolver call.
    tokio::task::yield_now().await;

    let fast = app
        .navigate(descriptor("Settings", "/settings").with_version("1"))
        .await
        .unwrap();
    assert_eq!(fast, NavigationOutcome::Completed);

    release.send(()).ok();
    let outcome = slow.await.unwrap().unwrap();
    assert_eq!(outcome, NavigationOutcome::Superseded);

    // The superseded navigation did not clobber the newer page.
    assert_eq!(app.current_component(), "Settings");
    assert_eq!(host.mounted("app").unwrap().component, "Settings");
}

#[tokio::test]
async fn failed_navigation_keeps_previous_view() {
    let host = Arc::new(MemoryDocument::with_page(&dashboard_descriptor()));
    let registry = registry_with(&["Dashboard"]);
    let (sink, counters) = recording_sink();
    let progress = Arc::new(ProgressSignal::new(sink));
    let app = Orchestrator::new(host.clone(), registry)
        .with_progress(progress)
        .with_progress_config(instant_progress())
        .start()
        .await
        .unwrap();

    let err = app
        .navigate(descriptor("Nowhere", "/nowhere").with_version("1"))
        .await
        .unwrap_err();

    assert_eq!(err.stage, BootstrapStage::Resolving);
    assert_matches!(err.cause, BootstrapCause::Resolve(ResolveError::UnresolvedView { .. }));
    assert_eq!(app.current_component(), "Dashboard");
    assert_eq!(host.mounted("app").unwrap().component, "Dashboard");
    // Progress cycle closed even though the navigation failed.
    assert_eq!(counters.shows(), counters.hides());
}

#[tokio::test]
async fn rejected_navigation_mount_restores_previous_view() {
    let host = Arc::new(MemoryDocument::with_page(&dashboard_descriptor()));
    let registry = registry_with(&["Dashboard", "Settings"]);
    let app = Orchestrator::new(host.clone(), registry)
        .start()
        .await
        .unwrap();

    host.fail_next_mount();
    let err = app
        .navigate(descriptor("Settings", "/settings").with_version("1"))
        .await
        .unwrap_err();

    assert_eq!(err.stage, BootstrapStage::Mounted);
    assert_matches!(err.cause, BootstrapCause::Mount(_));
    // State and host subtree agree: the previous view is back in the
    // mount point, not a blank element that still claims to be Dashboard.
    assert_eq!(app.current_component(), "Dashboard");
    assert_eq!(app.current_url(), "/dashboard");
    let mounted = host.mounted("app").unwrap();
    assert_eq!(mounted.component, "Dashboard");
    assert!(mounted.markup.contains(r#""user":"alice""#));
}

#[tokio::test]
async fn unrecoverable_navigation_mount_leaves_mount_point_cleared() {
    let host = Arc::new(MemoryDocument::with_page(&dashboard_descriptor()));
    let registry = registry_with(&["Dashboard", "Settings"]);
    let app = Orchestrator::new(host.clone(), registry)
        .start()
        .await
        .unwrap();

    // Every mount fails, including the restore attempt: nothing partial
    // may remain attached.
    host.fail_mounts(true);
    let err = app
        .navigate(descriptor("Settings", "/settings").with_version("1"))
        .await
        .unwrap_err();

    assert_eq!(err.stage, BootstrapStage::Mounted);
    assert_eq!(host.child_count("app"), 0);
}

#[tokio::test]
async fn each_navigation_drives_one_progress_cycle() {
    let host = Arc::new(MemoryDocument::with_page(&dashboard_descriptor()));
    let registry = registry_with(&["Dashboard", "Settings"]);
    let (sink, counters) = recording_sink();
    let progress = Arc::new(ProgressSignal::new(sink));
    let app = Orchestrator::new(host, registry)
        .with_progress(progress)
        .with_progress_config(instant_progress())
        .start()
        .await
        .unwrap();
    assert_eq!(counters.shows(), 1);

    app.navigate(descriptor("Settings", "/settings").with_version("1"))
        .await
        .unwrap();
    app.navigate(descriptor("Dashboard", "/dashboard").with_version("1"))
        .await
        .unwrap();

    assert_eq!(counters.shows(), 3);
    assert_eq!(counters.hides(), 3);
}
