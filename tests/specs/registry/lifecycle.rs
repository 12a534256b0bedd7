//! Registry lifecycle driven through a live scheduler.

use crate::prelude::*;
use std::time::Duration;
use sv_core::Scheduler;
use sv_sync::{DepotRegistry, RunOutcome};

async fn wait_for_history(registry: &DepotRegistry, name: &str) -> Vec<RunOutcome> {
    for _ in 0..250 {
        if let Some(outcomes) = registry.history(name) {
            if !outcomes.is_empty() {
                return outcomes;
            }
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("no round outcome recorded for {name}");
}

#[tokio::test]
async fn a_fleet_of_depots_syncs_independently() {
    let docs = depot("docs", 30);
    let media = depot("media", 30);
    write(&docs.desc.source, "a.txt", "docs-a");
    write(&media.desc.source, "m.txt", "media-m");

    let registry = DepotRegistry::new(Scheduler::spawn());
    registry.add_depot(docs.desc.clone()).await.unwrap();
    registry.add_depot(media.desc.clone()).await.unwrap();

    let docs_runs = wait_for_history(&registry, "docs").await;
    let media_runs = wait_for_history(&registry, "media").await;

    assert!(docs_runs[0].is_success());
    assert!(media_runs[0].is_success());
    assert_eq!(read(&docs.desc.work_dir(), "a.txt"), "docs-a");
    assert_eq!(read(&media.desc.work_dir(), "m.txt"), "media-m");
}

#[tokio::test]
async fn deleting_one_depot_leaves_the_rest_in_rotation() {
    let docs = depot("docs", 30);
    let media = depot("media", 30);

    let registry = DepotRegistry::new(Scheduler::spawn());
    registry.add_depot(docs.desc.clone()).await.unwrap();
    registry.add_depot(media.desc.clone()).await.unwrap();

    registry.delete_depot("docs");

    let listed = registry.list_depots();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "media");
    assert!(wait_for_history(&registry, "media").await[0].is_success());
}

#[tokio::test]
async fn scheduler_stop_freezes_the_fleet() {
    let docs = depot("docs", 30);
    write(&docs.desc.source, "a.txt", "a");

    let scheduler = Scheduler::spawn();
    let registry = DepotRegistry::new(scheduler.clone());
    registry.add_depot(docs.desc.clone()).await.unwrap();
    wait_for_history(&registry, "docs").await;

    scheduler.stop();
    tokio::time::sleep(Duration::from_millis(100)).await;

    // The registry still answers queries after the scheduler is gone.
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.history("docs").unwrap().len(), 1);
}
