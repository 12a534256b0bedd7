//! Multi-round sync behavior: the working directory mirrors the source,
//! and every round's pre-state survives in its archive snapshot.

use crate::prelude::*;
use sv_sync::run_round;

#[test]
fn work_dir_tracks_the_source_across_rounds() {
    let fixture = depot("docs", 30);
    let desc = &fixture.desc;

    write(&desc.source, "a.txt", "a1");
    write(&desc.source, "sub/b.txt", "b1");
    run_round(desc).unwrap();

    write(&desc.source, "a.txt", "a2");
    write(&desc.source, "new/c.txt", "c1");
    std::fs::remove_file(desc.source.join("sub/b.txt")).unwrap();
    run_round(desc).unwrap();

    let work = desc.work_dir();
    assert_eq!(read(&work, "a.txt"), "a2");
    assert_eq!(read(&work, "new/c.txt"), "c1");
    assert!(!work.join("sub/b.txt").exists());
}

#[test]
fn each_snapshot_preserves_the_state_before_its_round() {
    let fixture = depot("docs", 30);
    let desc = &fixture.desc;

    write(&desc.source, "a.txt", "round1");
    run_round(desc).unwrap();

    write(&desc.source, "a.txt", "round2");
    run_round(desc).unwrap();

    write(&desc.source, "a.txt", "round3");
    run_round(desc).unwrap();

    let snaps = snapshots(desc);
    assert_eq!(snaps.len(), 3);
    // Snapshot N holds the working directory as it stood before round N.
    assert!(!snaps[0].join("a.txt").exists());
    assert_eq!(
        std::fs::read_to_string(snaps[1].join("a.txt")).unwrap(),
        "round1"
    );
    assert_eq!(
        std::fs::read_to_string(snaps[2].join("a.txt")).unwrap(),
        "round2"
    );
    assert_eq!(read(&desc.work_dir(), "a.txt"), "round3");
}

#[test]
fn an_initialized_depot_is_adopted_after_restart() {
    let fixture = depot("docs", 30);
    write(&fixture.desc.source, "a.txt", "v1");
    run_round(&fixture.desc).unwrap();

    // A fresh descriptor for the same paths, as after a daemon restart.
    let readopted = sv_sync::DepotDescriptor::new(
        "docs",
        &fixture.desc.source,
        &fixture.desc.destination,
        "ops",
        30,
        7,
    );
    write(&fixture.desc.source, "a.txt", "v2");
    run_round(&readopted).unwrap();

    assert_eq!(read(&readopted.work_dir(), "a.txt"), "v2");
}

#[test]
fn a_foreign_destination_is_never_touched() {
    let fixture = depot("docs", 30);
    let desc = &fixture.desc;
    write(&desc.destination, "precious.txt", "do not disturb");

    run_round(desc).unwrap_err();

    assert_eq!(read(&desc.destination, "precious.txt"), "do not disturb");
    assert!(!desc.marker_path().exists());
    assert!(!desc.archive_root().exists());
}
