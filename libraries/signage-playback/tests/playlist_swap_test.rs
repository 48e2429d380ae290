//! Playlist replacement under real parallelism

use signage_core::{Playlist, Video};
use signage_playback::SharedPlaylist;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

const SWAPS: usize = 1000;

fn snapshot(generation: usize) -> Playlist {
    // Sizes vary so stale cursors would run out of range
    let size = 1 + generation % 7;
    let videos = (0..size)
        .map(|i| {
            let id = format!("g{generation}-v{i}");
            Video::new(id.clone(), format!("{id}.mp4"), PathBuf::from(format!("/videos/{id}.mp4")))
        })
        .collect();
    Playlist::new(videos)
}

#[test]
fn reader_only_sees_whole_snapshots() {
    let known: HashSet<String> = (0..=SWAPS)
        .flat_map(|g| snapshot(g).videos().iter().map(|v| v.id.clone()).collect::<Vec<_>>())
        .collect();

    let shared = SharedPlaylist::new(snapshot(0));
    let done = Arc::new(AtomicBool::new(false));

    let reader = {
        let shared = shared.clone();
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut seen = Vec::new();
            while !done.load(Ordering::Acquire) {
                let video = shared.next().expect("every snapshot is non-empty");
                seen.push(video.id);
            }
            seen
        })
    };

    let writer = {
        let shared = shared.clone();
        thread::spawn(move || {
            for generation in 1..=SWAPS {
                shared.replace(snapshot(generation));
                thread::yield_now();
            }
        })
    };

    writer.join().unwrap();
    done.store(true, Ordering::Release);
    let seen = reader.join().unwrap();

    assert!(!seen.is_empty());
    for id in &seen {
        assert!(known.contains(id), "reader saw a video from no snapshot: {id}");
    }

    assert_eq!(shared.len(), snapshot(SWAPS).len());
}

#[test]
fn reader_observes_new_snapshot_after_swap() {
    let shared = SharedPlaylist::new(snapshot(0));
    assert_eq!(shared.next().unwrap().id, "g0-v0");

    let handle = {
        let shared = shared.clone();
        thread::spawn(move || shared.replace(snapshot(3)))
    };
    let old = handle.join().unwrap();
    assert_eq!(old.len(), 1);

    let ids: Vec<_> = (0..4).map(|_| shared.next().unwrap().id).collect();
    assert_eq!(ids, ["g3-v0", "g3-v1", "g3-v2", "g3-v3"]);
}
