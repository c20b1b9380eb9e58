//! This bench test simulates the per-keystroke segmentation sync over a long
//! sentence, and the merge operation across a workspace of pages.

#![allow(missing_docs)]

use architect::{
    domain::{ActivityType, DataUnit},
    segment, Resource, Workspace,
};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use tempfile::TempDir;

/// A delimited sentence of `n` segments, with a matching secondary field.
fn delimited_pair(n: usize) -> (String, String) {
    let primary: Vec<String> = (0..n).map(|i| format!("w{i}")).collect();
    let secondary: Vec<String> = (0..n).map(|i| format!("s{i}")).collect();
    (primary.join("/"), secondary.join("/"))
}

fn sync_secondary(c: &mut Criterion) {
    let (primary, secondary) = delimited_pair(64);
    let extended = format!("{primary}/tail");

    c.bench_function("sync secondary after delimiter insertion", |b| {
        b.iter(|| segment::sync_secondary(&primary, &extended, &secondary));
    });
}

fn merge_at(c: &mut Criterion) {
    let (primary, secondary) = delimited_pair(64);

    c.bench_function("merge middle segments", |b| {
        b.iter(|| segment::merge_at(&primary, &secondary, 31));
    });
}

/// Generates a workspace with many segmented items
fn preseed_workspace(root: std::path::PathBuf) {
    let mut workspace = Workspace::open(root).unwrap();
    let (primary, secondary) = delimited_pair(16);
    for page in 1..=10 {
        let locator = format!("chinese-2A-001-{page}").parse().unwrap();
        workspace
            .create_stack(&locator, ActivityType::Listening)
            .unwrap();
        for _ in 0..10 {
            workspace
                .add_item(
                    &locator,
                    1,
                    Resource::with_content(
                        DataUnit::Sentence,
                        primary.clone(),
                        Some(secondary.clone()),
                        String::new(),
                    ),
                )
                .unwrap();
        }
    }
    workspace.flush().unwrap();
}

fn open_and_report(c: &mut Criterion) {
    c.bench_function("open workspace and collect mismatches", |b| {
        b.iter_batched(
            || {
                let tmp_dir = TempDir::new().unwrap();
                preseed_workspace(tmp_dir.path().to_path_buf());
                tmp_dir
            },
            |tmp_dir| {
                let workspace = Workspace::open(tmp_dir.path().to_path_buf()).unwrap();
                workspace.mismatches()
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, sync_secondary, merge_at, open_and_report);
criterion_main!(benches);
