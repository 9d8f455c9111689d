use std::collections::HashSet;

use vm::{
    frame_selector::{LowestFrameSelector, RandomFrameSelector},
    Mmu, ProcessDescription, RejectReason, VmConfig,
};

fn seeded_mmu(seed: u64) -> Mmu<RandomFrameSelector> {
    Mmu::new(VmConfig::default(), RandomFrameSelector::seeded(seed)).unwrap()
}

#[test]
fn repeated_offset_hits_after_first_miss() {
    let mut mmu = seeded_mmu(1);

    let rejections = mmu
        .admit_all(vec![ProcessDescription::new("P", 4096, vec![0, 4096, 0])])
        .unwrap();
    mmu.run().unwrap();

    assert!(rejections.is_empty());

    let report = mmu.report();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].hit_count, 1);
    assert_eq!(report[0].miss_count, 2);
    assert_eq!(report[0].page_table.len(), 2);
    assert_ne!(report[0].page_table[0], report[0].page_table[1]);
    assert!(report[0].page_table.iter().all(|&f| f < 250));
}

#[test]
fn process_that_does_not_fit_is_left_out() {
    let mut mmu = seeded_mmu(2);
    let pages_200 = 199 * 4096;

    let rejections = mmu
        .admit_all(vec![
            ProcessDescription::new("first", pages_200, vec![0, 4096]),
            ProcessDescription::new("second", pages_200, vec![0]),
        ])
        .unwrap();

    assert_eq!(rejections.len(), 1);
    assert_eq!(rejections[0].id, "second");
    assert_eq!(rejections[0].reason, RejectReason::InsufficientFrames);
    assert_eq!(rejections[0].required, 200);
    assert_eq!(rejections[0].available, 50);
    assert_eq!(mmu.frame_pool().free_count(), 50);

    mmu.run().unwrap();

    let ids: Vec<String> = mmu.report().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["first".to_string()]);
}

#[test]
fn smaller_process_still_fits_after_a_rejection() {
    let mut mmu = seeded_mmu(3);

    let rejections = mmu
        .admit_all(vec![
            ProcessDescription::new("a", 199 * 4096, vec![0]),
            ProcessDescription::new("b", 199 * 4096, vec![0]),
            ProcessDescription::new("c", 49 * 4096, vec![0]),
        ])
        .unwrap();

    assert_eq!(rejections.len(), 1);
    assert_eq!(mmu.processes().len(), 2);
    assert_eq!(mmu.frame_pool().free_count(), 0);
}

#[test]
fn out_of_bounds_access_aborts_everything() {
    let mut mmu = seeded_mmu(4);

    let result = mmu.admit_all(vec![
        ProcessDescription::new("ok", 4096, vec![0]),
        ProcessDescription::new("bad", 4096, vec![0, 2 * 4096]),
        ProcessDescription::new("never", 0, vec![0]),
    ]);

    let err = result.unwrap_err();
    assert_eq!(
        err.to_string(),
        "exceeded program segment: process bad accesses offset 8192"
    );
}

#[test]
fn empty_workload_completes_without_turns() {
    let mut mmu = seeded_mmu(5);

    let rejections = mmu.admit_all(Vec::new()).unwrap();
    let summary = mmu.run().unwrap();

    assert!(rejections.is_empty());
    assert_eq!(summary.turns, 0);
    assert!(mmu.report().is_empty());
    assert!(mmu.is_complete());
}

#[test]
fn frames_are_never_shared() {
    let mut mmu = seeded_mmu(6);
    let descriptions = (0..12)
        .map(|i| ProcessDescription::new(format!("p{}", i), i * 3 * 4096 + 100, vec![0]))
        .collect::<Vec<_>>();

    mmu.admit_all(descriptions).unwrap();

    let mut seen = HashSet::new();
    let mut total_pages = 0;

    for process in mmu.processes() {
        total_pages += process.page_count();
        for &frame in process.page_table().frames() {
            assert!(seen.insert(frame), "frame {} handed out twice", frame);
            assert!(!mmu.frame_pool().is_free(frame));
        }
    }

    assert_eq!(total_pages, mmu.frame_pool().allocated_count());
    assert!(total_pages <= 250);
}

#[test]
fn each_distinct_page_misses_exactly_once() {
    let mut mmu = Mmu::new(VmConfig::default(), LowestFrameSelector).unwrap();
    let traces = vec![
        vec![0, 100, 4096, 8192, 0, 4097, 12000, 8193, 50, 4096, 3, 12287],
        vec![0, 0, 0],
        vec![20000, 1, 16384, 20479, 0],
    ];

    mmu.admit_all(
        traces
            .iter()
            .enumerate()
            .map(|(i, trace)| ProcessDescription::new(format!("p{}", i), 20480, trace.clone())),
    )
    .unwrap();
    mmu.run().unwrap();

    let mut distinct_total = 0;

    for (process, trace) in mmu.processes().iter().zip(&traces) {
        let distinct: HashSet<usize> = trace.iter().map(|offset| offset / 4096).collect();
        distinct_total += distinct.len();

        assert_eq!(process.hit_count() + process.miss_count(), trace.len());
        assert_eq!(process.miss_count(), distinct.len());
    }

    assert_eq!(mmu.tlb().len(), distinct_total);
}

#[test]
fn equal_traces_get_equal_turns() {
    let mut mmu = Mmu::new(VmConfig::default(), LowestFrameSelector).unwrap();

    mmu.admit_all(vec![
        ProcessDescription::new("a", 0, vec![0; 23]),
        ProcessDescription::new("b", 0, vec![0; 23]),
        ProcessDescription::new("c", 0, vec![0; 9]),
    ])
    .unwrap();
    mmu.run().unwrap();

    let report = mmu.report();
    assert_eq!(report[0].dispatch_count, 5);
    assert_eq!(report[1].dispatch_count, 5);
    assert_eq!(report[2].dispatch_count, 2);
}

#[test]
fn same_seed_same_page_tables() {
    let descriptions = vec![
        ProcessDescription::new("a", 10 * 4096, vec![0]),
        ProcessDescription::new("b", 3 * 4096, vec![0]),
    ];

    let mut first = seeded_mmu(77);
    let mut second = seeded_mmu(77);
    first.admit_all(descriptions.clone()).unwrap();
    second.admit_all(descriptions).unwrap();

    assert_eq!(first.report(), second.report());
}

#[test]
fn repeated_executable_gets_its_own_misses() {
    let mut mmu = Mmu::new(VmConfig::default(), LowestFrameSelector).unwrap();

    mmu.admit_all(vec![
        ProcessDescription::new("ls", 4096, vec![0, 4096, 0]),
        ProcessDescription::new("ls", 4096, vec![0, 4096, 0]),
    ])
    .unwrap();
    mmu.run().unwrap();

    let report = mmu.report();
    assert_eq!(report[0].page_table, vec![0, 1]);
    assert_eq!(report[1].page_table, vec![2, 3]);

    for process in &report {
        assert_eq!(process.id, "ls");
        assert_eq!(process.hit_count, 1);
        assert_eq!(process.miss_count, 2);
    }

    let frames: Vec<usize> = mmu.tlb().entries().iter().map(|e| e.frame_number).collect();
    assert_eq!(frames, vec![0, 1, 2, 3]);
}
