//! Concurrent execution of the parallel bucket: no report may be lost or
//! duplicated, whatever order completions arrive in.

use std::collections::HashSet;

use roster::{register, Control, Operation, Registry, TestProcedure, TestStatus};

macro_rules! trivial_parallel_tests {
    ($($name:ident),* $(,)?) => {
        $(
            fn $name(op: &mut dyn Operation) -> Control {
                register!(op)?;
                op.assert(true)
            }
        )*
        const TRIVIAL: &[TestProcedure] = &[$($name),*];
    };
}

trivial_parallel_tests!(
    p000, p001, p002, p003, p004, p005, p006, p007, p008, p009, p010, p011,
    p012, p013, p014, p015, p016, p017, p018, p019, p020, p021, p022, p023,
    p024, p025, p026, p027, p028, p029, p030, p031, p032, p033, p034, p035,
    p036, p037, p038, p039, p040, p041, p042, p043, p044, p045, p046, p047,
    p048, p049, p050, p051, p052, p053, p054, p055, p056, p057, p058, p059,
    p060, p061, p062, p063, p064, p065, p066, p067, p068, p069, p070, p071,
    p072, p073, p074, p075, p076, p077, p078, p079, p080, p081, p082, p083,
    p084, p085, p086, p087, p088, p089, p090, p091, p092, p093, p094, p095,
    p096, p097, p098, p099,
);

#[test]
fn one_hundred_parallel_procedures_yield_one_hundred_unique_reports() {
    let mut registry = Registry::new();
    registry.register(TRIVIAL.to_vec());

    let reports = registry.run();
    assert_eq!(reports.len(), 100);
    assert!(reports.iter().all(|r| r.status == TestStatus::Passed));

    let names: HashSet<&str> = reports.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names.len(), 100, "duplicate or lost report names");
}

#[test]
fn parallel_runs_are_complete_across_many_groups() {
    let mut registry = Registry::new();
    for chunk in TRIVIAL.chunks(10) {
        registry.register(chunk.to_vec());
    }

    let reports = registry.run();
    assert_eq!(reports.len(), 100);
    let names: HashSet<&str> = reports.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names.len(), 100);
}
