//! Tests for utility functions

use std::collections::HashSet;

use prometheus_background_tasks::util::generate_task_name;

#[test]
fn test_task_names_are_unique() {
    let names: HashSet<String> = (0..1_000).map(|_| generate_task_name()).collect();
    assert_eq!(names.len(), 1_000);
}

#[test]
fn test_task_name_suffix_is_uppercase() {
    let name = generate_task_name();
    let suffix = &name[17..];
    assert_eq!(suffix, suffix.to_uppercase());
    assert_eq!(suffix.len(), 36);
}

#[test]
fn test_task_names_sort_by_generation_time() {
    let earlier = generate_task_name();
    std::thread::sleep(std::time::Duration::from_millis(1100));
    let later = generate_task_name();
    assert!(earlier < later, "{earlier} should sort before {later}");
}
