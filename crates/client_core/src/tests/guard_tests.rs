use super::*;

#[test]
fn acquire_is_exclusive_until_release() {
    let guard = SubmissionGuard::new();
    assert!(guard.acquire());
    assert!(!guard.acquire());
    assert!(guard.is_held());
    assert!(guard.release());
    assert!(!guard.is_held());
    assert!(guard.acquire());
}

#[test]
fn release_without_hold_reports_false() {
    let guard = SubmissionGuard::new();
    assert!(!guard.release());
    assert!(!guard.is_held());
}

#[test]
fn clones_share_one_flag() {
    let guard = SubmissionGuard::new();
    let handle = guard.clone();
    assert!(handle.same_as(&guard));
    assert!(handle.acquire());
    assert!(guard.is_held());
    assert!(!guard.acquire());
    assert!(guard.release());
    assert!(!handle.is_held());
}

#[test]
fn separate_guards_are_independent() {
    let page = SubmissionGuard::new();
    let delete = SubmissionGuard::new();
    assert!(!page.same_as(&delete));
    assert!(page.acquire());
    assert!(delete.acquire());
}

#[test]
fn permit_releases_on_drop() {
    let guard = SubmissionGuard::new();
    let permit = guard.try_hold().expect("first hold");
    assert!(permit.guard().same_as(&guard));
    assert!(guard.try_hold().is_none());
    drop(permit);
    assert!(!guard.is_held());
    assert!(guard.try_hold().is_some());
}

#[test]
fn permit_drop_after_manual_release_is_harmless() {
    let guard = SubmissionGuard::new();
    let permit = guard.try_hold().expect("hold");
    assert!(guard.release());
    drop(permit);
    assert!(!guard.is_held());
}

#[test]
fn stale_permit_does_not_release_a_newer_hold() {
    let guard = SubmissionGuard::new();
    let stale = guard.try_hold().expect("first hold");
    assert!(guard.release());
    let current = guard.try_hold().expect("second hold");
    drop(stale);
    assert!(guard.is_held());
    assert!(guard.try_hold().is_none());
    drop(current);
    assert!(!guard.is_held());
}

#[test]
fn stale_permit_leaves_manual_acquire_held() {
    let guard = SubmissionGuard::new();
    let stale = guard.try_hold().expect("hold");
    assert!(guard.release());
    assert!(guard.acquire());
    drop(stale);
    assert!(guard.is_held());
    assert!(guard.release());
}
