//! Fault model tests

use proptest::prelude::*;
use rethrow_core::kind::{FaultKind, EXCEPTION, IO_ERROR, PANIC};
use rethrow_core::{catch_panic, matching, Fault, KindMatcher};
use std::thread;

static STORAGE_ERROR: FaultKind = FaultKind::child("StorageError", &IO_ERROR);
static CORRUPT_PAGE: FaultKind = FaultKind::child("CorruptPage", &STORAGE_ERROR);
static UNRELATED_ROOT: FaultKind = FaultKind::root("Unrelated");

#[test]
fn test_caller_defined_hierarchy() {
    let fault = Fault::new(CORRUPT_PAGE, "page 12 checksum mismatch");

    assert!(fault.is_kind_of(&CORRUPT_PAGE));
    assert!(fault.is_kind_of(&STORAGE_ERROR));
    assert!(fault.is_kind_of(&IO_ERROR));
    assert!(fault.is_kind_of(&EXCEPTION));
    assert!(!fault.is_kind_of(&UNRELATED_ROOT));
    assert_eq!(fault.kind().path(), "Exception/IOError/StorageError/CorruptPage");
}

#[test]
fn test_fault_crosses_thread_join() {
    let handle = thread::spawn(|| -> () {
        Fault::new(STORAGE_ERROR, "volume detached")
            .with_user_info("volume", "vol-7")
            .raise()
    });

    let payload = handle.join().unwrap_err();
    let fault = Fault::from_panic_payload(payload);

    assert_eq!(fault.name(), "StorageError");
    assert_eq!(fault.user_info_value("volume").and_then(|v| v.as_str()), Some("vol-7"));
}

#[test]
fn test_fault_is_std_error() {
    let boxed: Box<dyn std::error::Error + Send + Sync> =
        Box::new(Fault::new(IO_ERROR, "connection reset"));
    assert_eq!(boxed.to_string(), "IOError: connection reset");
}

#[test]
fn test_predicate_matcher_on_message() {
    let matcher = matching(|fault: &Fault| fault.message().starts_with("page"));
    assert!(matcher.matches(&Fault::new(CORRUPT_PAGE, "page 3")));
    assert!(!matcher.matches(&Fault::new(CORRUPT_PAGE, "sector 3")));
}

proptest! {
    /// Property: any string panic message survives conversion into a fault
    #[test]
    fn prop_panic_message_preserved(message in "[a-zA-Z0-9 ]{0,64}") {
        let expected = message.clone();
        let fault = catch_panic(move || -> () { std::panic::panic_any(message) }).unwrap_err();

        prop_assert!(fault.is_kind_of(&PANIC));
        prop_assert_eq!(fault.message(), expected.as_str());
    }
}
