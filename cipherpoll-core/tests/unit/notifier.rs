use cipherpoll_core::application::{Notifier, Severity};
use cipherpoll_core::infrastructure::config::NotifyConfig;
use std::time::Duration;

#[test]
fn test_expiry_is_relative_to_last_write() {
    let notifier = Notifier::new(&NotifyConfig { success_ttl_ms: 40, error_ttl_ms: 40 });
    notifier.success("first");
    std::thread::sleep(Duration::from_millis(25));
    // A second write rebases the deadline; the first write's timer must not
    // clear it.
    notifier.success("second");
    std::thread::sleep(Duration::from_millis(25));
    let notice = notifier.current().expect("second notice still visible");
    assert_eq!(notice.message, "second");
    std::thread::sleep(Duration::from_millis(25));
    assert!(notifier.current().is_none());
}

#[test]
fn test_error_preempts_pending_without_queueing() {
    let notifier = Notifier::default();
    notifier.pending("submitting");
    notifier.error("rejected");
    notifier.pending("retrying");
    let notice = notifier.current().expect("notice");
    assert_eq!(notice.severity, Severity::Pending);
    assert_eq!(notice.message, "retrying");
}
