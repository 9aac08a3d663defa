//! The process-wide session before `init`.
//!
//! Lives in its own test binary: no test here may call `facade::init`.

use bookkeeping_client::{BookkeepingError, facade};
use bookkeeping_core::log::CreateLog;
use bookkeeping_core::run::{EndRun, RunQuality};

#[test]
fn test_session_is_not_initialized() {
    assert!(!facade::is_initialized());
    assert!(matches!(facade::session(), Err(BookkeepingError::NotInitialized)));
}

#[tokio::test]
async fn test_operations_fail_without_session() {
    let err = facade::end_run(80, &EndRun::new().with_quality(RunQuality::Bad))
        .await
        .unwrap_err();
    assert!(matches!(err, BookkeepingError::NotInitialized));

    let err = facade::create_log(&CreateLog::new("title", "text")).await.unwrap_err();
    assert!(matches!(err, BookkeepingError::NotInitialized));

    let err = facade::get_runs().await.unwrap_err();
    assert!(matches!(err, BookkeepingError::NotInitialized));
}
