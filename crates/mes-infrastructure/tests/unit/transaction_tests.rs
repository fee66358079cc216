//! Tests for transaction scopes and the transactional wrapper

use crate::test_utils::RecordingTransactionManager;
use mes_domain::error::Error;
use mes_infrastructure::context::set_transaction_manager;
use mes_infrastructure::transaction::{TransactionScope, in_transaction, transactional};
use std::panic::{AssertUnwindSafe, catch_unwind};

#[test]
fn test_success_commits_then_closes() {
    let manager = RecordingTransactionManager::new();
    let _scope = set_transaction_manager(manager.clone());

    let value = transactional(|| Ok(7)).unwrap();

    assert_eq!(value, 7);
    assert_eq!(manager.events(), vec!["begin", "commit", "close"]);
}

#[test]
fn test_error_rolls_back_then_closes() {
    let manager = RecordingTransactionManager::new();
    let _scope = set_transaction_manager(manager.clone());

    let err = transactional::<()>(|| Err(Error::internal("scrap limit exceeded"))).unwrap_err();

    assert!(err.to_string().contains("scrap limit exceeded"));
    assert_eq!(manager.events(), vec!["begin", "rollback", "close"]);
}

#[test]
fn test_panic_rolls_back_then_closes() {
    let manager = RecordingTransactionManager::new();
    let _scope = set_transaction_manager(manager.clone());

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        transactional::<()>(|| panic!("conveyor jammed"))
    }));

    assert!(outcome.is_err());
    assert_eq!(manager.events(), vec!["begin", "rollback", "close"]);
    assert!(!in_transaction());
}

#[test]
fn test_nested_calls_share_one_transaction() {
    let manager = RecordingTransactionManager::new();
    let _scope = set_transaction_manager(manager.clone());

    let total = transactional(|| {
        let a = transactional(|| Ok(1))?;
        let b = transactional(|| transactional(|| Ok(2)))?;
        Ok(a + b)
    })
    .unwrap();

    assert_eq!(total, 3);
    assert_eq!(manager.count("begin"), 1);
    assert_eq!(manager.count("commit"), 1);
    assert_eq!(manager.count("close"), 1);
    assert_eq!(manager.count("rollback"), 0);
}

#[test]
fn test_inner_error_rolls_back_outer_transaction() {
    let manager = RecordingTransactionManager::new();
    let _scope = set_transaction_manager(manager.clone());

    let result = transactional(|| {
        transactional::<()>(|| Err(Error::internal("inner failed")))?;
        Ok(())
    });

    assert!(result.is_err());
    assert_eq!(manager.events(), vec!["begin", "rollback", "close"]);
}

#[test]
fn test_commit_failure_is_returned() {
    let manager = RecordingTransactionManager::failing_commit();
    let _scope = set_transaction_manager(manager.clone());

    let err = transactional(|| Ok(1)).unwrap_err();

    assert!(matches!(err, Error::Transaction { .. }));
    assert_eq!(manager.events(), vec!["begin", "commit", "close"]);
}

#[test]
fn test_without_manager_uses_noop() {
    assert!(transactional(|| Ok("done")).is_ok());
}

#[test]
fn test_dropped_scope_rolls_back() {
    let manager = RecordingTransactionManager::new();
    {
        let _tx = TransactionScope::begin(&*manager).unwrap();
    }
    assert_eq!(manager.events(), vec!["begin", "rollback", "close"]);
}

#[test]
fn test_explicit_commit_is_not_followed_by_rollback() {
    let manager = RecordingTransactionManager::new();
    let tx = TransactionScope::begin(&*manager).unwrap();
    tx.commit().unwrap();
    assert_eq!(manager.events(), vec!["begin", "commit", "close"]);
}

#[test]
fn test_manager_scope_is_per_thread() {
    let manager = RecordingTransactionManager::new();
    let _scope = set_transaction_manager(manager.clone());

    std::thread::spawn(|| transactional(|| Ok(())).unwrap())
        .join()
        .unwrap();

    assert!(manager.events().is_empty());
}
