use crate::constants::{SETTLEMENT_CALCULATED, SUMMARY_GENERATED};
use crate::tests::create_test_service;

#[tokio::test]
async fn test_settlement_through_service() {
    let service = create_test_service();
    let alice = service.add_participant("Alice".to_string()).await.unwrap();
    let bob = service.add_participant("Bob".to_string()).await.unwrap();
    let carol = service.add_participant("Carol".to_string()).await.unwrap();

    service
        .add_expense("Dinner".to_string(), 30.0, &alice.id, None)
        .await
        .unwrap();

    let result = service.get_settlement().await.unwrap();

    assert_eq!(result.balances[&alice.id], 20.0);
    assert_eq!(result.balances[&bob.id], -10.0);
    assert_eq!(result.balances[&carol.id], -10.0);

    assert_eq!(result.transactions.len(), 2);
    assert_eq!(result.transactions[0].from_id, bob.id);
    assert_eq!(result.transactions[0].to_id, alice.id);
    assert_eq!(result.transactions[1].from_id, carol.id);
    assert_eq!(result.transactions[1].to_id, alice.id);
}

#[tokio::test]
async fn test_couple_settles_to_zero() {
    let service = create_test_service();
    let alice = service.add_participant("Alice".to_string()).await.unwrap();
    let bob = service.add_participant("Bob".to_string()).await.unwrap();
    service
        .set_linked_payer(&bob.id, Some(alice.id.clone()))
        .await
        .unwrap();

    service
        .add_expense("Dinner".to_string(), 20.0, &alice.id, None)
        .await
        .unwrap();

    let result = service.get_settlement().await.unwrap();

    assert_eq!(result.balances[&alice.id], 0.0);
    assert_eq!(result.balances[&bob.id], 0.0);
    assert!(result.transactions.is_empty());
}

#[tokio::test]
async fn test_settlement_cache_invalidated_on_change() {
    let service = create_test_service();
    let alice = service.add_participant("Alice".to_string()).await.unwrap();
    let bob = service.add_participant("Bob".to_string()).await.unwrap();

    let before = service.get_settlement().await.unwrap();
    assert!(before.transactions.is_empty());

    service
        .add_expense(
            "Dinner".to_string(),
            20.0,
            &alice.id,
            Some(vec![bob.id.clone()]),
        )
        .await
        .unwrap();

    // The cached empty settlement must not survive the new expense.
    let after = service.get_settlement().await.unwrap();
    assert_eq!(after.transactions.len(), 1);
    assert_eq!(after.transactions[0].from_id, bob.id);
    assert_eq!(after.transactions[0].to_id, alice.id);
    assert_eq!(after.transactions[0].amount, 20.0);

    // A repeated query is served from cache and logs no second calculation.
    let repeated = service.get_settlement().await.unwrap();
    assert_eq!(repeated, after);
    let calculations = service
        .get_app_logs()
        .await
        .unwrap()
        .iter()
        .filter(|log| log.action == SETTLEMENT_CALCULATED)
        .count();
    assert_eq!(calculations, 2);
}

#[tokio::test]
async fn test_summary_lists_transactions() {
    let service = create_test_service();
    let alice = service.add_participant("Alice".to_string()).await.unwrap();
    let bob = service.add_participant("Bob".to_string()).await.unwrap();

    service
        .add_expense(
            "Karaoke".to_string(),
            100.0,
            &alice.id,
            Some(vec![alice.id.clone(), bob.id.clone()]),
        )
        .await
        .unwrap();

    let message = service.generate_summary().await.unwrap();

    assert!(message.contains("Karaoke"));
    assert!(message.contains("👉"));
    assert!(message.contains("Alice"));
    assert!(message.contains("Bob"));

    let logs = service.get_app_logs().await.unwrap();
    assert!(logs.iter().any(|log| log.action == SUMMARY_GENERATED));
}

#[tokio::test]
async fn test_summary_when_nothing_owed() {
    let service = create_test_service();
    service.add_participant("Alice".to_string()).await.unwrap();

    let message = service.generate_summary().await.unwrap();
    assert!(!message.contains("👉"));
    assert!(!message.is_empty());
}
