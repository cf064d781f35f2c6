use crate::error::GapchinError;
use crate::tests::create_test_service;

#[tokio::test]
async fn test_add_participant() {
    let service = create_test_service();

    let participant = service.add_participant("  Alice  ".to_string()).await.unwrap();

    assert!(!participant.id.is_empty());
    assert_eq!(participant.name, "Alice");
    assert!(participant.linked_payer_id.is_none());
    assert!(!participant.is_birthday);

    let listed = service.list_participants().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, participant.id);
}

#[tokio::test]
async fn test_add_participant_empty_name() {
    let service = create_test_service();
    let result = service.add_participant("   ".to_string()).await;
    assert!(matches!(result, Err(GapchinError::InvalidInput(_, _))));
}

#[tokio::test]
async fn test_remove_participant() {
    let service = create_test_service();
    let alice = service.add_participant("Alice".to_string()).await.unwrap();

    service.remove_participant(&alice.id).await.unwrap();
    assert!(service.list_participants().await.unwrap().is_empty());

    let result = service.remove_participant(&alice.id).await;
    assert!(matches!(result, Err(GapchinError::ParticipantNotFound(_))));
}

#[tokio::test]
async fn test_link_and_unlink_payer() {
    let service = create_test_service();
    let alice = service.add_participant("Alice".to_string()).await.unwrap();
    let bob = service.add_participant("Bob".to_string()).await.unwrap();

    let linked = service
        .set_linked_payer(&bob.id, Some(alice.id.clone()))
        .await
        .unwrap();
    assert_eq!(linked.linked_payer_id.as_deref(), Some(alice.id.as_str()));

    let unlinked = service.set_linked_payer(&bob.id, None).await.unwrap();
    assert!(unlinked.linked_payer_id.is_none());
}

#[tokio::test]
async fn test_link_to_self_rejected() {
    let service = create_test_service();
    let alice = service.add_participant("Alice".to_string()).await.unwrap();

    let result = service
        .set_linked_payer(&alice.id, Some(alice.id.clone()))
        .await;
    assert!(matches!(result, Err(GapchinError::SelfLink(_))));
}

#[tokio::test]
async fn test_link_to_unknown_target_rejected() {
    let service = create_test_service();
    let alice = service.add_participant("Alice".to_string()).await.unwrap();

    let result = service
        .set_linked_payer(&alice.id, Some("nobody".to_string()))
        .await;
    assert!(matches!(result, Err(GapchinError::ParticipantNotFound(_))));
}

#[tokio::test]
async fn test_link_chain_rejected() {
    let service = create_test_service();
    let alice = service.add_participant("Alice".to_string()).await.unwrap();
    let bob = service.add_participant("Bob".to_string()).await.unwrap();
    let carol = service.add_participant("Carol".to_string()).await.unwrap();

    service
        .set_linked_payer(&bob.id, Some(alice.id.clone()))
        .await
        .unwrap();

    // Carol -> Bob -> Alice would need two hops to resolve.
    let result = service
        .set_linked_payer(&carol.id, Some(bob.id.clone()))
        .await;
    assert!(matches!(result, Err(GapchinError::LinkedPayerUnavailable(_))));

    // Alice -> Carol would turn Alice into a dependent while Bob still
    // points at her, which is the same chain from the other side.
    let result = service
        .set_linked_payer(&alice.id, Some(carol.id.clone()))
        .await;
    assert!(matches!(result, Err(GapchinError::HasDependents(_))));
}

#[tokio::test]
async fn test_set_birthday() {
    let service = create_test_service();
    let alice = service.add_participant("Alice".to_string()).await.unwrap();

    let updated = service.set_birthday(&alice.id, true).await.unwrap();
    assert!(updated.is_birthday);

    let fetched = service.get_participant(&alice.id).await.unwrap().unwrap();
    assert!(fetched.is_birthday);

    let updated = service.set_birthday(&alice.id, false).await.unwrap();
    assert!(!updated.is_birthday);
}
