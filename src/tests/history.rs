use crate::{
    application::MessageStore,
    domain::{Identity, Message},
};
use uuid::Uuid;

#[tokio::test]
async fn append_preserves_order() {
    let store = MessageStore::new();
    let alice = Identity::generate("alice");
    let peer_id = Uuid::new_v4();

    let sent: Vec<Message> = (0..10)
        .map(|i| Message::text(&alice, peer_id, format!("msg {i}")))
        .collect();

    for message in &sent {
        assert!(store.append(peer_id, message.clone()).await);
    }

    let conversation = store.get(&peer_id).await;
    assert_eq!(conversation.len(), sent.len());

    for (got, want) in conversation.iter().zip(&sent) {
        assert_eq!(got.id, want.id);
        assert_eq!(got.content, want.content);
    }
}

#[tokio::test]
async fn duplicate_ids_are_stored_once() {
    let store = MessageStore::new();
    let alice = Identity::generate("alice");
    let peer_id = Uuid::new_v4();

    let message = Message::text(&alice, peer_id, "hello".into());

    assert!(store.append(peer_id, message.clone()).await);
    assert!(!store.append(peer_id, message.clone()).await);

    assert_eq!(store.get(&peer_id).await.len(), 1);
}

#[tokio::test]
async fn unknown_conversation_is_empty() {
    let store = MessageStore::new();

    assert!(store.get(&Uuid::new_v4()).await.is_empty());
}

#[tokio::test]
async fn conversations_are_scoped_per_peer() {
    let store = MessageStore::new();
    let alice = Identity::generate("alice");

    let bob = Uuid::new_v4();
    let carol = Uuid::new_v4();

    store
        .append(bob, Message::text(&alice, bob, "for bob".into()))
        .await;
    store
        .append(carol, Message::text(&alice, carol, "for carol".into()))
        .await;

    assert_eq!(store.get(&bob).await.len(), 1);
    assert_eq!(store.get(&carol).await.len(), 1);
    assert_eq!(store.get(&bob).await[0].content, "for bob");
}
