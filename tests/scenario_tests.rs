mod common;

use common::RecordingNotifier;
use petframe::application::engine::{EconomyEngine, Outcome};
use petframe::application::service::{PetRequest, PetService};
use petframe::config::{FrameSettings, ServiceSettings};
use petframe::domain::pet::{Fid, PetState, PetVariant};
use petframe::domain::ports::PetStore;
use petframe::error::PetError;
use petframe::infrastructure::in_memory::InMemoryPetStore;
use petframe::interfaces::frame::FrameRenderer;

fn service_with(store: InMemoryPetStore, notifier: RecordingNotifier) -> PetService {
    PetService::new(
        EconomyEngine::default(),
        Box::new(store),
        Box::new(notifier),
        ServiceSettings::default(),
    )
    .with_seed(3)
}

async fn seed(store: &InMemoryPetStore, fid: &str, hunger: u8, happiness: u8, coins: u64) {
    let pet = PetState::new(Fid::new(fid).unwrap(), PetVariant::Cat).with_stats(hunger, happiness, coins);
    store.upsert(pet, None).await.unwrap();
}

#[tokio::test]
async fn test_new_pet_feed() {
    let service = service_with(InMemoryPetStore::new(), RecordingNotifier::default());
    let handled = service.handle(PetRequest::new("u1", "feed").at(1)).await.unwrap();

    assert!(handled.created);
    assert_eq!(
        (handled.pet.hunger, handled.pet.happiness, handled.pet.coins),
        (4, 5, 1)
    );
}

#[tokio::test]
async fn test_buy_toy() {
    let store = InMemoryPetStore::new();
    seed(&store, "u1", 0, 5, 10).await;
    let service = service_with(store, RecordingNotifier::default());

    let handled = service
        .handle(PetRequest::new("u1", "buy").with_item("toy").at(1))
        .await
        .unwrap();
    assert_eq!(handled.outcome, Outcome::Applied);
    assert_eq!(
        (handled.pet.hunger, handled.pet.happiness, handled.pet.coins),
        (0, 7, 5)
    );
}

#[tokio::test]
async fn test_buy_toy_insufficient_funds_leaves_store_untouched() {
    let store = InMemoryPetStore::new();
    seed(&store, "u1", 5, 5, 2).await;
    let service = service_with(store.clone(), RecordingNotifier::default());
    let fid = Fid::new("u1").unwrap();
    let before = store.load(&fid).await.unwrap().unwrap();

    let result = service
        .handle(PetRequest::new("u1", "buy").with_item("toy").at(1))
        .await;
    assert!(matches!(result, Err(PetError::InsufficientFunds { .. })));
    assert_eq!(store.load(&fid).await.unwrap().unwrap(), before);
}

#[tokio::test]
async fn test_hungry_pet_triggers_notification() {
    let store = InMemoryPetStore::new();
    let notifier = RecordingNotifier::default();
    // hunger 2 before feeding, 1 after
    seed(&store, "u1", 2, 8, 0).await;
    let service = service_with(store.clone(), notifier.clone());

    let handled = service
        .handle(PetRequest::new("u1", "feed").at(4_000_000))
        .await
        .unwrap();
    assert!(handled.notified);
    assert_eq!(handled.pet.hunger, 1);
    assert_eq!(handled.pet.last_notified, Some(4_000_000));

    let stored = store.load(&Fid::new("u1").unwrap()).await.unwrap().unwrap();
    assert_eq!(stored.value.last_notified, Some(4_000_000));

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "u1");
    assert_eq!(
        sent[0].1,
        "Your pet needs attention! Come back to feed and play with it."
    );
}

#[tokio::test]
async fn test_notification_respects_cooldown_across_requests() {
    let store = InMemoryPetStore::new();
    let notifier = RecordingNotifier::default();
    seed(&store, "u1", 1, 1, 0).await;
    let service = service_with(store, notifier.clone());

    for now in [4_000_000, 5_000_000, 7_600_000, 7_600_001] {
        service.handle(PetRequest::new("u1", "feed").at(now)).await.unwrap();
    }

    // fires at 4_000_000, then again only once the hour has fully passed
    assert_eq!(notifier.sent().len(), 2);
}

#[tokio::test]
async fn test_legacy_pet_without_timer_never_notifies() {
    let store = InMemoryPetStore::new();
    let notifier = RecordingNotifier::default();
    let mut legacy = PetState::new(Fid::new("old").unwrap(), PetVariant::Owl).with_stats(0, 0, 0);
    legacy.last_notified = None;
    legacy.variant = None;
    store.upsert(legacy, None).await.unwrap();
    let service = service_with(store, notifier.clone());

    let handled = service
        .handle(PetRequest::new("old", "play").at(10_000_000))
        .await
        .unwrap();
    assert!(!handled.notified);
    assert_eq!(handled.pet.last_notified, None);
    assert_eq!(handled.pet.variant, None);
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_generated_feed_stream() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("requests.csv");
    common::generate_requests(&path, "u9", 12).unwrap();

    let service = service_with(InMemoryPetStore::new(), RecordingNotifier::default());
    let reader =
        petframe::interfaces::csv::request_reader::RequestReader::new(std::fs::File::open(&path).unwrap());
    for request in reader.requests() {
        service.handle(request.unwrap()).await.unwrap();
    }

    let pets = service.shutdown().await.unwrap();
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].hunger, 0);
    assert_eq!(pets[0].coins, 12);
}

#[tokio::test]
async fn test_opaque_fids_are_served_and_encoded_in_targets() {
    let service = service_with(InMemoryPetStore::new(), RecordingNotifier::default());
    let renderer = FrameRenderer::new(FrameSettings {
        base_url: "https://pets.example/api/frame".to_string(),
        ..FrameSettings::default()
    });

    for (fid, encoded) in [
        ("alice@warpcast", "alice%40warpcast"),
        ("user:1", "user%3A1"),
        ("名前", "%E5%90%8D%E5%89%8D"),
    ] {
        let handled = service.handle(PetRequest::new(fid, "feed").at(1)).await.unwrap();
        assert!(handled.created);
        assert_eq!(handled.pet.fid.as_str(), fid);

        let response = renderer.render(&handled.pet, service.engine().catalog());
        assert_eq!(response.status, 200);
        assert!(response.body.contains(&format!(
            "https://pets.example/api/frame?fid={encoded}&amp;action=feed"
        )));
    }

    let pets = service.shutdown().await.unwrap();
    assert_eq!(pets.len(), 3);
}
