//! Contract tests run against every storage backend.

use std::sync::Arc;

use cellar::{
    new_storage, Beer, JsonStorage, MemoryStorage, Review, Storage, StorageConfig, StorageError,
    StorageKind,
};
use chrono::Utc;
use tempfile::TempDir;

/// A backend under test; the temp dir must outlive the JSON backend.
struct Backend {
    kind: StorageKind,
    storage: Arc<dyn Storage>,
    _dir: TempDir,
}

async fn backends() -> Vec<Backend> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();

    let mut backends = Vec::new();
    for kind in [StorageKind::Memory, StorageKind::Json] {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            kind,
            data_dir: dir.path().to_path_buf(),
        };
        let storage = new_storage(&config).await.unwrap();
        backends.push(Backend {
            kind,
            storage,
            _dir: dir,
        });
    }
    backends
}

fn pliny() -> Beer {
    Beer::new(
        "Pliny the Elder",
        "Russian River Brewing Company",
        8.0,
        "Pliny the Elder is brewed with Amarillo, Centennial, CTZ, and Simcoe hops. \
         It is well-balanced with malt, hops, and alcohol, slightly bitter with a fresh \
         hop aroma of floral, citrus, and pine.",
    )
}

fn tecate() -> Beer {
    Beer::new(
        "Tecate",
        "Cuahutemoc Moctezuma",
        5.0,
        "Very smooth, medium bodied brew. Finishes a bit dry with husk tannins and a pasty mouthfeel.",
    )
}

#[tokio::test]
async fn test_save_beer_then_find_beers() {
    for backend in backends().await {
        let storage = &backend.storage;
        let input = pliny();

        let saved = storage.save_beer(&[input.clone()]).await.unwrap();
        assert_eq!(saved.len(), 1, "{}", backend.kind);
        assert_eq!(saved[0].id, 1, "{}", backend.kind);
        assert!(saved[0].created <= Utc::now());

        let found = storage.find_beers().await.unwrap();
        assert_eq!(found, saved, "{}", backend.kind);
        assert_eq!(found[0].name, input.name);
        assert_eq!(found[0].brewery, input.brewery);
        assert_eq!(found[0].abv, input.abv);
        assert_eq!(found[0].short_desc, input.short_desc);
    }
}

#[tokio::test]
async fn test_save_beer_returns_error_if_beer_already_exists() {
    for backend in backends().await {
        let storage = &backend.storage;

        storage.save_beer(&[pliny()]).await.unwrap();
        let err = storage.save_beer(&[pliny()]).await.unwrap_err();

        assert!(matches!(err, StorageError::DuplicateEntity), "{}", backend.kind);
        assert_eq!(err.to_string(), "beer already exists");
        assert_eq!(storage.find_beers().await.unwrap().len(), 1);
    }
}

#[tokio::test]
async fn test_save_two_beers_in_one_call() {
    for backend in backends().await {
        let storage = &backend.storage;

        let saved = storage.save_beer(&[pliny(), tecate()]).await.unwrap();

        assert_ne!(saved[0].id, saved[1].id, "{}", backend.kind);
        let found = storage.find_beers().await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, "Pliny the Elder");
        assert_eq!(found[1].name, "Tecate");
    }
}

#[tokio::test]
async fn test_batch_stops_at_first_duplicate() {
    for backend in backends().await {
        let storage = &backend.storage;
        storage.save_beer(&[tecate()]).await.unwrap();

        let bath = Beer::new("Bath Ale", "Hall & Woodhouse", 4.5, "");
        let err = storage
            .save_beer(&[pliny(), tecate(), bath])
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::DuplicateEntity), "{}", backend.kind);
        let names: Vec<_> = storage
            .find_beers()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["Tecate", "Pliny the Elder"], "{}", backend.kind);
    }
}

#[tokio::test]
async fn test_duplicate_key_is_case_sensitive() {
    for backend in backends().await {
        let storage = &backend.storage;
        storage.save_beer(&[pliny()]).await.unwrap();

        let mut shouty = pliny();
        shouty.name = shouty.name.to_uppercase();

        assert!(storage.save_beer(&[shouty]).await.is_ok(), "{}", backend.kind);
    }
}

#[tokio::test]
async fn test_find_beer_by_id() {
    for backend in backends().await {
        let storage = &backend.storage;
        let saved = storage.save_beer(&[pliny(), tecate()]).await.unwrap();

        let found = storage.find_beer(&Beer::with_id(saved[1].id)).await.unwrap();
        assert_eq!(found, vec![saved[1].clone()], "{}", backend.kind);

        let missing = storage.find_beer(&Beer::with_id(99)).await.unwrap();
        assert!(missing.is_empty(), "{}", backend.kind);
    }
}

#[tokio::test]
async fn test_find_requires_beer_id() {
    for backend in backends().await {
        let storage = &backend.storage;
        storage.save_beer(&[pliny()]).await.unwrap();

        let err = storage.find_beer(&Beer::default()).await.unwrap_err();
        assert!(matches!(err, StorageError::MissingKey), "{}", backend.kind);
        assert_eq!(err.to_string(), "no beer ID specified");

        let err = storage.find_review(&Review::default()).await.unwrap_err();
        assert!(matches!(err, StorageError::MissingKey), "{}", backend.kind);
        assert_eq!(err.to_string(), "no beer ID specified");
    }
}

#[tokio::test]
async fn test_empty_backend() {
    for backend in backends().await {
        let storage = &backend.storage;
        assert!(storage.find_beers().await.unwrap().is_empty(), "{}", backend.kind);
        assert!(storage
            .find_review(&Review::for_beer(1))
            .await
            .unwrap()
            .is_empty());
    }
}

#[tokio::test]
async fn test_save_review_then_find() {
    for backend in backends().await {
        let storage = &backend.storage;
        storage.save_beer(&[pliny()]).await.unwrap();

        let input = Review::new(1, "Wonder", "Woman", 8, "Nice beer.");
        let saved = storage.save_review(&input).await.unwrap();

        assert_ne!(saved.id, 0, "{}", backend.kind);
        assert!(saved.created <= Utc::now());

        let found = storage.find_review(&Review::for_beer(1)).await.unwrap();
        assert!(found.contains(&saved), "{}", backend.kind);
        assert_eq!(found[0].first_name, input.first_name);
        assert_eq!(found[0].text, input.text);
    }
}

#[tokio::test]
async fn test_review_of_unknown_beer_is_accepted() {
    for backend in backends().await {
        let storage = &backend.storage;

        let saved = storage
            .save_review(&Review::new(42, "John", "Doe", 3, ""))
            .await
            .unwrap();

        assert_eq!(saved.beer_id, 42, "{}", backend.kind);
        assert!(storage.find_beer(&Beer::with_id(42)).await.unwrap().is_empty());
        assert_eq!(
            storage.find_review(&Review::for_beer(42)).await.unwrap(),
            vec![saved]
        );
    }
}

#[tokio::test]
async fn test_concurrent_saves_get_unique_ids() {
    const TASKS: u64 = 32;

    for backend in backends().await {
        let mut handles = Vec::new();
        for i in 0..TASKS {
            let storage = Arc::clone(&backend.storage);
            handles.push(tokio::spawn(async move {
                let beer = Beer::new(format!("Beer {i}"), "Concurrent Brewing", 5.0, "");
                let review = Review::new(1, "Load", "Test", 5, format!("review {i}"));
                let beer_id = storage.save_beer(&[beer]).await.unwrap()[0].id;
                let review_id = storage.save_review(&review).await.unwrap().id;
                (beer_id, review_id)
            }));
        }

        let mut beer_ids = Vec::new();
        let mut review_ids = Vec::new();
        for handle in handles {
            let (beer_id, review_id) = handle.await.expect("task panicked");
            beer_ids.push(beer_id);
            review_ids.push(review_id);
        }
        beer_ids.sort_unstable();
        review_ids.sort_unstable();

        let expected: Vec<u64> = (1..=TASKS).collect();
        assert_eq!(beer_ids, expected, "{}", backend.kind);
        assert_eq!(review_ids, expected, "{}", backend.kind);
    }
}

#[tokio::test]
async fn test_concurrent_duplicate_saves_keep_one() {
    for backend in backends().await {
        let mut handles = Vec::new();
        for _ in 0..16 {
            let storage = Arc::clone(&backend.storage);
            handles.push(tokio::spawn(async move { storage.save_beer(&[pliny()]).await }));
        }

        let mut ok = 0;
        for handle in handles {
            match handle.await.expect("task panicked") {
                Ok(_) => ok += 1,
                Err(StorageError::DuplicateEntity) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(ok, 1, "{}", backend.kind);
        assert_eq!(backend.storage.find_beers().await.unwrap().len(), 1);
    }
}

#[tokio::test]
async fn test_concrete_backends_behind_trait_object() {
    let dir = tempfile::tempdir().unwrap();
    let storages: Vec<Box<dyn Storage>> = vec![
        Box::new(MemoryStorage::new()),
        Box::new(JsonStorage::open(dir.path()).await.unwrap()),
    ];

    for storage in storages {
        storage.save_beer(&[pliny()]).await.unwrap();
        assert_eq!(
            storage.save_beer(&[pliny()]).await.unwrap_err().to_string(),
            "beer already exists"
        );
    }
}

#[tokio::test]
async fn test_json_backend_reopens_through_factory() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig::json(dir.path());

    {
        let storage = new_storage(&config).await.unwrap();
        storage.save_beer(&[pliny(), tecate()]).await.unwrap();
        storage
            .save_review(&Review::new(2, "John", "Doe", 3, "Fine with lime."))
            .await
            .unwrap();
    }

    let storage = new_storage(&config).await.unwrap();
    assert_eq!(storage.find_beers().await.unwrap().len(), 2);
    assert_eq!(storage.find_review(&Review::for_beer(2)).await.unwrap().len(), 1);

    let next = storage
        .save_review(&Review::new(2, "Jane", "Doe", 4, ""))
        .await
        .unwrap();
    assert_eq!(next.id, 2);
}

#[test]
fn test_unknown_backend_tag() {
    let err = "mongodb".parse::<StorageKind>().unwrap_err();
    assert!(matches!(err, StorageError::UnsupportedBackend(_)));
}
