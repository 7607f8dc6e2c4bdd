//! Cultivar and crop-type reference data tests

use std::sync::Arc;

use uuid::Uuid;

use beet_guru_app::services::cultivars::CreateCultivarInput;
use beet_guru_app::store::{Latency, MemoryStore};
use beet_guru_app::{AppContext, AppError};

async fn context() -> AppContext {
    AppContext::new(Arc::new(MemoryStore::seeded(Latency::none())))
}

#[tokio::test]
async fn test_crop_types_are_the_fixed_reference_set() {
    let ctx = context().await;
    let names: Vec<String> = ctx
        .cultivars
        .crop_types()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Fodder Beet", "Sugar Beet", "Mangels"]);
}

#[tokio::test]
async fn test_list_filters_by_crop_type() {
    let ctx = context().await;
    let fodder_beet = ctx
        .cultivars
        .crop_types()
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.name == "Fodder Beet")
        .unwrap();

    let all = ctx.cultivars.list(None).await.unwrap();
    let fodder_only = ctx.cultivars.list(Some(fodder_beet.id)).await.unwrap();

    assert!(fodder_only.len() < all.len());
    assert!(fodder_only
        .iter()
        .all(|c| c.crop_type_id == fodder_beet.id));
    // Sorted by name for the select control
    assert!(fodder_only.windows(2).all(|w| w[0].name <= w[1].name));
}

#[tokio::test]
async fn test_create_adds_a_local_cultivar() {
    let ctx = context().await;
    let fodder_beet = ctx
        .cultivars
        .crop_types()
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.name == "Fodder Beet")
        .unwrap();

    let created = ctx
        .cultivars
        .create(CreateCultivarInput {
            name: "Feldherr".to_string(),
            crop_type_id: fodder_beet.id,
            dry_matter_range: "15-17%".to_string(),
            yield_range: "19-24 t DM/ha".to_string(),
            growing_time_range: "25-30 weeks".to_string(),
            description: None,
            is_pgg_cultivar: false,
        })
        .await
        .unwrap();

    let fetched = ctx.cultivars.get(created.id).await.unwrap();
    assert_eq!(fetched.name, "Feldherr");
    assert!(!fetched.is_pgg_cultivar);
}

#[tokio::test]
async fn test_create_rejects_duplicates_and_unknown_crop_types() {
    let ctx = context().await;
    let fodder_beet = ctx
        .cultivars
        .crop_types()
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.name == "Fodder Beet")
        .unwrap();

    let duplicate = ctx
        .cultivars
        .create(CreateCultivarInput {
            name: "brigadier".to_string(),
            crop_type_id: fodder_beet.id,
            dry_matter_range: "12-15%".to_string(),
            yield_range: "18-24 t DM/ha".to_string(),
            growing_time_range: "24-28 weeks".to_string(),
            description: None,
            is_pgg_cultivar: true,
        })
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict { .. })));

    let unknown_crop = ctx
        .cultivars
        .create(CreateCultivarInput {
            name: "Orphan".to_string(),
            crop_type_id: Uuid::new_v4(),
            dry_matter_range: String::new(),
            yield_range: String::new(),
            growing_time_range: String::new(),
            description: None,
            is_pgg_cultivar: false,
        })
        .await;
    match unknown_crop {
        Err(e) => assert_eq!(e.to_string(), "Crop type not found"),
        Ok(_) => panic!("cultivar created for a missing crop type"),
    }
}
