//! Paddock management tests
//!
//! The delete guard and the draft annotation are what the assessment flow
//! leans on; both are covered against the seeded dataset.

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use beet_guru_app::services::locations::{CreateLocationInput, UpdateLocationInput};
use beet_guru_app::store::{Latency, MemoryStore};
use beet_guru_app::{AppContext, AppError};
use shared::models::{AssessmentStatus, LocationStatus};

async fn context() -> AppContext {
    AppContext::new(Arc::new(MemoryStore::seeded(Latency::none())))
}

async fn john_id(ctx: &AppContext) -> Uuid {
    ctx.auth
        .login("john@beetguru.nz")
        .await
        .expect("seed persona")
        .id
}

// ============================================================================
// Delete guard
// ============================================================================

#[tokio::test]
async fn test_delete_rejected_while_assessments_reference_the_paddock() {
    let ctx = context().await;
    let user = john_id(&ctx).await;

    // North Paddock carries the seeded completed assessment
    let north = ctx
        .locations
        .list(Some(user), false)
        .await
        .unwrap()
        .into_iter()
        .find(|o| o.location.name == "North Paddock")
        .expect("seeded paddock")
        .location;

    let denied = ctx.locations.delete(north.id).await;
    match denied {
        Err(e) => assert_eq!(
            e.to_string(),
            "Cannot delete location that is used in assessments"
        ),
        Ok(_) => panic!("deleted a paddock that is referenced by an assessment"),
    }
}

#[tokio::test]
async fn test_delete_unreferenced_paddock_succeeds() {
    let ctx = context().await;
    let user = john_id(&ctx).await;

    let paddock = ctx
        .locations
        .create(CreateLocationInput {
            user_id: user,
            name: "Spare Paddock".to_string(),
            area_ha: Decimal::from(2),
            coordinates: None,
        })
        .await
        .unwrap();

    ctx.locations.delete(paddock.id).await.unwrap();

    let remaining = ctx.locations.list(Some(user), false).await.unwrap();
    assert!(remaining.iter().all(|o| o.location.id != paddock.id));
}

#[tokio::test]
async fn test_delete_missing_paddock_is_not_found() {
    let ctx = context().await;
    let missing = ctx.locations.delete(Uuid::new_v4()).await;
    match missing {
        Err(e) => assert_eq!(e.to_string(), "Location not found"),
        Ok(_) => panic!("deleted a paddock that does not exist"),
    }
}

// ============================================================================
// Listing and annotation
// ============================================================================

#[tokio::test]
async fn test_list_with_status_annotates_the_draft_in_progress() {
    let ctx = context().await;
    let user = john_id(&ctx).await;

    let overviews = ctx.locations.list(Some(user), true).await.unwrap();
    let river_flat = overviews
        .iter()
        .find(|o| o.location.name == "River Flat")
        .expect("seeded paddock");

    assert_eq!(river_flat.location.status, LocationStatus::Draft);
    let draft = river_flat
        .draft_assessment
        .as_ref()
        .expect("draft annotation");
    assert_eq!(draft.status, AssessmentStatus::Draft);
    assert_eq!(Some(draft.id), river_flat.location.assessment_id);
}

#[tokio::test]
async fn test_list_without_status_skips_the_join() {
    let ctx = context().await;
    let user = john_id(&ctx).await;

    let overviews = ctx.locations.list(Some(user), false).await.unwrap();
    assert!(overviews.iter().all(|o| o.draft_assessment.is_none()));
}

#[tokio::test]
async fn test_list_scopes_to_the_owner() {
    let ctx = context().await;
    let user = john_id(&ctx).await;

    let overviews = ctx.locations.list(Some(user), false).await.unwrap();
    assert!(!overviews.is_empty());
    assert!(overviews.iter().all(|o| o.location.user_id == user));
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_create_rejects_blank_name_and_zero_area() {
    let ctx = context().await;
    let user = john_id(&ctx).await;

    let blank = ctx
        .locations
        .create(CreateLocationInput {
            user_id: user,
            name: "   ".to_string(),
            area_ha: Decimal::from(2),
            coordinates: None,
        })
        .await;
    assert!(matches!(blank, Err(AppError::Validation { .. })));

    let zero_area = ctx
        .locations
        .create(CreateLocationInput {
            user_id: user,
            name: "Zero Paddock".to_string(),
            area_ha: Decimal::ZERO,
            coordinates: None,
        })
        .await;
    assert!(matches!(zero_area, Err(AppError::Validation { .. })));
}

#[tokio::test]
async fn test_update_changes_name_and_area() {
    let ctx = context().await;
    let user = john_id(&ctx).await;
    let paddock = ctx
        .locations
        .create(CreateLocationInput {
            user_id: user,
            name: "Rename Me".to_string(),
            area_ha: Decimal::from(2),
            coordinates: None,
        })
        .await
        .unwrap();

    let updated = ctx
        .locations
        .update(
            paddock.id,
            UpdateLocationInput {
                name: Some("Renamed".to_string()),
                area_ha: Some(Decimal::new(61, 1)),
                coordinates: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.area_ha, Decimal::new(61, 1));
}

// ============================================================================
// Property tests
// ============================================================================

fn paddock_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z ]{0,40}[A-Za-z]"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Any reasonably-shaped name and positive area round-trips through
    /// create and get unchanged (modulo trimming).
    #[test]
    fn test_create_round_trips_valid_names(name in paddock_name_strategy(), area in 1u32..500) {
        tokio_test::block_on(async {
            let ctx = context().await;
            let user = john_id(&ctx).await;
            let created = ctx
                .locations
                .create(CreateLocationInput {
                    user_id: user,
                    name: name.clone(),
                    area_ha: Decimal::from(area),
                    coordinates: None,
                })
                .await
                .expect("valid paddock");
            let fetched = ctx.locations.get(created.id).await.expect("fetch");
            assert_eq!(fetched.name, name.trim());
            assert_eq!(fetched.area_ha, Decimal::from(area));
        });
    }
}
