//! Assessment lifecycle tests
//!
//! Covers the two service-enforced invariants: status only moves
//! draft -> completed, and a paddock carries at most one draft at a time
//! through its `assessment_id` pointer.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use beet_guru_app::services::assessments::{CreateAssessmentInput, UpdateAssessmentInput};
use beet_guru_app::services::locations::CreateLocationInput;
use beet_guru_app::store::{Latency, MemoryStore};
use beet_guru_app::{AppContext, AppError};
use shared::models::{AssessmentStatus, LocationStatus, SampleArea, WaterType};

// ============================================================================
// Fixtures
// ============================================================================

async fn context() -> AppContext {
    AppContext::new(Arc::new(MemoryStore::seeded(Latency::none())))
}

async fn fresh_paddock(ctx: &AppContext, user_id: Uuid, name: &str) -> Uuid {
    ctx.locations
        .create(CreateLocationInput {
            user_id,
            name: name.to_string(),
            area_ha: Decimal::new(35, 1),
            coordinates: None,
        })
        .await
        .expect("paddock created")
        .id
}

async fn fodder_beet_id(ctx: &AppContext) -> Uuid {
    ctx.cultivars
        .crop_types()
        .await
        .expect("crop types")
        .into_iter()
        .find(|c| c.name == "Fodder Beet")
        .expect("fodder beet seeded")
        .id
}

fn input(location_id: Uuid, crop_type_id: Uuid, status: Option<AssessmentStatus>) -> CreateAssessmentInput {
    CreateAssessmentInput {
        location_id,
        crop_type_id,
        cultivar_id: None,
        custom_cultivar_name: Some("Feldherr".to_string()),
        status,
        date: None,
        assessment_date: NaiveDate::from_ymd_opt(2025, 5, 20).unwrap(),
        sowing_date: NaiveDate::from_ymd_opt(2024, 10, 20).unwrap(),
        water_type: WaterType::Dryland,
        row_spacing_m: 0.5,
        measurement_length_m: 4.0,
        estimated_growing_cost: Decimal::from(2500),
        measurements: Vec::new(),
        sample_areas: vec![SampleArea::new(2.0, 25.4, 14.2)],
        dry_matter_percent: Some(14.2),
        estimated_yield_t_ha: Some(360.68),
        total_yield_t: Some(1262.38),
        feeding_capacity_days: Some(3155),
        stock_count: Some(50),
    }
}

async fn john_id(ctx: &AppContext) -> Uuid {
    ctx.auth
        .login("john@beetguru.nz")
        .await
        .expect("seed persona")
        .id
}

// ============================================================================
// Draft pointer invariant
// ============================================================================

#[tokio::test]
async fn test_save_as_draft_sets_pointer_and_location_status() {
    let ctx = context().await;
    let user = john_id(&ctx).await;
    let paddock = fresh_paddock(&ctx, user, "Draft Paddock").await;
    let crop_type = fodder_beet_id(&ctx).await;

    let assessment = ctx
        .assessments
        .create(input(paddock, crop_type, Some(AssessmentStatus::Draft)))
        .await
        .unwrap();
    assert_eq!(assessment.status, AssessmentStatus::Draft);

    let location = ctx.locations.get(paddock).await.unwrap();
    assert_eq!(location.assessment_id, Some(assessment.id));
    assert_eq!(location.status, LocationStatus::Draft);
}

#[tokio::test]
async fn test_second_draft_on_same_paddock_rejected() {
    let ctx = context().await;
    let user = john_id(&ctx).await;
    let paddock = fresh_paddock(&ctx, user, "Single Draft Paddock").await;
    let crop_type = fodder_beet_id(&ctx).await;

    ctx.assessments
        .create(input(paddock, crop_type, Some(AssessmentStatus::Draft)))
        .await
        .unwrap();
    let second = ctx
        .assessments
        .create(input(paddock, crop_type, Some(AssessmentStatus::Draft)))
        .await;

    assert!(matches!(second, Err(AppError::Conflict { .. })));
}

#[tokio::test]
async fn test_completing_a_draft_releases_the_paddock() {
    let ctx = context().await;
    let user = john_id(&ctx).await;
    let paddock = fresh_paddock(&ctx, user, "Release Paddock").await;
    let crop_type = fodder_beet_id(&ctx).await;

    let draft = ctx
        .assessments
        .create(input(paddock, crop_type, Some(AssessmentStatus::Draft)))
        .await
        .unwrap();

    let completed = ctx
        .assessments
        .update(
            draft.id,
            UpdateAssessmentInput {
                status: Some(AssessmentStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(completed.status, AssessmentStatus::Completed);

    let location = ctx.locations.get(paddock).await.unwrap();
    assert_eq!(location.assessment_id, None);
    assert_eq!(location.status, LocationStatus::NotStarted);
}

#[tokio::test]
async fn test_deleting_a_draft_releases_the_paddock() {
    let ctx = context().await;
    let user = john_id(&ctx).await;
    let paddock = fresh_paddock(&ctx, user, "Delete Paddock").await;
    let crop_type = fodder_beet_id(&ctx).await;

    let draft = ctx
        .assessments
        .create(input(paddock, crop_type, Some(AssessmentStatus::Draft)))
        .await
        .unwrap();
    ctx.assessments.delete(draft.id).await.unwrap();

    let location = ctx.locations.get(paddock).await.unwrap();
    assert_eq!(location.assessment_id, None);
    assert_eq!(location.status, LocationStatus::NotStarted);
}

// ============================================================================
// Status transitions
// ============================================================================

#[tokio::test]
async fn test_completed_assessment_cannot_return_to_draft() {
    let ctx = context().await;
    let user = john_id(&ctx).await;
    let paddock = fresh_paddock(&ctx, user, "Transition Paddock").await;
    let crop_type = fodder_beet_id(&ctx).await;

    let completed = ctx
        .assessments
        .create(input(paddock, crop_type, Some(AssessmentStatus::Completed)))
        .await
        .unwrap();

    let reverted = ctx
        .assessments
        .update(
            completed.id,
            UpdateAssessmentInput {
                status: Some(AssessmentStatus::Draft),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(
        reverted,
        Err(AppError::InvalidStateTransition(_))
    ));
}

// ============================================================================
// Create defaults and joins
// ============================================================================

#[tokio::test]
async fn test_create_defaults_to_completed_today() {
    let ctx = context().await;
    let user = john_id(&ctx).await;
    let paddock = fresh_paddock(&ctx, user, "Defaults Paddock").await;
    let crop_type = fodder_beet_id(&ctx).await;

    let assessment = ctx
        .assessments
        .create(input(paddock, crop_type, None))
        .await
        .unwrap();

    assert_eq!(assessment.status, AssessmentStatus::Completed);
    assert_eq!(assessment.date, Utc::now().date_naive());
}

#[tokio::test]
async fn test_create_requires_existing_location() {
    let ctx = context().await;
    let crop_type = fodder_beet_id(&ctx).await;

    let missing = ctx
        .assessments
        .create(input(Uuid::new_v4(), crop_type, None))
        .await;
    match missing {
        Err(e) => assert_eq!(e.to_string(), "Location not found"),
        Ok(_) => panic!("assessment created against a missing paddock"),
    }
}

#[tokio::test]
async fn test_get_joins_display_names() {
    let ctx = context().await;
    let user = john_id(&ctx).await;

    let seeded = ctx
        .assessments
        .list_completed(Some(user))
        .await
        .unwrap()
        .into_iter()
        .next()
        .expect("seeded completed assessment");
    let detail = ctx.assessments.get(seeded.id).await.unwrap();

    assert_eq!(detail.location_name, "North Paddock");
    assert_eq!(detail.crop_type_name, "Fodder Beet");
    assert_eq!(detail.cultivar_name, "Brigadier");
}

#[tokio::test]
async fn test_list_scoped_to_owned_paddocks() {
    let ctx = context().await;
    let john = john_id(&ctx).await;
    let hamish = ctx.auth.login("hamish@clearwaterfarms.nz").await.unwrap().id;
    let crop_type = fodder_beet_id(&ctx).await;

    // Hamish assesses his own paddock
    let back_block = ctx
        .locations
        .list(Some(hamish), false)
        .await
        .unwrap()
        .into_iter()
        .next()
        .expect("hamish paddock")
        .location
        .id;
    let hamish_assessment = ctx
        .assessments
        .create(input(back_block, crop_type, None))
        .await
        .unwrap();

    let johns = ctx.assessments.list(Some(john)).await.unwrap();
    assert!(johns.iter().all(|a| a.id != hamish_assessment.id));

    let hamishs = ctx.assessments.list(Some(hamish)).await.unwrap();
    assert!(hamishs.iter().any(|a| a.id == hamish_assessment.id));
}
