//! Demo dataset the mock store starts with

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use shared::estimation::{estimate_yield, FeedAssumptions};
use shared::models::{
    AccountType, Assessment, AssessmentStatus, CropType, Cultivar, CustomerRelationship,
    Location, LocationStatus, PlantMeasurement, Report, ReportStatus, ReportType,
    RelationshipStatus, SampleArea, User, WaterType,
};
use shared::types::{GpsCoordinates, Season};

use super::memory::StoreData;

/// Hash cost for the mock credentials. These are demo accounts in a
/// process-local store, so the minimum cost keeps startup fast.
const SEED_BCRYPT_COST: u32 = 4;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn user(
    name: &str,
    email: &str,
    password: Option<&str>,
    role: &str,
    account_type: AccountType,
) -> User {
    let password_hash =
        password.and_then(|p| bcrypt::hash(p, SEED_BCRYPT_COST).ok());
    User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        has_password: password_hash.is_some(),
        password_hash,
        role: role.to_string(),
        account_type,
        created_at: Utc::now(),
    }
}

fn cultivar(
    name: &str,
    crop_type_id: Uuid,
    dry_matter: &str,
    yield_range: &str,
    growing_time: &str,
    description: Option<&str>,
    is_pgg_cultivar: bool,
) -> Cultivar {
    Cultivar {
        id: Uuid::new_v4(),
        name: name.to_string(),
        crop_type_id,
        dry_matter_range: dry_matter.to_string(),
        yield_range: yield_range.to_string(),
        growing_time_range: growing_time.to_string(),
        description: description.map(|d| d.to_string()),
        is_pgg_cultivar,
    }
}

/// Build the demo dataset: three personas, the cultivar catalogue, a
/// handful of paddocks, one completed assessment with its report, and one
/// draft in progress.
pub(crate) fn demo_data() -> StoreData {
    let mut data = StoreData::default();

    // Personas
    let john = user(
        "John Mackenzie",
        "john@beetguru.nz",
        Some("beetguru2025"),
        "Farm Owner",
        AccountType::Farmer,
    );
    let hamish = user(
        "Hamish Clearwater",
        "hamish@clearwaterfarms.nz",
        Some("clearwater1"),
        "Farm Owner",
        AccountType::Farmer,
    );
    let sarah = user(
        "Sarah Thompson",
        "sarah@ruralco.nz",
        Some("ruralco2025"),
        "Area Manager",
        AccountType::Retailer,
    );
    let admin = user(
        "Beet Guru Admin",
        "admin@beetguru.nz",
        None,
        "Administrator",
        AccountType::Admin,
    );

    // Crop types
    let fodder_beet = CropType {
        id: Uuid::new_v4(),
        name: "Fodder Beet".to_string(),
    };
    let sugar_beet = CropType {
        id: Uuid::new_v4(),
        name: "Sugar Beet".to_string(),
    };
    let mangels = CropType {
        id: Uuid::new_v4(),
        name: "Mangels".to_string(),
    };

    // Cultivar catalogue
    data.cultivars = vec![
        cultivar(
            "Brigadier",
            fodder_beet.id,
            "12-15%",
            "18-24 t DM/ha",
            "24-28 weeks",
            Some("Soft, low dry-matter bulb suited to grazing in situ"),
            true,
        ),
        cultivar(
            "Kyros",
            fodder_beet.id,
            "14-17%",
            "20-26 t DM/ha",
            "26-30 weeks",
            Some("Medium dry-matter all-rounder"),
            true,
        ),
        cultivar(
            "Blaze",
            fodder_beet.id,
            "16-18%",
            "20-25 t DM/ha",
            "26-30 weeks",
            Some("Higher dry-matter type, better suited to lifting"),
            true,
        ),
        cultivar(
            "Jamon",
            fodder_beet.id,
            "15-18%",
            "19-25 t DM/ha",
            "25-30 weeks",
            None,
            false,
        ),
        cultivar(
            "Rivage",
            fodder_beet.id,
            "17-19%",
            "21-26 t DM/ha",
            "26-32 weeks",
            None,
            false,
        ),
        cultivar(
            "Vedeta",
            sugar_beet.id,
            "18-22%",
            "16-22 t DM/ha",
            "28-34 weeks",
            None,
            false,
        ),
        cultivar(
            "Mammoth Red",
            mangels.id,
            "10-13%",
            "14-20 t DM/ha",
            "22-26 weeks",
            None,
            false,
        ),
    ];
    let brigadier_id = data.cultivars[0].id;
    let kyros_id = data.cultivars[1].id;

    // Paddocks
    let north_paddock = Location {
        id: Uuid::new_v4(),
        user_id: john.id,
        name: "North Paddock".to_string(),
        area_ha: Decimal::new(35, 1),
        status: LocationStatus::NotStarted,
        coordinates: Some(GpsCoordinates::new(
            Decimal::new(-43_5321, 4),
            Decimal::new(171_6362, 4),
        )),
        assessment_id: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    let river_flat = Location {
        id: Uuid::new_v4(),
        user_id: john.id,
        name: "River Flat".to_string(),
        area_ha: Decimal::new(52, 1),
        status: LocationStatus::NotStarted,
        coordinates: None,
        assessment_id: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    let back_block = Location {
        id: Uuid::new_v4(),
        user_id: hamish.id,
        name: "Back Block".to_string(),
        area_ha: Decimal::new(48, 1),
        status: LocationStatus::NotStarted,
        coordinates: None,
        assessment_id: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    // A completed assessment on North Paddock with a generated report
    let samples = vec![
        SampleArea::new(2.0, 25.4, 14.2),
        SampleArea::new(2.0, 23.8, 13.6),
        SampleArea::new(2.0, 26.9, 14.8),
    ];
    let assumptions = FeedAssumptions::default();
    let estimate = estimate_yield(&samples, 0.5, 3.5, &assumptions);
    let completed = Assessment {
        id: Uuid::new_v4(),
        location_id: north_paddock.id,
        crop_type_id: fodder_beet.id,
        cultivar_id: Some(brigadier_id),
        custom_cultivar_name: None,
        date: date(2025, 5, 12),
        assessment_date: date(2025, 5, 12),
        sowing_date: date(2024, 10, 20),
        status: AssessmentStatus::Completed,
        water_type: WaterType::Irrigated,
        row_spacing_m: 0.5,
        measurement_length_m: 4.0,
        estimated_growing_cost: Decimal::from(2500),
        measurements: vec![
            PlantMeasurement {
                leaf: 3.1,
                bulb: 22.3,
                plants: 38,
            },
            PlantMeasurement {
                leaf: 2.8,
                bulb: 21.0,
                plants: 35,
            },
        ],
        sample_areas: samples,
        dry_matter_percent: estimate.map(|e| e.dry_matter_percent),
        estimated_yield_t_ha: estimate.map(|e| e.yield_t_ha),
        total_yield_t: estimate.map(|e| e.total_yield_t),
        feeding_capacity_days: estimate.map(|e| e.feeding_days),
        stock_count: Some(assumptions.herd_size as i32),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    let report = Report {
        id: Uuid::new_v4(),
        assessment_id: completed.id,
        title: format!(
            "North Paddock {} Yield Report",
            Season::for_date(completed.date)
        ),
        report_type: ReportType::Basic,
        created: completed.date,
        status: ReportStatus::Sent,
        pages: ReportType::Basic.pages(),
        recipients: vec![john.email.clone()],
        cultivar: "Brigadier".to_string(),
        season: Season::for_date(completed.date).label(),
    };

    // A draft in progress on River Flat
    let draft = Assessment {
        id: Uuid::new_v4(),
        location_id: river_flat.id,
        crop_type_id: fodder_beet.id,
        cultivar_id: Some(kyros_id),
        custom_cultivar_name: None,
        date: date(2025, 6, 2),
        assessment_date: date(2025, 6, 2),
        sowing_date: date(2024, 10, 28),
        status: AssessmentStatus::Draft,
        water_type: WaterType::Dryland,
        row_spacing_m: 0.5,
        measurement_length_m: 4.0,
        estimated_growing_cost: Decimal::from(2500),
        measurements: Vec::new(),
        sample_areas: Vec::new(),
        dry_matter_percent: None,
        estimated_yield_t_ha: None,
        total_yield_t: None,
        feeding_capacity_days: None,
        stock_count: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let mut river_flat = river_flat;
    river_flat.status = LocationStatus::Draft;
    river_flat.assessment_id = Some(draft.id);

    // Sarah manages Hamish's account
    data.relationships = vec![CustomerRelationship {
        id: Uuid::new_v4(),
        retailer_id: sarah.id,
        customer_id: hamish.id,
        relationship_start: date(2024, 8, 1),
        status: RelationshipStatus::Active,
    }];

    data.users = vec![john, hamish, sarah, admin];
    data.crop_types = vec![fodder_beet, sugar_beet, mangels];
    data.locations = vec![north_paddock, river_flat, back_block];
    data.assessments = vec![completed, draft];
    data.reports = vec![report];

    data
}
