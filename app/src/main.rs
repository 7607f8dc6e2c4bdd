//! Beet Guru demo binary
//!
//! Boots the mock data provider with the demo dataset, restores the
//! session, signs in the default persona and walks one assessment through
//! all four wizard steps to a generated report.

use std::sync::Arc;

use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use beet_guru_app::forms::FormState;
use beet_guru_app::services::locations::CreateLocationInput;
use beet_guru_app::shell::{AppShell, Screen};
use beet_guru_app::storage::FileStorage;
use beet_guru_app::store::{Latency, MemoryStore};
use beet_guru_app::wizard::{
    AssessmentWizard, CropDetailsForm, CultivarChoice, FieldSetupForm, Key, KeypadInput,
};
use beet_guru_app::{AppContext, Config};
use rust_decimal::Decimal;
use shared::estimation::FeedAssumptions;
use shared::models::{PlantMeasurement, ReportType, SampleArea, WaterType};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beet_guru=debug,beet_guru_app=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Beet Guru");
    tracing::info!("Environment: {}", config.environment);

    // Build the mock data provider and services
    let latency = Latency::new(config.api.latency_min_ms, config.api.latency_max_ms);
    let store = Arc::new(MemoryStore::seeded(latency));
    let context = AppContext::new(store);

    // Restore any previous session, then sign in the default persona
    let storage = Arc::new(FileStorage::new(&config.storage.path));
    let mut shell = AppShell::new(storage);
    shell.restore()?;
    if shell.current_user().is_none() {
        let user = context
            .auth
            .login_with_password("john@beetguru.nz", "beetguru2025")
            .await?;
        shell.sign_in(user)?;
    }
    let user_id = shell
        .acting_user()
        .map(|u| u.id)
        .ok_or_else(|| anyhow::anyhow!("no signed-in user"))?;

    // Dashboard: paddocks with their in-progress drafts
    shell.navigate(Screen::Paddocks)?;
    let paddocks = context.locations.list(Some(user_id), true).await?;
    for overview in &paddocks {
        tracing::info!(
            paddock = %overview.location.name,
            area_ha = %overview.location.area_ha,
            status = %overview.location.status,
            "paddock"
        );
    }

    // Walk a new assessment through the wizard on a fresh paddock
    shell.navigate(Screen::NewAssessment)?;
    let paddock = context
        .locations
        .create(CreateLocationInput {
            user_id,
            name: "Terrace Paddock".to_string(),
            area_ha: Decimal::new(41, 1),
            coordinates: None,
        })
        .await?;
    let fodder_beet = context
        .cultivars
        .crop_types()
        .await?
        .into_iter()
        .find(|c| c.name == "Fodder Beet")
        .ok_or_else(|| anyhow::anyhow!("fodder beet crop type missing from seed"))?;
    let cultivar = context
        .cultivars
        .list(Some(fodder_beet.id))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("no cultivars seeded"))?;

    let today = Utc::now().date_naive();
    let assumptions = FeedAssumptions {
        herd_size: config.defaults.herd_size,
        intake_kg_dm_per_day: config.defaults.intake_kg_dm_per_day,
    };
    let mut wizard = AssessmentWizard::new(
        context.locations.clone(),
        context.assessments.clone(),
        context.reports.clone(),
        assumptions,
        today,
    );

    // Step 1: crop details
    let mut crop_form = FormState::new(CropDetailsForm::for_date(today));
    crop_form.change("location_id", |v| v.location_id = Some(paddock.id));
    crop_form.change("crop_type_id", |v| v.crop_type_id = Some(fodder_beet.id));
    crop_form.change("cultivar", |v| v.cultivar = CultivarChoice::Listed(cultivar.id));
    crop_form.change("stock_type", |v| v.stock_type = "Dairy".to_string());
    crop_form.change("water_type", |v| v.water_type = WaterType::Irrigated);
    anyhow::ensure!(wizard.submit_crop_details(&mut crop_form), "crop details rejected");

    // Step 2: field setup
    let mut field_form = FormState::new(FieldSetupForm::with_defaults(&config.defaults));
    tracing::info!(
        area_m2 = %field_form.values().measurement_area_display(),
        "measurement area"
    );
    anyhow::ensure!(wizard.submit_field_setup(&mut field_form), "field setup rejected");

    // Step 3: measurements, weights entered through the keypad
    let mut keypad = KeypadInput::new();
    for key in [Key::Digit(2), Key::Digit(5), Key::Dot, Key::Digit(4)] {
        let _ = keypad.press(key);
    }
    wizard.add_measurement(PlantMeasurement {
        leaf: 3.2,
        bulb: 22.2,
        plants: 36,
    });
    wizard.add_sample_area(SampleArea::new(2.0, keypad.value(), 14.2));
    wizard.add_sample_area(SampleArea::new(2.0, 24.6, 13.8));
    wizard.finish_measurements();

    // Step 4: review and generate
    wizard.set_report_type(ReportType::Advanced);
    let review = wizard.review().await?;
    tracing::info!(
        paddock = %review.location_name,
        yield_per_ha = %review.display.yield_per_ha,
        total_yield = %review.display.total_yield,
        feeding = %review.display.feeding_days,
        "review"
    );

    let (assessment, report) = wizard.generate_report().await?;
    tracing::info!(
        assessment = %assessment.id,
        report = %report.title,
        season = %report.season,
        pages = report.pages,
        "report generated"
    );

    // Reports screen shows the new document
    shell.navigate(Screen::Reports)?;
    for report in context.reports.list().await? {
        tracing::info!(title = %report.title, status = ?report.status, "report");
    }

    Ok(())
}
