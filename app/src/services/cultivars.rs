//! Cultivar and crop-type reference data service

use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::store::{CropTypeRepository, CultivarRepository};
use shared::models::{CropType, Cultivar};
use shared::validation::validate_name;

/// Cultivar service
#[derive(Clone)]
pub struct CultivarService {
    cultivars: Arc<dyn CultivarRepository>,
    crop_types: Arc<dyn CropTypeRepository>,
}

/// Input for creating a cultivar through the management screen
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCultivarInput {
    pub name: String,
    pub crop_type_id: Uuid,
    pub dry_matter_range: String,
    pub yield_range: String,
    pub growing_time_range: String,
    pub description: Option<String>,
    pub is_pgg_cultivar: bool,
}

impl CultivarService {
    pub fn new(
        cultivars: Arc<dyn CultivarRepository>,
        crop_types: Arc<dyn CropTypeRepository>,
    ) -> Self {
        Self {
            cultivars,
            crop_types,
        }
    }

    /// List cultivars, optionally filtered by crop type
    pub async fn list(&self, crop_type_id: Option<Uuid>) -> AppResult<Vec<Cultivar>> {
        let mut cultivars = self.cultivars.list().await?;
        if let Some(crop_type_id) = crop_type_id {
            cultivars.retain(|c| c.crop_type_id == crop_type_id);
        }
        cultivars.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(cultivars)
    }

    /// Get a cultivar by id
    pub async fn get(&self, id: Uuid) -> AppResult<Cultivar> {
        self.cultivars
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cultivar".to_string()))
    }

    /// Create a cultivar (local-only reference data)
    pub async fn create(&self, input: CreateCultivarInput) -> AppResult<Cultivar> {
        validate_name(&input.name)
            .map_err(|message| AppError::validation("name", message))?;
        self.crop_types
            .find_by_id(input.crop_type_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Crop type".to_string()))?;

        let existing = self.cultivars.list().await?;
        if existing
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(input.name.trim()))
        {
            return Err(AppError::Conflict {
                resource: "cultivar".to_string(),
                message: "A cultivar with this name already exists".to_string(),
            });
        }

        let cultivar = Cultivar {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            crop_type_id: input.crop_type_id,
            dry_matter_range: input.dry_matter_range,
            yield_range: input.yield_range,
            growing_time_range: input.growing_time_range,
            description: input.description,
            is_pgg_cultivar: input.is_pgg_cultivar,
        };
        self.cultivars.insert(cultivar).await
    }

    /// The fixed crop-type reference set
    pub async fn crop_types(&self) -> AppResult<Vec<CropType>> {
        self.crop_types.list().await
    }
}
