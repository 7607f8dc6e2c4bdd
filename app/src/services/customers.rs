//! Customer service — a retailer's view over its farmer accounts

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::store::{
    AssessmentRepository, LocationRepository, RelationshipRepository, UserRepository,
};
use shared::models::{AccountType, CustomerRelationship, RelationshipStatus, User};

/// Customer service (retailer accounts only)
#[derive(Clone)]
pub struct CustomerService {
    relationships: Arc<dyn RelationshipRepository>,
    users: Arc<dyn UserRepository>,
    locations: Arc<dyn LocationRepository>,
    assessments: Arc<dyn AssessmentRepository>,
}

/// A farmer as seen from the retailer's customer list
#[derive(Debug, Clone, Serialize)]
pub struct CustomerSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub relationship_start: NaiveDate,
    pub relationship_status: RelationshipStatus,
    pub paddock_count: usize,
    pub last_assessment_date: Option<NaiveDate>,
}

impl CustomerService {
    pub fn new(
        relationships: Arc<dyn RelationshipRepository>,
        users: Arc<dyn UserRepository>,
        locations: Arc<dyn LocationRepository>,
        assessments: Arc<dyn AssessmentRepository>,
    ) -> Self {
        Self {
            relationships,
            users,
            locations,
            assessments,
        }
    }

    /// List a retailer's customers, decorated with paddock count and the
    /// date of their most recent assessment.
    pub async fn list_for_retailer(&self, retailer_id: Uuid) -> AppResult<Vec<CustomerSummary>> {
        let relationships = self.relationships.list_by_retailer(retailer_id).await?;
        let locations = self.locations.list().await?;
        let assessments = self.assessments.list().await?;

        let mut summaries = Vec::with_capacity(relationships.len());
        for relationship in relationships {
            let Some(customer) = self.users.find_by_id(relationship.customer_id).await? else {
                continue;
            };
            let owned: Vec<Uuid> = locations
                .iter()
                .filter(|l| l.user_id == customer.id)
                .map(|l| l.id)
                .collect();
            let last_assessment_date = assessments
                .iter()
                .filter(|a| owned.contains(&a.location_id))
                .map(|a| a.assessment_date)
                .max();

            summaries.push(CustomerSummary {
                id: customer.id,
                name: customer.name,
                email: customer.email,
                relationship_start: relationship.relationship_start,
                relationship_status: relationship.status,
                paddock_count: owned.len(),
                last_assessment_date,
            });
        }
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(summaries)
    }

    /// Get a customer account
    pub async fn get(&self, customer_id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Customer".to_string()))
    }

    /// Link a retailer to a farmer account
    pub async fn create_relationship(
        &self,
        retailer_id: Uuid,
        customer_id: Uuid,
    ) -> AppResult<CustomerRelationship> {
        let retailer = self
            .users
            .find_by_id(retailer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Retailer".to_string()))?;
        if retailer.account_type != AccountType::Retailer {
            return Err(AppError::validation(
                "retailer_id",
                "Only retailer accounts can hold customers",
            ));
        }
        let customer = self.get(customer_id).await?;
        if customer.account_type != AccountType::Farmer {
            return Err(AppError::validation(
                "customer_id",
                "Customers must be farmer accounts",
            ));
        }
        if self
            .relationships
            .find(retailer_id, customer_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict {
                resource: "customer".to_string(),
                message: "This customer is already linked to the retailer".to_string(),
            });
        }

        let relationship = CustomerRelationship {
            id: Uuid::new_v4(),
            retailer_id,
            customer_id,
            relationship_start: Utc::now().date_naive(),
            status: RelationshipStatus::Active,
        };
        self.relationships.insert(relationship).await
    }
}
