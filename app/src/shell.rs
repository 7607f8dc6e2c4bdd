//! Screen shell and session state
//!
//! The top-level screen switch is a closed enum so every screen is handled
//! exhaustively at compile time. The signed-in user and, for retailers,
//! the selected customer persist through the session storage keys.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::storage::{SessionStorage, SELECTED_CUSTOMER_KEY, USER_KEY};
use shared::models::{AccountType, User};

/// Every screen the shell can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Dashboard,
    Assessments,
    NewAssessment,
    Reports,
    Paddocks,
    Customers,
    CultivarManagement,
    Settings,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::Assessments => "Assessments",
            Screen::NewAssessment => "New Assessment",
            Screen::Reports => "Reports",
            Screen::Paddocks => "Paddocks",
            Screen::Customers => "Customers",
            Screen::CultivarManagement => "Cultivar Management",
            Screen::Settings => "Settings",
        }
    }

    /// Screens only retailer accounts can open
    pub fn retailer_only(&self) -> bool {
        matches!(self, Screen::Customers)
    }
}

/// Top-level application state: active screen plus session
pub struct AppShell {
    active: Screen,
    current_user: Option<User>,
    selected_customer: Option<User>,
    storage: Arc<dyn SessionStorage>,
}

impl AppShell {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            active: Screen::default(),
            current_user: None,
            selected_customer: None,
            storage,
        }
    }

    /// Rehydrate the session from storage at startup
    pub fn restore(&mut self) -> AppResult<()> {
        if let Some(value) = self.storage.get(USER_KEY)? {
            self.current_user = serde_json::from_value(value)
                .map_err(|e| AppError::Storage(format!("corrupt stored user: {}", e)))?;
        }
        if let Some(value) = self.storage.get(SELECTED_CUSTOMER_KEY)? {
            self.selected_customer = serde_json::from_value(value)
                .map_err(|e| AppError::Storage(format!("corrupt stored customer: {}", e)))?;
        }
        Ok(())
    }

    pub fn active_screen(&self) -> Screen {
        self.active
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn selected_customer(&self) -> Option<&User> {
        self.selected_customer.as_ref()
    }

    /// Switch screens. Retailer-only screens require a retailer session.
    pub fn navigate(&mut self, screen: Screen) -> AppResult<()> {
        if screen.retailer_only() {
            let is_retailer = self
                .current_user
                .as_ref()
                .map(|u| u.account_type == AccountType::Retailer)
                .unwrap_or(false);
            if !is_retailer {
                return Err(AppError::validation(
                    "screen",
                    "Only retailer accounts can open the customers screen",
                ));
            }
        }
        self.active = screen;
        Ok(())
    }

    /// Persist and adopt a signed-in user
    pub fn sign_in(&mut self, user: User) -> AppResult<()> {
        let value = serde_json::to_value(&user)
            .map_err(|e| AppError::Storage(e.to_string()))?;
        self.storage.set(USER_KEY, value)?;
        tracing::info!(user = %user.email, "session started");
        self.current_user = Some(user);
        Ok(())
    }

    /// Drop the session and return to the dashboard
    pub fn sign_out(&mut self) -> AppResult<()> {
        self.storage.remove(USER_KEY)?;
        self.storage.remove(SELECTED_CUSTOMER_KEY)?;
        self.current_user = None;
        self.selected_customer = None;
        self.active = Screen::Dashboard;
        Ok(())
    }

    /// Select which customer a retailer is working on behalf of
    pub fn select_customer(&mut self, customer: User) -> AppResult<()> {
        let is_retailer = self
            .current_user
            .as_ref()
            .map(|u| u.account_type == AccountType::Retailer)
            .unwrap_or(false);
        if !is_retailer {
            return Err(AppError::validation(
                "customer",
                "Only retailer accounts can select a customer",
            ));
        }

        let value = serde_json::to_value(&customer)
            .map_err(|e| AppError::Storage(e.to_string()))?;
        self.storage.set(SELECTED_CUSTOMER_KEY, value)?;
        self.selected_customer = Some(customer);
        Ok(())
    }

    pub fn clear_selected_customer(&mut self) -> AppResult<()> {
        self.storage.remove(SELECTED_CUSTOMER_KEY)?;
        self.selected_customer = None;
        Ok(())
    }

    /// The user whose data the screens should show: the selected customer
    /// when a retailer is acting for one, otherwise the signed-in user.
    pub fn acting_user(&self) -> Option<&User> {
        self.selected_customer
            .as_ref()
            .or(self.current_user.as_ref())
    }
}
