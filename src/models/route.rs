use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Home,
    Appointments,
    Health,
    Medication,
    Profile,
    Reports,
    Settings,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Appointments => "/appointments",
            Route::Health => "/health",
            Route::Medication => "/medication",
            Route::Profile => "/profile",
            Route::Reports => "/reports",
            Route::Settings => "/settings",
        }
    }
}
