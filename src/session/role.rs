//! Portal user roles.

use serde::{Deserialize, Serialize};

/// Role a signed-in user holds. Each role owns one dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Citizen,
    Doctor,
    CityStaff,
    AgriOfficer,
    /// Government administrator.
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Citizen => "citizen",
            Role::Doctor => "doctor",
            Role::CityStaff => "city_staff",
            Role::AgriOfficer => "agri_officer",
            Role::Admin => "admin",
        }
    }

    /// Page path of the role's dashboard.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Citizen => "/citizen/",
            Role::Doctor => "/doctor/",
            Role::CityStaff => "/city-staff/",
            Role::AgriOfficer => "/agri-officer/",
            Role::Admin => "/admin-dashboard/",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "citizen" => Ok(Role::Citizen),
            "doctor" => Ok(Role::Doctor),
            "city_staff" => Ok(Role::CityStaff),
            "agri_officer" => Ok(Role::AgriOfficer),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}
