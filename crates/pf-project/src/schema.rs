//! Profile library schema definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileLibrary {
    pub version: u32,
    #[serde(default)]
    pub profiles: Vec<ProfileDef>,
    /// Name of the selected profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
}

impl Default for ProfileLibrary {
    fn default() -> Self {
        Self {
            version: crate::migrate::LATEST_VERSION,
            profiles: Vec::new(),
            current: None,
        }
    }
}

impl ProfileLibrary {
    pub fn find(&self, name: &str) -> Option<&ProfileDef> {
        self.profiles.iter().find(|p| p.name == name)
    }

    pub fn current_profile(&self) -> Option<&ProfileDef> {
        self.current.as_deref().and_then(|name| self.find(name))
    }

    /// Insert `profile`, replacing any profile with the same name.
    /// Returns the replaced profile.
    pub fn upsert(&mut self, profile: ProfileDef) -> Option<ProfileDef> {
        match self.profiles.iter_mut().find(|p| p.name == profile.name) {
            Some(existing) => Some(std::mem::replace(existing, profile)),
            None => {
                self.profiles.push(profile);
                None
            }
        }
    }

    /// Remove a profile, clearing the selection if it pointed there.
    pub fn remove(&mut self, name: &str) -> Option<ProfileDef> {
        let idx = self.profiles.iter().position(|p| p.name == name)?;
        if self.current.as_deref() == Some(name) {
            self.current = None;
        }
        Some(self.profiles.remove(idx))
    }

    /// Select an existing profile. Returns `false` if no such profile exists.
    pub fn select(&mut self, name: &str) -> bool {
        if self.find(name).is_some() {
            self.current = Some(name.to_string());
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub site: SiteDef,
    pub first: InputDef,
    pub second: InputDef,
}

/// Where the air is, which fixes the total pressure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "type")]
pub enum SiteDef {
    /// Sea-level standard atmosphere
    #[default]
    Standard,
    Pressure {
        pressure_pa: f64,
    },
    Altitude {
        altitude_m: f64,
    },
}

/// One known property in canonical units (°C, fraction, kg/kg, J/kg).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct InputDef {
    pub kind: InputKindDef,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InputKindDef {
    DryBulb,
    WetBulb,
    RelativeHumidity,
    DewPoint,
    HumidityRatio,
    Enthalpy,
}
