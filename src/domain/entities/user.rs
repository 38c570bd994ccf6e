//! User entity and the enumerations stored alongside it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Account role. Decides which dashboard tree a user owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Specialization {
    Cardiology,
    Dermatology,
    Neurology,
    Pediatrics,
    Surgery,
}

/// Error returned when a stored enum column holds an unknown value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! text_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// Database and wire representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $text),+
                }
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($ty::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

text_enum!(Role, "role", {
    Patient => "PATIENT",
    Doctor => "DOCTOR",
    Admin => "ADMIN",
});

text_enum!(Gender, "gender", {
    Male => "MALE",
    Female => "FEMALE",
    Other => "OTHER",
});

text_enum!(Specialization, "specialization", {
    Cardiology => "CARDIOLOGY",
    Dermatology => "DERMATOLOGY",
    Neurology => "NEUROLOGY",
    Pediatrics => "PEDIATRICS",
    Surgery => "SURGERY",
});

/// Stored credential record with the common profile fields.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    pub gender: Gender,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Personal details shared by every registration.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    pub gender: Gender,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPatientProfile {
    pub emergency_contact_number: String,
    pub emergency_contact_name: String,
    pub allergies: Option<String>,
    pub current_medications: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDoctorProfile {
    pub specialization: Specialization,
    pub medical_license_number: String,
    pub years_of_experience: i32,
    pub qualifications: String,
    pub government_issued_id_document: String,
}

/// Role-specific profile created together with the account.
#[derive(Debug, Clone, PartialEq)]
pub enum NewProfile {
    Patient(NewPatientProfile),
    Doctor(NewDoctorProfile),
}

impl NewProfile {
    pub fn role(&self) -> Role {
        match self {
            NewProfile::Patient(_) => Role::Patient,
            NewProfile::Doctor(_) => Role::Doctor,
        }
    }
}

/// Input for inserting a user. Administrators carry no profile.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub account: NewAccount,
    pub password_hash: String,
    pub role: Role,
    pub profile: Option<NewProfile>,
}

/// Doctor profile as stored, including the approval state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorProfile {
    pub user_id: Uuid,
    pub specialization: Specialization,
    pub medical_license_number: String,
    pub years_of_experience: i32,
    pub qualifications: String,
    pub government_issued_id_document: String,
    pub is_approved: bool,
    pub approved_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_text_round_trip() {
        for role in [Role::Patient, Role::Doctor, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        let err = "NURSE".parse::<Role>().unwrap_err();
        assert_eq!(err.kind, "role");
        assert_eq!(err.value, "NURSE");
        // Lowercase is not accepted either.
        assert!("patient".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_uses_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Doctor).unwrap(), "\"DOCTOR\"");
        let role: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_profile_role() {
        let profile = NewProfile::Patient(NewPatientProfile {
            emergency_contact_number: "5550001111".to_string(),
            emergency_contact_name: "Jane".to_string(),
            allergies: None,
            current_medications: None,
        });
        assert_eq!(profile.role(), Role::Patient);
    }

    #[test]
    fn test_specialization_display() {
        assert_eq!(Specialization::Neurology.to_string(), "NEUROLOGY");
        assert_eq!(
            "PEDIATRICS".parse::<Specialization>().unwrap(),
            Specialization::Pediatrics
        );
    }
}
