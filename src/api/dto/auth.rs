//! DTOs for the login, registration and session endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::domain::entities::{
    Gender, NewAccount, NewDoctorProfile, NewPatientProfile, NewProfile, Role, Specialization,
};

/// Credentials submitted to `POST /api/auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Successful login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub user_id: Uuid,
    pub role: Role,
    pub token: String,
}

/// Fields shared by every self-service registration.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccountFields {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    /// `YYYY-MM-DD`.
    pub date_of_birth: NaiveDate,

    #[validate(length(min = 10, message = "Phone number must be at least 10 digits"))]
    pub phone_number: String,

    pub gender: Gender,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PatientRegistration {
    #[serde(flatten)]
    #[validate(nested)]
    pub account: AccountFields,

    #[validate(length(min = 10, message = "Emergency contact number must be at least 10 digits"))]
    pub emergency_contact_number: String,

    #[validate(length(min = 1, message = "Emergency contact name is required"))]
    pub emergency_contact_name: String,

    #[serde(default)]
    pub allergies: Option<String>,

    #[serde(default)]
    pub current_medications: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRegistration {
    #[serde(flatten)]
    #[validate(nested)]
    pub account: AccountFields,

    pub specialization: Specialization,

    #[validate(length(min = 1, message = "Medical license number is required"))]
    pub medical_license_number: String,

    #[validate(range(min = 0, message = "Years of experience must be positive"))]
    pub years_of_experience: i32,

    #[validate(length(min = 1, message = "Qualifications are required"))]
    pub qualifications: String,

    #[validate(length(min = 1, message = "Government issued ID document is required"))]
    pub government_issued_id_document: String,
}

/// Body of `POST /api/auth/register`, discriminated on `role`.
///
/// Only `PATIENT` and `DOCTOR` exist as variants, so `ADMIN` (or anything
/// else) fails to deserialize and is answered as a validation error.
#[derive(Debug, Deserialize)]
#[serde(tag = "role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegisterRequest {
    Patient(PatientRegistration),
    Doctor(DoctorRegistration),
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            RegisterRequest::Patient(p) => p.validate(),
            RegisterRequest::Doctor(d) => d.validate(),
        }
    }
}

impl RegisterRequest {
    /// Splits the request into account data, plain password and role profile.
    pub fn into_parts(self) -> (NewAccount, String, NewProfile) {
        match self {
            RegisterRequest::Patient(p) => {
                let (account, password) = p.account.into_account();
                let profile = NewProfile::Patient(NewPatientProfile {
                    emergency_contact_number: p.emergency_contact_number,
                    emergency_contact_name: p.emergency_contact_name,
                    allergies: p.allergies.filter(|s| !s.is_empty()),
                    current_medications: p.current_medications.filter(|s| !s.is_empty()),
                });
                (account, password, profile)
            }
            RegisterRequest::Doctor(d) => {
                let (account, password) = d.account.into_account();
                let profile = NewProfile::Doctor(NewDoctorProfile {
                    specialization: d.specialization,
                    medical_license_number: d.medical_license_number,
                    years_of_experience: d.years_of_experience,
                    qualifications: d.qualifications,
                    government_issued_id_document: d.government_issued_id_document,
                });
                (account, password, profile)
            }
        }
    }
}

impl AccountFields {
    fn into_account(self) -> (NewAccount, String) {
        (
            NewAccount {
                email: self.email.trim().to_string(),
                first_name: self.first_name,
                last_name: self.last_name,
                date_of_birth: self.date_of_birth,
                phone_number: self.phone_number,
                gender: self.gender,
                address: self.address,
            },
            self.password,
        )
    }
}

/// Successful registration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: Uuid,
    pub role: Role,
}

/// Identity behind the current session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

/// Body carrying only a human-readable message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
