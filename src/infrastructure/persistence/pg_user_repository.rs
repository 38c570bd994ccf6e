//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{DoctorProfile, NewProfile, NewUser, UnknownVariant, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

const USER_COLUMNS: &str = "id, email, password_hash, role, first_name, last_name, \
     date_of_birth, phone_number, gender, address, created_at, updated_at";

const DOCTOR_COLUMNS: &str = "user_id, specialization, medical_license_number, \
     years_of_experience, qualifications, government_issued_id_document, is_approved, approved_at";

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    role: String,
    first_name: String,
    last_name: String,
    date_of_birth: NaiveDate,
    phone_number: String,
    gender: String,
    address: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            role: row.role.parse().map_err(corrupt_row)?,
            first_name: row.first_name,
            last_name: row.last_name,
            date_of_birth: row.date_of_birth,
            phone_number: row.phone_number,
            gender: row.gender.parse().map_err(corrupt_row)?,
            address: row.address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(FromRow)]
struct DoctorRow {
    user_id: Uuid,
    specialization: String,
    medical_license_number: String,
    years_of_experience: i32,
    qualifications: String,
    government_issued_id_document: String,
    is_approved: bool,
    approved_at: Option<DateTime<Utc>>,
}

impl TryFrom<DoctorRow> for DoctorProfile {
    type Error = AppError;

    fn try_from(row: DoctorRow) -> Result<Self, Self::Error> {
        Ok(DoctorProfile {
            user_id: row.user_id,
            specialization: row.specialization.parse().map_err(corrupt_row)?,
            medical_license_number: row.medical_license_number,
            years_of_experience: row.years_of_experience,
            qualifications: row.qualifications,
            government_issued_id_document: row.government_issued_id_document,
            is_approved: row.is_approved,
            approved_at: row.approved_at,
        })
    }
}

fn corrupt_row(e: UnknownVariant) -> AppError {
    AppError::internal("Corrupt row", json!({ "cause": e.to_string() }))
}

/// PostgreSQL repository for users, patient and doctor profiles.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn phone_exists(&self, phone_number: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE phone_number = $1)")
                .bind(phone_number)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (email, password_hash, role, first_name, last_name,
                               date_of_birth, phone_number, gender, address)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.account.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.account.first_name)
        .bind(&user.account.last_name)
        .bind(user.account.date_of_birth)
        .bind(&user.account.phone_number)
        .bind(user.account.gender.as_str())
        .bind(&user.account.address)
        .fetch_one(&mut *tx)
        .await?;

        match &user.profile {
            Some(NewProfile::Patient(p)) => {
                sqlx::query(
                    r#"
                    INSERT INTO patients (user_id, emergency_contact_number, emergency_contact_name,
                                          allergies, current_medications)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(row.id)
                .bind(&p.emergency_contact_number)
                .bind(&p.emergency_contact_name)
                .bind(&p.allergies)
                .bind(&p.current_medications)
                .execute(&mut *tx)
                .await?;
            }
            Some(NewProfile::Doctor(d)) => {
                sqlx::query(
                    r#"
                    INSERT INTO doctors (user_id, specialization, medical_license_number,
                                         years_of_experience, qualifications,
                                         government_issued_id_document)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    "#,
                )
                .bind(row.id)
                .bind(d.specialization.as_str())
                .bind(&d.medical_license_number)
                .bind(d.years_of_experience)
                .bind(&d.qualifications)
                .bind(&d.government_issued_id_document)
                .execute(&mut *tx)
                .await?;
            }
            None => {}
        }

        tx.commit().await?;

        User::try_from(row)
    }

    async fn find_doctor(&self, user_id: Uuid) -> Result<Option<DoctorProfile>, AppError> {
        let row = sqlx::query_as::<_, DoctorRow>(&format!(
            "SELECT {DOCTOR_COLUMNS} FROM doctors WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(DoctorProfile::try_from).transpose()
    }

    async fn update_doctor_document(
        &self,
        user_id: Uuid,
        document: String,
    ) -> Result<Option<DoctorProfile>, AppError> {
        let row = sqlx::query_as::<_, DoctorRow>(&format!(
            r#"
            UPDATE doctors
            SET government_issued_id_document = $2
            WHERE user_id = $1
            RETURNING {DOCTOR_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(document)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(DoctorProfile::try_from).transpose()
    }

    async fn approve_doctor(&self, user_id: Uuid) -> Result<Option<DoctorProfile>, AppError> {
        let row = sqlx::query_as::<_, DoctorRow>(&format!(
            r#"
            UPDATE doctors
            SET is_approved = TRUE,
                approved_at = COALESCE(approved_at, NOW())
            WHERE user_id = $1
            RETURNING {DOCTOR_COLUMNS}
            "#
        ))
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(DoctorProfile::try_from).transpose()
    }

    async fn list_pending_doctors(&self) -> Result<Vec<(User, DoctorProfile)>, AppError> {
        let users = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE id IN (SELECT user_id FROM doctors WHERE is_approved = FALSE)
            ORDER BY created_at ASC
            "#
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut pending = Vec::with_capacity(users.len());
        for row in users {
            let user = User::try_from(row)?;
            if let Some(profile) = self.find_doctor(user.id).await? {
                pending.push((user, profile));
            }
        }

        Ok(pending)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
