use serde::Serialize;
use sqlx::FromRow;

pub const DEFAULT_PROFILE_IMAGE: &str =
    "https://img.icons8.com/fluency/48/administrator-male.png";

// Serialized as-is on login and password change, so the password travels in
// the response. Plain-text storage and comparison are inherited wire
// behavior, documented as a defect in the README.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub userid: i64,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub profile_image: String,
}

impl User {
    pub async fn find_by_email(
        email: &str,
        db: &crate::database::Database,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&db.pool)
            .await
    }

    pub fn verify_password(&self, password: &str) -> bool {
        self.password == password
    }
}
