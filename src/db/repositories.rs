//! Repositories: users (unique email) and candidates (owned by a user).

use crate::error::{AppError, AppResult};
use crate::models::{CandidateRow, NewCandidate, NewUser, UserRow};
use chrono::Utc;
use tracing::debug;
use validator::Validate;

use super::DbPool;

const EMAIL_TAKEN: &str = "Email address already in use";

// ---- User ----

/// Validate and insert a user. Duplicate emails surface as validation errors.
pub async fn user_create(pool: &DbPool, user: &NewUser) -> AppResult<UserRow> {
    user.validate()?;
    if user.password_hash.is_empty() {
        return Err(AppError::Internal(anyhow::anyhow!(
            "refusing to store user without a password hash"
        )));
    }

    let now = Utc::now();
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (first_name, last_name, email, password_hash, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id, first_name, last_name, email, password_hash, created_at, updated_at
        "#,
    )
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            debug!(email = %user.email, "duplicate email on insert");
            AppError::validation(EMAIL_TAKEN)
        }
        other => AppError::Db(other),
    })?;
    Ok(row)
}

pub async fn user_find_by_email(pool: &DbPool, email: &str) -> AppResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, first_name, last_name, email, password_hash, created_at, updated_at FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

// ---- Candidates ----

pub async fn candidate_create(
    pool: &DbPool,
    candidate: &NewCandidate,
    user_id: i64,
) -> AppResult<CandidateRow> {
    let now = Utc::now();
    let row = sqlx::query_as::<_, CandidateRow>(
        r#"
        INSERT INTO candidates (first_name, last_name, email, user_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id, first_name, last_name, email, user_id, created_at, updated_at
        "#,
    )
    .bind(candidate.first_name.as_deref())
    .bind(candidate.last_name.as_deref())
    .bind(candidate.email.as_deref())
    .bind(user_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// All candidates owned by `user_id`, in insertion order.
pub async fn candidates_list_by_user(pool: &DbPool, user_id: i64) -> AppResult<Vec<CandidateRow>> {
    let rows = sqlx::query_as::<_, CandidateRow>(
        "SELECT id, first_name, last_name, email, user_id, created_at, updated_at FROM candidates WHERE user_id = ? ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations};

    async fn pool() -> DbPool {
        let pool = create_pool("sqlite::memory:", 1).await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: email.into(),
            password_hash: "hash".into(),
        }
    }

    fn new_candidate(email: &str) -> NewCandidate {
        NewCandidate {
            first_name: Some("C".into()),
            last_name: Some("D".into()),
            email: Some(email.into()),
        }
    }

    #[tokio::test]
    async fn create_and_find_user() {
        let pool = pool().await;
        let created = user_create(&pool, &new_user("ada@example.com")).await.unwrap();
        let found = user_find_by_email(&pool, "ada@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.first_name, "Ada");
        assert!(user_find_by_email(&pool, "nobody@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_validation_error() {
        let pool = pool().await;
        user_create(&pool, &new_user("dup@example.com")).await.unwrap();
        match user_create(&pool, &new_user("dup@example.com")).await {
            Err(AppError::Validation(messages)) => {
                assert_eq!(messages, vec![EMAIL_TAKEN.to_string()])
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn invalid_user_never_reaches_the_table() {
        let pool = pool().await;
        let mut user = new_user("bad-email");
        user.first_name.clear();
        let err = user_create(&pool, &user).await.unwrap_err();
        match err {
            AppError::Validation(messages) => {
                assert!(messages.contains(&"First name cannot be empty".to_string()));
                assert!(messages.contains(&"Must be a valid email address".to_string()));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(user_find_by_email(&pool, "bad-email").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn user_without_hash_is_refused() {
        let pool = pool().await;
        let mut user = new_user("nohash@example.com");
        user.password_hash.clear();
        let err = user_create(&pool, &user).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert!(user_find_by_email(&pool, "nohash@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn candidates_are_scoped_to_owner() {
        let pool = pool().await;
        let a = user_create(&pool, &new_user("a@example.com")).await.unwrap();
        let b = user_create(&pool, &new_user("b@example.com")).await.unwrap();

        candidate_create(&pool, &new_candidate("one@x.com"), a.id).await.unwrap();
        candidate_create(&pool, &new_candidate("two@x.com"), a.id).await.unwrap();
        candidate_create(&pool, &new_candidate("three@x.com"), b.id).await.unwrap();

        let for_a = candidates_list_by_user(&pool, a.id).await.unwrap();
        assert_eq!(
            for_a.iter().map(|c| c.email.as_str()).collect::<Vec<_>>(),
            vec!["one@x.com", "two@x.com"]
        );
        assert!(for_a.iter().all(|c| c.user_id == a.id));

        let for_b = candidates_list_by_user(&pool, b.id).await.unwrap();
        assert_eq!(for_b.len(), 1);
        assert_eq!(for_b[0].email, "three@x.com");
    }

    #[tokio::test]
    async fn candidate_emails_may_repeat() {
        let pool = pool().await;
        let a = user_create(&pool, &new_user("a@example.com")).await.unwrap();
        candidate_create(&pool, &new_candidate("same@x.com"), a.id).await.unwrap();
        candidate_create(&pool, &new_candidate("same@x.com"), a.id).await.unwrap();
        assert_eq!(candidates_list_by_user(&pool, a.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn candidate_requires_existing_owner() {
        let pool = pool().await;
        let err = candidate_create(&pool, &new_candidate("c@x.com"), 999)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Db(_)));
    }

    #[tokio::test]
    async fn candidate_missing_field_is_a_store_failure() {
        let pool = pool().await;
        let a = user_create(&pool, &new_user("a@example.com")).await.unwrap();
        let err = candidate_create(&pool, &NewCandidate::default(), a.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Db(_)));
    }
}
