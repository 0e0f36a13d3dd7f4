use color_eyre::Result;

use crate::db::models::AuthUser;
use crate::db::Db;

// ---------------------------------------------------------------------------
// AuthRepository trait (DIP: service defines the abstraction it needs)
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait AuthRepository: Send + Sync {
    fn email_exists(&self, email: &str) -> impl std::future::Future<Output = Result<bool>> + Send;

    fn create_user(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<i32>> + Send;

    fn verify_user_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;

    fn find_user_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<AuthUser>>> + Send;

    fn create_user_session(
        &self,
        user_id: i32,
    ) -> impl std::future::Future<Output = Result<String>> + Send;

    fn delete_user_session(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

impl AuthRepository for Db {
    async fn email_exists(&self, email: &str) -> Result<bool> {
        Db::email_exists(self, email).await
    }

    async fn create_user(&self, email: &str, password: &str) -> Result<i32> {
        Db::create_user(self, email, password).await
    }

    async fn verify_user_password(&self, email: &str, password: &str) -> Result<bool> {
        Db::verify_user_password(self, email, password).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>> {
        Db::find_user_by_email(self, email).await
    }

    async fn create_user_session(&self, user_id: i32) -> Result<String> {
        Db::create_user_session(self, user_id).await
    }

    async fn delete_user_session(&self, session_id: &str) -> Result<()> {
        Db::delete_user_session(self, session_id).await
    }
}

// ---------------------------------------------------------------------------
// Outcome enums
// ---------------------------------------------------------------------------

pub enum RegisterOutcome {
    /// User created and logged in. Carries the user id and session token.
    LoggedIn { user_id: i32, session: String },
    /// Required fields were empty.
    EmptyFields,
    /// Email already in use.
    EmailTaken,
    /// Password does not meet minimum requirements.
    WeakPassword,
}

pub enum LoginOutcome {
    /// Login succeeded. Contains the session token.
    Success(String),
    /// Password was incorrect (or email not found).
    InvalidCredentials,
}

const MIN_PASSWORD_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// AuthService
// ---------------------------------------------------------------------------

pub struct AuthService<R: AuthRepository = Db> {
    repo: R,
}

impl<R: AuthRepository + Clone> Clone for AuthService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<RegisterOutcome> {
        if email.is_empty() || password.is_empty() {
            return Ok(RegisterOutcome::EmptyFields);
        }

        if password.len() < MIN_PASSWORD_LENGTH {
            return Ok(RegisterOutcome::WeakPassword);
        }

        let exists = self.repo.email_exists(email).await?;
        if exists {
            return Ok(RegisterOutcome::EmailTaken);
        }

        let user_id = self.repo.create_user(email, password).await?;
        let session = self.repo.create_user_session(user_id).await?;

        Ok(RegisterOutcome::LoggedIn { user_id, session })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        let verified = self.repo.verify_user_password(email, password).await?;

        if !verified {
            return Ok(LoginOutcome::InvalidCredentials);
        }

        let user =
            self.repo.find_user_by_email(email).await?.ok_or_else(|| {
                color_eyre::eyre::eyre!("user not found after password verification")
            })?;

        let session_token = self.repo.create_user_session(user.id).await?;

        Ok(LoginOutcome::Success(session_token))
    }

    pub async fn logout(&self, session_id: &str) -> Result<()> {
        self.repo.delete_user_session(session_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(mock_repo: MockAuthRepository) -> AuthService<MockAuthRepository> {
        AuthService::new(mock_repo)
    }

    // ----- register tests -----

    #[tokio::test]
    async fn register_empty_fields_creates_nothing() {
        let mock = MockAuthRepository::new();

        let outcome = service(mock).register("", "password123").await.unwrap();
        assert!(matches!(outcome, RegisterOutcome::EmptyFields));
    }

    #[tokio::test]
    async fn register_short_password_is_rejected() {
        let mock = MockAuthRepository::new();

        let outcome = service(mock)
            .register("a@example.com", "short")
            .await
            .unwrap();
        assert!(matches!(outcome, RegisterOutcome::WeakPassword));
    }

    #[tokio::test]
    async fn register_taken_email_is_rejected() {
        let mut mock = MockAuthRepository::new();
        mock.expect_email_exists()
            .returning(|_| Box::pin(async { Ok(true) }));

        let outcome = service(mock)
            .register("a@example.com", "password123")
            .await
            .unwrap();
        assert!(matches!(outcome, RegisterOutcome::EmailTaken));
    }

    #[tokio::test]
    async fn register_success_creates_user_and_session() {
        let mut mock = MockAuthRepository::new();
        mock.expect_email_exists()
            .returning(|_| Box::pin(async { Ok(false) }));
        mock.expect_create_user()
            .withf(|email, _| email == "a@example.com")
            .returning(|_, _| Box::pin(async { Ok(7) }));
        mock.expect_create_user_session()
            .withf(|user_id| *user_id == 7)
            .returning(|_| Box::pin(async { Ok("token".to_string()) }));

        let outcome = service(mock)
            .register("a@example.com", "password123")
            .await
            .unwrap();
        match outcome {
            RegisterOutcome::LoggedIn { user_id, session } => {
                assert_eq!(user_id, 7);
                assert_eq!(session, "token");
            }
            _ => panic!("expected LoggedIn"),
        }
    }

    // ----- login tests -----

    #[tokio::test]
    async fn login_success_returns_session_token() {
        let mut mock = MockAuthRepository::new();
        mock.expect_verify_user_password()
            .returning(|_, _| Box::pin(async { Ok(true) }));
        mock.expect_find_user_by_email().returning(|_| {
            Box::pin(async {
                Ok(Some(AuthUser {
                    id: 3,
                    email: "a@example.com".to_string(),
                }))
            })
        });
        mock.expect_create_user_session()
            .withf(|user_id| *user_id == 3)
            .returning(|_| Box::pin(async { Ok("token".to_string()) }));

        let outcome = service(mock)
            .login("a@example.com", "password123")
            .await
            .unwrap();
        assert!(matches!(outcome, LoginOutcome::Success(token) if token == "token"));
    }

    #[tokio::test]
    async fn login_bad_password_creates_no_session() {
        let mut mock = MockAuthRepository::new();
        mock.expect_verify_user_password()
            .returning(|_, _| Box::pin(async { Ok(false) }));

        let outcome = service(mock)
            .login("a@example.com", "wrong")
            .await
            .unwrap();
        assert!(matches!(outcome, LoginOutcome::InvalidCredentials));
    }
}
