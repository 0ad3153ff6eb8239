use crate::session::Session;

const MISSING_FIELDS: &str = "Please fill in all the fields.";

#[derive(Debug, Default, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
}

impl LoginForm {
    /// Signs in through `session`. On `true` the UI goes back home.
    pub async fn submit(&mut self, session: &mut Session) -> bool {
        self.error = None;
        if self.email.is_empty() || self.password.is_empty() {
            self.error = Some(MISSING_FIELDS.to_string());
            return false;
        }

        match session.login(&self.email, &self.password).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Login failed: {}", e);
                self.error = Some(e.user_message("Login failed. Please try again."));
                false
            }
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub error: Option<String>,
}

impl RegisterForm {
    pub async fn submit(&mut self, session: &mut Session) -> bool {
        self.error = None;
        if self.username.is_empty() || self.email.is_empty() || self.password.is_empty() {
            self.error = Some(MISSING_FIELDS.to_string());
            return false;
        }

        match session
            .register(&self.username, &self.email, &self.password)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Registration failed: {}", e);
                self.error = Some(e.user_message("Registration failed. Try again."));
                false
            }
        }
    }
}
