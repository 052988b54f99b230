use crate::domain::actor::{Actor, ActorRef, NewActor, Role};
use crate::domain::errors::DomainError;
use crate::domain::ports::UserStore;
use crate::security::password;
use crate::security::TokenAuthority;

#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    /// Role name; defaults to CUSTOMER when absent or blank.
    pub role: Option<String>,
}

/// Token plus the identity it was issued to.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub token: String,
    pub actor: Actor,
}

#[derive(Clone)]
pub struct AuthService<U> {
    users: U,
    tokens: TokenAuthority,
}

impl<U: UserStore> AuthService<U> {
    pub fn new(users: U, tokens: TokenAuthority) -> Self {
        Self { users, tokens }
    }

    pub fn register(&self, input: RegisterInput) -> Result<AuthOutcome, DomainError> {
        let role = match input.role.as_deref() {
            None | Some("") => Role::Customer,
            Some(s) => Role::parse(s).ok_or_else(|| {
                DomainError::InvalidRole(format!(
                    "Invalid role '{s}'. Valid values: CUSTOMER, ADMIN, COURIER"
                ))
            })?,
        };

        let password_hash = password::hash_password(&input.password)?;
        let actor = self.users.create(NewActor {
            name: input.name,
            email: input.email,
            phone: input.phone,
            password_hash,
            role,
        })?;

        let token = self.tokens.issue(actor.id, actor.role)?;
        Ok(AuthOutcome { token, actor })
    }

    /// Deliberately indistinguishable failures: unknown email, wrong
    /// password, and deactivated accounts all surface the same error.
    pub fn login(&self, email: &str, raw_password: &str) -> Result<AuthOutcome, DomainError> {
        let actor = self
            .users
            .find_by_email(email)?
            .ok_or(DomainError::InvalidCredential)?;

        if !actor.active || !password::verify_password(raw_password, &actor.password_hash) {
            return Err(DomainError::InvalidCredential);
        }

        let token = self.tokens.issue(actor.id, actor.role)?;
        Ok(AuthOutcome { token, actor })
    }

    /// Resolves the token-derived caller back to the stored identity.
    pub fn current_identity(&self, caller: &ActorRef) -> Result<Actor, DomainError> {
        self.users
            .find_by_id(caller.id)?
            .ok_or(DomainError::InvalidCredential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryStore;

    fn service() -> AuthService<MemoryStore> {
        AuthService::new(MemoryStore::new(), TokenAuthority::new("auth-test-secret", 24))
    }

    fn register_input(email: &str, role: Option<&str>) -> RegisterInput {
        RegisterInput {
            name: "Alex".to_string(),
            email: email.to_string(),
            phone: Some("555-0100".to_string()),
            password: "s3cret".to_string(),
            role: role.map(str::to_string),
        }
    }

    #[test]
    fn register_defaults_to_customer_and_issues_a_valid_token() {
        let auth = service();
        let outcome = auth
            .register(register_input("alex@example.com", None))
            .expect("register failed");

        assert_eq!(outcome.actor.role, Role::Customer);
        assert!(outcome.actor.active);

        let tokens = TokenAuthority::new("auth-test-secret", 24);
        let caller = tokens.validate(&outcome.token).expect("token invalid");
        assert_eq!(caller.id, outcome.actor.id);
        assert_eq!(caller.role, Role::Customer);
    }

    #[test]
    fn register_accepts_explicit_roles() {
        let auth = service();
        let outcome = auth
            .register(register_input("courier@example.com", Some("courier")))
            .expect("register failed");
        assert_eq!(outcome.actor.role, Role::Courier);
    }

    #[test]
    fn register_rejects_unknown_role_with_the_valid_list() {
        let auth = service();
        let err = auth
            .register(register_input("x@example.com", Some("SUPERUSER")))
            .expect_err("should reject");
        match err {
            DomainError::InvalidRole(msg) => {
                assert!(msg.contains("SUPERUSER"));
                assert!(msg.contains("CUSTOMER, ADMIN, COURIER"));
            }
            other => panic!("expected InvalidRole, got {other:?}"),
        }
    }

    #[test]
    fn second_registration_with_same_email_fails() {
        let auth = service();
        auth.register(register_input("dup@example.com", None))
            .expect("first register failed");
        let err = auth
            .register(register_input("dup@example.com", None))
            .expect_err("duplicate should fail");
        assert!(matches!(err, DomainError::DuplicateEmail));
    }

    #[test]
    fn login_round_trips_and_wrong_password_is_generic() {
        let auth = service();
        auth.register(register_input("login@example.com", None))
            .expect("register failed");

        assert!(auth.login("login@example.com", "s3cret").is_ok());

        // Wrong password and unknown account are the same failure.
        let wrong_pw = auth
            .login("login@example.com", "nope")
            .expect_err("wrong password should fail");
        let unknown = auth
            .login("ghost@example.com", "s3cret")
            .expect_err("unknown email should fail");
        assert!(matches!(wrong_pw, DomainError::InvalidCredential));
        assert!(matches!(unknown, DomainError::InvalidCredential));
    }

    #[test]
    fn current_identity_resolves_the_registered_actor() {
        let auth = service();
        let outcome = auth
            .register(register_input("me@example.com", None))
            .expect("register failed");
        let caller = ActorRef {
            id: outcome.actor.id,
            role: outcome.actor.role,
        };

        let me = auth.current_identity(&caller).expect("identity failed");
        assert_eq!(me.email, "me@example.com");
    }
}
