//! 화면 셸이 소유하는 로그인 세션 상태.
//!
//! 계산 로직과 무관하며 메모리에만 존재한다. 관리자 자격 확인은 데모용
//! 고정 값이므로 실제 인증으로 사용하면 안 된다.

use std::fmt;

use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("User"),
            Role::Admin => f.write_str("Admin"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    Authenticating(Role),
    LoggedIn(Role),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// 관리자 자격이 일치하지 않음
    InvalidCredentials,
    /// 인증 단계가 아닌데 자격을 제출함
    NotAuthenticating,
    /// 이미 로그인된 상태에서 로그인을 시작함
    AlreadyLoggedIn,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidCredentials => write!(f, "invalid admin credentials"),
            SessionError::NotAuthenticating => write!(f, "no login in progress"),
            SessionError::AlreadyLoggedIn => write!(f, "already logged in"),
        }
    }
}

impl std::error::Error for SessionError {}

/// 제출된 자격. 사용자 역할은 비어 있어도 된다.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

pub trait CredentialCheck {
    fn verify(&self, role: Role, credentials: &Credentials) -> bool;
}

/// 데모용 자격 확인. 관리자는 `admin` / `admin123`, 사용자는 항상 통과.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoCredentials;

impl DemoCredentials {
    const ADMIN_USERNAME: &'static str = "admin";
    const ADMIN_PASSWORD: &'static str = "admin123";
}

impl CredentialCheck for DemoCredentials {
    fn verify(&self, role: Role, credentials: &Credentials) -> bool {
        match role {
            Role::User => true,
            Role::Admin => {
                credentials.username == Self::ADMIN_USERNAME
                    && credentials.password == Self::ADMIN_PASSWORD
            }
        }
    }
}

/// 로그아웃 → 인증 중 → 로그인, 로그아웃 시 처음으로 돌아간다.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    state: SessionState,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn role(&self) -> Option<Role> {
        match self.state {
            SessionState::LoggedIn(role) => Some(role),
            _ => None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.role().is_some()
    }

    /// 역할을 골라 인증을 시작한다. 인증 중에 다시 부르면 역할만 바뀐다.
    pub fn begin_login(&mut self, role: Role) -> Result<(), SessionError> {
        if self.is_logged_in() {
            return Err(SessionError::AlreadyLoggedIn);
        }
        self.state = SessionState::Authenticating(role);
        Ok(())
    }

    /// 자격을 제출한다. 실패하면 인증 중 상태로 남는다.
    pub fn authenticate(
        &mut self,
        credentials: &Credentials,
        checker: &dyn CredentialCheck,
    ) -> Result<Role, SessionError> {
        let SessionState::Authenticating(role) = self.state else {
            return Err(SessionError::NotAuthenticating);
        };
        if !checker.verify(role, credentials) {
            warn!(%role, "login rejected");
            return Err(SessionError::InvalidCredentials);
        }
        self.state = SessionState::LoggedIn(role);
        info!(%role, "logged in");
        Ok(role)
    }

    pub fn cancel(&mut self) {
        if let SessionState::Authenticating(_) = self.state {
            self.state = SessionState::LoggedOut;
        }
    }

    pub fn logout(&mut self) {
        if let Some(role) = self.role() {
            info!(%role, "logged out");
        }
        self.state = SessionState::LoggedOut;
    }
}
