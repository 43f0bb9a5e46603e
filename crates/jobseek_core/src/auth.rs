use std::str::FromStr;

use crate::FilterParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Seeker,
    Employer,
    Admin,
}

impl FromStr for Role {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seeker" | "jobseeker" => Ok(Role::Seeker),
            "employer" => Ok(Role::Employer),
            "admin" => Ok(Role::Admin),
            _ => Err(FilterParseError {
                kind: "role",
                value: s.to_string(),
            }),
        }
    }
}

/// Identity handed to the controller by whoever owns the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthStatus {
    #[default]
    Anonymous,
    Authenticated {
        user_id: String,
        role: Role,
        token: String,
    },
}

impl AuthStatus {
    /// Only job seekers get personalised recommendations.
    pub fn recommendation_token(&self) -> Option<&str> {
        match self {
            AuthStatus::Authenticated {
                role: Role::Seeker,
                token,
                ..
            } => Some(token),
            _ => None,
        }
    }
}
