//! Onboarding data model — form fields, request/response bodies, user ids.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

/// Settings key under which the onboarded user's id is persisted.
pub const USER_ID_KEY: &str = "userId";

/// One of the four form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Username,
    Password,
    Age,
    FitnessGoals,
}

impl Field {
    /// All fields in display order.
    pub const ALL: [Field; 4] = [
        Field::Username,
        Field::Password,
        Field::Age,
        Field::FitnessGoals,
    ];
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Username => "username",
            Self::Password => "password",
            Self::Age => "age",
            Self::FitnessGoals => "fitnessGoals",
        };
        write!(f, "{s}")
    }
}

/// How a field should be presented by a front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    pub placeholder: &'static str,
    /// Input is hidden while typing.
    pub masked: bool,
    /// Input uses a numeric keypad.
    pub numeric: bool,
}

/// Declarative schema for the onboarding form.
pub const FIELDS: [FieldSpec; 4] = [
    FieldSpec {
        field: Field::Username,
        placeholder: "Username",
        masked: false,
        numeric: false,
    },
    FieldSpec {
        field: Field::Password,
        placeholder: "Password",
        masked: true,
        numeric: false,
    },
    FieldSpec {
        field: Field::Age,
        placeholder: "Age",
        masked: false,
        numeric: true,
    },
    FieldSpec {
        field: Field::FitnessGoals,
        placeholder: "Fitness Goals",
        masked: false,
        numeric: false,
    },
];

/// Raw form values, exactly as typed.
#[derive(Clone, Default)]
pub struct OnboardingForm {
    pub username: String,
    pub password: String,
    pub age: String,
    pub fitness_goals: String,
}

impl OnboardingForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Username => &self.username,
            Field::Password => &self.password,
            Field::Age => &self.age,
            Field::FitnessGoals => &self.fitness_goals,
        }
    }

    /// Return a copy with one field replaced.
    pub fn with(&self, field: Field, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            Field::Username => next.username = value,
            Field::Password => next.password = value,
            Field::Age => next.age = value,
            Field::FitnessGoals => next.fitness_goals = value,
        }
        next
    }
}

impl std::fmt::Debug for OnboardingForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnboardingForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("age", &self.age)
            .field("fitness_goals", &self.fitness_goals)
            .finish()
    }
}

/// Form input that passed validation. Only this can be submitted.
#[derive(Debug, Clone)]
pub struct ValidatedRegistration {
    pub username: String,
    pub password: SecretString,
    pub age: u32,
    pub fitness_goals: String,
}

impl ValidatedRegistration {
    pub fn registration_request(&self) -> RegistrationRequest {
        RegistrationRequest {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    /// Build the onboarding body. Needs the id returned by a successful registration.
    pub fn onboarding_request(&self, user_id: UserId) -> OnboardingRequest {
        OnboardingRequest {
            user_id,
            age: self.age,
            fitness_goals: self.fitness_goals.clone(),
        }
    }
}

/// Server-assigned account identifier.
///
/// The server may send either a number or a string. It is sent back in the
/// same shape it arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Numeric(i64),
    Text(String),
}

impl UserId {
    /// Pull a usable id out of a registration response body.
    pub fn from_body(body: &serde_json::Value) -> Option<Self> {
        match body.get("userId")? {
            serde_json::Value::Number(n) => n.as_i64().map(Self::Numeric),
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(Self::Text(s.clone())),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for UserId {
    fn from(n: i64) -> Self {
        Self::Numeric(n)
    }
}

/// The two remote calls of the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Registration,
    Onboarding,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registration => write!(f, "Registration"),
            Self::Onboarding => write!(f, "Onboarding"),
        }
    }
}

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationRequest {
    pub username: String,
    #[serde(serialize_with = "expose_password")]
    pub password: SecretString,
}

fn expose_password<S: Serializer>(password: &SecretString, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(password.expose_secret())
}

/// Body of `POST /api/users/onboarding`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRequest {
    pub user_id: UserId,
    pub age: u32,
    pub fitness_goals: String,
}

/// Outcome of a successful registration call.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationResult {
    pub user_id: UserId,
    pub status: u16,
}

/// Outcome of an onboarding call.
#[derive(Debug, Clone, PartialEq)]
pub struct OnboardingResult {
    pub status: u16,
    pub message: Option<String>,
}

/// Read the optional `message` a server puts in a response body.
pub fn server_message(body: &serde_json::Value) -> Option<String> {
    body.get("message")
        .and_then(|m| m.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
}
