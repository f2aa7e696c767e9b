//! Per-screen form state.
//!
//! A `FormSession` is an owned value. Every operation takes `&self` and
//! hands back the next snapshot, so a screen replaces its session wholesale
//! instead of mutating fields in place.
//!
//! Submission is two-phase: `begin_submit` yields a `SubmitHandle`, and
//! `complete_submit` consumes that same handle once the auth call resolves.
//! Only the handle issued for the outstanding submission is accepted, which
//! is what keeps a session at one request in flight.

use std::fmt;

use enum_map::EnumMap;
use uuid::Uuid;

use crate::auth::{AuthRequest, AuthResult, LoginCredentials, SignupProfile};
use crate::validation::{FieldKey, validate};

/// The form variants the client presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    /// Login with an email address or a username.
    Login,
    /// Login with an email address only.
    EmailLogin,
    /// Login with a phone number.
    PhoneLogin,
    /// Account creation.
    Signup,
}

impl FormKind {
    /// Fields this form collects, in display order. All of them are required.
    pub fn fields(self) -> &'static [FieldKey] {
        match self {
            FormKind::Login => &[FieldKey::EmailOrUsername, FieldKey::Password],
            FormKind::EmailLogin => &[FieldKey::Email, FieldKey::Password],
            FormKind::PhoneLogin => &[FieldKey::Phone],
            FormKind::Signup => &[FieldKey::Username, FieldKey::Email, FieldKey::Password],
        }
    }

    pub fn uses(self, key: FieldKey) -> bool {
        self.fields().contains(&key)
    }
}

/// Stable identity of one session, used to route auth results back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Proof of an outstanding submission.
///
/// Deliberately neither `Clone` nor `Copy`: it is moved into the async call
/// and moved back into `complete_submit`, so each submission completes once.
#[derive(Debug, PartialEq, Eq)]
pub struct SubmitHandle {
    session: SessionId,
    seq: u64,
}

impl SubmitHandle {
    pub fn session(&self) -> SessionId {
        self.session
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    UnknownField { kind: FormKind, key: FieldKey },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::UnknownField { kind, key } => {
                write!(f, "field '{key}' is not part of the {kind:?} form")
            }
        }
    }
}

impl std::error::Error for FormError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// A submission is already in flight for this session.
    AlreadySubmitting,
    /// At least one required field failed validation; nothing was sent.
    InvalidFields,
    /// The handle does not belong to the outstanding submission.
    StaleHandle,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::AlreadySubmitting => write!(f, "a submission is already in flight"),
            SubmitError::InvalidFields => write!(f, "one or more fields are invalid"),
            SubmitError::StaleHandle => write!(f, "submission handle is not outstanding"),
        }
    }
}

impl std::error::Error for SubmitError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSession {
    id: SessionId,
    kind: FormKind,
    values: EnumMap<FieldKey, String>,
    errors: EnumMap<FieldKey, Option<&'static str>>,
    server_message: Option<String>,
    in_flight: Option<u64>,
    next_seq: u64,
    secret_visible: bool,
}

impl FormSession {
    pub fn new(kind: FormKind) -> Self {
        Self {
            id: SessionId::new(),
            kind,
            values: EnumMap::default(),
            errors: EnumMap::default(),
            server_message: None,
            in_flight: None,
            next_seq: 0,
            secret_visible: false,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn value(&self, key: FieldKey) -> &str {
        &self.values[key]
    }

    /// Inline error currently shown for `key`, if any.
    pub fn error(&self, key: FieldKey) -> Option<&'static str> {
        self.errors[key]
    }

    /// Visible field errors in display order.
    pub fn errors(&self) -> impl Iterator<Item = (FieldKey, &'static str)> + '_ {
        self.kind
            .fields()
            .iter()
            .filter_map(|&key| self.errors[key].map(|msg| (key, msg)))
    }

    pub fn server_message(&self) -> Option<&str> {
        self.server_message.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_secret_visible(&self) -> bool {
        self.secret_visible
    }

    /// Stores `value` and re-validates that field.
    pub fn set_field(&self, key: FieldKey, value: impl Into<String>) -> Result<Self, FormError> {
        if !self.kind.uses(key) {
            return Err(FormError::UnknownField {
                kind: self.kind,
                key,
            });
        }
        let value = value.into();
        let mut next = self.clone();
        next.errors[key] = validate(key, &value);
        next.values[key] = value;
        Ok(next)
    }

    /// Flips password visibility.
    pub fn toggle_secret(&self) -> Self {
        let mut next = self.clone();
        next.secret_visible = !next.secret_visible;
        next
    }

    /// True when every required field passes validation.
    pub fn can_submit(&self) -> bool {
        self.kind
            .fields()
            .iter()
            .all(|&key| validate(key, &self.values[key]).is_none())
    }

    /// Starts a validated submission.
    ///
    /// Always returns the next snapshot. On `InvalidFields` that snapshot
    /// carries the errors of every required field at once; on
    /// `AlreadySubmitting` it is unchanged.
    pub fn begin_submit(&self) -> (Self, Result<SubmitHandle, SubmitError>) {
        if self.is_submitting() {
            return (self.clone(), Err(SubmitError::AlreadySubmitting));
        }

        let mut next = self.clone();
        for &key in self.kind.fields() {
            next.errors[key] = validate(key, &self.values[key]);
        }
        if next.errors().next().is_some() {
            return (next, Err(SubmitError::InvalidFields));
        }

        let handle = next.start_flight();
        (next, Ok(handle))
    }

    /// Starts a submission that is not backed by the form fields, such as a
    /// third-party sign-in. Shares the in-flight guard with `begin_submit`.
    pub fn begin_external(&self) -> (Self, Result<SubmitHandle, SubmitError>) {
        if self.is_submitting() {
            return (self.clone(), Err(SubmitError::AlreadySubmitting));
        }
        let mut next = self.clone();
        let handle = next.start_flight();
        (next, Ok(handle))
    }

    /// Applies the result of the submission identified by `handle`.
    pub fn complete_submit(
        &self,
        handle: SubmitHandle,
        result: &AuthResult,
    ) -> Result<Self, SubmitError> {
        if handle.session != self.id || self.in_flight != Some(handle.seq) {
            return Err(SubmitError::StaleHandle);
        }
        let mut next = self.clone();
        next.in_flight = None;
        next.server_message = match result {
            AuthResult::Failure { user_message } => Some(user_message.clone()),
            AuthResult::Success { .. } | AuthResult::Cancelled => None,
        };
        Ok(next)
    }

    /// Wire request for the current values.
    pub fn request(&self) -> AuthRequest {
        let value = |key: FieldKey| self.values[key].clone();
        match self.kind {
            FormKind::Login => AuthRequest::Login(LoginCredentials::EmailOrUsername {
                email_or_username: value(FieldKey::EmailOrUsername),
                password: value(FieldKey::Password),
            }),
            FormKind::EmailLogin => AuthRequest::Login(LoginCredentials::Email {
                email: value(FieldKey::Email),
                password: value(FieldKey::Password),
            }),
            FormKind::PhoneLogin => AuthRequest::Login(LoginCredentials::Phone {
                phone: value(FieldKey::Phone),
            }),
            FormKind::Signup => AuthRequest::Signup(SignupProfile {
                username: value(FieldKey::Username),
                email: value(FieldKey::Email),
                password: value(FieldKey::Password),
            }),
        }
    }

    fn start_flight(&mut self) -> SubmitHandle {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.in_flight = Some(seq);
        self.server_message = None;
        SubmitHandle {
            session: self.id,
            seq,
        }
    }
}
