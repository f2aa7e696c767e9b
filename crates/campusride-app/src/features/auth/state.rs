//! Login and signup screen state.

use campusride_core::form::{FormKind, FormSession, SessionId};
use enum_map::{Enum, EnumMap};

/// Tabs of the login screen. Each keeps its own session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Enum)]
pub enum LoginTab {
    #[default]
    Identifier,
    Email,
    Phone,
}

impl LoginTab {
    pub fn form_kind(self) -> FormKind {
        match self {
            LoginTab::Identifier => FormKind::Login,
            LoginTab::Email => FormKind::EmailLogin,
            LoginTab::Phone => FormKind::PhoneLogin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginScreen {
    pub tab: LoginTab,
    forms: EnumMap<LoginTab, FormSession>,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            tab: LoginTab::default(),
            forms: EnumMap::from_fn(|tab: LoginTab| FormSession::new(tab.form_kind())),
        }
    }

    pub fn form(&self) -> &FormSession {
        &self.forms[self.tab]
    }

    pub fn tab_form(&self, tab: LoginTab) -> &FormSession {
        &self.forms[tab]
    }

    pub(crate) fn form_mut(&mut self) -> &mut FormSession {
        &mut self.forms[self.tab]
    }

    pub(crate) fn session_mut(&mut self, id: SessionId) -> Option<&mut FormSession> {
        self.forms.values_mut().find(|form| form.id() == id)
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupScreen {
    pub form: FormSession,
}

impl SignupScreen {
    pub fn new() -> Self {
        Self {
            form: FormSession::new(FormKind::Signup),
        }
    }
}

impl Default for SignupScreen {
    fn default() -> Self {
        Self::new()
    }
}
