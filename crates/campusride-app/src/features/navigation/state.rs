//! Navigation stack.
//!
//! Each stack entry owns the state of its screen, including any form
//! sessions, so popping a screen drops its sessions with it. An empty stack
//! is the booting pseudo-state: nothing has rendered yet.

use std::fmt;

use campusride_core::form::{FormSession, SessionId};

use crate::features::auth::{LoginScreen, SignupScreen};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Splash,
    Welcome,
    Login,
    Signup,
    OnBoard,
    Home,
    Trip,
    Account,
}

/// Sub-destinations of the Welcome container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Home,
    Trip,
    Account,
}

impl Tab {
    pub fn screen_id(self) -> ScreenId {
        match self {
            Tab::Home => ScreenId::Home,
            Tab::Trip => ScreenId::Trip,
            Tab::Account => ScreenId::Account,
        }
    }
}

/// Instruction for the navigation host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    /// Clear history and show the screen.
    Reset(ScreenId),
    Push(ScreenId),
    /// Swap the top screen without adding history.
    Replace(ScreenId),
    Pop,
    /// Switch the Welcome container to a tab.
    SelectTab(Tab),
}

impl fmt::Display for NavCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavCommand::Reset(id) => write!(f, "Reset({id:?})"),
            NavCommand::Push(id) => write!(f, "Push({id:?})"),
            NavCommand::Replace(id) => write!(f, "Replace({id:?})"),
            NavCommand::Pop => f.write_str("Pop"),
            NavCommand::SelectTab(tab) => write!(f, "SelectTab({tab:?})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Splash,
    Welcome { tab: Tab },
    Login(LoginScreen),
    Signup(SignupScreen),
    OnBoard,
}

impl Screen {
    pub fn welcome() -> Self {
        Screen::Welcome { tab: Tab::Home }
    }

    pub fn login() -> Self {
        Screen::Login(LoginScreen::new())
    }

    pub fn signup() -> Self {
        Screen::Signup(SignupScreen::new())
    }

    pub fn id(&self) -> ScreenId {
        match self {
            Screen::Splash => ScreenId::Splash,
            Screen::Welcome { .. } => ScreenId::Welcome,
            Screen::Login(_) => ScreenId::Login,
            Screen::Signup(_) => ScreenId::Signup,
            Screen::OnBoard => ScreenId::OnBoard,
        }
    }

    /// The form currently presented by this screen, if it has one.
    pub fn form(&self) -> Option<&FormSession> {
        match self {
            Screen::Login(login) => Some(login.form()),
            Screen::Signup(signup) => Some(&signup.form),
            _ => None,
        }
    }

    pub(crate) fn form_mut(&mut self) -> Option<&mut FormSession> {
        match self {
            Screen::Login(login) => Some(login.form_mut()),
            Screen::Signup(signup) => Some(&mut signup.form),
            _ => None,
        }
    }

    fn session_mut(&mut self, id: SessionId) -> Option<&mut FormSession> {
        match self {
            Screen::Login(login) => login.session_mut(id),
            Screen::Signup(signup) => (signup.form.id() == id).then_some(&mut signup.form),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    stack: Vec<Screen>,
}

impl NavState {
    pub fn is_booting(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn stack(&self) -> &[Screen] {
        &self.stack
    }

    pub fn top(&self) -> Option<&Screen> {
        self.stack.last()
    }

    pub fn top_id(&self) -> Option<ScreenId> {
        self.top().map(Screen::id)
    }

    /// The screen the user is looking at. Inside Welcome this is the tab.
    pub fn active(&self) -> Option<ScreenId> {
        match self.top()? {
            Screen::Welcome { tab } => Some(tab.screen_id()),
            screen => Some(screen.id()),
        }
    }

    pub fn history(&self) -> Vec<ScreenId> {
        self.stack.iter().map(Screen::id).collect()
    }

    pub fn active_form(&self) -> Option<&FormSession> {
        self.top().and_then(Screen::form)
    }

    pub(crate) fn top_mut(&mut self) -> Option<&mut Screen> {
        self.stack.last_mut()
    }

    pub(crate) fn active_form_mut(&mut self) -> Option<&mut FormSession> {
        self.top_mut().and_then(Screen::form_mut)
    }

    /// Finds the live session `id` and reports whether its screen is on top.
    pub(crate) fn session_mut(&mut self, id: SessionId) -> Option<(&mut FormSession, bool)> {
        let top = self.stack.len().checked_sub(1)?;
        self.stack
            .iter_mut()
            .enumerate()
            .find_map(|(idx, screen)| screen.session_mut(id).map(|form| (form, idx == top)))
    }

    fn welcome_index(&self) -> Option<usize> {
        self.stack
            .iter()
            .position(|screen| matches!(screen, Screen::Welcome { .. }))
    }

    pub(crate) fn reset(&mut self, screen: Screen) -> NavCommand {
        let id = screen.id();
        self.stack.clear();
        self.stack.push(screen);
        NavCommand::Reset(id)
    }

    pub(crate) fn push(&mut self, screen: Screen) -> NavCommand {
        let id = screen.id();
        self.stack.push(screen);
        NavCommand::Push(id)
    }

    pub(crate) fn replace(&mut self, screen: Screen) -> NavCommand {
        let id = screen.id();
        self.stack.pop();
        self.stack.push(screen);
        NavCommand::Replace(id)
    }

    /// Pops the top screen. The root is never popped.
    pub(crate) fn pop(&mut self) -> Option<NavCommand> {
        if self.stack.len() <= 1 {
            return None;
        }
        self.stack.pop();
        Some(NavCommand::Pop)
    }

    /// Unwinds to Welcome and switches its tab.
    ///
    /// Returns no commands when Welcome is not on the stack.
    pub(crate) fn select_tab(&mut self, tab: Tab) -> Vec<NavCommand> {
        let Some(idx) = self.welcome_index() else {
            return vec![];
        };
        let mut commands = Vec::new();
        while self.stack.len() > idx + 1 {
            self.stack.pop();
            commands.push(NavCommand::Pop);
        }
        if let Some(Screen::Welcome { tab: current }) = self.stack.last_mut() {
            *current = tab;
        }
        commands.push(NavCommand::SelectTab(tab));
        commands
    }
}
