//! Screen-level state machine for a linear survey.
//!
//! ```text
//! Welcome --start--> Question(1) --next--> ... --next--> Question(N)
//!                    Question(i) --previous--> Question(i-1)   (i > 1)
//! Question(N) --submit--> ThankYou --reset--> Welcome
//! ```

/// What the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    /// 1-based position of the question being shown.
    Question(usize),
    ThankYou,
}

/// Transient navigation state. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    current_index: usize,
    total: usize,
    completed: bool,
    thank_you: bool,
}

impl Navigation {
    /// Start on the welcome screen of a survey with `total` questions.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            current_index: 0,
            total,
            completed: false,
            thank_you: false,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        if self.thank_you {
            Screen::ThankYou
        } else if self.current_index == 0 {
            Screen::Welcome
        } else {
            Screen::Question(self.current_index)
        }
    }

    /// 0 on the welcome screen, otherwise the 1-based question position.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn is_thank_you(&self) -> bool {
        self.thank_you
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        matches!(self.screen(), Screen::Question(i) if i == self.total)
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        matches!(self.screen(), Screen::Question(i) if i < self.total)
    }

    #[must_use]
    pub fn can_retreat(&self) -> bool {
        matches!(self.screen(), Screen::Question(i) if i > 1)
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.is_last_question()
    }

    /// Welcome -> Question(1). Returns whether the state changed.
    pub fn start(&mut self) -> bool {
        if self.screen() != Screen::Welcome || self.total == 0 {
            return false;
        }
        self.current_index = 1;
        true
    }

    /// Question(i) -> Question(i + 1) for i < N.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        self.current_index += 1;
        true
    }

    /// Question(i) -> Question(i - 1) for i > 1.
    pub fn retreat(&mut self) -> bool {
        if !self.can_retreat() {
            return false;
        }
        self.current_index -= 1;
        true
    }

    /// Question(N) -> ThankYou.
    pub fn complete(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        self.completed = true;
        self.thank_you = true;
        true
    }

    /// ThankYou -> Welcome.
    pub fn reset(&mut self) -> bool {
        if !self.thank_you {
            return false;
        }
        self.current_index = 0;
        self.completed = false;
        self.thank_you = false;
        true
    }
}
