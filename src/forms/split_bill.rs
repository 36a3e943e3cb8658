use crate::forms::{FormError, TextField};
use crate::models::{FriendId, Payer};

/// Field of the split-bill form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SplitField {
    #[default]
    Bill,
    UserExpense,
    Payer,
}

impl SplitField {
    pub fn next(&self) -> SplitField {
        match self {
            SplitField::Bill => SplitField::UserExpense,
            SplitField::UserExpense => SplitField::Payer,
            SplitField::Payer => SplitField::Bill,
        }
    }

    pub fn prev(&self) -> SplitField {
        match self {
            SplitField::Bill => SplitField::Payer,
            SplitField::UserExpense => SplitField::Bill,
            SplitField::Payer => SplitField::UserExpense,
        }
    }
}

/// Draft of a bill split with one friend.
///
/// Invariant: whenever both amounts are set, the user's expense is at most
/// the bill.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitBillForm {
    friend_id: FriendId,
    bill: TextField,
    user_expense: TextField,
    payer: Payer,
    pub active: SplitField,
}

impl SplitBillForm {
    pub fn new(friend_id: impl Into<FriendId>) -> Self {
        SplitBillForm {
            friend_id: friend_id.into(),
            bill: TextField::default(),
            user_expense: TextField::default(),
            payer: Payer::User,
            active: SplitField::Bill,
        }
    }

    /// Friend this draft was opened for
    pub fn friend_id(&self) -> &str {
        &self.friend_id
    }

    pub fn bill_field(&self) -> &TextField {
        &self.bill
    }

    pub fn user_expense_field(&self) -> &TextField {
        &self.user_expense
    }

    pub fn bill(&self) -> Option<f64> {
        parse_amount(self.bill.as_str())
    }

    pub fn user_expense(&self) -> Option<f64> {
        parse_amount(self.user_expense.as_str())
    }

    /// `bill - user expense`, or `None` while no bill is entered
    pub fn friend_expense(&self) -> Option<f64> {
        self.bill().map(|bill| bill - self.user_expense().unwrap_or(0.0))
    }

    pub fn payer(&self) -> Payer {
        self.payer
    }

    pub fn set_payer(&mut self, payer: Payer) {
        self.payer = payer;
    }

    pub fn toggle_payer(&mut self) {
        self.payer = self.payer.toggle();
    }

    pub fn next_field(&mut self) {
        self.active = self.active.next();
    }

    pub fn prev_field(&mut self) {
        self.active = self.active.prev();
    }

    /// Set the bill; a user expense above the new bill is lowered to it.
    /// Negative bills are treated as zero.
    pub fn set_bill(&mut self, bill: f64) {
        self.commit_bill(bill.max(0.0).to_string());
    }

    /// Set the user's expense. Refused when it would exceed the bill
    /// (an empty bill counts as zero); the previous value is kept.
    pub fn set_user_expense(&mut self, expense: f64) -> Result<(), FormError> {
        self.commit_user_expense(expense.max(0.0).to_string())
    }

    /// Type a character into the active amount field
    pub fn enter_char(&mut self, c: char) -> Result<(), FormError> {
        match self.active {
            SplitField::Bill => {
                let candidate = self.bill.with_inserted(c);
                check_partial_amount(&candidate)?;
                self.bill.insert(c);
                self.clamp_user_expense();
                Ok(())
            }
            SplitField::UserExpense => {
                let candidate = self.user_expense.with_inserted(c);
                check_partial_amount(&candidate)?;
                self.check_within_bill(&candidate)?;
                self.user_expense.insert(c);
                Ok(())
            }
            SplitField::Payer => {
                if c == ' ' {
                    self.toggle_payer();
                }
                Ok(())
            }
        }
    }

    /// Delete before the cursor. In the user expense field, removing a
    /// decimal point can grow the amount; that is refused like typing past
    /// the bill.
    pub fn backspace(&mut self) -> Result<(), FormError> {
        match self.active {
            SplitField::Bill => {
                self.bill.backspace();
                self.clamp_user_expense();
            }
            SplitField::UserExpense => {
                let candidate = self.user_expense.with_backspace();
                let grows = match (parse_amount(&candidate), self.user_expense()) {
                    (Some(next), Some(current)) => next > current,
                    (Some(_), None) => true,
                    (None, _) => false,
                };
                if grows {
                    self.check_within_bill(&candidate)?;
                }
                self.user_expense.backspace();
            }
            SplitField::Payer => {}
        }
        Ok(())
    }

    pub fn move_left(&mut self) {
        match self.active {
            SplitField::Bill => self.bill.move_left(),
            SplitField::UserExpense => self.user_expense.move_left(),
            SplitField::Payer => self.toggle_payer(),
        }
    }

    pub fn move_right(&mut self) {
        match self.active {
            SplitField::Bill => self.bill.move_right(),
            SplitField::UserExpense => self.user_expense.move_right(),
            SplitField::Payer => self.toggle_payer(),
        }
    }

    /// Signed change to the friend's balance.
    ///
    /// When the user paid, the friend now owes their share (`+friend expense`).
    /// When the friend paid, the user owes their share (`-user expense`).
    /// Unset and zero amounts are both refused.
    pub fn submit(&self) -> Result<f64, FormError> {
        let bill = self
            .bill()
            .filter(|b| *b != 0.0)
            .ok_or(FormError::MissingBill)?;
        let user = self
            .user_expense()
            .filter(|u| *u != 0.0)
            .ok_or(FormError::MissingUserExpense)?;

        Ok(match self.payer {
            Payer::User => bill - user,
            Payer::Friend => -user,
        })
    }

    fn commit_bill(&mut self, text: String) {
        self.bill.set(text);
        self.clamp_user_expense();
    }

    fn commit_user_expense(&mut self, text: String) -> Result<(), FormError> {
        self.check_within_bill(&text)?;
        self.user_expense.set(text);
        Ok(())
    }

    fn check_within_bill(&self, candidate: &str) -> Result<(), FormError> {
        let limit = self.bill().unwrap_or(0.0);
        match parse_amount(candidate) {
            Some(value) if value > limit => Err(FormError::ExpenseExceedsBill),
            _ => Ok(()),
        }
    }

    fn clamp_user_expense(&mut self) {
        if let (Some(bill), Some(user)) = (self.bill(), self.user_expense()) {
            if user > bill {
                self.user_expense.set(bill.to_string());
            }
        }
    }
}

/// Digits with at most one decimal point; empty is allowed
fn check_partial_amount(text: &str) -> Result<(), FormError> {
    let dots = text.chars().filter(|c| *c == '.').count();
    if dots <= 1 && text.chars().all(|c| c.is_ascii_digit() || c == '.') {
        Ok(())
    } else {
        Err(FormError::InvalidAmount)
    }
}

fn parse_amount(text: &str) -> Option<f64> {
    text.parse::<f64>().ok()
}
