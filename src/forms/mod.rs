//! Transient form state: add friend, edit friend, split bill.
//!
//! Forms own their drafts and turn them into entities or balance deltas on
//! submit. They never touch the friend store themselves.

pub mod input;
pub mod add_friend;
pub mod edit_friend;
pub mod split_bill;

pub use input::TextField;
pub use add_friend::AddFriendForm;
pub use edit_friend::EditDraft;
pub use split_bill::{SplitBillForm, SplitField};

use thiserror::Error;

/// Why a form input or submission was refused. State is unchanged in
/// every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("friend name is required")]
    MissingName,
    #[error("image URL is required")]
    MissingImage,
    #[error("enter the bill value")]
    MissingBill,
    #[error("enter your expense")]
    MissingUserExpense,
    #[error("your expense cannot exceed the bill")]
    ExpenseExceedsBill,
    #[error("amounts accept digits and a single decimal point")]
    InvalidAmount,
}

/// Field of a name + image form (add and edit share the layout)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ProfileField {
    #[default]
    Name,
    Image,
}

impl ProfileField {
    pub fn next(&self) -> ProfileField {
        match self {
            ProfileField::Name => ProfileField::Image,
            ProfileField::Image => ProfileField::Name,
        }
    }
}
