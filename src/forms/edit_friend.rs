use crate::forms::{ProfileField, TextField};
use crate::models::Friend;

/// In-progress edit of one friend's name and image
#[derive(Clone, Debug, PartialEq)]
pub struct EditDraft {
    pub name: TextField,
    pub image: TextField,
    pub active: ProfileField,
}

impl EditDraft {
    /// Start editing from the friend's current values
    pub fn seed(friend: &Friend) -> Self {
        EditDraft {
            name: TextField::new(friend.name.as_str()),
            image: TextField::new(friend.image.as_str()),
            active: ProfileField::Name,
        }
    }

    pub fn active_field_mut(&mut self) -> &mut TextField {
        match self.active {
            ProfileField::Name => &mut self.name,
            ProfileField::Image => &mut self.image,
        }
    }

    pub fn next_field(&mut self) {
        self.active = self.active.next();
    }

    /// Updated copy of `current`: same id and balance, drafted name and image.
    /// Empty values are accepted.
    pub fn apply_to(&self, current: &Friend) -> Friend {
        Friend {
            id: current.id.clone(),
            name: self.name.as_str().to_string(),
            image: self.image.as_str().to_string(),
            balance: current.balance,
        }
    }
}
