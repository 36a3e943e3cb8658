use crate::constants::DEFAULT_IMAGE_URL;
use crate::forms::{FormError, ProfileField, TextField};
use crate::models::{Friend, IdSource};

/// Draft of a new friend
#[derive(Clone, Debug, PartialEq)]
pub struct AddFriendForm {
    pub name: TextField,
    pub image: TextField,
    pub active: ProfileField,
}

impl Default for AddFriendForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AddFriendForm {
    pub fn new() -> Self {
        AddFriendForm {
            name: TextField::default(),
            image: TextField::new(DEFAULT_IMAGE_URL),
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

    /// Build the new friend and reset the draft.
    ///
    /// The avatar URL gets `?u={id}` appended so every friend gets a
    /// distinct picture from the avatar service.
    pub fn submit(&mut self, ids: &mut dyn IdSource) -> Result<Friend, FormError> {
        if self.name.is_blank() {
            return Err(FormError::MissingName);
        }
        if self.image.is_blank() {
            return Err(FormError::MissingImage);
        }

        let id = ids.next_id();
        let image = format!("{}?u={}", self.image.as_str(), id);
        let friend = Friend::new(id, self.name.as_str(), image);

        *self = AddFriendForm::new();
        Ok(friend)
    }
}
