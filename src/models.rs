use serde::Deserialize;

/// Stable identifier of a friend, unique within the list
pub type FriendId = String;

/// A person the user shares a running balance with.
///
/// `balance` is signed: negative means the user owes the friend,
/// positive means the friend owes the user.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Friend {
    pub id: FriendId,
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub balance: f64,
}

impl Friend {
    pub fn new(id: impl Into<FriendId>, name: impl Into<String>, image: impl Into<String>) -> Self {
        Friend {
            id: id.into(),
            name: name.into(),
            image: image.into(),
            balance: 0.0,
        }
    }

    pub fn with_balance(mut self, balance: f64) -> Self {
        self.balance = balance;
        self
    }
}

/// Who fronted the money for a split bill
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Payer {
    #[default]
    User,
    Friend,
}

impl Payer {
    pub fn toggle(&self) -> Payer {
        match self {
            Payer::User => Payer::Friend,
            Payer::Friend => Payer::User,
        }
    }

    /// Label shown in the payer selector
    pub fn label<'a>(&self, friend_name: &'a str) -> &'a str {
        match self {
            Payer::User => "You",
            Payer::Friend => friend_name,
        }
    }
}

/// Source of fresh friend identifiers
pub trait IdSource {
    fn next_id(&mut self) -> FriendId;
}

/// Random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> FriendId {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic ids (`prefix-1`, `prefix-2`, ...), handy for tests
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        SequentialIds {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> FriendId {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// The three friends every fresh session starts with
pub fn initial_friends() -> Vec<Friend> {
    vec![
        Friend::new("118836", "Clark", "https://i.pravatar.cc/48?u=118836").with_balance(-7.0),
        Friend::new("933372", "Sarah", "https://i.pravatar.cc/48?u=933372").with_balance(20.0),
        Friend::new("499476", "Anthony", "https://i.pravatar.cc/48?u=499476"),
    ]
}
