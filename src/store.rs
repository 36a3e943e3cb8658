use crate::models::{Friend, FriendId};

/// Ordered, in-memory list of friends.
///
/// Insertion order is display order. Ids are expected to be unique; the
/// add path only ever hands in freshly generated ids.
#[derive(Clone, Debug, Default)]
pub struct FriendStore {
    friends: Vec<Friend>,
}

impl FriendStore {
    pub fn new() -> Self {
        FriendStore {
            friends: Vec::new(),
        }
    }

    pub fn from_friends(friends: Vec<Friend>) -> Self {
        FriendStore { friends }
    }

    /// Append a friend at the end of the list
    pub fn add(&mut self, friend: Friend) {
        self.friends.push(friend);
    }

    /// Remove the friend with this id, returning it if present
    pub fn remove(&mut self, id: &str) -> Option<Friend> {
        let index = self.position(id)?;
        Some(self.friends.remove(index))
    }

    /// Replace the entry with the same id in place. Returns false if unknown.
    pub fn update(&mut self, friend: Friend) -> bool {
        match self.friends.iter_mut().find(|f| f.id == friend.id) {
            Some(slot) => {
                *slot = friend;
                true
            }
            None => false,
        }
    }

    /// Add `delta` to a friend's balance. Returns false if unknown.
    pub fn apply_delta(&mut self, id: &str, delta: f64) -> bool {
        match self.friends.iter_mut().find(|f| f.id == id) {
            Some(friend) => {
                friend.balance += delta;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Friend> {
        self.friends.iter().find(|f| f.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.friends.iter().position(|f| f.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get_at(&self, index: usize) -> Option<&Friend> {
        self.friends.get(index)
    }

    pub fn id_at(&self, index: usize) -> Option<FriendId> {
        self.friends.get(index).map(|f| f.id.clone())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Friend> {
        self.friends.iter()
    }

    pub fn as_slice(&self) -> &[Friend] {
        &self.friends
    }

    pub fn len(&self) -> usize {
        self.friends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.friends.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::initial_friends;

    fn names(store: &FriendStore) -> Vec<&str> {
        store.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_add_appends() {
        let mut store = FriendStore::from_friends(initial_friends());
        store.add(Friend::new("d", "Dana", "img"));
        assert_eq!(names(&store), ["Clark", "Sarah", "Anthony", "Dana"]);
    }

    #[test]
    fn test_remove() {
        let mut store = FriendStore::from_friends(initial_friends());
        let removed = store.remove("933372").unwrap();
        assert_eq!(removed.name, "Sarah");
        assert_eq!(names(&store), ["Clark", "Anthony"]);
        assert!(store.remove("933372").is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_keeps_position() {
        let mut store = FriendStore::from_friends(initial_friends());
        let mut sarah = store.get("933372").unwrap().clone();
        sarah.name = String::from("Sara");
        assert!(store.update(sarah));
        assert_eq!(names(&store), ["Clark", "Sara", "Anthony"]);
        assert_eq!(store.get("933372").unwrap().balance, 20.0);
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let mut store = FriendStore::from_friends(initial_friends());
        assert!(!store.update(Friend::new("nope", "Ghost", "img")));
        assert_eq!(names(&store), ["Clark", "Sarah", "Anthony"]);
    }

    #[test]
    fn test_apply_delta() {
        let mut store = FriendStore::from_friends(initial_friends());
        assert!(store.apply_delta("118836", 70.0));
        assert_eq!(store.get("118836").unwrap().balance, 63.0);
        assert!(!store.apply_delta("nope", 1.0));
    }
}
