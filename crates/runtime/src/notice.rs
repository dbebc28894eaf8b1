use foundation::time::Millis;

/// A label override that reverts once `expires_at` has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice<K> {
    pub key: K,
    pub text: String,
    pub expires_at: Millis,
}

/// Transient labels keyed by the control they decorate.
///
/// At most one notice is live per key; posting again replaces the text and
/// restarts the expiry.
#[derive(Debug, Clone)]
pub struct NoticeBoard<K> {
    notices: Vec<Notice<K>>,
}

impl<K> Default for NoticeBoard<K> {
    fn default() -> Self {
        Self {
            notices: Vec::new(),
        }
    }
}

impl<K: Copy + PartialEq> NoticeBoard<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, key: K, text: impl Into<String>, now: Millis, ttl_ms: u64) {
        let notice = Notice {
            key,
            text: text.into(),
            expires_at: now.saturating_add(ttl_ms),
        };
        match self.notices.iter_mut().find(|n| n.key == key) {
            Some(slot) => *slot = notice,
            None => self.notices.push(notice),
        }
    }

    pub fn get(&self, key: K) -> Option<&Notice<K>> {
        self.notices.iter().find(|n| n.key == key)
    }

    /// Removes and returns every notice whose expiry is at or before `now`.
    pub fn expire(&mut self, now: Millis) -> Vec<Notice<K>> {
        let (expired, live): (Vec<_>, Vec<_>) = std::mem::take(&mut self.notices)
            .into_iter()
            .partition(|n| n.expires_at <= now);
        self.notices = live;
        expired
    }

    /// Earliest pending expiry, for scheduling the next tick.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.notices.iter().map(|n| n.expires_at).min()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    enum Key {
        A,
        B,
    }

    #[test]
    fn expires_at_deadline() {
        let mut board = NoticeBoard::new();
        board.post(Key::A, "Copied", Millis(100), 1100);
        assert!(board.expire(Millis(1199)).is_empty());
        let gone = board.expire(Millis(1200));
        assert_eq!(gone.len(), 1);
        assert_eq!(gone[0].text, "Copied");
        assert!(board.is_empty());
    }

    #[test]
    fn repost_restarts_expiry() {
        let mut board = NoticeBoard::new();
        board.post(Key::A, "Copied", Millis(0), 1000);
        board.post(Key::A, "Copy Failed", Millis(500), 1000);
        assert_eq!(board.get(Key::A).map(|n| n.text.as_str()), Some("Copy Failed"));
        assert!(board.expire(Millis(1000)).is_empty());
        assert_eq!(board.expire(Millis(1500)).len(), 1);
    }

    #[test]
    fn next_deadline_is_earliest() {
        let mut board = NoticeBoard::new();
        assert_eq!(board.next_deadline(), None);
        board.post(Key::A, "x", Millis(50), 100);
        board.post(Key::B, "y", Millis(0), 100);
        assert_eq!(board.next_deadline(), Some(Millis(100)));
    }
}
