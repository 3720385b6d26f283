use dashmap::DashMap;
use std::time::{Duration, Instant};

/// How long a result message keeps live navigation, measured from first
/// display.
pub const SESSION_TTL: Duration = Duration::from_secs(300);

/// A fixed-size window over an ordered result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub has_previous: bool,
    pub has_next: bool,
}

/// Pure slice of `items` at `page_index`. Out-of-range indexes produce an
/// empty window rather than clamping.
pub fn page<T>(items: &[T], page_index: usize, page_size: usize) -> Page<'_, T> {
    let start = page_index.saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(items.len());
    let visible = if start < items.len() {
        &items[start..end]
    } else {
        &[]
    };

    Page {
        items: visible,
        has_previous: page_index > 0,
        has_next: page_index
            .saturating_add(1)
            .saturating_mul(page_size)
            < items.len(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Previous,
    Next,
}

/// Everything needed to re-render one paginated result message.
#[derive(Debug, Clone)]
pub struct PageSession {
    pub user_id: u64,
    pub channel_id: u64,
    pub title: String,
    pub lines: Vec<String>,
    pub page_size: usize,
    pub page_index: usize,
    pub expires_at: Instant,
}

impl PageSession {
    pub fn new(
        user_id: u64,
        channel_id: u64,
        title: String,
        lines: Vec<String>,
        page_size: usize,
    ) -> Self {
        Self {
            user_id,
            channel_id,
            title,
            lines,
            page_size,
            page_index: 0,
            expires_at: Instant::now() + SESSION_TTL,
        }
    }

    pub fn current(&self) -> Page<'_, String> {
        page(&self.lines, self.page_index, self.page_size)
    }
}

/// Per-message pagination state, keyed by the displayed message id. Entries
/// are explicit session objects so expiry is a sweep over this map instead
/// of an ever-growing pile of event listeners.
#[derive(Debug, Default)]
pub struct PageSessions {
    sessions: DashMap<u64, PageSession>,
}

impl PageSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, message_id: u64, session: PageSession) {
        self.sessions.insert(message_id, session);
    }

    /// Applies one navigation step for `user_id` on `message_id`. Returns the
    /// updated session, or `None` when there is no session, the user is not
    /// the one who ran the command, or the step would leave the list.
    pub fn turn(&self, message_id: u64, user_id: u64, turn: Turn) -> Option<PageSession> {
        let mut entry = self.sessions.get_mut(&message_id)?;
        if entry.user_id != user_id {
            return None;
        }

        let next_index = match turn {
            Turn::Previous => entry.page_index.checked_sub(1)?,
            Turn::Next => {
                if !entry.current().has_next {
                    return None;
                }
                entry.page_index + 1
            }
        };

        entry.page_index = next_index;
        Some(entry.clone())
    }

    /// Drains every session past its idle deadline.
    pub fn take_expired(&self) -> Vec<(u64, PageSession)> {
        let now = Instant::now();
        let expired: Vec<u64> = self
            .sessions
            .iter()
            .filter(|entry| entry.expires_at <= now)
            .map(|entry| *entry.key())
            .collect();

        expired
            .into_iter()
            .filter_map(|id| self.sessions.remove(&id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<u32> {
        (0..n as u32).collect()
    }

    #[test]
    fn window_length_follows_the_slice_formula() {
        let list = items(23);
        for (index, size, expected) in [(0, 10, 10), (1, 10, 10), (2, 10, 3), (3, 10, 0)] {
            assert_eq!(page(&list, index, size).items.len(), expected);
        }
    }

    #[test]
    fn out_of_range_index_is_empty_not_clamped() {
        let list = items(5);
        let view = page(&list, 100, 10);
        assert!(view.items.is_empty());
        assert!(view.has_previous);
        assert!(!view.has_next);
    }

    #[test]
    fn next_is_set_on_every_page_but_the_last() {
        let list = items(31);
        assert!(page(&list, 0, 10).has_next);
        assert!(page(&list, 1, 10).has_next);
        assert!(page(&list, 2, 10).has_next);
        assert!(!page(&list, 3, 10).has_next);
    }

    #[test]
    fn previous_is_set_everywhere_but_the_first_page() {
        let list = items(31);
        assert!(!page(&list, 0, 10).has_previous);
        assert!(page(&list, 1, 10).has_previous);
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        let list = items(20);
        assert!(!page(&list, 1, 10).has_next);
        assert_eq!(page(&list, 1, 10).items.len(), 10);
    }

    #[test]
    fn paging_is_idempotent() {
        let list = items(47);
        let first = page(&list, 3, 10);
        let second = page(&list, 3, 10);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_list_has_one_empty_page() {
        let list: Vec<u32> = Vec::new();
        let view = page(&list, 0, 10);
        assert!(view.items.is_empty());
        assert!(!view.has_previous);
        assert!(!view.has_next);
    }

    fn session(lines: usize) -> PageSession {
        PageSession::new(
            7,
            11,
            "Servers".to_string(),
            (0..lines).map(|i| format!("line {i}")).collect(),
            10,
        )
    }

    #[test]
    fn turns_walk_the_list_and_stop_at_the_edges() {
        let sessions = PageSessions::new();
        sessions.insert(1, session(25));

        assert!(sessions.turn(1, 7, Turn::Previous).is_none());
        assert_eq!(sessions.turn(1, 7, Turn::Next).unwrap().page_index, 1);
        assert_eq!(sessions.turn(1, 7, Turn::Next).unwrap().page_index, 2);
        assert!(sessions.turn(1, 7, Turn::Next).is_none());
        assert_eq!(sessions.turn(1, 7, Turn::Previous).unwrap().page_index, 1);
    }

    #[test]
    fn only_the_invoking_user_may_navigate() {
        let sessions = PageSessions::new();
        sessions.insert(1, session(25));
        assert!(sessions.turn(1, 8, Turn::Next).is_none());
        assert_eq!(sessions.turn(1, 7, Turn::Next).unwrap().page_index, 1);
    }

    #[test]
    fn unknown_messages_have_no_session() {
        let sessions = PageSessions::new();
        assert!(sessions.turn(99, 7, Turn::Next).is_none());
    }

    #[test]
    fn sweeping_drains_expired_sessions_only() {
        let sessions = PageSessions::new();
        let mut stale = session(25);
        stale.expires_at = Instant::now() - Duration::from_secs(1);
        sessions.insert(1, stale);
        sessions.insert(2, session(25));

        let expired = sessions.take_expired();
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].0, 1);
        assert_eq!(sessions.len(), 1);
    }
}
