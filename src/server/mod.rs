//! Web interface for the document registry.
//!
//! The server holds no document state of its own: every page is rendered
//! from a fresh registry call, so it can restart or scale without losing
//! anything. Chat transcripts are the one exception, held in a bounded
//! in-memory store per session id.

mod handlers;
mod routes;
mod templates;

pub use routes::create_router;

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

use crate::api::ApiClient;
use crate::chat::ChatTranscript;
use crate::config::Settings;
use crate::error::ApiResult;
use crate::notice::Locale;

/// Upper bound on transcripts held in memory at once.
const MAX_CHAT_SESSIONS: usize = 512;

/// Shared state for all request handlers.
#[derive(Clone)]
pub struct ServerState {
    pub client: Arc<ApiClient>,
    pub locale: Locale,
    chats: Arc<Mutex<ChatSessions>>,
}

impl ServerState {
    pub fn new(settings: &Settings) -> ApiResult<Self> {
        Ok(ServerState {
            client: Arc::new(ApiClient::new(settings)?),
            locale: settings.locale,
            chats: Arc::new(Mutex::new(ChatSessions::new(MAX_CHAT_SESSIONS))),
        })
    }

    /// Locked access to the chat sessions. A poisoned lock is recovered;
    /// transcripts stay usable even if a handler panicked mid-update.
    fn sessions(&self) -> MutexGuard<'_, ChatSessions> {
        self.chats.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Chat transcripts by session id. The store is bounded: once `capacity`
/// sessions exist, opening a new one drops the oldest session first.
struct ChatSessions {
    transcripts: HashMap<Uuid, ChatTranscript>,
    order: VecDeque<Uuid>,
    capacity: usize,
}

impl ChatSessions {
    fn new(capacity: usize) -> Self {
        ChatSessions {
            transcripts: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.transcripts.len()
    }

    fn get(&self, id: &Uuid) -> Option<&ChatTranscript> {
        self.transcripts.get(id)
    }

    fn get_mut(&mut self, id: &Uuid) -> Option<&mut ChatTranscript> {
        self.transcripts.get_mut(id)
    }

    /// The transcript for `id`, created with a fresh greeting on first use.
    /// `order` always holds exactly the live ids, oldest first.
    fn open(&mut self, id: Uuid, locale: Locale) -> &mut ChatTranscript {
        if !self.transcripts.contains_key(&id) {
            while self.transcripts.len() >= self.capacity {
                match self.order.pop_front() {
                    Some(oldest) => {
                        self.transcripts.remove(&oldest);
                    }
                    None => break,
                }
            }
            self.order.push_back(id);
        }
        self.transcripts
            .entry(id)
            .or_insert_with(|| ChatTranscript::with_session(id, locale))
    }
}

/// Run the web interface until the process is stopped.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = ServerState::new(settings)?;
    let app = create_router(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("web interface listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_store_drops_the_oldest_session_at_the_bound() {
        let mut store = ChatSessions::new(2);
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let third = Uuid::new_v4();

        store.open(first, Locale::Vi).push_user("một");
        store.open(second, Locale::Vi).push_user("hai");
        store.open(third, Locale::Vi).push_user("ba");

        assert_eq!(store.len(), 2);
        assert!(store.get(&first).is_none());
        assert!(store.get(&second).is_some());
        assert!(store.get(&third).is_some());
    }

    #[test]
    fn reopening_a_session_keeps_its_transcript() {
        let mut store = ChatSessions::new(2);
        let id = Uuid::new_v4();

        store.open(id, Locale::Vi).push_user("tra cứu công văn");
        let transcript = store.open(id, Locale::Vi);

        // greeting plus the user's message, not a second greeting
        assert_eq!(transcript.entries().len(), 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn eviction_only_runs_when_a_new_session_opens() {
        let mut store = ChatSessions::new(2);
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        store.open(first, Locale::Vi);
        store.open(second, Locale::Vi);
        store.open(first, Locale::Vi).push_user("vẫn còn đây");

        assert_eq!(store.len(), 2);
        assert!(store.get(&first).is_some());
        assert!(store.get(&second).is_some());
    }
}
