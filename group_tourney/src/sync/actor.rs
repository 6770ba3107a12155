//! Tournament actor owning the canonical state.

use super::{
    messages::{ClientEvent, ServerEvent, SessionId, TournamentMessage, TournamentStatus},
    session::SessionSender,
};
use crate::{
    assignment::GroupRandomizer,
    errors::{TournamentError, TournamentResult},
    state::{Snapshot, TournamentState},
};
use rand::{Rng, rngs::StdRng};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{mpsc, oneshot};

/// Tournament actor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentConfig {
    /// Shared admin secret. An empty secret disables admin login.
    pub admin_password: String,
    /// Capacity of the actor inbox
    pub inbox_capacity: usize,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            admin_password: String::new(),
            inbox_capacity: 256,
        }
    }
}

/// Tournament actor handle for sending messages
#[derive(Clone)]
pub struct TournamentHandle {
    sender: mpsc::Sender<TournamentMessage>,
}

impl TournamentHandle {
    /// Send a message to the tournament
    pub async fn send(&self, message: TournamentMessage) -> Result<(), String> {
        self.sender
            .send(message)
            .await
            .map_err(|_| "Tournament is closed".to_string())
    }

    /// Register a session's outbound path.
    pub async fn connect(
        &self,
        session_id: SessionId,
        sender: SessionSender,
    ) -> Result<(), String> {
        self.send(TournamentMessage::Connect { session_id, sender }).await
    }

    pub async fn disconnect(&self, session_id: SessionId) -> Result<(), String> {
        self.send(TournamentMessage::Disconnect { session_id }).await
    }

    /// Forward an event received from a session.
    pub async fn dispatch(&self, session_id: SessionId, event: ClientEvent) -> Result<(), String> {
        self.send(TournamentMessage::Event { session_id, event }).await
    }

    pub async fn snapshot(&self) -> Result<Arc<Snapshot>, String> {
        let (tx, rx) = oneshot::channel();
        self.send(TournamentMessage::GetSnapshot { response: tx }).await?;
        rx.await.map_err(|e| e.to_string())
    }

    pub async fn status(&self) -> Result<TournamentStatus, String> {
        let (tx, rx) = oneshot::channel();
        self.send(TournamentMessage::GetStatus { response: tx }).await?;
        rx.await.map_err(|e| e.to_string())
    }
}

/// Connected viewer
struct Session {
    sender: SessionSender,
    is_admin: bool,
}

/// Actor owning the tournament state
///
/// Messages are handled one at a time and each runs to completion, including
/// its broadcast, before the next is taken from the inbox. That ordering is
/// the only synchronization the state needs.
pub struct TournamentActor<R = StdRng> {
    /// Canonical state
    state: TournamentState,

    /// Message inbox
    inbox: mpsc::Receiver<TournamentMessage>,

    /// Connected sessions with their privilege flag
    sessions: HashMap<SessionId, Session>,

    /// Shared admin secret
    admin_password: String,

    /// Randomness for group assignment
    randomizer: GroupRandomizer<R>,
}

impl TournamentActor {
    /// Create a new tournament actor with an OS-seeded randomizer
    ///
    /// # Returns
    ///
    /// * `(TournamentActor, TournamentHandle)` - Actor and handle for sending messages
    pub fn new(config: TournamentConfig) -> (Self, TournamentHandle) {
        Self::with_randomizer(config, GroupRandomizer::new())
    }
}

impl<R: Rng> TournamentActor<R> {
    /// Create a tournament actor over a specific randomizer
    pub fn with_randomizer(
        config: TournamentConfig,
        randomizer: GroupRandomizer<R>,
    ) -> (Self, TournamentHandle) {
        let (sender, inbox) = mpsc::channel(config.inbox_capacity.max(1));

        let actor = Self {
            state: TournamentState::new(),
            inbox,
            sessions: HashMap::new(),
            admin_password: config.admin_password,
            randomizer,
        };

        (actor, TournamentHandle { sender })
    }

    /// Run the actor event loop until every handle is dropped
    pub async fn run(mut self) {
        log::info!(
            "Tournament starting with {} groups and {} matches",
            self.state.groups().len(),
            self.state.schedule().len()
        );

        while let Some(message) = self.inbox.recv().await {
            self.handle_message(message);
        }

        log::info!("Tournament closed");
    }

    fn handle_message(&mut self, message: TournamentMessage) {
        match message {
            TournamentMessage::Connect { session_id, sender } => {
                self.sessions.insert(
                    session_id,
                    Session {
                        sender,
                        is_admin: false,
                    },
                );
                log::info!(
                    "Session {} connected ({} active)",
                    session_id,
                    self.sessions.len()
                );
                let snapshot = Arc::new(self.state.snapshot());
                if let Some(session) = self.sessions.get(&session_id)
                    && !session.sender.publish(snapshot)
                {
                    self.sessions.remove(&session_id);
                }
            }

            TournamentMessage::Disconnect { session_id } => {
                if self.sessions.remove(&session_id).is_some() {
                    log::info!(
                        "Session {} disconnected ({} active)",
                        session_id,
                        self.sessions.len()
                    );
                }
            }

            TournamentMessage::Event { session_id, event } => {
                self.handle_event(session_id, event);
            }

            TournamentMessage::GetSnapshot { response } => {
                let _ = response.send(Arc::new(self.state.snapshot()));
            }

            TournamentMessage::GetStatus { response } => {
                let _ = response.send(self.status());
            }
        }
    }

    fn handle_event(&mut self, session_id: SessionId, event: ClientEvent) {
        let Some(session) = self.sessions.get_mut(&session_id) else {
            log::warn!("Dropping {} from unknown session {}", event.name(), session_id);
            return;
        };

        if let ClientEvent::LoginAdmin(password) = &event {
            let ok = !self.admin_password.is_empty() && *password == self.admin_password;
            session.is_admin = ok;
            if ok {
                log::info!("Session {} logged in as admin", session_id);
            } else {
                log::warn!("Session {} failed admin login", session_id);
            }
            self.send_to(session_id, ServerEvent::AdminStatus { ok });
            return;
        }

        if event.requires_privilege() && !session.is_admin {
            log::debug!(
                "Dropping {} from session {}: {}",
                event.name(),
                session_id,
                TournamentError::PrivilegeDenied
            );
            return;
        }

        let name = event.name();
        match self.apply(event) {
            Ok(()) => self.commit(name),
            Err(e) if e.is_advisory() => {
                log::info!("Session {} {} rejected: {}", session_id, name, e);
                self.send_to(session_id, ServerEvent::ErrorMsg { msg: e.to_string() });
            }
            Err(e) => {
                log::debug!("Session {} {} ignored: {}", session_id, name, e);
            }
        }
    }

    /// Apply one authorized event to the state.
    fn apply(&mut self, event: ClientEvent) -> TournamentResult<()> {
        match event {
            ClientEvent::LoginAdmin(_) => Ok(()),
            ClientEvent::UpdateGroupName { group_id, name } => {
                self.state.rename_group(group_id, &name)
            }
            ClientEvent::AddPerson { name } => self.state.add_person(&name).map(|_| ()),
            ClientEvent::DeletePerson { person_id } => {
                self.state.delete_person(person_id).map(|_| ())
            }
            ClientEvent::UpdatePersonFlags {
                person_id,
                is_ref,
                is_captain,
            } => self.state.update_person_flags(person_id, is_ref, is_captain),
            ClientEvent::SetPersonSelected {
                person_id,
                is_selected,
            } => self.state.set_person_selected(person_id, is_selected),
            ClientEvent::AddTestPeople => {
                self.state.add_test_people();
                Ok(())
            }
            ClientEvent::ClearPeople => {
                self.state.clear_people();
                Ok(())
            }
            ClientEvent::RandomizeGroups => self.state.randomize_groups(&mut self.randomizer),
            ClientEvent::ResetTournament => {
                self.state.reset_tournament();
                Ok(())
            }
            ClientEvent::SetMatchWinner { match_id, winner } => {
                self.state.set_match_winner(match_id, winner)
            }
        }
    }

    /// Build a fresh snapshot and broadcast it to every session.
    fn commit(&mut self, cause: &str) {
        let snapshot = Arc::new(self.state.snapshot());
        let delivered = self.broadcast(snapshot);
        log::debug!("{} committed, snapshot published to {} session(s)", cause, delivered);
    }

    /// Non-blocking fan-out. Each session's pending snapshot is replaced, so
    /// a reader that fell behind gets the newest state next. Closed sessions
    /// are dropped.
    fn broadcast(&mut self, snapshot: Arc<Snapshot>) -> usize {
        self.sessions.retain(|session_id, session| {
            let open = session.sender.publish(Arc::clone(&snapshot));
            if !open {
                log::debug!("Session {} channel closed, removing", session_id);
            }
            open
        });
        self.sessions.len()
    }

    fn send_to(&mut self, session_id: SessionId, event: ServerEvent) {
        let closed = match self.sessions.get(&session_id) {
            Some(session) => match session.sender.reply(event) {
                Ok(()) => false,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::warn!("Session {} channel full, dropping reply", session_id);
                    false
                }
                Err(mpsc::error::TrySendError::Closed(_)) => true,
            },
            None => false,
        };

        if closed {
            self.sessions.remove(&session_id);
        }
    }

    fn status(&self) -> TournamentStatus {
        TournamentStatus {
            sessions: self.sessions.len(),
            admin_sessions: self.sessions.values().filter(|s| s.is_admin).count(),
            people: self.state.roster().len(),
            matches: self.state.schedule().len(),
            decided_matches: self.state.schedule().decided_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        schedule::Winner,
        sync::session::{SessionReceiver, session_channel},
    };
    use rand::SeedableRng;
    use tokio::sync::mpsc::error::TryRecvError;
    use uuid::Uuid;

    const PASSWORD: &str = "Blob";

    fn actor() -> TournamentActor<StdRng> {
        let config = TournamentConfig {
            admin_password: PASSWORD.to_string(),
            inbox_capacity: 16,
        };
        let (actor, _handle) = TournamentActor::with_randomizer(
            config,
            GroupRandomizer::with_rng(StdRng::seed_from_u64(1)),
        );
        actor
    }

    fn connect(actor: &mut TournamentActor<StdRng>) -> (SessionId, SessionReceiver) {
        let session_id = Uuid::new_v4();
        let (tx, mut rx) = session_channel(64);
        actor.handle_message(TournamentMessage::Connect {
            session_id,
            sender: tx,
        });
        assert!(matches!(rx.try_recv(), Ok(ServerEvent::State(_))));
        (session_id, rx)
    }

    fn event(actor: &mut TournamentActor<StdRng>, session_id: SessionId, event: ClientEvent) {
        actor.handle_message(TournamentMessage::Event { session_id, event });
    }

    #[test]
    fn test_login_sets_privilege() {
        let mut actor = actor();
        let (session, mut rx) = connect(&mut actor);

        event(&mut actor, session, ClientEvent::LoginAdmin("wrong".to_string()));
        assert_eq!(rx.try_recv().unwrap(), ServerEvent::AdminStatus { ok: false });
        assert_eq!(actor.status().admin_sessions, 0);

        event(&mut actor, session, ClientEvent::LoginAdmin(PASSWORD.to_string()));
        assert_eq!(rx.try_recv().unwrap(), ServerEvent::AdminStatus { ok: true });
        assert_eq!(actor.status().admin_sessions, 1);

        // A later failed attempt drops the privilege again
        event(&mut actor, session, ClientEvent::LoginAdmin("nope".to_string()));
        assert_eq!(rx.try_recv().unwrap(), ServerEvent::AdminStatus { ok: false });
        assert_eq!(actor.status().admin_sessions, 0);
    }

    #[test]
    fn test_empty_password_never_grants_admin() {
        let (mut actor, _handle) = TournamentActor::new(TournamentConfig::default());
        let session_id = Uuid::new_v4();
        let (tx, mut rx) = session_channel(8);
        actor.handle_message(TournamentMessage::Connect {
            session_id,
            sender: tx,
        });
        let _ = rx.try_recv();

        actor.handle_message(TournamentMessage::Event {
            session_id,
            event: ClientEvent::LoginAdmin(String::new()),
        });
        assert_eq!(rx.try_recv().unwrap(), ServerEvent::AdminStatus { ok: false });
    }

    #[test]
    fn test_unprivileged_mutation_is_silent() {
        let mut actor = actor();
        let (session, mut rx) = connect(&mut actor);
        let (_watcher, mut watcher_rx) = connect(&mut actor);

        event(&mut actor, session, ClientEvent::AddTestPeople);
        event(&mut actor, session, ClientEvent::ResetTournament);

        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
        assert!(matches!(watcher_rx.try_recv(), Err(TryRecvError::Empty)));
        assert_eq!(actor.status().people, 0);
    }

    #[test]
    fn test_mutation_broadcasts_to_every_session() {
        let mut actor = actor();
        let (admin, mut admin_rx) = connect(&mut actor);
        let (_viewer, mut viewer_rx) = connect(&mut actor);

        event(&mut actor, admin, ClientEvent::LoginAdmin(PASSWORD.to_string()));
        let _ = admin_rx.try_recv();

        event(&mut actor, admin, ClientEvent::AddPerson { name: "Kim".to_string() });

        for rx in [&mut admin_rx, &mut viewer_rx] {
            match rx.try_recv().unwrap() {
                ServerEvent::State(snapshot) => {
                    assert_eq!(snapshot.people.len(), 1);
                    assert_eq!(snapshot.people[0].name, "Kim");
                }
                other => panic!("expected state, got {other:?}"),
            }
        }
        // Login reply went to the admin session only
        assert!(matches!(viewer_rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_anyone_may_set_match_winner() {
        let mut actor = actor();
        let (viewer, mut rx) = connect(&mut actor);

        event(
            &mut actor,
            viewer,
            ClientEvent::SetMatchWinner {
                match_id: 5,
                winner: Winner::Side1,
            },
        );

        match rx.try_recv().unwrap() {
            ServerEvent::State(snapshot) => assert!(snapshot.matches[4].win1()),
            other => panic!("expected state, got {other:?}"),
        }
        assert_eq!(actor.status().decided_matches, 1);
    }

    #[test]
    fn test_randomize_failure_notifies_caller_only() {
        let mut actor = actor();
        let (admin, mut admin_rx) = connect(&mut actor);
        let (_viewer, mut viewer_rx) = connect(&mut actor);
        event(&mut actor, admin, ClientEvent::LoginAdmin(PASSWORD.to_string()));
        let _ = admin_rx.try_recv();

        event(&mut actor, admin, ClientEvent::RandomizeGroups);

        assert_eq!(
            admin_rx.try_recv().unwrap(),
            ServerEvent::ErrorMsg {
                msg: "Need at least 32 selected players to randomize (currently 0).".to_string()
            }
        );
        assert!(matches!(viewer_rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_not_found_is_a_silent_no_op() {
        let mut actor = actor();
        let (admin, mut rx) = connect(&mut actor);
        event(&mut actor, admin, ClientEvent::LoginAdmin(PASSWORD.to_string()));
        let _ = rx.try_recv();

        event(&mut actor, admin, ClientEvent::DeletePerson { person_id: 77 });
        event(
            &mut actor,
            admin,
            ClientEvent::SetMatchWinner {
                match_id: 10_000,
                winner: Winner::Side2,
            },
        );
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_closed_sessions_are_pruned() {
        let mut actor = actor();
        let (admin, mut admin_rx) = connect(&mut actor);
        let (_gone, gone_rx) = connect(&mut actor);
        drop(gone_rx);

        event(
            &mut actor,
            admin,
            ClientEvent::SetMatchWinner {
                match_id: 1,
                winner: Winner::Side1,
            },
        );

        assert!(matches!(admin_rx.try_recv(), Ok(ServerEvent::State(_))));
        assert_eq!(actor.status().sessions, 1);
    }

    #[test]
    fn test_slow_session_catches_up_to_latest_state() {
        let mut actor = actor();
        let session_id = Uuid::new_v4();
        let (tx, mut rx) = session_channel(1);
        actor.handle_message(TournamentMessage::Connect {
            session_id,
            sender: tx,
        });

        // Nothing is read until every commit has happened
        for match_id in 1..=3 {
            event(
                &mut actor,
                session_id,
                ClientEvent::SetMatchWinner {
                    match_id,
                    winner: Winner::Side1,
                },
            );
        }

        match rx.try_recv().unwrap() {
            ServerEvent::State(snapshot) => {
                assert!(snapshot.matches[..3].iter().all(|m| m.win1()));
            }
            other => panic!("expected state, got {other:?}"),
        }
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
        assert_eq!(actor.status().sessions, 1);
    }

    #[test]
    fn test_disconnect_forgets_privilege() {
        let mut actor = actor();
        let (admin, mut rx) = connect(&mut actor);
        event(&mut actor, admin, ClientEvent::LoginAdmin(PASSWORD.to_string()));
        let _ = rx.try_recv();

        actor.handle_message(TournamentMessage::Disconnect { session_id: admin });
        assert_eq!(actor.status().sessions, 0);

        // Events from the old id are dropped
        event(&mut actor, admin, ClientEvent::AddTestPeople);
        assert_eq!(actor.status().people, 0);
    }
}
