//! Wire events and actor message types.
//!
//! Wire frames are JSON envelopes `{"event": "<name>", "data": <payload>}`.

use super::session::SessionSender;
use crate::{
    roster::PersonId,
    schedule::{MatchId, Winner},
    slots::GroupId,
    state::Snapshot,
};
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use std::{str::FromStr, sync::Arc};
use tokio::sync::oneshot;
use uuid::Uuid;

/// Session ID type, one per connection
pub type SessionId = Uuid;

/// Inbound event from a viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ClientEvent {
    /// Password attempt
    LoginAdmin(String),
    UpdateGroupName {
        group_id: GroupId,
        #[serde(default)]
        name: String,
    },
    AddPerson {
        #[serde(default)]
        name: String,
    },
    DeletePerson {
        #[serde(deserialize_with = "lenient_id")]
        person_id: PersonId,
    },
    UpdatePersonFlags {
        #[serde(deserialize_with = "lenient_id")]
        person_id: PersonId,
        #[serde(default)]
        is_ref: bool,
        #[serde(default)]
        is_captain: bool,
    },
    SetPersonSelected {
        #[serde(deserialize_with = "lenient_id")]
        person_id: PersonId,
        #[serde(default)]
        is_selected: bool,
    },
    AddTestPeople,
    ClearPeople,
    RandomizeGroups,
    ResetTournament,
    /// Open to every session
    SetMatchWinner {
        #[serde(deserialize_with = "lenient_id")]
        match_id: MatchId,
        winner: Winner,
    },
}

impl ClientEvent {
    /// Everything except login and match results needs admin privilege.
    pub fn requires_privilege(&self) -> bool {
        !matches!(
            self,
            ClientEvent::LoginAdmin(_) | ClientEvent::SetMatchWinner { .. }
        )
    }

    /// Event name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::LoginAdmin(_) => "loginAdmin",
            ClientEvent::UpdateGroupName { .. } => "updateGroupName",
            ClientEvent::AddPerson { .. } => "addPerson",
            ClientEvent::DeletePerson { .. } => "deletePerson",
            ClientEvent::UpdatePersonFlags { .. } => "updatePersonFlags",
            ClientEvent::SetPersonSelected { .. } => "setPersonSelected",
            ClientEvent::AddTestPeople => "addTestPeople",
            ClientEvent::ClearPeople => "clearPeople",
            ClientEvent::RandomizeGroups => "randomizeGroups",
            ClientEvent::ResetTournament => "resetTournament",
            ClientEvent::SetMatchWinner { .. } => "setMatchWinner",
        }
    }
}

/// Outbound event to a viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Full snapshot, shared between every recipient of one broadcast
    State(Arc<Snapshot>),
    /// Advisory failure notice
    ErrorMsg { msg: String },
    /// Result of a login attempt
    AdminStatus { ok: bool },
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::State(_) => "state",
            ServerEvent::ErrorMsg { .. } => "errorMsg",
            ServerEvent::AdminStatus { .. } => "adminStatus",
        }
    }
}

/// Identifiers may arrive as JSON numbers or numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

fn lenient_id<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64> + FromStr,
{
    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => {
            T::try_from(n).map_err(|_| D::Error::custom(format!("identifier out of range: {n}")))
        }
        RawId::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid identifier: {text:?}"))),
    }
}

/// Messages accepted by a [`TournamentActor`](super::TournamentActor)
#[derive(Debug)]
pub enum TournamentMessage {
    /// Register a session; it immediately receives the current snapshot
    Connect {
        session_id: SessionId,
        sender: SessionSender,
    },

    /// Drop a session and its privilege
    Disconnect { session_id: SessionId },

    /// Event received from a session
    Event {
        session_id: SessionId,
        event: ClientEvent,
    },

    /// Current snapshot, outside the broadcast path
    GetSnapshot {
        response: oneshot::Sender<Arc<Snapshot>>,
    },

    /// Session and progress counters
    GetStatus {
        response: oneshot::Sender<TournamentStatus>,
    },
}

/// Lightweight counters for health reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentStatus {
    pub sessions: usize,
    pub admin_sessions: usize,
    pub people: usize,
    pub matches: usize,
    pub decided_matches: usize,
}
