//! Real-time state synchronization.
//!
//! A single [`TournamentActor`] task owns the [`TournamentState`](crate::state::TournamentState)
//! and an mpsc inbox. Sessions register a [`SessionSender`] on connect and
//! receive one full snapshot straight away. Every successful mutation funnels
//! through a commit step that rebuilds the snapshot and publishes it to all
//! sessions; nothing is diffed or filtered per session. Each session holds
//! only its newest unsent snapshot, so a slow reader catches up in one step.
//!
//! Privilege is tracked per session and granted only by a successful
//! `loginAdmin` on that session. Privileged events from other sessions are
//! dropped without a reply.
//!
//! ## Example
//!
//! ```
//! use group_tourney::sync::{
//!     ClientEvent, ServerEvent, TournamentActor, TournamentConfig, session_channel,
//! };
//! use uuid::Uuid;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), String> {
//! let config = TournamentConfig {
//!     admin_password: "secret".to_string(),
//!     ..Default::default()
//! };
//! let (actor, handle) = TournamentActor::new(config);
//! tokio::spawn(actor.run());
//!
//! let session = Uuid::new_v4();
//! let (tx, mut rx) = session_channel(16);
//! handle.connect(session, tx).await?;
//! assert!(matches!(rx.recv().await, Some(ServerEvent::State(_))));
//!
//! handle.dispatch(session, ClientEvent::LoginAdmin("secret".to_string())).await?;
//! assert_eq!(rx.recv().await, Some(ServerEvent::AdminStatus { ok: true }));
//! # Ok(())
//! # }
//! ```

pub mod actor;
pub mod messages;
pub mod session;

pub use actor::{TournamentActor, TournamentConfig, TournamentHandle};
pub use messages::{ClientEvent, ServerEvent, SessionId, TournamentMessage, TournamentStatus};
pub use session::{SessionReceiver, SessionSender, session_channel};
