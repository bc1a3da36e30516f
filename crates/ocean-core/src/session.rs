//! Session state machine.
//!
//! A session moves through
//! `CollectingInfo → Answering → Scored → Notified`, or ends in `Failed`
//! when the results could not be delivered. Every user action is an
//! [`Event`], and [`transition`] maps `(state, event)` to the next state
//! without side effects. Scoring happens inside the `SubmitAnswers`
//! transition, so it can only run once; dispatch only accepts a `Scored`
//! session, so it can only send once.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{DispatchError, TransitionError};
use crate::model::{Rating, RespondentProfile};
use crate::responses::ResponseSet;
use crate::scoring::{score, TraitScores};

/// Where a session currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the intake form.
    CollectingInfo,
    /// Profile captured; ratings being collected.
    Answering {
        profile: RespondentProfile,
        responses: ResponseSet,
    },
    /// Answers submitted and scored; results not yet delivered.
    Scored {
        profile: RespondentProfile,
        responses: ResponseSet,
        scores: TraitScores,
    },
    /// Results delivered.
    Notified {
        profile: RespondentProfile,
        responses: ResponseSet,
        scores: TraitScores,
    },
    /// Delivery failed. Terminal.
    Failed { reason: DispatchError },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::CollectingInfo => "collecting-info",
            SessionState::Answering { .. } => "answering",
            SessionState::Scored { .. } => "scored",
            SessionState::Notified { .. } => "notified",
            SessionState::Failed { .. } => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionState::Notified { .. } | SessionState::Failed { .. }
        )
    }

    pub fn profile(&self) -> Option<&RespondentProfile> {
        match self {
            SessionState::Answering { profile, .. }
            | SessionState::Scored { profile, .. }
            | SessionState::Notified { profile, .. } => Some(profile),
            _ => None,
        }
    }

    pub fn responses(&self) -> Option<&ResponseSet> {
        match self {
            SessionState::Answering { responses, .. }
            | SessionState::Scored { responses, .. }
            | SessionState::Notified { responses, .. } => Some(responses),
            _ => None,
        }
    }

    pub fn scores(&self) -> Option<&TraitScores> {
        match self {
            SessionState::Scored { scores, .. } | SessionState::Notified { scores, .. } => {
                Some(scores)
            }
            _ => None,
        }
    }

    /// Whether the submit control would be accepted right now.
    pub fn can_submit(&self) -> bool {
        matches!(self, SessionState::Answering { responses, .. } if responses.is_complete())
    }
}

/// A single user action or delivery outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SubmitProfile(RespondentProfile),
    Rate { statement: usize, rating: Rating },
    SubmitAnswers,
    NotificationSent,
    NotificationFailed(DispatchError),
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::SubmitProfile(_) => "submit-profile",
            Event::Rate { .. } => "rate",
            Event::SubmitAnswers => "submit-answers",
            Event::NotificationSent => "notification-sent",
            Event::NotificationFailed(_) => "notification-failed",
        }
    }
}

/// Compute the state that follows `state` when `event` occurs.
pub fn transition(state: &SessionState, event: Event) -> Result<SessionState, TransitionError> {
    if state.is_terminal() {
        return Err(TransitionError::Terminal(state.name()));
    }

    match (state, event) {
        (SessionState::CollectingInfo, Event::SubmitProfile(profile)) => {
            Ok(SessionState::Answering {
                profile,
                responses: ResponseSet::new(),
            })
        }

        (SessionState::Answering { profile, responses }, Event::Rate { statement, rating }) => {
            let mut responses = responses.clone();
            responses.select(statement, rating)?;
            Ok(SessionState::Answering {
                profile: profile.clone(),
                responses,
            })
        }

        (SessionState::Answering { profile, responses }, Event::SubmitAnswers) => {
            let scores = score(responses)?;
            Ok(SessionState::Scored {
                profile: profile.clone(),
                responses: responses.clone(),
                scores,
            })
        }

        (
            SessionState::Scored {
                profile,
                responses,
                scores,
            },
            Event::NotificationSent,
        ) => Ok(SessionState::Notified {
            profile: profile.clone(),
            responses: responses.clone(),
            scores: *scores,
        }),

        (SessionState::Scored { .. }, Event::NotificationFailed(reason)) => {
            Ok(SessionState::Failed { reason })
        }

        (state, event) => Err(TransitionError::InvalidEvent {
            event: event.name(),
            state: state.name(),
        }),
    }
}

/// A single respondent's run through the questionnaire.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            state: SessionState::CollectingInfo,
        };
        tracing::info!(
            session = %session.id,
            started_at = %session.started_at,
            "session started"
        );
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Apply `event`, keeping the current state if the event is rejected.
    pub fn apply(&mut self, event: Event) -> Result<&SessionState, TransitionError> {
        let event_name = event.name();
        match transition(&self.state, event) {
            Ok(next) => {
                tracing::debug!(
                    session = %self.id,
                    event = event_name,
                    from = self.state.name(),
                    to = next.name(),
                    "transition"
                );
                if let SessionState::Failed { reason } = &next {
                    tracing::warn!(session = %self.id, %reason, "session failed");
                }
                self.state = next;
                Ok(&self.state)
            }
            Err(e) => {
                tracing::debug!(session = %self.id, event = event_name, error = %e, "transition rejected");
                Err(e)
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
