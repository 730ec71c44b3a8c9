// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Query session — the state machine behind the multi-step UI.
//
//   Idle ──query──► Loading ──proposals──► ProposalsShown ──select──► Loading ──sheet──► FactSheetShown
//                      │                        ▲    │                                     │
//                      └──error response──► Error    └──more──► Loading                    close
//                                                                                          ▼
//                                                                                   ProposalsShown
//
// A network failure while loading returns to the phase the request started from.
// The id of a new query only replaces the current one once its proposals
// arrive, so the id, variable and proposals on screen always belong together.

use tracing::{debug, info, warn};

use crate::error::{IndicadoresError, Result};
use crate::fact_sheet::FactSheetRecord;
use crate::response::{ServiceError, TemporalError, ValidationError, VariableInfo, WebhookResponse};
use crate::types::{
    Proposal, SessionId, WebhookAction, WebhookRequest, normalize_variable_id,
};

/// Error responses the service can answer with.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseError {
    Service(ServiceError),
    Temporal(TemporalError),
    Validation(ValidationError),
}

/// Where the user currently is in the flow.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Nothing queried yet, or the user started over.
    Idle,
    /// A request is in flight.
    Loading(WebhookAction),
    /// The accumulated proposals are on screen.
    ProposalsShown,
    /// The fact sheet for a selected proposal is open.
    FactSheetShown,
    /// The service answered with one of its error shapes.
    Error(ResponseError),
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading(_) => "loading",
            Self::ProposalsShown => "showing proposals",
            Self::FactSheetShown => "showing a fact sheet",
            Self::Error(_) => "showing an error",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }
}

/// All per-user state for one conversation with the generation service.
#[derive(Debug, Clone)]
pub struct Session {
    session_id: SessionId,
    min_id_len: usize,
    phase: Phase,
    /// Phase to fall back to if the in-flight request fails.
    resume_phase: Option<Phase>,
    /// Id of the variable whose proposals are shown.
    variable_id: Option<String>,
    /// Id sent with an in-flight query, committed by its proposals.
    pending_variable_id: Option<String>,
    variable: Option<VariableInfo>,
    proposals: Vec<Proposal>,
    fact_sheet: Option<FactSheetRecord>,
    notice: Option<String>,
}

impl Session {
    pub fn new(min_id_len: usize) -> Self {
        Self {
            session_id: SessionId::new(),
            min_id_len,
            phase: Phase::Idle,
            resume_phase: None,
            variable_id: None,
            pending_variable_id: None,
            variable: None,
            proposals: Vec::new(),
            fact_sheet: None,
            notice: None,
        }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    /// Upper-cased id of the variable whose proposals are shown.
    pub fn variable_id(&self) -> Option<&str> {
        self.variable_id.as_deref()
    }

    /// Description sent with the first batch of proposals.
    pub fn variable(&self) -> Option<&VariableInfo> {
        self.variable.as_ref()
    }

    /// Every proposal received for the current variable, in arrival order.
    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn fact_sheet(&self) -> Option<&FactSheetRecord> {
        self.fact_sheet.as_ref()
    }

    /// Informational message attached to the last batch of extra proposals.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Whether a query id is long enough to be sent.
    pub fn accepts_variable_id(&self, raw: &str) -> bool {
        normalize_variable_id(raw).chars().count() >= self.min_id_len
    }

    // -- Transitions ----------------------------------------------------------

    /// Start a query for a new variable.
    pub fn begin_query(&mut self, raw_id: &str) -> Result<WebhookRequest> {
        self.ensure_idle_enough("query a variable")?;
        let id = normalize_variable_id(raw_id);
        if id.chars().count() < self.min_id_len {
            return Err(IndicadoresError::InvalidVariableId {
                id,
                min: self.min_id_len,
            });
        }

        info!(variable = %id, session = %self.session_id, "querying variable");
        self.pending_variable_id = Some(id.clone());
        Ok(self.enter_loading(WebhookAction::Start, id, None))
    }

    /// Ask for more proposals for the current variable.
    pub fn begin_more(&mut self) -> Result<WebhookRequest> {
        if self.phase != Phase::ProposalsShown {
            return Err(self.invalid("request more proposals"));
        }
        let id = self
            .variable_id
            .clone()
            .ok_or_else(|| self.invalid("request more proposals"))?;
        Ok(self.enter_loading(WebhookAction::MoreOptions, id, None))
    }

    /// Ask for the fact sheet of one of the shown proposals.
    pub fn begin_select(&mut self, proposal_id: u32) -> Result<WebhookRequest> {
        if self.phase != Phase::ProposalsShown {
            return Err(self.invalid("select a proposal"));
        }
        let id = self
            .variable_id
            .clone()
            .ok_or_else(|| self.invalid("select a proposal"))?;
        let proposal = self
            .proposals
            .iter()
            .find(|p| p.id == proposal_id)
            .cloned()
            .ok_or(IndicadoresError::UnknownProposal(proposal_id))?;
        Ok(self.enter_loading(WebhookAction::Select, id, Some(&proposal)))
    }

    /// Fold a decoded response into the session.
    pub fn apply(&mut self, response: WebhookResponse) -> Result<&Phase> {
        if !self.phase.is_loading() {
            return Err(self.invalid("apply a response"));
        }
        debug!(kind = response.kind(), "applying webhook response");
        self.resume_phase = None;
        let queried = self.pending_variable_id.take();

        self.phase = match response {
            WebhookResponse::InitialProposals(initial) => {
                if queried.is_some() {
                    self.variable_id = queried;
                }
                self.proposals = initial.proposals;
                self.variable = Some(initial.variable);
                self.fact_sheet = None;
                self.notice = None;
                Phase::ProposalsShown
            }
            WebhookResponse::AdditionalProposals(additional) => {
                for proposal in additional.proposals {
                    match self.proposals.iter_mut().find(|p| p.id == proposal.id) {
                        Some(existing) => *existing = proposal,
                        None => self.proposals.push(proposal),
                    }
                }
                self.notice = Some(additional.message).filter(|m| !m.trim().is_empty());
                Phase::ProposalsShown
            }
            WebhookResponse::FactSheet(record) => {
                self.fact_sheet = Some(*record);
                Phase::FactSheetShown
            }
            WebhookResponse::Error(err) => {
                warn!(message = %err.message, "service reported an error");
                Phase::Error(ResponseError::Service(err))
            }
            WebhookResponse::TemporalError(err) => {
                warn!(
                    available = err.error.years.available,
                    required = err.error.years.required,
                    "variable lacks temporal coverage"
                );
                Phase::Error(ResponseError::Temporal(err))
            }
            WebhookResponse::ValidationError(err) => {
                warn!(message = %err.message, "service rejected the request");
                Phase::Error(ResponseError::Validation(err))
            }
        };

        Ok(&self.phase)
    }

    /// The in-flight request failed before any response could be decoded.
    pub fn fail(&mut self) -> Result<&Phase> {
        if !self.phase.is_loading() {
            return Err(self.invalid("fail a request"));
        }
        self.phase = self.resume_phase.take().unwrap_or(Phase::Idle);
        self.pending_variable_id = None;
        debug!(phase = self.phase.name(), "request failed, phase restored");
        Ok(&self.phase)
    }

    /// Close the fact-sheet view, discarding the record.
    pub fn close_fact_sheet(&mut self) -> Result<()> {
        if self.phase != Phase::FactSheetShown {
            return Err(self.invalid("close the fact sheet"));
        }
        self.fact_sheet = None;
        self.phase = self.resting_phase();
        Ok(())
    }

    /// Leave an error view, going back to the proposals if there are any.
    pub fn dismiss_error(&mut self) -> Result<()> {
        if !matches!(self.phase, Phase::Error(_)) {
            return Err(self.invalid("dismiss an error"));
        }
        self.phase = self.resting_phase();
        if self.phase == Phase::Idle {
            self.variable_id = None;
            self.variable = None;
            self.notice = None;
        }
        Ok(())
    }

    /// Forget the current variable and start over.
    ///
    /// The session id is kept so the service can correlate follow-up queries.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.resume_phase = None;
        self.variable_id = None;
        self.pending_variable_id = None;
        self.variable = None;
        self.proposals.clear();
        self.fact_sheet = None;
        self.notice = None;
    }

    // -- Helpers --------------------------------------------------------------

    fn enter_loading(
        &mut self,
        action: WebhookAction,
        variable_id: String,
        proposal: Option<&Proposal>,
    ) -> WebhookRequest {
        let previous = std::mem::replace(&mut self.phase, Phase::Loading(action));
        self.resume_phase = Some(previous);
        WebhookRequest {
            variable_id,
            session_id: self.session_id.clone(),
            action,
            proposal_id: proposal.map(|p| p.id),
            proposal_name: proposal.map(|p| p.name.clone()),
        }
    }

    fn ensure_idle_enough(&self, action: &'static str) -> Result<()> {
        match self.phase {
            Phase::Loading(_) | Phase::FactSheetShown => Err(self.invalid(action)),
            _ => Ok(()),
        }
    }

    fn resting_phase(&self) -> Phase {
        if self.proposals.is_empty() {
            Phase::Idle
        } else {
            Phase::ProposalsShown
        }
    }

    fn invalid(&self, action: &'static str) -> IndicadoresError {
        IndicadoresError::InvalidTransition {
            action,
            phase: self.phase.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{AdditionalProposals, InitialProposals};

    fn proposal(id: u32, name: &str) -> Proposal {
        Proposal {
            id,
            name: name.into(),
            approach: "Estado".into(),
            kind: "Porcentaje".into(),
            description: format!("Descripción de {name}"),
            objective: None,
            importance: None,
        }
    }

    fn initial(ids: &[u32]) -> WebhookResponse {
        WebhookResponse::InitialProposals(InitialProposals {
            variable: VariableInfo {
                id: "CPV-005".into(),
                name: "Agua entubada".into(),
                ..Default::default()
            },
            proposals: ids.iter().map(|&id| proposal(id, &format!("P{id}"))).collect(),
        })
    }

    fn additional(ids: &[u32]) -> WebhookResponse {
        WebhookResponse::AdditionalProposals(AdditionalProposals {
            message: "Más opciones".into(),
            proposals: ids.iter().map(|&id| proposal(id, &format!("Extra{id}"))).collect(),
            ..Default::default()
        })
    }

    fn sheet() -> WebhookResponse {
        WebhookResponse::FactSheet(Box::new(FactSheetRecord {
            formula: "A / B".into(),
            ..Default::default()
        }))
    }

    fn session_with_proposals(ids: &[u32]) -> Session {
        let mut session = Session::new(3);
        session.begin_query("cpv-005").unwrap();
        session.apply(initial(ids)).unwrap();
        session
    }

    #[test]
    fn short_id_is_rejected_without_leaving_idle() {
        let mut session = Session::new(3);
        let err = session.begin_query("  ab ").unwrap_err();
        assert!(matches!(err, IndicadoresError::InvalidVariableId { min: 3, .. }));
        assert_eq!(*session.phase(), Phase::Idle);
        assert!(!session.accepts_variable_id("ab"));
        assert!(session.accepts_variable_id("abc"));
    }

    #[test]
    fn query_builds_start_request() {
        let mut session = Session::new(3);
        let request = session.begin_query(" cpv-005").unwrap();
        assert_eq!(request.variable_id, "CPV-005");
        assert_eq!(request.action, WebhookAction::Start);
        assert_eq!(&request.session_id, session.session_id());
        assert_eq!(*session.phase(), Phase::Loading(WebhookAction::Start));
        assert_eq!(session.variable_id(), None);

        session.apply(initial(&[1])).unwrap();
        assert_eq!(session.variable_id(), Some("CPV-005"));
    }

    #[test]
    fn initial_proposals_replace_and_additional_accumulate() {
        let mut session = session_with_proposals(&[1, 2, 3]);
        assert_eq!(*session.phase(), Phase::ProposalsShown);
        assert_eq!(session.variable().unwrap().name, "Agua entubada");

        session.begin_more().unwrap();
        session.apply(additional(&[4, 5])).unwrap();
        let ids: Vec<u32> = session.proposals().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(session.notice(), Some("Más opciones"));

        session.begin_query("CPV-006").unwrap();
        session.apply(initial(&[9])).unwrap();
        let ids: Vec<u32> = session.proposals().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![9]);
        assert_eq!(session.notice(), None);
        assert_eq!(session.variable_id(), Some("CPV-006"));
    }

    #[test]
    fn failed_new_query_keeps_the_shown_variable() {
        let mut session = session_with_proposals(&[1, 2]);
        session.begin_query("CPV-006").unwrap();
        assert_eq!(*session.fail().unwrap(), Phase::ProposalsShown);

        assert_eq!(session.variable_id(), Some("CPV-005"));
        assert_eq!(session.variable().unwrap().id, "CPV-005");
        let more = session.begin_more().unwrap();
        assert_eq!(more.variable_id, "CPV-005");
    }

    #[test]
    fn error_answer_to_new_query_keeps_the_shown_variable() {
        let mut session = session_with_proposals(&[1, 2]);
        session.begin_query("CPV-006").unwrap();
        session
            .apply(WebhookResponse::ValidationError(ValidationError {
                message: "ID no válido".into(),
                ..Default::default()
            }))
            .unwrap();
        session.dismiss_error().unwrap();
        assert_eq!(*session.phase(), Phase::ProposalsShown);

        let select = session.begin_select(1).unwrap();
        assert_eq!(select.variable_id, "CPV-005");
        assert_eq!(select.proposal_name.as_deref(), Some("P1"));
    }

    #[test]
    fn dismissing_to_idle_forgets_the_variable() {
        let mut session = Session::new(3);
        session.begin_query("CPV-005").unwrap();
        session.apply(initial(&[])).unwrap();
        session.begin_query("CPV-006").unwrap();
        session
            .apply(WebhookResponse::Error(ServiceError::default()))
            .unwrap();
        session.dismiss_error().unwrap();

        assert_eq!(*session.phase(), Phase::Idle);
        assert_eq!(session.variable_id(), None);
        assert!(session.variable().is_none());
    }

    #[test]
    fn repeated_proposal_ids_are_replaced_in_place() {
        let mut session = session_with_proposals(&[1, 2]);
        session.begin_more().unwrap();
        session.apply(additional(&[2, 3])).unwrap();
        let names: Vec<&str> = session.proposals().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["P1", "Extra2", "Extra3"]);
    }

    #[test]
    fn select_builds_request_and_opens_sheet() {
        let mut session = session_with_proposals(&[1, 2]);
        let request = session.begin_select(2).unwrap();
        assert_eq!(request.action, WebhookAction::Select);
        assert_eq!(request.proposal_id, Some(2));
        assert_eq!(request.proposal_name.as_deref(), Some("P2"));

        session.apply(sheet()).unwrap();
        assert_eq!(*session.phase(), Phase::FactSheetShown);
        assert_eq!(session.fact_sheet().unwrap().formula, "A / B");

        session.close_fact_sheet().unwrap();
        assert_eq!(*session.phase(), Phase::ProposalsShown);
        assert!(session.fact_sheet().is_none());
        assert_eq!(session.proposals().len(), 2);
    }

    #[test]
    fn selecting_unknown_proposal_fails() {
        let mut session = session_with_proposals(&[1]);
        let err = session.begin_select(7).unwrap_err();
        assert!(matches!(err, IndicadoresError::UnknownProposal(7)));
        assert_eq!(*session.phase(), Phase::ProposalsShown);
    }

    #[test]
    fn network_failure_restores_previous_phase() {
        let mut session = session_with_proposals(&[1]);
        session.begin_more().unwrap();
        assert_eq!(*session.fail().unwrap(), Phase::ProposalsShown);

        let mut fresh = Session::new(3);
        fresh.begin_query("CPV-005").unwrap();
        assert_eq!(*fresh.fail().unwrap(), Phase::Idle);
    }

    #[test]
    fn error_responses_enter_error_phase() {
        let mut session = session_with_proposals(&[1]);
        session.begin_select(1).unwrap();
        session
            .apply(WebhookResponse::Error(ServiceError {
                message: "Falla".into(),
                ..Default::default()
            }))
            .unwrap();
        assert!(matches!(session.phase(), Phase::Error(ResponseError::Service(_))));

        session.dismiss_error().unwrap();
        assert_eq!(*session.phase(), Phase::ProposalsShown);
    }

    #[test]
    fn temporal_error_on_first_query_dismisses_to_idle() {
        let mut session = Session::new(3);
        session.begin_query("CPV-001").unwrap();
        session
            .apply(WebhookResponse::TemporalError(TemporalError::default()))
            .unwrap();
        assert!(matches!(session.phase(), Phase::Error(ResponseError::Temporal(_))));
        session.dismiss_error().unwrap();
        assert_eq!(*session.phase(), Phase::Idle);
    }

    #[test]
    fn invalid_transitions_are_reported() {
        let mut session = Session::new(3);
        assert!(matches!(
            session.begin_more().unwrap_err(),
            IndicadoresError::InvalidTransition { phase: "idle", .. }
        ));
        assert!(session.apply(initial(&[1])).is_err());
        assert!(session.close_fact_sheet().is_err());
        assert!(session.fail().is_err());

        session.begin_query("CPV-005").unwrap();
        assert!(session.begin_query("CPV-006").is_err());
    }

    #[test]
    fn reset_clears_everything_but_session_id() {
        let mut session = session_with_proposals(&[1, 2]);
        let id = session.session_id().clone();
        session.reset();
        assert_eq!(*session.phase(), Phase::Idle);
        assert!(session.proposals().is_empty());
        assert!(session.variable_id().is_none());
        assert!(session.variable().is_none());
        assert_eq!(session.session_id(), &id);
    }
}
