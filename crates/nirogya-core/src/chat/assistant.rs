//! The chat assistant workflow.
//!
//! Context gathering is best-effort: repository failures are logged and
//! swallowed, so the conversation always proceeds with at least the
//! persona and the caller's messages.

use nirogya_types::llm::{
    ChatTurn, CompletionError, CompletionRequest, MessageRole, PromptMessage,
};

use crate::llm::CompletionClient;
use crate::llm::prompt::chat_system_prompt;
use crate::repository::{AppointmentRepository, SummaryRepository};

use super::context::build_user_context;

/// Output cap for chat replies, same bound as summarization.
pub const CHAT_MAX_TOKENS: u32 = 1000;

/// Conversational temperature.
pub const CHAT_TEMPERATURE: f64 = 0.7;

/// How many recent reports / upcoming appointments feed the context.
const CONTEXT_LIMIT: i64 = 5;

/// Stateless chat workflow: persona + optional user context + conversation.
pub struct ChatAssistant<R, A, C> {
    summaries: R,
    appointments: A,
    client: C,
}

impl<R, A, C> ChatAssistant<R, A, C>
where
    R: SummaryRepository,
    A: AppointmentRepository,
    C: CompletionClient,
{
    pub fn new(summaries: R, appointments: A, client: C) -> Self {
        Self {
            summaries,
            appointments,
            client,
        }
    }

    /// Answer one conversation. Returns the assistant text verbatim.
    pub async fn respond(
        &self,
        turns: &[ChatTurn],
        user_id: Option<&str>,
    ) -> Result<String, CompletionError> {
        let context = match user_id {
            Some(user_id) => self.gather_context(user_id).await,
            None => String::new(),
        };

        let mut messages =
            vec![PromptMessage::text(MessageRole::System, chat_system_prompt(&context))];
        messages.extend(
            turns
                .iter()
                .map(|turn| PromptMessage::text(turn.role, turn.content.clone())),
        );

        let request = CompletionRequest {
            messages,
            max_tokens: CHAT_MAX_TOKENS,
            temperature: CHAT_TEMPERATURE,
        };

        self.client.complete(&request).await
    }

    /// Fetch recent reports and upcoming appointments, tolerating failure.
    async fn gather_context(&self, user_id: &str) -> String {
        let reports = match self.summaries.recent_reports(user_id, CONTEXT_LIMIT).await {
            Ok(reports) => reports,
            Err(err) => {
                tracing::warn!(user_id, error = %err, "failed to fetch recent reports for context");
                Vec::new()
            }
        };

        let appointments = match self.appointments.upcoming(user_id, CONTEXT_LIMIT).await {
            Ok(appointments) => appointments,
            Err(err) => {
                tracing::warn!(user_id, error = %err, "failed to fetch appointments for context");
                Vec::new()
            }
        };

        build_user_context(&reports, &appointments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    use nirogya_types::appointment::{Appointment, NewAppointment};
    use nirogya_types::error::RepositoryError;
    use nirogya_types::llm::PromptContent;
    use nirogya_types::report::{ProcessingStatus, RecentReport, ReportSummary};

    struct FakeSummaries {
        fail: bool,
        reports: Vec<RecentReport>,
    }

    impl SummaryRepository for FakeSummaries {
        async fn create_processing(
            &self,
            _report_id: &str,
            _user_id: &str,
        ) -> Result<ReportSummary, RepositoryError> {
            unimplemented!("not used by chat")
        }

        async fn mark_completed(&self, _id: &Uuid, _s: &str) -> Result<(), RepositoryError> {
            unimplemented!("not used by chat")
        }

        async fn mark_failed(&self, _id: &Uuid, _e: &str) -> Result<(), RepositoryError> {
            unimplemented!("not used by chat")
        }

        async fn recent_reports(
            &self,
            _user_id: &str,
            limit: i64,
        ) -> Result<Vec<RecentReport>, RepositoryError> {
            if self.fail {
                return Err(RepositoryError::Connection);
            }
            Ok(self.reports.iter().take(limit as usize).cloned().collect())
        }
    }

    struct FakeAppointments {
        fail: bool,
        appointments: Vec<Appointment>,
    }

    impl AppointmentRepository for FakeAppointments {
        async fn create(&self, _a: &NewAppointment) -> Result<Appointment, RepositoryError> {
            unimplemented!("not used by chat")
        }

        async fn list(&self, _user_id: &str) -> Result<Vec<Appointment>, RepositoryError> {
            unimplemented!("not used by chat")
        }

        async fn upcoming(
            &self,
            _user_id: &str,
            limit: i64,
        ) -> Result<Vec<Appointment>, RepositoryError> {
            if self.fail {
                return Err(RepositoryError::Connection);
            }
            Ok(self
                .appointments
                .iter()
                .take(limit as usize)
                .cloned()
                .collect())
        }

        async fn delete(&self, _id: &Uuid, _user_id: &str) -> Result<(), RepositoryError> {
            unimplemented!("not used by chat")
        }
    }

    struct FakeClient {
        seen: Mutex<Option<CompletionRequest>>,
    }

    impl CompletionClient for FakeClient {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
            *self.seen.lock().unwrap() = Some(request.clone());
            Ok("assistant reply".to_string())
        }
    }

    fn sample_report() -> RecentReport {
        RecentReport {
            file_name: "cbc.png".to_string(),
            uploaded_at: Utc::now(),
            processing_status: Some(ProcessingStatus::Completed),
            summary_text: Some("All values within range.".to_string()),
        }
    }

    fn sample_appointment() -> Appointment {
        Appointment {
            id: Uuid::now_v7(),
            user_id: "u1".to_string(),
            doctor_name: "Dr. Rao".to_string(),
            specialty: "Cardiology".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
            time: "10:30 AM".to_string(),
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn system_text(request: &CompletionRequest) -> String {
        match &request.messages[0].content[0] {
            PromptContent::Text(text) => text.clone(),
            other => panic!("system message should be text, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_context_reaches_system_message() {
        let assistant = ChatAssistant::new(
            FakeSummaries {
                fail: false,
                reports: vec![sample_report()],
            },
            FakeAppointments {
                fail: false,
                appointments: vec![sample_appointment()],
            },
            FakeClient {
                seen: Mutex::new(None),
            },
        );

        let turns = [ChatTurn {
            role: MessageRole::User,
            content: "How are my results?".to_string(),
        }];
        let reply = assistant.respond(&turns, Some("u1")).await.unwrap();
        assert_eq!(reply, "assistant reply");

        let seen = assistant.client.seen.lock().unwrap();
        let request = seen.as_ref().unwrap();
        assert_eq!(request.max_tokens, 1000);
        assert!((request.temperature - 0.7).abs() < f64::EPSILON);
        // system + 1 conversation turn
        assert_eq!(request.messages.len(), 2);

        let system = system_text(request);
        assert!(system.contains("cbc.png"));
        assert!(system.contains("Dr. Rao (Cardiology)"));
    }

    #[tokio::test]
    async fn test_context_failures_are_swallowed() {
        let assistant = ChatAssistant::new(
            FakeSummaries {
                fail: true,
                reports: Vec::new(),
            },
            FakeAppointments {
                fail: true,
                appointments: Vec::new(),
            },
            FakeClient {
                seen: Mutex::new(None),
            },
        );

        let turns = [ChatTurn {
            role: MessageRole::User,
            content: "hello".to_string(),
        }];
        let reply = assistant.respond(&turns, Some("u1")).await.unwrap();
        assert_eq!(reply, "assistant reply");

        let seen = assistant.client.seen.lock().unwrap();
        let system = system_text(seen.as_ref().unwrap());
        assert!(!system.contains("User's Recent Medical Reports"));
        assert!(!system.contains("User's Upcoming Appointments"));
    }

    #[tokio::test]
    async fn test_empty_conversation_sends_persona_only() {
        let assistant = ChatAssistant::new(
            FakeSummaries {
                fail: false,
                reports: Vec::new(),
            },
            FakeAppointments {
                fail: false,
                appointments: Vec::new(),
            },
            FakeClient {
                seen: Mutex::new(None),
            },
        );

        let reply = assistant.respond(&[], Some("u1")).await.unwrap();
        assert_eq!(reply, "assistant reply");

        // Zero turns still produce a valid request: just the system message.
        let seen = assistant.client.seen.lock().unwrap();
        let request = seen.as_ref().unwrap();
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, MessageRole::System);
    }

    #[tokio::test]
    async fn test_anonymous_chat_skips_context() {
        let assistant = ChatAssistant::new(
            FakeSummaries {
                fail: true,
                reports: Vec::new(),
            },
            FakeAppointments {
                fail: true,
                appointments: Vec::new(),
            },
            FakeClient {
                seen: Mutex::new(None),
            },
        );

        let turns = [ChatTurn {
            role: MessageRole::User,
            content: "hi".to_string(),
        }];
        // Repositories would fail if called; no user_id means they never are.
        assistant.respond(&turns, None).await.unwrap();
    }
}
