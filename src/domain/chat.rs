//! Dashboard chat assistant service.
//!
//! Assembles the prompt (scheme preamble, optional dashboard data context,
//! optional conversation history), calls the generative-text port, and scans
//! the user's message for a district name the frontend can navigate to.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::observation::DistrictWithState;
use crate::domain::ports::{
    ChatAssistant, ChatCompletion, ChatReply, ChatRequest, ChatTurn, DirectoryQuery,
    NavigationTarget,
};

const SYSTEM_PREAMBLE: &str = "You are a helpful assistant for the MGNREGA \
(Mahatma Gandhi National Rural Employment Guarantee Act) data portal. You \
help users understand MGNREGA data, including employment statistics, work \
completion rates, budget utilization, and district-level metrics across \
Indian states. Be concise, helpful, and data-focused in your responses.";

const DATA_CONTEXT_PREAMBLE: &str = "You are a helpful assistant for the \
MGNREGA data portal. The user is viewing data for a specific district or \
state. Use the following data context to answer their questions accurately.";

/// Domain service implementing the chat assistant port.
pub struct ChatService<C: ?Sized, D: ?Sized> {
    completion: Arc<C>,
    directory: Arc<D>,
}

impl<C: ?Sized, D: ?Sized> ChatService<C, D> {
    /// Create a new chat service.
    pub fn new(completion: Arc<C>, directory: Arc<D>) -> Self {
        Self {
            completion,
            directory,
        }
    }
}

impl<C: ?Sized, D: ?Sized> Clone for ChatService<C, D> {
    fn clone(&self) -> Self {
        Self {
            completion: Arc::clone(&self.completion),
            directory: Arc::clone(&self.directory),
        }
    }
}

#[async_trait]
impl<C, D> ChatAssistant for ChatService<C, D>
where
    C: ChatCompletion + ?Sized,
    D: DirectoryQuery + ?Sized,
{
    async fn respond(&self, request: &ChatRequest) -> Result<ChatReply, Error> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(Error::invalid_request("message must not be empty"));
        }

        let prompt = build_prompt(message, &request.history, request.data_context.as_ref())?;
        let reply = self
            .completion
            .generate(&prompt)
            .await
            .map_err(|error| Error::service_unavailable(error.to_string()))?;

        let districts = self
            .directory
            .districts(None)
            .await
            .map_err(|error| Error::service_unavailable(error.to_string()))?;

        Ok(ChatReply {
            message: reply,
            navigate_to: navigation_intent(message, &districts),
        })
    }
}

/// Assemble the full prompt text sent to the completion port.
fn build_prompt(
    message: &str,
    history: &[ChatTurn],
    data_context: Option<&serde_json::Value>,
) -> Result<String, Error> {
    if let Some(context) = data_context {
        let rendered = serde_json::to_string_pretty(context)
            .map_err(|error| Error::internal(format!("data context is not serializable: {error}")))?;
        return Ok(format!(
            "{DATA_CONTEXT_PREAMBLE}\n\nData Context:\n{rendered}\n\nBe concise and \
             reference specific numbers from the data when relevant.\n\nUser: {message}"
        ));
    }

    if history.is_empty() {
        return Ok(format!("{SYSTEM_PREAMBLE}\n\nUser: {message}"));
    }

    let history_text = history
        .iter()
        .map(|turn| format!("{}: {}", turn.role, turn.content))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(format!(
        "{SYSTEM_PREAMBLE}\n\nConversation history:\n{history_text}\n\nUser: {message}"
    ))
}

/// Find the district the message is talking about, if any. The longest
/// matching name wins so "north 24 parganas" never resolves to a district
/// that merely shares a word.
fn navigation_intent(
    message: &str,
    districts: &[DistrictWithState],
) -> Option<NavigationTarget> {
    let message_upper = message.to_uppercase();
    districts
        .iter()
        .filter(|candidate| {
            let name = candidate.district.name.trim().to_uppercase();
            name.len() >= 4 && message_upper.contains(&name)
        })
        .max_by_key(|candidate| candidate.district.name.trim().len())
        .map(|candidate| NavigationTarget {
            district_code: candidate.district.code.clone(),
            district_name: candidate.district.name.clone(),
            state_code: candidate.district.state_code.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::observation::{DistrictRecord, StateRecord};
    use crate::domain::ports::{MockChatCompletion, MockDirectoryQuery};
    use serde_json::json;

    fn directory(entries: &[(&str, &str)]) -> MockDirectoryQuery {
        let districts: Vec<DistrictWithState> = entries
            .iter()
            .map(|(code, name)| DistrictWithState {
                district: DistrictRecord {
                    code: (*code).to_owned(),
                    name: (*name).to_owned(),
                    state_code: "18".to_owned(),
                },
                state: StateRecord {
                    code: "18".to_owned(),
                    name: "MAHARASHTRA".to_owned(),
                },
            })
            .collect();
        let mut mock = MockDirectoryQuery::new();
        mock.expect_districts()
            .returning(move |_| Ok(districts.clone()));
        mock
    }

    fn completion_echoing_prompt() -> MockChatCompletion {
        let mut completion = MockChatCompletion::new();
        completion
            .expect_generate()
            .returning(|prompt| Ok(prompt.to_owned()));
        completion
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let service = ChatService::new(
            Arc::new(MockChatCompletion::new()),
            Arc::new(MockDirectoryQuery::new()),
        );
        let error = service
            .respond(&ChatRequest {
                message: "   ".to_owned(),
                ..ChatRequest::default()
            })
            .await
            .expect_err("blank message should fail");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn plain_message_gets_scheme_preamble() {
        let service = ChatService::new(
            Arc::new(completion_echoing_prompt()),
            Arc::new(directory(&[])),
        );
        let reply = service
            .respond(&ChatRequest {
                message: "what are persondays?".to_owned(),
                ..ChatRequest::default()
            })
            .await
            .expect("should reply");
        assert!(reply.message.starts_with("You are a helpful assistant"));
        assert!(reply.message.ends_with("User: what are persondays?"));
    }

    #[tokio::test]
    async fn history_is_replayed_in_role_order() {
        let service = ChatService::new(
            Arc::new(completion_echoing_prompt()),
            Arc::new(directory(&[])),
        );
        let reply = service
            .respond(&ChatRequest {
                message: "and last year?".to_owned(),
                history: vec![
                    ChatTurn {
                        role: "user".to_owned(),
                        content: "wage rate in Pune?".to_owned(),
                    },
                    ChatTurn {
                        role: "assistant".to_owned(),
                        content: "Rs 245 per day.".to_owned(),
                    },
                ],
                data_context: None,
            })
            .await
            .expect("should reply");
        assert!(reply.message.contains("Conversation history:"));
        assert!(reply.message.contains("user: wage rate in Pune?"));
        assert!(reply.message.contains("assistant: Rs 245 per day."));
    }

    #[tokio::test]
    async fn data_context_takes_precedence_over_history() {
        let service = ChatService::new(
            Arc::new(completion_echoing_prompt()),
            Arc::new(directory(&[])),
        );
        let reply = service
            .respond(&ChatRequest {
                message: "summarize".to_owned(),
                history: vec![ChatTurn {
                    role: "user".to_owned(),
                    content: "ignored".to_owned(),
                }],
                data_context: Some(json!({ "totalHouseholdsWorked": "376297" })),
            })
            .await
            .expect("should reply");
        assert!(reply.message.contains("Data Context:"));
        assert!(reply.message.contains("376297"));
        assert!(!reply.message.contains("Conversation history:"));
    }

    #[tokio::test]
    async fn message_naming_a_district_yields_navigation_target() {
        let service = ChatService::new(
            Arc::new(completion_echoing_prompt()),
            Arc::new(directory(&[("1808", "PUNE"), ("1821", "PUNE RURAL")])),
        );
        let reply = service
            .respond(&ChatRequest {
                message: "show me pune rural numbers".to_owned(),
                ..ChatRequest::default()
            })
            .await
            .expect("should reply");
        let target = reply.navigate_to.expect("district should be detected");
        // Longest name wins over the plain "PUNE" prefix.
        assert_eq!(target.district_code, "1821");
    }

    #[tokio::test]
    async fn unrelated_message_has_no_navigation_target() {
        let service = ChatService::new(
            Arc::new(completion_echoing_prompt()),
            Arc::new(directory(&[("1808", "PUNE")])),
        );
        let reply = service
            .respond(&ChatRequest {
                message: "what is a job card?".to_owned(),
                ..ChatRequest::default()
            })
            .await
            .expect("should reply");
        assert!(reply.navigate_to.is_none());
    }
}
