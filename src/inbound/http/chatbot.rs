//! Chat assistant endpoint.
//!
//! ```text
//! POST /api/chatbot
//! ```

use actix_web::{HttpResponse, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{ChatRequest, ChatTurn};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{Envelope, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// One prior conversation turn as sent by the frontend.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatTurnBody {
    pub role: String,
    pub content: String,
}

/// Request body for one assistant exchange.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequestBody {
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<ChatTurnBody>,
    #[serde(default)]
    #[schema(value_type = Option<serde_json::Value>)]
    pub data_context: Option<serde_json::Value>,
}

/// District the frontend should navigate to, when one was recognized.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavigationTargetDto {
    pub district_code: String,
    pub district_name: String,
    pub state_code: String,
}

/// Assistant reply payload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatReplyDto {
    pub message: String,
    #[schema(value_type = String, format = "date-time")]
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigate_to: Option<NavigationTargetDto>,
}

/// Answer one dashboard question.
#[utoipa::path(
    post,
    path = "/api/chatbot",
    request_body = ChatRequestBody,
    responses(
        (status = 200, description = "Assistant reply", body = ChatReplyDto),
        (status = 400, description = "Empty message", body = ErrorSchema),
        (status = 503, description = "Generative API unavailable", body = ErrorSchema)
    ),
    tags = ["chatbot"],
    operation_id = "chatbot"
)]
#[post("/chatbot")]
pub async fn chatbot(
    state: web::Data<HttpState>,
    body: web::Json<ChatRequestBody>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    if body.message.trim().is_empty() {
        return Err(Error::invalid_request("Message is required"));
    }

    let request = ChatRequest {
        message: body.message,
        history: body
            .conversation_history
            .into_iter()
            .map(|turn| ChatTurn {
                role: turn.role,
                content: turn.content,
            })
            .collect(),
        // An empty context object means "no context".
        data_context: body
            .data_context
            .filter(|context| context.as_object().is_none_or(|map| !map.is_empty())),
    };
    let reply = state.assistant.respond(&request).await?;

    let payload = ChatReplyDto {
        message: reply.message,
        timestamp: Utc::now(),
        navigate_to: reply.navigate_to.map(|target| NavigationTargetDto {
            district_code: target.district_code,
            district_name: target.district_name,
            state_code: target.state_code,
        }),
    };
    Ok(HttpResponse::Ok().json(Envelope::data(payload)))
}
