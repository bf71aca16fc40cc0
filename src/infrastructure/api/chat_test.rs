use anyhow::Result;
use serde_json::json;

use crate::domain::models::Author;
use crate::domain::models::ChatPrompt;
use crate::infrastructure::api::HttpApi;

fn prompt() -> ChatPrompt {
    return ChatPrompt {
        seq: 1,
        text: "What is my sofa worth?".to_string(),
        user_id: 7,
        history: vec![(Author::Bot, "How may I help you?".to_string())],
        search_chat: true,
        search_image: false,
    };
}

#[tokio::test]
async fn it_submits_prompts_and_parses_related_content() -> Result<()> {
    let body = json!({
        "response": {
            "choices": [{"message": {"content": "Your sofa is in the uploads."}}]
        },
        "pc_chat_response": [{
            "chat_id": 3,
            "context": "Context: living room",
            "item": "Item: sofa",
            "message": "[2024-01-02] bought new",
            "message_id": 9,
            "type": "chat",
            "user_id": 7
        }],
        "pc_image_response": [{
            "image_id": 4,
            "items": ["sofa", "lamp"],
            "filename": "room.png",
            "type": "image",
            "user_id": 7
        }]
    });

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/nebius-chat")
        .match_body(mockito::Matcher::Json(json!({
            "prompt": "What is my sofa worth?",
            "user_id": 7,
            "messages": [{"sender": "bot", "text": "How may I help you?"}],
            "searchChat": true,
            "searchImage": false
        })))
        .with_status(200)
        .with_body(body.to_string())
        .create();

    let api = HttpApi::new(&server.url(), "abc");
    let reply = api.send_chat(prompt()).await?;
    mock.assert();

    assert_eq!(reply.text, "Your sofa is in the uploads.");
    assert_eq!(reply.chat_responses.len(), 1);
    assert_eq!(reply.chat_responses[0].chat_id, 3);
    assert_eq!(reply.chat_responses[0].item_label(), "sofa");
    assert_eq!(reply.image_responses.len(), 1);
    assert_eq!(reply.image_responses[0].items_label(), "sofa, lamp");

    return Ok(());
}

#[tokio::test]
async fn it_defaults_missing_related_content_to_empty() -> Result<()> {
    let body = json!({
        "response": {
            "choices": [{"message": {"content": "Hello."}}]
        }
    });

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/nebius-chat")
        .with_status(200)
        .with_body(body.to_string())
        .create();

    let api = HttpApi::new(&server.url(), "abc");
    let reply = api.send_chat(prompt()).await?;
    mock.assert();

    assert_eq!(reply.text, "Hello.");
    assert!(reply.chat_responses.is_empty());
    assert!(reply.image_responses.is_empty());

    return Ok(());
}

#[tokio::test]
async fn it_substitutes_a_placeholder_when_the_completion_is_missing() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/nebius-chat")
        .with_status(200)
        .with_body("{}")
        .create();

    let api = HttpApi::new(&server.url(), "abc");
    let reply = api.send_chat(prompt()).await?;
    mock.assert();

    assert_eq!(reply.text, "No response from bot.");

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_server_errors() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/nebius-chat")
        .with_status(500)
        .create();

    let api = HttpApi::new(&server.url(), "abc");
    let res = api.send_chat(prompt()).await;

    mock.assert();
    assert!(res.is_err());
}
