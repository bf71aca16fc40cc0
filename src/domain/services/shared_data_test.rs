use super::SharedData;
use crate::domain::models::ChatResponse;
use crate::domain::models::ImageResponse;

fn chat_response(chat_id: i64) -> ChatResponse {
    return ChatResponse {
        chat_id,
        ..ChatResponse::default()
    };
}

#[test]
fn it_replaces_results_wholesale() {
    let mut shared = SharedData::default();
    shared.replace_results(vec![chat_response(1), chat_response(2)], vec![]);
    assert_eq!(shared.chat_responses().len(), 2);

    shared.replace_results(vec![chat_response(3)], vec![ImageResponse::default()]);

    assert_eq!(shared.chat_responses().len(), 1);
    assert_eq!(shared.chat_responses()[0].chat_id, 3);
    assert_eq!(shared.image_responses().len(), 1);
    assert_eq!(shared.card_count(), 2);
}

#[test]
fn it_empties_both_sequences_when_given_empty_results() {
    let mut shared = SharedData::default();
    shared.replace_results(vec![chat_response(1)], vec![ImageResponse::default()]);
    shared.replace_results(vec![], vec![]);

    assert!(shared.chat_responses().is_empty());
    assert!(shared.image_responses().is_empty());
}

#[test]
fn it_toggles_the_detail_panel() {
    let mut shared = SharedData::default();
    assert!(!shared.detail_panel_open());

    shared.toggle_detail_panel();
    assert!(shared.detail_panel_open());

    shared.toggle_detail_panel();
    assert!(!shared.detail_panel_open());
}
