use super::ChatLogEntry;
use super::ChatResponse;
use super::ImageResponse;

mod chat_response_labels {
    use super::*;

    #[test]
    fn it_slices_context_and_item_on_colon() {
        let res = ChatResponse {
            context: "context: a cozy living room".to_string(),
            item: "item: sofa".to_string(),
            ..ChatResponse::default()
        };

        assert_eq!(res.context_label(), "a cozy living room");
        assert_eq!(res.item_label(), "sofa");
    }

    #[test]
    fn it_slices_message_on_bracket() {
        let res = ChatResponse {
            message: "[user 12] I think the sofa was leather".to_string(),
            ..ChatResponse::default()
        };

        assert_eq!(res.message_label(), "I think the sofa was leather");
    }

    #[test]
    fn it_falls_back_to_the_whole_string_without_a_delimiter() {
        let res = ChatResponse {
            context: "no delimiter here".to_string(),
            ..ChatResponse::default()
        };

        assert_eq!(res.context_label(), "no delimiter here");
    }
}

mod image_response_labels {
    use super::*;

    #[test]
    fn it_joins_items_with_commas() {
        let res = ImageResponse {
            items: vec!["sofa".to_string(), "lamp".to_string()],
            ..ImageResponse::default()
        };

        assert_eq!(res.items_label(), "sofa, lamp");
    }

    #[test]
    fn it_deserializes_with_missing_optional_fields() {
        let res: ImageResponse = serde_json::from_str(r#"{"image_id": 3}"#).unwrap();

        assert_eq!(res.image_id, 3);
        assert!(res.items.is_empty());
        assert!(res.filename.is_none());
    }
}

mod chat_log_parsing {
    use super::*;

    #[test]
    fn it_parses_sender_and_text() {
        let entries = ChatLogEntry::parse_lines("bot: hello there\nuser: hi");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].sender, "bot");
        assert_eq!(entries[0].text, "hello there");
        assert_eq!(entries[1].sender, "You");
    }

    #[test]
    fn it_skips_lines_without_text() {
        let entries = ChatLogEntry::parse_lines("garbage line\nuser: \nbot: fine");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "fine");
    }
}
