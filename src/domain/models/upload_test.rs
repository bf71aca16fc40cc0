use std::path;

use super::ChatLogInsights;
use super::ImageDetections;
use super::UploadKind;

mod upload_kind {
    use super::*;

    #[test]
    fn it_toggles_between_kinds() {
        assert_eq!(UploadKind::ChatLog.toggled(), UploadKind::Image);
        assert_eq!(UploadKind::Image.toggled(), UploadKind::ChatLog);
    }

    #[test]
    fn it_accepts_matching_extensions() {
        assert!(UploadKind::ChatLog.accepts(path::Path::new("notes.txt")));
        assert!(UploadKind::ChatLog.accepts(path::Path::new("log.JSON")));
        assert!(!UploadKind::ChatLog.accepts(path::Path::new("photo.png")));

        assert!(UploadKind::Image.accepts(path::Path::new("photo.png")));
        assert!(!UploadKind::Image.accepts(path::Path::new("notes.txt")));
        assert!(!UploadKind::Image.accepts(path::Path::new("no-extension")));
    }
}

mod response_shapes {
    use super::*;

    #[test]
    fn it_deserializes_chat_log_insights() {
        let body = r#"{"message": "Chat log processed successfully", "items": ["sofa"], "context": ["ctx1"], "messages": ["m1"]}"#;
        let insights: ChatLogInsights = serde_json::from_str(body).unwrap();

        assert_eq!(insights.items, vec!["sofa"]);
        assert_eq!(insights.context, vec!["ctx1"]);
        assert_eq!(insights.messages, vec!["m1"]);
    }

    #[test]
    fn it_defaults_missing_arrays_to_empty() {
        let insights: ChatLogInsights = serde_json::from_str("{}").unwrap();

        assert!(insights.items.is_empty());
        assert!(insights.context.is_empty());
        assert!(insights.messages.is_empty());
    }

    #[test]
    fn it_deserializes_image_detections() {
        let body = r#"{"detections": [{"metadata": {"items": ["chair"], "filename": "room.png", "image_id": 7}}]}"#;
        let detections: ImageDetections = serde_json::from_str(body).unwrap();

        assert_eq!(detections.detections.len(), 1);
        assert_eq!(detections.detections[0].metadata.filename, "room.png");
        assert_eq!(detections.detections[0].metadata.image_id, 7);
    }
}
