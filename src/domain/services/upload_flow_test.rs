use std::path;

use super::UploadFlow;
use super::UploadPhase;
use crate::domain::models::ChatLogInsights;
use crate::domain::models::UploadKind;
use crate::domain::models::UploadResult;

fn insights() -> UploadResult {
    return UploadResult::ChatLog(ChatLogInsights {
        items: vec!["sofa".to_string()],
        context: vec!["ctx1".to_string()],
        messages: vec!["m1".to_string()],
    });
}

#[test]
fn it_walks_the_happy_path() {
    let mut flow = UploadFlow::default();
    assert_eq!(flow.phase(), UploadPhase::Idle);

    flow.select_file(path::Path::new("notes.txt")).unwrap();
    assert_eq!(flow.phase(), UploadPhase::Selected);

    let (file, seq) = flow.begin_upload().unwrap();
    assert_eq!(file, path::PathBuf::from("notes.txt"));
    assert_eq!(flow.phase(), UploadPhase::Uploading);

    flow.finish_success(seq, insights());
    assert_eq!(flow.phase(), UploadPhase::Done);
    assert_eq!(flow.status(), Some("File uploaded successfully!"));
    assert!(flow.result().is_some());
}

#[test]
fn it_rejects_files_with_the_wrong_extension() {
    let mut flow = UploadFlow::default();
    assert!(flow.select_file(path::Path::new("photo.png")).is_err());
    assert_eq!(flow.phase(), UploadPhase::Idle);
}

#[test]
fn it_replaces_rather_than_queues_selected_files() {
    let mut flow = UploadFlow::default();
    flow.select_file(path::Path::new("first.txt")).unwrap();
    flow.select_file(path::Path::new("second.json")).unwrap();

    assert_eq!(flow.file(), Some(path::Path::new("second.json")));
}

#[test]
fn it_refuses_to_upload_without_a_file() {
    let mut flow = UploadFlow::default();
    let res = flow.begin_upload();

    assert!(res.is_err());
    assert_eq!(flow.phase(), UploadPhase::Idle);
}

#[test]
fn it_surfaces_failure_detail() {
    let mut flow = UploadFlow::default();
    flow.select_file(path::Path::new("notes.txt")).unwrap();
    let (_, seq) = flow.begin_upload().unwrap();
    flow.finish_failure(seq, "Failed to upload file. Please try again.");

    assert_eq!(flow.phase(), UploadPhase::Done);
    assert_eq!(flow.status(), Some("Failed to upload file. Please try again."));
    assert!(flow.result().is_none());
}

mod kind_toggle {
    use super::*;

    #[test]
    fn it_keeps_the_selected_file_but_clears_the_response() {
        let mut flow = UploadFlow::default();
        flow.select_file(path::Path::new("notes.txt")).unwrap();
        let (_, seq) = flow.begin_upload().unwrap();
        flow.finish_success(seq, insights());

        flow.toggle_kind();

        assert_eq!(flow.kind(), UploadKind::Image);
        assert_eq!(flow.file(), Some(path::Path::new("notes.txt")));
        assert!(flow.result().is_none());
        assert!(flow.status().is_none());
        assert_eq!(flow.phase(), UploadPhase::Selected);
    }

    #[test]
    fn it_blocks_uploading_a_mismatched_survivor_file() {
        let mut flow = UploadFlow::default();
        flow.select_file(path::Path::new("notes.txt")).unwrap();
        flow.toggle_kind();

        assert!(flow.begin_upload().is_err());
    }

    #[test]
    fn it_discards_a_result_from_before_the_toggle() {
        let mut flow = UploadFlow::default();
        flow.select_file(path::Path::new("notes.txt")).unwrap();
        let (_, seq) = flow.begin_upload().unwrap();

        flow.toggle_kind();
        flow.finish_success(seq, insights());

        assert_eq!(flow.kind(), UploadKind::Image);
        assert_eq!(flow.phase(), UploadPhase::Selected);
        assert!(flow.result().is_none());
        assert!(flow.status().is_none());
    }

    #[test]
    fn it_discards_a_failure_from_before_the_toggle() {
        let mut flow = UploadFlow::default();
        flow.select_file(path::Path::new("notes.txt")).unwrap();
        let (_, seq) = flow.begin_upload().unwrap();

        flow.toggle_kind();
        flow.finish_failure(seq, "Error processing chat log.");

        assert!(flow.status().is_none());
        assert_eq!(flow.phase(), UploadPhase::Selected);
    }
}
