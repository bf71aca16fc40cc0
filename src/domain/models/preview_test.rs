use super::ImagePreview;

#[test]
fn it_writes_bytes_to_a_scoped_file() {
    let preview = ImagePreview::new(1, b"not really an image").unwrap();

    assert!(preview.path().exists());
    assert_eq!(preview.byte_len(), 19);
    assert_eq!(std::fs::read(preview.path()).unwrap(), b"not really an image");
}

#[test]
fn it_removes_the_file_on_drop() {
    let preview = ImagePreview::new(2, b"bytes").unwrap();
    let path = preview.path().to_path_buf();

    drop(preview);
    assert!(!path.exists());
}

#[test]
fn it_does_not_leak_across_repeated_open_close_cycles() {
    let mut paths = vec![];
    for _ in 0..5 {
        let preview = ImagePreview::new(3, b"bytes").unwrap();
        paths.push(preview.path().to_path_buf());
    }

    for path in paths {
        assert!(!path.exists());
    }
}
