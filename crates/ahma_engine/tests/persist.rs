use ahma_engine::{save_download, PersistError};

#[test]
fn saves_bytes_under_the_given_name() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = save_download(dir.path(), "claim_filled.pdf", b"%PDF-1.4").expect("saved");

    assert_eq!(target, dir.path().join("claim_filled.pdf"));
    assert_eq!(std::fs::read(&target).expect("read back"), b"%PDF-1.4");
}

#[test]
fn overwrites_an_earlier_download_of_the_same_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    save_download(dir.path(), "claim.pdf", b"old").expect("first save");
    let target = save_download(dir.path(), "claim.pdf", b"new").expect("second save");

    assert_eq!(std::fs::read(&target).expect("read back"), b"new");
}

#[test]
fn creates_the_download_dir_when_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("downloads");

    let target = save_download(&nested, "claim.pdf", b"%PDF-1.4").expect("saved");
    assert!(target.starts_with(&nested));
}

#[test]
fn rejects_filenames_that_are_not_bare_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    for name in ["../escape.pdf", "nested/claim.pdf", "", ".."] {
        let err = save_download(dir.path(), name, b"x").unwrap_err();
        assert!(matches!(err, PersistError::UnsafeFilename(_)), "{name}: {err:?}");
    }
}
