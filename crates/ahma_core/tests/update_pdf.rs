use std::sync::Once;

use chrono::{DateTime, TimeZone, Utc};

use ahma_core::{
    update, AppState, DownloadOutcome, Effect, Msg, PdfFile, ProcessOutcome, Sender,
    UploadOutcome, DEFAULT_FORM_TYPE, DOWNLOAD_FAILED_NOTICE, DOWNLOAD_MISSING_NOTICE,
    INVALID_FILE_NOTICE, PDF_MEDIA_TYPE, PROCESS_FAILED_NOTICE, UPLOAD_FAILED_NOTICE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(session_logging::initialize_for_tests);
}

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

fn choose_pdf(state: AppState, filename: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::FileChosen {
            filename: filename.to_string(),
            media_type: PDF_MEDIA_TYPE.to_string(),
            bytes: b"%PDF-1.4".to_vec(),
        },
    )
}

#[test]
fn choosing_a_pdf_dispatches_an_upload() {
    init_logging();
    let state = AppState::with_clock(fixed_now);

    let (state, effects) = choose_pdf(state, "claim.pdf");

    assert_eq!(
        effects,
        vec![Effect::UploadPdf {
            filename: "claim.pdf".to_string(),
            bytes: b"%PDF-1.4".to_vec(),
        }]
    );
    assert!(state.view().messages.is_empty());
}

#[test]
fn non_pdf_file_is_rejected_before_any_network_call() {
    init_logging();
    let state = AppState::with_clock(fixed_now);

    let (state, effects) = update(
        state,
        Msg::FileChosen {
            filename: "notes.txt".to_string(),
            media_type: "text/plain".to_string(),
            bytes: vec![1, 2, 3],
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.messages.len(), 1);
    assert_eq!(view.messages[0].content, INVALID_FILE_NOTICE);
}

#[test]
fn accepted_upload_reloads_the_list_and_names_the_file() {
    init_logging();
    let state = AppState::with_clock(fixed_now);

    let (state, effects) = update(
        state,
        Msg::UploadFinished(UploadOutcome::Accepted {
            filename: "claim.pdf".to_string(),
        }),
    );

    assert_eq!(effects, vec![Effect::LoadPdfList]);
    let view = state.view();
    assert_eq!(view.messages.len(), 1);
    assert!(view.messages[0].content.contains("claim.pdf"));
}

#[test]
fn rejected_upload_surfaces_the_server_error() {
    init_logging();
    let state = AppState::with_clock(fixed_now);

    let (state, effects) = update(
        state,
        Msg::UploadFinished(UploadOutcome::Rejected {
            error: "file too large".to_string(),
        }),
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.messages[0].content, "❌ Upload failed: file too large");
}

#[test]
fn failed_upload_surfaces_the_generic_notice() {
    init_logging();
    let state = AppState::with_clock(fixed_now);

    let (state, effects) = update(state, Msg::UploadFinished(UploadOutcome::Failed));

    assert!(effects.is_empty());
    assert_eq!(state.view().messages[0].content, UPLOAD_FAILED_NOTICE);
}

#[test]
fn process_sets_the_guard_and_carries_the_form_type() {
    init_logging();
    let state = AppState::with_clock(fixed_now);

    let (state, effects) = update(
        state,
        Msg::ProcessClicked {
            filename: "claim.pdf".to_string(),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::ProcessPdf {
            filename: "claim.pdf".to_string(),
            form_type: DEFAULT_FORM_TYPE.to_string(),
        }]
    );
    assert!(state.view().processing_pdf);
}

#[test]
fn process_while_guard_held_is_rejected_without_a_request() {
    init_logging();
    let state = AppState::with_clock(fixed_now);
    let (state, _) = update(
        state,
        Msg::ProcessClicked {
            filename: "claim.pdf".to_string(),
        },
    );

    let (state, effects) = update(
        state,
        Msg::ProcessClicked {
            filename: "other.pdf".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert!(state.view().processing_pdf);
    assert!(state.view().messages.is_empty());
}

#[test]
fn processed_outcome_reloads_names_the_file_and_releases_the_guard() {
    init_logging();
    let state = AppState::with_clock(fixed_now);
    let (state, _) = update(
        state,
        Msg::ProcessClicked {
            filename: "claim.pdf".to_string(),
        },
    );

    let (state, effects) = update(
        state,
        Msg::ProcessFinished(ProcessOutcome::Processed {
            filename: "claim_filled.pdf".to_string(),
        }),
    );

    assert_eq!(effects, vec![Effect::LoadPdfList]);
    let view = state.view();
    assert!(!view.processing_pdf);
    assert_eq!(view.messages.len(), 1);
    assert!(view.messages[0].content.contains("claim_filled.pdf"));
}

#[test]
fn guard_is_released_on_every_process_outcome() {
    init_logging();
    for outcome in [
        ProcessOutcome::Rejected {
            error: "unreadable form".to_string(),
        },
        ProcessOutcome::Failed,
    ] {
        let state = AppState::with_clock(fixed_now);
        let (state, _) = update(
            state,
            Msg::ProcessClicked {
                filename: "claim.pdf".to_string(),
            },
        );
        let (state, effects) = update(state, Msg::ProcessFinished(outcome));

        assert!(effects.is_empty());
        let view = state.view();
        assert!(!view.processing_pdf);
        assert_eq!(view.messages.len(), 1);
    }
}

#[test]
fn rejected_and_failed_process_notices_are_distinct() {
    init_logging();
    let state = AppState::with_clock(fixed_now);
    let (state, _) = update(
        state,
        Msg::ProcessFinished(ProcessOutcome::Rejected {
            error: "unknown form".to_string(),
        }),
    );
    let (state, _) = update(state, Msg::ProcessFinished(ProcessOutcome::Failed));

    let view = state.view();
    assert_eq!(view.messages[0].content, "❌ Processing failed: unknown form");
    assert_eq!(view.messages[1].content, PROCESS_FAILED_NOTICE);
}

#[test]
fn fetched_download_saves_without_touching_the_timeline_or_lists() {
    init_logging();
    let state = AppState::with_clock(fixed_now);

    let (state, effects) = update(
        state,
        Msg::DownloadFinished(DownloadOutcome::Fetched {
            filename: "claim_filled.pdf".to_string(),
            bytes: vec![0x25, 0x50, 0x44, 0x46],
        }),
    );

    assert_eq!(
        effects,
        vec![Effect::SaveFile {
            filename: "claim_filled.pdf".to_string(),
            bytes: vec![0x25, 0x50, 0x44, 0x46],
        }]
    );
    assert!(state.view().messages.is_empty());
}

#[test]
fn missing_download_appends_exactly_one_notice_and_no_save() {
    init_logging();
    let state = AppState::with_clock(fixed_now);

    let (state, effects) = update(state, Msg::DownloadFinished(DownloadOutcome::Missing));

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.messages.len(), 1);
    assert_eq!(view.messages[0].content, DOWNLOAD_MISSING_NOTICE);
    assert_eq!(view.messages[0].sender, Sender::Assistant);
}

#[test]
fn failed_download_appends_the_generic_notice() {
    init_logging();
    let state = AppState::with_clock(fixed_now);

    let (state, effects) = update(state, Msg::DownloadFinished(DownloadOutcome::Failed));

    assert!(effects.is_empty());
    assert_eq!(state.view().messages[0].content, DOWNLOAD_FAILED_NOTICE);
}

#[test]
fn pdf_lists_are_replaced_wholesale() {
    init_logging();
    let state = AppState::with_clock(fixed_now);
    let (state, _) = update(
        state,
        Msg::PdfListLoaded {
            uploaded: vec![PdfFile {
                filename: "claim.pdf".to_string(),
                size: 12595,
            }],
            processed: vec![PdfFile {
                filename: "claim_filled.pdf".to_string(),
                size: 20480,
            }],
        },
    );

    let view = state.view();
    assert_eq!(view.uploaded_files.len(), 1);
    assert_eq!(view.uploaded_files[0].filename, "claim.pdf");
    assert_eq!(view.uploaded_files[0].size_label, "(12.3 KB)");
    assert_eq!(view.processed_files[0].filename, "claim_filled.pdf");

    // A failed reload arrives as two empty lists; nothing stale survives.
    let (state, _) = update(
        state,
        Msg::PdfListLoaded {
            uploaded: Vec::new(),
            processed: Vec::new(),
        },
    );
    let view = state.view();
    assert!(view.uploaded_files.is_empty());
    assert!(view.processed_files.is_empty());
}
