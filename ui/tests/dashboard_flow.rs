//! End-to-end dashboard flow against a scripted service.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::executor::block_on;

use ui::dedup::{
    difficulty_histogram, per_source_histogram, serialize_coverage, submit, summarize,
    DashboardSession, Difficulty, SelectedFile, ServiceResponse, SubmitRejection, UploadError,
    UploadPhase, UploadTransport, ViewMode,
};

const RESPONSE: &str = r#"{
    "total_questions": 3,
    "total_clusters": 2,
    "reduced_questions": 2,
    "reduction_percent": 33.33,
    "clusters": [
        {
            "cluster_confidence": 0.9,
            "canonical_question": {
                "question": "Define entropy.",
                "difficulty": "Easy",
                "source_pdf": "2019.pdf"
            },
            "questions": [
                { "question": "Define entropy.", "difficulty": "Easy", "source_pdf": "2019.pdf", "similarity": 1.0 },
                { "question": "What is entropy?", "difficulty": "Easy", "source_pdf": "2020.pdf", "similarity": 0.93 }
            ]
        },
        {
            "cluster_confidence": 1.0,
            "canonical_question": {
                "question": "State Newton's second law, \"F = ma\".",
                "difficulty": "Medium",
                "source_pdf": "2020.pdf"
            },
            "questions": [
                { "question": "State Newton's second law, \"F = ma\".", "difficulty": "Medium", "source_pdf": "2020.pdf", "similarity": 1.0 }
            ]
        }
    ],
    "minimal_coverage_set": [
        { "question": "Define entropy.", "difficulty": "Easy", "source_pdf": "2019.pdf", "cluster_confidence": 0.9 },
        { "question": "State Newton's second law, \"F = ma\".", "difficulty": "Medium", "source_pdf": "2020.pdf", "cluster_confidence": 1.0 }
    ]
}"#;

struct Scripted {
    replies: RefCell<Vec<Result<ServiceResponse, UploadError>>>,
    calls: Cell<usize>,
}

impl Scripted {
    fn new(mut replies: Vec<Result<ServiceResponse, UploadError>>) -> Self {
        replies.reverse();
        Self {
            replies: RefCell::new(replies),
            calls: Cell::new(0),
        }
    }
}

impl UploadTransport for Scripted {
    async fn upload(&self, files: &[SelectedFile]) -> Result<ServiceResponse, UploadError> {
        assert!(!files.is_empty(), "transport called without files");
        self.calls.set(self.calls.get() + 1);
        self.replies
            .borrow_mut()
            .pop()
            .unwrap_or_else(|| Err(UploadError::Transport("no scripted reply".into())))
    }
}

fn papers() -> Vec<SelectedFile> {
    vec![
        SelectedFile::new("2019.pdf", b"%PDF-1.4".to_vec()),
        SelectedFile::new("2020.pdf", b"%PDF-1.4".to_vec()),
    ]
}

fn ok() -> Result<ServiceResponse, UploadError> {
    Ok(ServiceResponse {
        status: 200,
        body: RESPONSE.to_string(),
    })
}

#[test]
fn upload_then_explore_then_export() {
    let mut cell = Rc::new(RefCell::new(DashboardSession::new()));
    let transport = Scripted::new(vec![ok()]);

    block_on(submit(&mut cell, &transport, papers())).expect("upload accepted");
    assert_eq!(transport.calls.get(), 1);

    let mut session = cell.borrow_mut();
    assert_eq!(session.phase(), &UploadPhase::Success);
    let result = session.result().expect("result installed").clone();

    let summary = summarize(&result);
    assert_eq!(summary.total_questions, 3);
    assert_eq!(summary.duplicate_clusters, 1);
    assert_eq!(summary.instance_count, 3);

    let difficulty: Vec<(Difficulty, usize)> = difficulty_histogram(Some(&result))
        .into_iter()
        .map(|entry| (entry.difficulty, entry.count))
        .collect();
    assert_eq!(
        difficulty,
        [(Difficulty::Easy, 2), (Difficulty::Medium, 1), (Difficulty::Hard, 0)]
    );

    let sources: Vec<(String, usize)> = per_source_histogram(Some(&result))
        .into_iter()
        .map(|entry| (entry.source, entry.count))
        .collect();
    assert_eq!(sources, [("2019.pdf".to_string(), 1), ("2020.pdf".to_string(), 2)]);

    assert_eq!(session.toggle_cluster(0), Some(true));
    assert_eq!(session.toggle_cluster(2), None);
    assert!(session.select_view(ViewMode::Coverage));

    let csv = serialize_coverage(Some(result.coverage_set.as_slice())).expect("coverage exports");
    assert_eq!(
        csv.contents,
        "Question,Difficulty,Source PDF,Cluster Confidence\n\
         \"Define entropy.\",Easy,2019.pdf,0.9\n\
         \"State Newton's second law, \"\"F = ma\"\".\",Medium,2020.pdf,1"
    );
}

#[test]
fn failure_then_retry_recovers() {
    let mut cell = Rc::new(RefCell::new(DashboardSession::new()));
    let transport = Scripted::new(vec![
        Ok(ServiceResponse {
            status: 500,
            body: r#"{"detail": "Embedding model unavailable"}"#.into(),
        }),
        ok(),
    ]);

    block_on(submit(&mut cell, &transport, papers())).expect("first attempt starts");
    assert_eq!(
        cell.borrow().error().map(ToString::to_string).as_deref(),
        Some("Embedding model unavailable")
    );
    assert!(cell.borrow().result().is_none());

    block_on(submit(&mut cell, &transport, papers())).expect("retry starts");
    let session = cell.borrow();
    assert!(session.error().is_none());
    assert_eq!(session.installed().map(|installed| installed.attempt), Some(2));
    assert_eq!(session.view_mode(), ViewMode::Clusters);
    assert!(session.expansion().is_empty());
}

#[test]
fn empty_selection_is_rejected_before_the_network() {
    let mut cell = Rc::new(RefCell::new(DashboardSession::new()));
    let transport = Scripted::new(vec![ok()]);

    let outcome = block_on(submit(&mut cell, &transport, Vec::new()));
    assert_eq!(outcome, Err(SubmitRejection::Invalid(UploadError::NoFiles)));
    assert_eq!(transport.calls.get(), 0);
    assert_eq!(
        cell.borrow().error().map(ToString::to_string).as_deref(),
        Some("Please select at least one PDF file")
    );
}
