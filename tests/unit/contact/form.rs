use std::sync::Mutex;

use chrono::TimeZone as _;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

use super::*;

fn at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn filled() -> ContactForm {
    let mut form = ContactForm::new();
    form.set(Field::Name, "A");
    form.set(Field::Email, "a@x.com");
    form.set(Field::Message, "hi");
    form
}

#[derive(Default)]
struct Recorder {
    fail: bool,
    sent: Mutex<Vec<ContactSubmission>>,
}

impl ContactTransport for Recorder {
    async fn send(&self, submission: &ContactSubmission) -> FolioResult<()> {
        self.sent.lock().unwrap().push(submission.clone());
        if self.fail {
            Err(FolioError::transport("webhook unreachable"))
        } else {
            Ok(())
        }
    }
}

#[test]
fn begin_submit_rejects_re_entry() {
    let mut form = filled();
    let s = form.begin_submit(at()).unwrap();
    assert_eq!(s.name, "A");
    assert_eq!(form.state(), FormState::Submitting);
    assert!(matches!(
        form.begin_submit(at()),
        Err(FolioError::Validation(_))
    ));
}

#[test]
fn edits_are_ignored_while_submitting() {
    let mut form = filled();
    form.begin_submit(at()).unwrap();
    form.set(Field::Name, "B");
    assert_eq!(form.name, "A");
}

#[test]
fn invalid_fields_never_leave_editing() {
    let mut form = ContactForm::new();
    form.set(Field::Name, "A");
    assert!(form.begin_submit(at()).is_err());
    assert_eq!(form.state(), FormState::Editing);
}

#[test]
fn success_clears_fields_and_notifies() {
    let mut form = filled();
    form.begin_submit(at()).unwrap();
    form.finish(&Ok(()));
    assert_eq!(form.state(), FormState::Sent);
    assert!(form.name.is_empty() && form.email.is_empty() && form.message.is_empty());
    let note = form.notification().unwrap();
    assert_eq!(note.kind, NotificationKind::Success);
}

#[test]
fn failure_keeps_fields_for_retry() {
    let mut form = filled();
    form.begin_submit(at()).unwrap();
    form.finish(&Err(FolioError::transport("503")));
    assert_eq!(form.state(), FormState::Failed);
    assert_eq!(form.message, "hi");
    assert_eq!(form.notification().unwrap().kind, NotificationKind::Error);

    // retry is allowed straight away
    form.begin_submit(at()).unwrap();
}

#[test]
fn finish_without_submission_is_ignored() {
    let mut form = filled();
    form.finish(&Ok(()));
    assert_eq!(form.state(), FormState::Editing);
    assert_eq!(form.name, "A");
}

#[tokio::test]
async fn submit_drives_the_transport() {
    let transport = Recorder::default();
    let mut form = filled();
    form.submit(&transport, at()).await.unwrap();
    assert_eq!(form.state(), FormState::Sent);
    assert_eq!(transport.sent.lock().unwrap().len(), 1);

    let failing = Recorder {
        fail: true,
        ..Recorder::default()
    };
    let mut form = filled();
    let err = form.submit(&failing, at()).await.unwrap_err();
    assert!(matches!(err, FolioError::Transport(_)));
    assert_eq!(form.email, "a@x.com");
}

#[tokio::test]
async fn http_transport_posts_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpContactTransport::new(
        format!("{}/api/contact", server.uri()),
        Duration::from_secs(5),
    )
    .unwrap();
    let mut form = filled();
    form.submit(&transport, at()).await.unwrap();
    assert_eq!(form.state(), FormState::Sent);
}

#[tokio::test]
async fn http_transport_maps_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let transport =
        HttpContactTransport::new(format!("{}/api/contact", server.uri()), Duration::from_secs(5))
            .unwrap();
    let mut form = filled();
    let err = form.submit(&transport, at()).await.unwrap_err();
    assert!(matches!(err, FolioError::Transport(_)));
    assert_eq!(form.state(), FormState::Failed);
    assert_eq!(form.name, "A");
}
