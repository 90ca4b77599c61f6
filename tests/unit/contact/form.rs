use super::*;
use crate::contact::relay::{RecordingTransport, RelayConfig};

fn relay() -> RelayConfig {
    RelayConfig {
        service_id: "s".into(),
        template_id: "t".into(),
        public_key: "k".into(),
    }
}

fn filled() -> ContactForm {
    let mut f = ContactForm::new();
    f.set_field(FormField::Name, "Ada");
    f.set_field(FormField::Email, "ada@example.com");
    f.set_field(FormField::Subject, "Hi");
    f.set_field(FormField::Message, "Hello");
    f
}

#[test]
fn failing_transport_shows_error_then_idles_after_five_seconds() {
    let mut form = filled();
    let mut transport = RecordingTransport::failing(relay(), "relay unreachable");
    assert_eq!(form.status(), FormStatus::Idle);

    let request = form.begin_submit().unwrap();
    assert_eq!(form.status(), FormStatus::Submitting);
    form.complete(transport.send(&request));
    assert_eq!(form.status(), FormStatus::Error);
    assert!(form.last_error().unwrap().contains("relay unreachable"));
    assert_eq!(form.draft().name, "Ada", "draft kept for another attempt");

    form.advance(4.999);
    assert_eq!(form.status(), FormStatus::Error);
    form.advance(0.001);
    assert_eq!(form.status(), FormStatus::Idle);
}

#[test]
fn success_clears_the_draft() {
    let mut form = filled();
    let mut transport = RecordingTransport::new(relay());
    assert_eq!(form.submit(&mut transport), FormStatus::Success);
    assert_eq!(transport.sent.len(), 1);
    assert_eq!(form.draft(), &ContactRequest::default());

    for _ in 0..300 {
        form.advance(1.0 / 60.0);
    }
    assert_eq!(form.status(), FormStatus::Idle);
}

#[test]
fn invalid_draft_ends_in_error_without_sending() {
    let mut form = ContactForm::new();
    let mut transport = RecordingTransport::new(relay());
    assert_eq!(form.submit(&mut transport), FormStatus::Error);
    assert!(transport.sent.is_empty());
}

#[test]
fn no_second_submission_while_in_flight() {
    let mut form = filled();
    assert!(form.begin_submit().is_some());
    assert!(form.begin_submit().is_none());
    let mut transport = RecordingTransport::new(relay());
    assert_eq!(form.submit(&mut transport), FormStatus::Submitting);
    assert!(transport.sent.is_empty());
}

#[test]
fn completion_without_submission_is_ignored() {
    let mut form = filled();
    form.complete(Ok(()));
    assert_eq!(form.status(), FormStatus::Idle);
    form.advance(10.0);
    assert_eq!(form.status(), FormStatus::Idle);
}
