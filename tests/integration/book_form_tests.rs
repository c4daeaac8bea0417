//! Book form workflow scenarios against in-process fakes

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::{Notify, Semaphore};
use tokio_test::{assert_err, assert_ok};

use library_admin::{
    models::{Book, BookFormValues, BookPayload, ListQuery},
    services::{
        book_form::{BookForm, BookGateway, FormMode, FormState},
        reference_data::{ReferenceKind, ReferenceSource},
    },
    AppError, AppResult,
};

type CallLog = Arc<Mutex<Vec<String>>>;

struct FakeReferences {
    log: CallLog,
    fail: Option<ReferenceKind>,
    gate: Option<Arc<Semaphore>>,
    author_name: &'static str,
}

impl FakeReferences {
    fn new(log: CallLog) -> Self {
        Self {
            log,
            fail: None,
            gate: None,
            author_name: "Tô Hoài",
        }
    }
}

#[async_trait]
impl ReferenceSource for FakeReferences {
    async fn fetch_reference(&self, kind: ReferenceKind, _query: &ListQuery) -> AppResult<Value> {
        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        self.log.lock().unwrap().push(format!("GET /{}", kind));

        if self.fail == Some(kind) {
            return Err(AppError::Api {
                status: 500,
                message: "Internal Server Error".into(),
            });
        }
        Ok(match kind {
            ReferenceKind::Authors => json!({"data": {"authors": [{"_id": "a1", "name": self.author_name}]}}),
            ReferenceKind::Categories => json!({"data": [{"_id": "c1", "name": "Thiếu nhi"}], "total": 1}),
            ReferenceKind::Publishers => json!([{"_id": "p1", "name": "Kim Đồng"}]),
        })
    }
}

struct FakeGateway {
    log: CallLog,
    book: Option<Value>,
    writes: AtomicUsize,
    gate: Option<Arc<Notify>>,
    fail_writes: bool,
}

impl FakeGateway {
    fn new(log: CallLog) -> Self {
        Self {
            log,
            book: None,
            writes: AtomicUsize::new(0),
            gate: None,
            fail_writes: false,
        }
    }
}

#[async_trait]
impl BookGateway for FakeGateway {
    async fn fetch_book(&self, id: &str) -> AppResult<Book> {
        self.log.lock().unwrap().push(format!("GET /books/{}", id));
        match &self.book {
            Some(book) => Ok(serde_json::from_value(book.clone())?),
            None => Err(AppError::NotFound(format!("/books {}", id))),
        }
    }

    async fn create_book(&self, payload: &BookPayload) -> AppResult<Option<Book>> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.log.lock().unwrap().push(format!("POST /books {}", payload.title));
        if self.fail_writes {
            return Err(AppError::Api {
                status: 500,
                message: "Internal Server Error".into(),
            });
        }
        Ok(None)
    }

    async fn update_book(&self, id: &str, payload: &BookPayload) -> AppResult<Option<Book>> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.log
            .lock()
            .unwrap()
            .push(format!("PUT /books/{} authors={:?}", id, payload.author_id));
        Ok(None)
    }
}

fn fill(values: &mut BookFormValues) {
    values.title = "Dế Mèn phiêu lưu ký".into();
    values.author_ids = vec!["a1".into()];
    values.category_ids = vec!["c1".into()];
    values.publisher_id = "p1".into();
    values.year_published = 1941;
    values.isbn = "978-604-2-00001-1".into();
    values.quantity = 3;
    values.price = 45000.0;
}

fn refresh(log: CallLog) -> impl FnOnce() -> std::pin::Pin<Box<dyn std::future::Future<Output = AppResult<()>> + Send>> {
    move || {
        Box::pin(async move {
            log.lock().unwrap().push("GET /books?page=1".to_string());
            Ok(())
        })
    }
}

#[tokio::test]
async fn test_create_book_round_trip() {
    let log: CallLog = Arc::default();
    let gateway = Arc::new(FakeGateway::new(log.clone()));
    let references = FakeReferences::new(log.clone());

    let form = BookForm::new(gateway.clone(), FormMode::Create).with_current_year(2026);
    assert_ok!(form.open(&references, 100, None).await);
    assert_eq!(form.state(), FormState::Ready);

    let defaults = form.values();
    assert_eq!(defaults.year_published, 2026);
    assert_eq!(defaults.quantity, 1);
    assert_eq!(defaults.price, 0.0);

    assert_ok!(form.edit(fill));
    let outcome = assert_ok!(form.submit(refresh(log.clone())).await);

    assert_eq!(outcome.payload.author_id, vec!["a1"]);
    assert_eq!(form.state(), FormState::Closed);
    assert_eq!(gateway.writes.load(Ordering::SeqCst), 1);

    let calls = log.lock().unwrap().clone();
    assert_eq!(calls.len(), 5);
    assert!(calls[..3].contains(&"GET /authors".to_string()));
    assert!(calls[..3].contains(&"GET /categories".to_string()));
    assert!(calls[..3].contains(&"GET /publishers".to_string()));
    assert_eq!(calls[3], "POST /books Dế Mèn phiêu lưu ký");
    assert_eq!(calls[4], "GET /books?page=1");
}

#[tokio::test]
async fn test_edit_book_with_embedded_authors() {
    let log: CallLog = Arc::default();
    let mut gateway = FakeGateway::new(log.clone());
    gateway.book = Some(json!({
        "_id": "b1",
        "title": "Tắt đèn",
        "author_id": [{"_id": "a1", "name": "X"}],
        "category_id": [{"_id": "c1", "name": "Tiểu thuyết"}],
        "publisher_id": {"_id": "p1", "name": "Kim Đồng"},
        "year_published": 1939,
        "isbn": "978-1",
        "quantity": 2,
        "price": 60000
    }));
    let references = FakeReferences::new(log.clone());

    let form = BookForm::new(Arc::new(gateway), FormMode::Update { id: "b1".into() }).with_current_year(2026);
    assert_ok!(form.open(&references, 100, None).await);

    let values = form.values();
    assert_eq!(values.author_ids, vec!["a1"]);
    assert_eq!(values.category_ids, vec!["c1"]);
    assert_eq!(values.publisher_id, "p1");
    assert_eq!(form.references().authors.label_of("a1"), Some("Tô Hoài"));

    assert_ok!(form.submit(refresh(log.clone())).await);

    let calls = log.lock().unwrap().clone();
    assert!(calls.contains(&"GET /books/b1".to_string()));
    assert!(calls.contains(&"PUT /books/b1 authors=[\"a1\"]".to_string()));
    assert_eq!(calls.last().map(String::as_str), Some("GET /books?page=1"));
}

#[tokio::test]
async fn test_initial_book_skips_detail_fetch() {
    let log: CallLog = Arc::default();
    let gateway = FakeGateway::new(log.clone());
    let references = FakeReferences::new(log.clone());
    let initial: Book = serde_json::from_value(json!({
        "id": 7,
        "title": "Số đỏ",
        "author_id": ["a1"],
        "category_id": ["c1"],
        "publisher_id": "p1"
    }))
    .unwrap();

    let form = BookForm::new(Arc::new(gateway), FormMode::Update { id: "7".into() });
    assert_ok!(form.open(&references, 100, Some(initial)).await);

    assert_eq!(form.values().title, "Số đỏ");
    assert!(!log.lock().unwrap().iter().any(|c| c.starts_with("GET /books/")));
}

#[tokio::test]
async fn test_publisher_load_failure_is_partial() {
    let log: CallLog = Arc::default();
    let gateway = FakeGateway::new(log.clone());
    let mut references = FakeReferences::new(log.clone());
    references.fail = Some(ReferenceKind::Publishers);

    let form = BookForm::new(Arc::new(gateway), FormMode::Create).with_current_year(2026);
    assert_ok!(form.open(&references, 100, None).await);

    let data = form.references();
    assert_eq!(data.authors.items.len(), 1);
    assert_eq!(data.categories.items.len(), 1);
    assert!(data.publishers.items.is_empty());
    assert_eq!(data.publishers.placeholder(), Some("no publishers"));
    assert_eq!(form.warnings(), vec!["Could not load the publisher list".to_string()]);
    assert_eq!(form.state(), FormState::Ready);

    assert_ok!(form.edit(|v| {
        v.title = "Tắt đèn".into();
        v.isbn = "978-2".into();
    }));
    assert_eq!(form.values().isbn, "978-2");
}

#[tokio::test]
async fn test_double_submit_sends_one_request() {
    let log: CallLog = Arc::default();
    let gate = Arc::new(Notify::new());
    let mut gateway = FakeGateway::new(log.clone());
    gateway.gate = Some(gate.clone());
    let gateway = Arc::new(gateway);
    let references = FakeReferences::new(log.clone());

    let form = BookForm::new(gateway.clone(), FormMode::Create).with_current_year(2026);
    assert_ok!(form.open(&references, 100, None).await);
    assert_ok!(form.edit(fill));

    let (first, second) = tokio::join!(form.submit(refresh(log.clone())), async {
        let second = form.submit(refresh(log.clone())).await;
        assert!(form.is_busy());
        gate.notify_one();
        second
    });

    assert_ok!(first);
    assert!(matches!(second, Err(AppError::SubmissionInProgress)));
    assert_eq!(gateway.writes.load(Ordering::SeqCst), 1);
    assert_eq!(form.state(), FormState::Closed);
}

#[tokio::test]
async fn test_close_while_loading_discards_results() {
    let log: CallLog = Arc::default();
    let gate = Arc::new(Semaphore::new(0));
    let gateway = FakeGateway::new(log.clone());
    let mut references = FakeReferences::new(log.clone());
    references.gate = Some(gate.clone());

    let form = BookForm::new(Arc::new(gateway), FormMode::Create);
    let (opened, ()) = tokio::join!(form.open(&references, 100, None), async {
        assert_eq!(form.state(), FormState::LoadingReferenceData);
        form.close();
        gate.add_permits(3);
    });

    assert_ok!(opened);
    assert_eq!(form.state(), FormState::Closed);
    assert!(form.references().authors.items.is_empty());
}

#[tokio::test]
async fn test_close_while_submitting_keeps_form_closed() {
    let log: CallLog = Arc::default();
    let gate = Arc::new(Notify::new());
    let mut gateway = FakeGateway::new(log.clone());
    gateway.gate = Some(gate.clone());
    gateway.fail_writes = true;
    let references = FakeReferences::new(log.clone());

    let form = BookForm::new(Arc::new(gateway), FormMode::Create).with_current_year(2026);
    assert_ok!(form.open(&references, 100, None).await);
    assert_ok!(form.edit(fill));

    let (submitted, ()) = tokio::join!(form.submit(refresh(log.clone())), async {
        assert_eq!(form.state(), FormState::Submitting);
        form.close();
        gate.notify_one();
    });

    let err = assert_err!(submitted);
    assert!(matches!(err, AppError::Api { status: 500, .. }));
    assert_eq!(form.state(), FormState::Closed);
    assert!(form.last_error().is_none());
    assert!(matches!(form.edit(fill), Err(AppError::InvalidState(_))));
}

#[tokio::test]
async fn test_stale_load_does_not_land_on_reopened_form() {
    let log: CallLog = Arc::default();
    let first_gate = Arc::new(Semaphore::new(0));
    let second_gate = Arc::new(Semaphore::new(0));
    let first_done = Arc::new(Notify::new());

    let mut first = FakeReferences::new(log.clone());
    first.gate = Some(first_gate.clone());
    first.author_name = "Stale";
    let mut second = FakeReferences::new(log.clone());
    second.gate = Some(second_gate.clone());
    second.author_name = "Fresh";

    let form = BookForm::new(Arc::new(FakeGateway::new(log.clone())), FormMode::Create);
    let (first_open, second_open) = tokio::join!(
        async {
            let opened = form.open(&first, 100, None).await;
            first_done.notify_one();
            opened
        },
        async {
            form.close();
            let (opened, ()) = tokio::join!(form.open(&second, 100, None), async {
                first_gate.add_permits(3);
                first_done.notified().await;
                assert_eq!(form.state(), FormState::LoadingReferenceData);
                assert!(form.references().authors.items.is_empty());
                second_gate.add_permits(3);
            });
            opened
        }
    );

    assert_ok!(first_open);
    assert_ok!(second_open);
    assert_eq!(form.state(), FormState::Ready);
    assert_eq!(form.references().authors.label_of("a1"), Some("Fresh"));
}

#[tokio::test]
async fn test_missing_book_fails_open() {
    let log: CallLog = Arc::default();
    let gateway = FakeGateway::new(log.clone());
    let references = FakeReferences::new(log.clone());

    let form = BookForm::new(Arc::new(gateway), FormMode::Update { id: "nope".into() });
    let err = assert_err!(form.open(&references, 100, None).await);

    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(form.state(), FormState::Closed);
}
