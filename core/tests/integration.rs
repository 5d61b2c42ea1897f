//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the client and the
//! synchronizer over real HTTP using ureq. Validates that request building,
//! response parsing, and snapshot reconciliation work with the actual server.

use std::net::SocketAddr;

use expense_core::{
    ApiError, Category, ExpenseClient, ExpenseDraft, ExpenseId, HttpMethod, HttpRequest, HttpResponse, Mode,
    ReconcileStrategy, SyncError, Synchronizer, Transport, TransportError, ViewModel,
};
use rust_decimal::Decimal;

/// Executes requests with ureq.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
struct Ureq(ureq::Agent);

impl Ureq {
    fn new() -> Self {
        Ureq(
            ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent(),
        )
    }
}

impl Transport for Ureq {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = &self.0;
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => agent.get(&req.path).call(),
            (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
            (HttpMethod::Post, Some(body)) => {
                agent.post(&req.path).content_type("application/json").send(body.as_bytes())
            }
            (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                agent.put(&req.path).content_type("application/json").send(body.as_bytes())
            }
            (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
        };
        let mut response = result.map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

/// Start a fresh mock server on a random port and return its address.
fn spawn_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn synchronizer(addr: SocketAddr, reconcile: ReconcileStrategy) -> Synchronizer<Ureq> {
    let view = ViewModel::new(ExpenseClient::new(&format!("http://{addr}")), reconcile);
    Synchronizer::new(view, Ureq::new())
}

fn fill(sync: &mut Synchronizer<Ureq>, title: &str, amount: &str, category: Category) {
    let form = sync.view_mut().form_mut();
    form.title = title.to_string();
    form.amount = amount.to_string();
    form.category = category;
}

#[test]
fn client_crud_lifecycle() {
    let addr = spawn_server();
    let client = ExpenseClient::new(&format!("http://{addr}"));
    let transport = Ureq::new();

    // Step 1: list, should be empty.
    let expenses = client
        .parse_list_expenses(transport.execute(client.build_list_expenses()).unwrap())
        .unwrap();
    assert!(expenses.is_empty(), "expected empty list");

    // Step 2: create.
    let draft = ExpenseDraft {
        title: "Coffee".to_string(),
        amount: Decimal::new(450, 2),
        category: Category::Food,
    };
    let req = client.build_create_expense(&draft).unwrap();
    let created = client.parse_create_expense(transport.execute(req).unwrap()).unwrap();
    assert!(created.matches(&draft));
    assert!(created.date_created.is_some());
    let id = created.id;

    // Step 3: full replace.
    let replacement = ExpenseDraft {
        title: "Groceries".to_string(),
        amount: Decimal::new(3075, 2),
        category: Category::Other("Household".to_string()),
    };
    let req = client.build_update_expense(id, &replacement).unwrap();
    let updated = client.parse_update_expense(transport.execute(req).unwrap()).unwrap();
    assert_eq!(updated.id, id);
    assert!(updated.matches(&replacement));

    // Step 4: delete, then delete again.
    let req = client.build_delete_expense(id);
    client.parse_delete_expense(transport.execute(req).unwrap()).unwrap();
    let req = client.build_delete_expense(id);
    let err = client.parse_delete_expense(transport.execute(req).unwrap()).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 5: update after delete.
    let req = client.build_update_expense(id, &replacement).unwrap();
    let err = client.parse_update_expense(transport.execute(req).unwrap()).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
}

#[test]
fn synchronizer_round_trips() {
    for reconcile in [ReconcileStrategy::Refetch, ReconcileStrategy::ApplyReturned] {
        let addr = spawn_server();
        let mut sync = synchronizer(addr, reconcile);
        sync.reload().unwrap();
        assert!(sync.view().snapshot().is_empty());

        // Create: size grows by one and the new record matches the draft.
        fill(&mut sync, "Coffee", "4.50", Category::Food);
        sync.submit().unwrap();
        fill(&mut sync, "Rent", "1200", Category::Rent);
        let expected = sync.view().form().to_draft().unwrap();
        let before = sync.view().snapshot().len();
        sync.submit().unwrap();
        assert_eq!(sync.view().snapshot().len(), before + 1, "{reconcile:?}");
        assert!(sync.view().snapshot().iter().any(|r| r.matches(&expected)));
        assert_eq!(sync.view().total(), Decimal::new(120450, 2));

        // Edit: back to Idle and the reloaded record reflects the change.
        let coffee = sync
            .view()
            .snapshot()
            .iter()
            .find(|r| r.title == "Coffee")
            .unwrap()
            .id;
        sync.begin_edit(coffee).unwrap();
        assert_eq!(sync.view().mode(), Mode::Editing(coffee));
        sync.view_mut().form_mut().title = "Espresso".to_string();
        sync.submit().unwrap();
        assert_eq!(sync.view().mode(), Mode::Idle);
        sync.reload().unwrap();
        assert_eq!(sync.view().record(coffee).unwrap().title, "Espresso");

        // Delete: gone after reload.
        sync.delete(coffee).unwrap();
        sync.reload().unwrap();
        assert!(sync.view().record(coffee).is_none(), "{reconcile:?}");
        assert_eq!(sync.view().snapshot().len(), 1);
    }
}

#[test]
fn update_of_vanished_record_keeps_the_draft() {
    let addr = spawn_server();
    let mut sync = synchronizer(addr, ReconcileStrategy::Refetch);
    fill(&mut sync, "Bus pass", "45", Category::Bills);
    sync.submit().unwrap();
    let id = sync.view().snapshot()[0].id;

    sync.begin_edit(id).unwrap();
    sync.view_mut().form_mut().amount = "50".to_string();

    // Removed behind the form's back.
    let mut other = synchronizer(addr, ReconcileStrategy::Refetch);
    other.delete(id).unwrap();

    let err = sync.submit().unwrap_err();
    assert!(matches!(err, SyncError::Mutation { source: ApiError::NotFound, .. }));
    assert_eq!(sync.view().mode(), Mode::Editing(id));
    assert_eq!(sync.view().form().amount, "50");
    assert!(sync.view_mut().take_notice().is_some());
}

#[test]
fn unreachable_server_raises_the_banner() {
    // Bind then drop to get a port with nothing listening.
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let mut sync = synchronizer(addr, ReconcileStrategy::Refetch);

    let err = sync.reload().unwrap_err();
    assert!(matches!(err, SyncError::Connectivity(ApiError::Transport(_))));
    assert!(!sync.view().connectivity().is_online());

    fill(&mut sync, "Tea", "2", Category::Food);
    assert!(matches!(sync.submit(), Err(SyncError::Mutation { .. })));
    assert_eq!(sync.view().form().title, "Tea");
    assert_eq!(sync.view().record(ExpenseId(1)), None);
}
