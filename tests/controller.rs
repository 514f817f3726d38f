//! Controller behaviour against an in-memory API.

use std::cell::RefCell;
use std::collections::VecDeque;

use inventory_admin::form::{FormField, RecordForm, Violation};
use inventory_admin::{
    ApiError, HtmlPage, InventoryApi, InventoryController, InventoryRecord, Modal, RecordPayload,
    SearchCriteria, Severity, Statistics, UiEvent,
};
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    List,
    Search(SearchCriteria),
    Get(i64),
    Create(RecordPayload),
    Update(i64, RecordPayload),
    Delete(i64),
    Statistics,
    LowStock,
}

#[derive(Default)]
struct FakeApi {
    store: RefCell<Vec<InventoryRecord>>,
    calls: RefCell<Vec<Call>>,
    failures: RefCell<VecDeque<ApiError>>,
}

impl FakeApi {
    fn with(records: Vec<InventoryRecord>) -> Self {
        let api = FakeApi::default();
        *api.store.borrow_mut() = records;
        api
    }

    fn fail_next(&self, err: ApiError) {
        self.failures.borrow_mut().push_back(err);
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        match self.failures.borrow_mut().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn not_found(id: i64) -> ApiError {
        ApiError::Status {
            status: 404,
            message: Some(format!("Computador no encontrado con ID: {}", id)),
        }
    }
}

impl InventoryApi for FakeApi {
    async fn list(&self) -> Result<Vec<InventoryRecord>, ApiError> {
        self.record(Call::List)?;
        Ok(self.store.borrow().clone())
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<InventoryRecord>, ApiError> {
        self.record(Call::Search(criteria.clone()))?;
        let contains = |field: &str, needle: &Option<String>| {
            needle
                .as_ref()
                .map_or(true, |n| field.to_lowercase().contains(&n.to_lowercase()))
        };
        Ok(self
            .store
            .borrow()
            .iter()
            .filter(|r| contains(&r.brand, &criteria.brand))
            .filter(|r| contains(&r.model, &criteria.model))
            .filter(|r| {
                criteria
                    .max_price
                    .map_or(true, |max| r.price <= Decimal::try_from(max).unwrap_or_default())
            })
            .cloned()
            .collect())
    }

    async fn get(&self, id: i64) -> Result<InventoryRecord, ApiError> {
        self.record(Call::Get(id))?;
        self.store
            .borrow()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, payload: &RecordPayload) -> Result<Option<InventoryRecord>, ApiError> {
        self.record(Call::Create(payload.clone()))?;
        let mut store = self.store.borrow_mut();
        let id = store.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let created = from_payload(id, payload);
        store.push(created.clone());
        Ok(Some(created))
    }

    async fn update(
        &self,
        id: i64,
        payload: &RecordPayload,
    ) -> Result<Option<InventoryRecord>, ApiError> {
        self.record(Call::Update(id, payload.clone()))?;
        let mut store = self.store.borrow_mut();
        let slot = store
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        *slot = from_payload(id, payload);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.record(Call::Delete(id))?;
        let mut store = self.store.borrow_mut();
        let before = store.len();
        store.retain(|r| r.id != id);
        if store.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    async fn statistics(&self) -> Result<Statistics, ApiError> {
        self.record(Call::Statistics)?;
        let store = self.store.borrow();
        Ok(Statistics {
            total: store.len() as i64,
            low_stock: store.iter().filter(|r| r.stock < 5).count() as i64,
        })
    }

    async fn low_stock(&self) -> Result<Vec<InventoryRecord>, ApiError> {
        self.record(Call::LowStock)?;
        Ok(self
            .store
            .borrow()
            .iter()
            .filter(|r| r.stock < 5)
            .cloned()
            .collect())
    }
}

fn from_payload(id: i64, payload: &RecordPayload) -> InventoryRecord {
    InventoryRecord {
        id,
        brand: payload.brand.clone(),
        model: payload.model.clone(),
        processor: payload.processor.clone(),
        ram: payload.ram.clone(),
        storage: payload.storage.clone(),
        price: payload.price,
        stock: payload.stock,
        created_at: Some("2024-05-01T09:00:00".into()),
    }
}

fn computer(id: i64, brand: &str, model: &str, price: i64, stock: i32) -> InventoryRecord {
    InventoryRecord {
        id,
        brand: brand.into(),
        model: model.into(),
        processor: "Intel Core i7".into(),
        ram: "16GB".into(),
        storage: "512GB SSD".into(),
        price: Decimal::from(price),
        stock,
        created_at: Some("2024-01-15T10:30:00".into()),
    }
}

fn inventory() -> Vec<InventoryRecord> {
    vec![
        computer(1, "Dell", "XPS", 2_500_000, 3),
        computer(2, "HP", "Pavilion", 1_200, 8),
        computer(3, "Lenovo", "ThinkPad", 4_000_000, 15),
    ]
}

fn controller(records: Vec<InventoryRecord>) -> InventoryController<FakeApi, HtmlPage> {
    InventoryController::new(FakeApi::with(records), HtmlPage::new())
}

fn notifications(c: &InventoryController<FakeApi, HtmlPage>) -> Vec<(String, Severity)> {
    c.view()
        .notifications()
        .live()
        .into_iter()
        .map(|n| (n.message, n.severity))
        .collect()
}

fn filled_form() -> RecordForm {
    RecordForm {
        brand: "Asus".into(),
        model: "Zenbook 14".into(),
        processor: "Ryzen 7".into(),
        ram: "16GB".into(),
        storage: "1TB SSD".into(),
        price: "3200000".into(),
        stock: "4".into(),
    }
}

#[tokio::test]
async fn page_ready_renders_the_collection() {
    let mut c = controller(vec![computer(1, "Dell", "XPS", 2_500_000, 3)]);
    c.dispatch(UiEvent::PageReady).await;

    assert_eq!(c.api().calls(), vec![Call::List]);
    assert_eq!(c.records().len(), 1);
    assert_eq!(c.view().table().row_count(), 1);

    let html = c.view().to_html();
    assert!(html.contains("<span class=\"badge bg-danger\">3</span>"));
    assert!(html.contains("$2.500.000 COP"));
    assert!(html.contains("15/1/2024"));
    assert!(notifications(&c).is_empty());
}

#[tokio::test]
async fn empty_collection_renders_placeholder() {
    let mut c = controller(Vec::new());
    c.load_all().await;

    assert_eq!(c.view().table().row_count(), 1);
    assert!(c.view().table().rows().is_empty());
    assert!(c.view().to_html().contains("No se encontraron computadores"));
}

#[tokio::test]
async fn failed_reload_keeps_current_table() {
    let mut c = controller(inventory());
    c.load_all().await;

    c.api().fail_next(ApiError::Status {
        status: 500,
        message: None,
    });
    c.load_all().await;

    assert_eq!(c.view().table().row_count(), 3);
    assert_eq!(c.records().len(), 3);
    assert_eq!(
        notifications(&c),
        vec![("Error al cargar los computadores".to_string(), Severity::Danger)]
    );
}

#[tokio::test]
async fn transport_failure_reports_connection_error() {
    let mut c = controller(inventory());
    c.api()
        .fail_next(ApiError::Transport("connection refused".into()));
    c.load_all().await;

    assert!(c.records().is_empty());
    assert_eq!(
        notifications(&c),
        vec![("Error de conexión".to_string(), Severity::Danger)]
    );
}

#[tokio::test]
async fn search_without_criteria_makes_no_request() {
    let mut c = controller(inventory());
    c.view_mut().search_form_mut().brand = "   ".into();
    c.search().await;

    assert!(c.api().calls().is_empty());
    assert_eq!(
        notifications(&c),
        vec![(
            "Por favor ingresa al menos un criterio de búsqueda".to_string(),
            Severity::Warning
        )]
    );
}

#[tokio::test]
async fn search_by_max_price_only() {
    let mut c = controller(inventory());
    c.load_all().await;
    c.view_mut().search_form_mut().max_price = "1500".into();
    c.dispatch(UiEvent::Search).await;

    assert_eq!(
        c.api().calls()[1],
        Call::Search(SearchCriteria {
            brand: None,
            model: None,
            max_price: Some(1500.0),
        })
    );
    let ids: Vec<i64> = c.records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![2]);
    assert_eq!(c.view().table().row_count(), 1);
    assert_eq!(
        notifications(&c),
        vec![("Se encontraron 1 computadores".to_string(), Severity::Success)]
    );
}

#[tokio::test]
async fn failed_search_leaves_table_untouched() {
    let mut c = controller(inventory());
    c.load_all().await;
    c.view_mut().search_form_mut().brand = "Dell".into();
    c.api().fail_next(ApiError::Status {
        status: 500,
        message: None,
    });
    c.search().await;

    assert_eq!(c.view().table().row_count(), 3);
    assert_eq!(
        notifications(&c),
        vec![("Error en la búsqueda".to_string(), Severity::Danger)]
    );
}

#[tokio::test]
async fn clear_search_resets_inputs_and_reloads() {
    let mut c = controller(inventory());
    c.view_mut().search_form_mut().brand = "Dell".into();
    c.search().await;
    assert_eq!(c.records().len(), 1);

    c.dispatch(UiEvent::ClearSearch).await;

    assert_eq!(c.view_mut().search_form_mut().brand, "");
    assert_eq!(c.records().len(), 3);
    assert_eq!(c.api().calls().last(), Some(&Call::List));
}

#[tokio::test]
async fn create_form_starts_empty() {
    let mut c = controller(inventory());
    *c.view_mut().record_form_mut() = filled_form();
    c.open_create_form();

    assert_eq!(c.editing_id(), None);
    assert_eq!(c.view_mut().record_form_mut().clone(), RecordForm::default());
    assert_eq!(c.view().editor_title(), "Nuevo Computador");
    assert!(c.view().is_open(Modal::RecordEditor));
    assert!(c.api().calls().is_empty());
}

#[tokio::test]
async fn submit_without_identifier_creates() {
    let mut c = controller(inventory());
    c.dispatch(UiEvent::OpenCreate).await;
    *c.view_mut().record_form_mut() = filled_form();
    c.dispatch(UiEvent::Submit).await;

    let calls = c.api().calls();
    match &calls[0] {
        Call::Create(payload) => {
            assert_eq!(payload.brand, "Asus");
            assert_eq!(payload.price, Decimal::from(3_200_000));
            assert_eq!(payload.stock, 4);
        }
        other => panic!("expected create, got {:?}", other),
    }
    assert_eq!(calls[1], Call::List);
    assert!(!c.view().is_open(Modal::RecordEditor));
    assert_eq!(c.records().len(), 4);
    assert_eq!(
        notifications(&c),
        vec![("Computador creado exitosamente".to_string(), Severity::Success)]
    );
}

#[tokio::test]
async fn submit_after_edit_updates_that_record() {
    let mut c = controller(inventory());
    c.load_all().await;
    c.open_edit_form(2).await;

    assert_eq!(c.editing_id(), Some(2));
    assert_eq!(c.view().editor_title(), "Editar Computador");
    assert!(c.view().is_open(Modal::RecordEditor));
    assert_eq!(c.view_mut().record_form_mut().model, "Pavilion");

    c.view_mut().record_form_mut().stock = "20".into();
    c.submit_form().await;

    let calls = c.api().calls();
    match &calls[2] {
        Call::Update(id, payload) => {
            assert_eq!(*id, 2);
            assert_eq!(payload.stock, 20);
            assert_eq!(payload.brand, "HP");
        }
        other => panic!("expected update, got {:?}", other),
    }
    assert_eq!(calls[3], Call::List);
    assert!(!c.view().is_open(Modal::RecordEditor));
    assert_eq!(
        notifications(&c),
        vec![(
            "Computador actualizado exitosamente".to_string(),
            Severity::Success
        )]
    );
}

#[tokio::test]
async fn invalid_form_is_reported_in_place() {
    let mut c = controller(inventory());
    c.open_create_form();
    let mut form = filled_form();
    form.brand.clear();
    form.stock = "-2".into();
    *c.view_mut().record_form_mut() = form;
    c.submit_form().await;

    assert!(c.api().calls().is_empty());
    assert!(c.view().is_open(Modal::RecordEditor));
    let fields: Vec<(FormField, Violation)> = c
        .view()
        .validation()
        .iter()
        .map(|e| (e.field, e.violation))
        .collect();
    assert_eq!(
        fields,
        vec![
            (FormField::Brand, Violation::Missing),
            (FormField::Stock, Violation::Negative),
        ]
    );
    assert!(notifications(&c).is_empty());
}

#[tokio::test]
async fn server_rejection_shows_its_message_and_keeps_modal() {
    let mut c = controller(inventory());
    c.open_create_form();
    *c.view_mut().record_form_mut() = filled_form();
    c.api().fail_next(ApiError::Status {
        status: 400,
        message: Some("Ya existe un computador con la marca Asus y modelo Zenbook 14".into()),
    });
    c.submit_form().await;

    assert!(c.view().is_open(Modal::RecordEditor));
    assert_eq!(c.api().calls().len(), 1);
    assert_eq!(
        notifications(&c),
        vec![(
            "Ya existe un computador con la marca Asus y modelo Zenbook 14".to_string(),
            Severity::Danger
        )]
    );
}

#[tokio::test]
async fn server_rejection_without_message_uses_generic_text() {
    let mut c = controller(inventory());
    c.open_create_form();
    *c.view_mut().record_form_mut() = filled_form();
    c.api().fail_next(ApiError::Status {
        status: 500,
        message: None,
    });
    c.submit_form().await;

    assert!(c.view().is_open(Modal::RecordEditor));
    assert_eq!(
        notifications(&c),
        vec![("Error al guardar el computador".to_string(), Severity::Danger)]
    );
}

#[tokio::test]
async fn failed_edit_fetch_keeps_modal_closed() {
    let mut c = controller(inventory());
    c.open_edit_form(99).await;

    assert!(!c.view().is_open(Modal::RecordEditor));
    assert_eq!(c.editing_id(), None);
    assert_eq!(
        notifications(&c),
        vec![("Error al cargar el computador".to_string(), Severity::Danger)]
    );
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let mut c = controller(inventory());
    c.load_all().await;
    assert!(c.click("delete-3").await);

    assert_eq!(c.pending_delete(), Some(3));
    assert!(c.view().is_open(Modal::DeleteConfirmation));
    assert_eq!(c.api().calls(), vec![Call::List]);

    assert!(c.click("confirm-delete").await);

    assert_eq!(c.api().calls(), vec![Call::List, Call::Delete(3), Call::List]);
    assert_eq!(c.pending_delete(), None);
    assert!(!c.view().is_open(Modal::DeleteConfirmation));
    assert_eq!(c.view().table().row_count(), 2);
    assert_eq!(
        notifications(&c),
        vec![(
            "Computador eliminado exitosamente".to_string(),
            Severity::Success
        )]
    );
}

#[tokio::test]
async fn failed_delete_still_clears_pending_identifier() {
    let mut c = controller(inventory());
    c.request_delete(1);
    c.api().fail_next(ApiError::Status {
        status: 404,
        message: None,
    });
    c.confirm_delete().await;

    assert_eq!(c.pending_delete(), None);
    assert!(c.view().is_open(Modal::DeleteConfirmation));
    assert_eq!(
        notifications(&c),
        vec![("Error al eliminar el computador".to_string(), Severity::Danger)]
    );

    c.request_delete(2);
    c.api().fail_next(ApiError::Transport("reset by peer".into()));
    c.confirm_delete().await;
    assert_eq!(c.pending_delete(), None);
}

#[tokio::test]
async fn confirm_without_pending_identifier_is_noop() {
    let mut c = controller(inventory());
    c.confirm_delete().await;

    assert!(c.api().calls().is_empty());
    assert!(notifications(&c).is_empty());
}

#[tokio::test]
async fn row_bindings_follow_the_rendered_table() {
    let mut c = controller(inventory());
    assert!(!c.click("edit-1").await);

    c.load_all().await;
    assert!(c.click("edit-1").await);
    assert_eq!(c.api().calls().last(), Some(&Call::Get(1)));
    assert!(c.view().is_open(Modal::RecordEditor));

    c.view_mut().search_form_mut().brand = "Lenovo".into();
    c.search().await;
    assert!(!c.click("edit-1").await);
    assert!(c.click("edit-3").await);
}

#[tokio::test]
async fn statistics_and_low_stock() {
    let mut c = controller(inventory());
    c.dispatch(UiEvent::ShowStatistics).await;
    c.dispatch(UiEvent::ShowLowStock).await;

    assert_eq!(c.api().calls(), vec![Call::Statistics, Call::LowStock]);
    let ids: Vec<i64> = c.records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1]);
    assert_eq!(
        notifications(&c),
        vec![
            (
                "Total de computadores: 3. Con stock bajo: 1".to_string(),
                Severity::Info
            ),
            ("1 computadores con stock bajo".to_string(), Severity::Warning),
        ]
    );
}
