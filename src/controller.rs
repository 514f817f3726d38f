use log::{error, info, warn};

use crate::api::InventoryApi;
use crate::error::ApiError;
use crate::events::{EventBindings, UiEvent};
use crate::form::RecordForm;
use crate::models::InventoryRecord;
use crate::notify::Severity;
use crate::render::render_table;
use crate::view::{Modal, PageView};

const CONNECTION_ERROR: &str = "Error de conexión";

/// Drives the inventory page. Handlers take `&mut self`, so one controller
/// runs one handler at a time; none of them return errors to the caller.
pub struct InventoryController<A, V> {
    api: A,
    view: V,
    records: Vec<InventoryRecord>,
    editing_id: Option<i64>,
    pending_delete: Option<i64>,
    bindings: EventBindings,
}

impl<A: InventoryApi, V: PageView> InventoryController<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self {
            api,
            view,
            records: Vec::new(),
            editing_id: None,
            pending_delete: None,
            bindings: EventBindings::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Last successfully fetched list.
    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.editing_id
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    pub fn bindings(&self) -> &EventBindings {
        &self.bindings
    }

    pub async fn dispatch(&mut self, event: UiEvent) {
        match event {
            UiEvent::PageReady => self.page_ready().await,
            UiEvent::Search => self.search().await,
            UiEvent::ClearSearch => self.clear_search().await,
            UiEvent::OpenCreate => self.open_create_form(),
            UiEvent::Edit(id) => self.open_edit_form(id).await,
            UiEvent::RequestDelete(id) => self.request_delete(id),
            UiEvent::ConfirmDelete => self.confirm_delete().await,
            UiEvent::Submit => self.submit_form().await,
            UiEvent::ShowStatistics => self.show_statistics().await,
            UiEvent::ShowLowStock => self.show_low_stock().await,
        }
    }

    /// Dispatches whatever is bound to `key`. Returns false for unbound keys.
    pub async fn click(&mut self, key: &str) -> bool {
        match self.bindings.resolve(key) {
            Some(event) => {
                self.dispatch(event).await;
                true
            }
            None => {
                warn!("Control sin acción asociada: {}", key);
                false
            }
        }
    }

    pub async fn page_ready(&mut self) {
        info!("Página lista, cargando inventario");
        self.load_all().await;
    }

    pub async fn load_all(&mut self) {
        match self.api.list().await {
            Ok(records) => {
                info!("Cargados {} computadores", records.len());
                self.replace_records(records);
            }
            Err(e) => self.report_error(&e, "Error al cargar los computadores"),
        }
    }

    pub async fn search(&mut self) {
        let Some(criteria) = self.view.search_form().criteria() else {
            self.notify(
                "Por favor ingresa al menos un criterio de búsqueda",
                Severity::Warning,
            );
            return;
        };

        info!("Buscando computadores: {:?}", criteria);
        match self.api.search(&criteria).await {
            Ok(records) => {
                let found = records.len();
                self.replace_records(records);
                self.notify(
                    &format!("Se encontraron {} computadores", found),
                    Severity::Success,
                );
            }
            Err(e) => self.report_error(&e, "Error en la búsqueda"),
        }
    }

    /// Renders the current list and rebinds the row controls.
    pub fn render_table(&mut self) {
        let body = render_table(&self.records);
        self.bindings = EventBindings::for_table(&body);
        self.view.show_table(&body);
    }

    pub fn open_create_form(&mut self) {
        self.editing_id = None;
        self.view.set_record_form(RecordForm::default());
        self.view.set_editor_title("Nuevo Computador");
        self.view.open_modal(Modal::RecordEditor);
    }

    pub async fn open_edit_form(&mut self, id: i64) {
        match self.api.get(id).await {
            Ok(record) => {
                self.view.set_record_form(RecordForm::from_record(&record));
                self.editing_id = Some(record.id);
                self.view.set_editor_title("Editar Computador");
                self.view.open_modal(Modal::RecordEditor);
            }
            Err(e) => self.report_error(&e, "Error al cargar el computador"),
        }
    }

    pub async fn submit_form(&mut self) {
        let payload = match self.view.record_form().validate() {
            Ok(payload) => payload,
            Err(errors) => {
                warn!("Formulario inválido: {} errores", errors.len());
                self.view.report_validity(&errors);
                return;
            }
        };

        let result = match self.editing_id {
            Some(id) => {
                info!("Actualizando computador {}", id);
                self.api.update(id, &payload).await
            }
            None => {
                info!("Creando computador {} {}", payload.brand, payload.model);
                self.api.create(&payload).await
            }
        };

        match result {
            Ok(_) => {
                self.view.close_modal(Modal::RecordEditor);
                let message = if self.editing_id.is_some() {
                    "Computador actualizado exitosamente"
                } else {
                    "Computador creado exitosamente"
                };
                self.notify(message, Severity::Success);
                self.load_all().await;
            }
            Err(e) if e.is_status() => {
                error!("Error guardando computador: {}", e);
                let message = e
                    .server_message()
                    .unwrap_or("Error al guardar el computador")
                    .to_string();
                self.notify(&message, Severity::Danger);
            }
            Err(e) => {
                error!("Error: {}", e);
                self.notify(CONNECTION_ERROR, Severity::Danger);
            }
        }
    }

    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
        self.view.open_modal(Modal::DeleteConfirmation);
    }

    /// No-op without a pending id. The pending id is taken up front, so it is
    /// gone whatever the outcome.
    pub async fn confirm_delete(&mut self) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };

        info!("Eliminando computador {}", id);
        match self.api.delete(id).await {
            Ok(()) => {
                self.view.close_modal(Modal::DeleteConfirmation);
                self.notify("Computador eliminado exitosamente", Severity::Success);
                self.load_all().await;
            }
            Err(e) => self.report_error(&e, "Error al eliminar el computador"),
        }
    }

    pub fn notify(&mut self, message: &str, severity: Severity) {
        self.view.notify(message, severity);
    }

    pub async fn clear_search(&mut self) {
        self.view.clear_search_form();
        self.load_all().await;
    }

    pub async fn show_statistics(&mut self) {
        match self.api.statistics().await {
            Ok(stats) => self.notify(
                &format!(
                    "Total de computadores: {}. Con stock bajo: {}",
                    stats.total, stats.low_stock
                ),
                Severity::Info,
            ),
            Err(e) => self.report_error(&e, "Error al cargar las estadísticas"),
        }
    }

    pub async fn show_low_stock(&mut self) {
        match self.api.low_stock().await {
            Ok(records) => {
                let found = records.len();
                self.replace_records(records);
                self.notify(
                    &format!("{} computadores con stock bajo", found),
                    Severity::Warning,
                );
            }
            Err(e) => self.report_error(&e, "Error al cargar los computadores"),
        }
    }

    fn replace_records(&mut self, records: Vec<InventoryRecord>) {
        self.records = records;
        self.render_table();
    }

    /// Generic message for HTTP failures, connection message for the rest.
    fn report_error(&mut self, err: &ApiError, message: &str) {
        error!("Error: {}", err);
        if err.is_status() {
            self.notify(message, Severity::Danger);
        } else {
            self.notify(CONNECTION_ERROR, Severity::Danger);
        }
    }
}
