//! Page adapter: the document the controller reads inputs from and renders into.

use crate::form::{FieldError, RecordForm, SearchForm};
use crate::notify::{NotificationBoard, Severity};
use crate::render::TableBody;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    RecordEditor,
    DeleteConfirmation,
}

pub trait PageView {
    fn show_table(&mut self, body: &TableBody);
    fn notify(&mut self, message: &str, severity: Severity);

    fn search_form(&self) -> SearchForm;
    fn clear_search_form(&mut self);

    fn record_form(&self) -> RecordForm;
    fn set_record_form(&mut self, form: RecordForm);
    /// Show validation messages next to the offending inputs.
    fn report_validity(&mut self, errors: &[FieldError]);

    fn set_editor_title(&mut self, title: &str);
    fn open_modal(&mut self, modal: Modal);
    fn close_modal(&mut self, modal: Modal);
}

/// Headless page. Keeps everything a browser document would and renders the
/// dynamic parts to markup.
#[derive(Debug, Default)]
pub struct HtmlPage {
    table: TableBody,
    search: SearchForm,
    form: RecordForm,
    validation: Vec<FieldError>,
    editor_title: String,
    editor_open: bool,
    delete_open: bool,
    notifications: NotificationBoard,
}

impl HtmlPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> &TableBody {
        &self.table
    }

    pub fn search_form_mut(&mut self) -> &mut SearchForm {
        &mut self.search
    }

    pub fn record_form_mut(&mut self) -> &mut RecordForm {
        &mut self.form
    }

    pub fn validation(&self) -> &[FieldError] {
        &self.validation
    }

    pub fn editor_title(&self) -> &str {
        &self.editor_title
    }

    pub fn is_open(&self, modal: Modal) -> bool {
        match modal {
            Modal::RecordEditor => self.editor_open,
            Modal::DeleteConfirmation => self.delete_open,
        }
    }

    pub fn notifications(&self) -> &NotificationBoard {
        &self.notifications
    }

    pub fn to_html(&self) -> String {
        format!(
            "<div id=\"alerts\">{}</div>\n<table class=\"table\"><tbody id=\"computadoresTable\">{}</tbody></table>\n",
            self.notifications.to_html(),
            self.table.to_html()
        )
    }
}

impl PageView for HtmlPage {
    fn show_table(&mut self, body: &TableBody) {
        self.table = body.clone();
    }

    fn notify(&mut self, message: &str, severity: Severity) {
        self.notifications.push(message, severity);
    }

    fn search_form(&self) -> SearchForm {
        self.search.clone()
    }

    fn clear_search_form(&mut self) {
        self.search = SearchForm::default();
    }

    fn record_form(&self) -> RecordForm {
        self.form.clone()
    }

    fn set_record_form(&mut self, form: RecordForm) {
        self.form = form;
        self.validation.clear();
    }

    fn report_validity(&mut self, errors: &[FieldError]) {
        self.validation = errors.to_vec();
    }

    fn set_editor_title(&mut self, title: &str) {
        self.editor_title = title.to_string();
    }

    fn open_modal(&mut self, modal: Modal) {
        match modal {
            Modal::RecordEditor => self.editor_open = true,
            Modal::DeleteConfirmation => self.delete_open = true,
        }
    }

    fn close_modal(&mut self, modal: Modal) {
        match modal {
            Modal::RecordEditor => self.editor_open = false,
            Modal::DeleteConfirmation => self.delete_open = false,
        }
    }
}
