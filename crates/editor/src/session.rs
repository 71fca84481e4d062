//! Editor session: event handling over the catalog.
//!
//! All state the editor needs lives in [`EditorSession`]. Each [`UserEvent`]
//! runs to completion, then the view is re-projected from scratch.

use serde::Serialize;

use storefront_catalog::{CatalogStore, ImageCandidate, ImageIntake};
use storefront_core::{DomainError, ProductId};
use storefront_view::{CatalogView, ViewProjector};

use crate::config::EditorConfig;
use crate::form::{FormField, FormState, PendingImage};

pub const MSG_UPLOADED: &str = "Product uploaded successfully!";
pub const MSG_INVALID_FORM: &str = "Please fill out all fields correctly";
pub const MSG_EDIT: &str = "Edit the product and resubmit.";
pub const MSG_IMAGE_LOADING: &str = "Image is still loading; the product will be submitted once it is ready.";
pub const ALERT_INVALID_RATING: &str = "Invalid rating value. Please enter a value between 1 and 5.";

/// Everything the user can do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {
    SetField { field: FormField, value: String },
    /// A file was picked; runs intake and starts loading on success.
    SelectImage(ImageCandidate),
    /// The bytes of the accepted image finished loading.
    ImageLoaded { bytes: Vec<u8> },
    Submit,
    SortByName,
    SortByPrice,
    /// Live search text; empty shows the whole catalog.
    Search(String),
    Edit(ProductId),
    RequestDelete(ProductId),
    ConfirmDelete,
    CancelDelete,
    SubmitRating { id: ProductId, raw: String },
}

impl UserEvent {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            UserEvent::SetField { .. } => "set_field",
            UserEvent::SelectImage(_) => "select_image",
            UserEvent::ImageLoaded { .. } => "image_loaded",
            UserEvent::Submit => "submit",
            UserEvent::SortByName => "sort_by_name",
            UserEvent::SortByPrice => "sort_by_price",
            UserEvent::Search(_) => "search",
            UserEvent::Edit(_) => "edit",
            UserEvent::RequestDelete(_) => "request_delete",
            UserEvent::ConfirmDelete => "confirm_delete",
            UserEvent::CancelDelete => "cancel_delete",
            UserEvent::SubmitRating { .. } => "submit_rating",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Error,
    Info,
}

/// Inline status line shown under the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub tone: Tone,
    pub text: String,
}

impl Message {
    fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }
}

#[derive(Debug)]
pub struct EditorSession {
    store: CatalogStore,
    projector: ViewProjector,
    intake: ImageIntake,
    form: FormState,
    search: String,
    pending_delete: Option<ProductId>,
    submit_deferred: bool,
    message: Option<Message>,
    alert: Option<String>,
    view: CatalogView,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl EditorSession {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            store: CatalogStore::new(),
            projector: ViewProjector::new(config.currency.clone()),
            intake: ImageIntake::new(config.max_image_bytes),
            form: FormState::default(),
            search: String::new(),
            pending_delete: None,
            submit_deferred: false,
            message: None,
            alert: None,
            view: CatalogView::default(),
        }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    /// Message produced by the last event, if any.
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Same as [`EditorSession::message`], consumed on read.
    pub fn take_message(&mut self) -> Option<Message> {
        self.message.take()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Product awaiting delete confirmation, if the modal is open.
    pub fn pending_delete(&self) -> Option<ProductId> {
        self.pending_delete
    }

    pub fn delete_modal_open(&self) -> bool {
        self.pending_delete.is_some()
    }

    pub fn submit_deferred(&self) -> bool {
        self.submit_deferred
    }

    /// Blocking alert raised by the last event, consumed on read.
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    pub fn handle(&mut self, event: UserEvent) {
        tracing::debug!(event = event.kind(), "handling event");
        self.message = None;
        match event {
            UserEvent::SetField { field, value } => self.form.set(field, value),
            UserEvent::SelectImage(candidate) => self.select_image(candidate),
            UserEvent::ImageLoaded { bytes } => self.image_loaded(&bytes),
            UserEvent::Submit => self.submit(),
            UserEvent::SortByName => self.store.sort_by_name(),
            UserEvent::SortByPrice => self.store.sort_by_price(),
            UserEvent::Search(text) => self.search = text,
            UserEvent::Edit(id) => self.edit(id),
            UserEvent::RequestDelete(id) => self.pending_delete = Some(id),
            UserEvent::ConfirmDelete => {
                if let Some(id) = self.pending_delete.take() {
                    self.store.remove(id);
                }
            }
            UserEvent::CancelDelete => self.pending_delete = None,
            UserEvent::SubmitRating { id, raw } => self.rate(id, &raw),
        }
        self.render();
    }

    fn render(&mut self) {
        self.view = self.projector.project_store(&self.store, Some(&self.search));
    }

    fn select_image(&mut self, candidate: ImageCandidate) {
        match self.intake.validate(&candidate) {
            Ok(accepted) => {
                tracing::info!(file = %accepted.file_name(), "image load started");
                self.form.image = PendingImage::Loading(accepted);
            }
            Err(rejection) => {
                // A rejection clears the pending image, including one still
                // loading, so a deferred submit has nothing left to wait for.
                if self.form.image.is_loading() {
                    self.submit_deferred = false;
                }
                self.form.image = PendingImage::None;
                self.message = Some(Message::new(Tone::Error, rejection.to_string()));
            }
        }
    }

    fn image_loaded(&mut self, bytes: &[u8]) {
        let PendingImage::Loading(accepted) = &self.form.image else {
            tracing::warn!("image bytes arrived with no load in flight");
            return;
        };
        self.form.image = PendingImage::Ready(accepted.load(bytes));
        tracing::info!(size_bytes = bytes.len(), "image loaded");

        if self.submit_deferred {
            self.submit_deferred = false;
            self.submit();
        }
    }

    fn submit(&mut self) {
        if self.form.image.is_loading() {
            self.submit_deferred = true;
            self.message = Some(Message::new(Tone::Info, MSG_IMAGE_LOADING));
            return;
        }

        match self.store.create(self.form.to_fields()) {
            Ok(_) => {
                self.form.clear();
                self.message = Some(Message::new(Tone::Success, MSG_UPLOADED));
            }
            Err(DomainError::Validation(reason)) => {
                self.message = Some(Message::new(
                    Tone::Error,
                    format!("{MSG_INVALID_FORM}: {reason}"),
                ));
            }
            Err(other) => {
                self.message = Some(Message::new(Tone::Error, other.to_string()));
            }
        }
    }

    // Observed behaviour: the product leaves the catalog as soon as editing
    // starts and comes back under a new id on resubmit.
    fn edit(&mut self, id: ProductId) {
        let Some(fields) = self.store.take_for_edit(id) else {
            return;
        };
        self.form.fill(fields);
        self.submit_deferred = false;
        self.message = Some(Message::new(Tone::Info, MSG_EDIT));
    }

    fn rate(&mut self, id: ProductId, raw: &str) {
        if self.store.rate_from_input(id, raw).is_err() {
            self.alert = Some(ALERT_INVALID_RATING.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(session: &mut EditorSession, name: &str, description: &str, price: &str) {
        for (field, value) in [
            (FormField::Name, name),
            (FormField::Description, description),
            (FormField::Price, price),
        ] {
            session.handle(UserEvent::SetField {
                field,
                value: value.to_string(),
            });
        }
    }

    fn add(session: &mut EditorSession, name: &str, description: &str, price: &str) -> ProductId {
        fill(session, name, description, price);
        session.handle(UserEvent::Submit);
        session.store().products().last().unwrap().id_typed()
    }

    #[test]
    fn submit_success_clears_form_and_reports() {
        let mut session = EditorSession::default();
        add(&mut session, "Mug", "Ceramic mug", "9.99");

        assert_eq!(session.store().len(), 1);
        assert_eq!(session.view().names(), vec!["Mug"]);
        assert_eq!(session.form(), &FormState::default());
        let message = session.message().unwrap();
        assert_eq!(message.tone, Tone::Success);
        assert_eq!(message.text, MSG_UPLOADED);
    }

    #[test]
    fn submit_failure_names_problem_and_keeps_form() {
        let mut session = EditorSession::default();
        fill(&mut session, "Mug", "Ceramic mug", "-1");
        session.handle(UserEvent::Submit);

        assert!(session.store().is_empty());
        assert_eq!(session.form().name, "Mug");
        let message = session.message().unwrap();
        assert_eq!(message.tone, Tone::Error);
        assert!(message.text.starts_with(MSG_INVALID_FORM));
        assert!(message.text.contains("price"));
    }

    #[test]
    fn submit_waits_for_image_load() {
        let mut session = EditorSession::default();
        fill(&mut session, "Mug", "Ceramic mug", "9.99");
        session.handle(UserEvent::SelectImage(ImageCandidate::new("mug.png", "image/png", 3)));
        session.handle(UserEvent::Submit);

        assert!(session.store().is_empty());
        assert!(session.submit_deferred());
        assert_eq!(session.message().unwrap().tone, Tone::Info);

        session.handle(UserEvent::ImageLoaded { bytes: b"abc".to_vec() });
        assert!(!session.submit_deferred());
        assert_eq!(session.store().len(), 1);
        assert_eq!(
            session.view().cards[0].image.as_deref(),
            Some("data:image/png;base64,YWJj")
        );
    }

    #[test]
    fn image_loaded_without_selection_is_ignored() {
        let mut session = EditorSession::default();
        session.handle(UserEvent::ImageLoaded { bytes: vec![1, 2, 3] });
        assert_eq!(session.form().image, PendingImage::None);
    }

    #[test]
    fn rejected_image_clears_loaded_preview() {
        let mut session = EditorSession::default();
        session.handle(UserEvent::SelectImage(ImageCandidate::new("a.png", "image/png", 3)));
        session.handle(UserEvent::ImageLoaded { bytes: b"abc".to_vec() });
        assert!(session.form().image.preview().is_some());

        session.handle(UserEvent::SelectImage(ImageCandidate::new(
            "huge.png",
            "image/png",
            10 * 1024 * 1024,
        )));
        assert_eq!(session.form().image, PendingImage::None);
        assert_eq!(
            session.message().unwrap().text,
            "File size exceeds 5MB! Please upload a smaller file."
        );
    }

    #[test]
    fn rejected_image_cancels_deferred_submit() {
        let mut session = EditorSession::default();
        fill(&mut session, "Mug", "Ceramic mug", "9.99");
        session.handle(UserEvent::SelectImage(ImageCandidate::new("mug.png", "image/png", 3)));
        session.handle(UserEvent::Submit);
        assert!(session.submit_deferred());

        session.handle(UserEvent::SelectImage(ImageCandidate::new("mug.gif", "image/gif", 3)));
        assert!(!session.submit_deferred());
        assert_eq!(session.form().image, PendingImage::None);

        // Late bytes from the abandoned load are ignored.
        session.handle(UserEvent::ImageLoaded { bytes: b"abc".to_vec() });
        assert!(session.store().is_empty());
        assert_eq!(session.form().name, "Mug");
    }

    #[test]
    fn message_belongs_to_the_event_that_raised_it() {
        let mut session = EditorSession::default();
        add(&mut session, "Mug", "Ceramic mug", "9.99");
        assert_eq!(session.take_message().unwrap().text, MSG_UPLOADED);
        assert_eq!(session.take_message(), None);

        add(&mut session, "Cup", "Tea cup", "4");
        assert_eq!(session.message().unwrap().text, MSG_UPLOADED);

        session.handle(UserEvent::SortByName);
        assert_eq!(session.message(), None);
    }

    #[test]
    fn delete_is_two_step() {
        let mut session = EditorSession::default();
        let id = add(&mut session, "Mug", "Ceramic mug", "9.99");

        session.handle(UserEvent::RequestDelete(id));
        assert!(session.delete_modal_open());
        session.handle(UserEvent::CancelDelete);
        assert!(!session.delete_modal_open());
        assert_eq!(session.store().len(), 1);

        session.handle(UserEvent::RequestDelete(id));
        session.handle(UserEvent::ConfirmDelete);
        assert!(!session.delete_modal_open());
        assert!(session.store().is_empty());
        assert!(session.view().is_empty());
    }

    #[test]
    fn confirm_without_request_is_noop() {
        let mut session = EditorSession::default();
        add(&mut session, "Mug", "Ceramic mug", "9.99");
        session.handle(UserEvent::ConfirmDelete);
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn edit_prefills_and_removes() {
        let mut session = EditorSession::default();
        let id = add(&mut session, "Mug", "Ceramic mug", "9.99");

        session.handle(UserEvent::Edit(id));
        assert!(session.store().is_empty());
        assert_eq!(session.form().name, "Mug");
        assert_eq!(session.form().price, "9.99");
        assert_eq!(session.message().unwrap().text, MSG_EDIT);

        session.handle(UserEvent::SetField {
            field: FormField::Price,
            value: "12".to_string(),
        });
        session.handle(UserEvent::Submit);
        let product = &session.store().products()[0];
        assert_ne!(product.id_typed(), id);
        assert_eq!(product.price().value(), 12.0);
    }

    #[test]
    fn edit_unknown_id_changes_nothing() {
        let mut session = EditorSession::default();
        add(&mut session, "Mug", "Ceramic mug", "9.99");
        session.handle(UserEvent::Edit(ProductId::new()));
        assert_eq!(session.store().len(), 1);
        assert_eq!(session.form(), &FormState::default());
    }

    #[test]
    fn bad_rating_raises_alert_once() {
        let mut session = EditorSession::default();
        let id = add(&mut session, "Mug", "Ceramic mug", "9.99");

        session.handle(UserEvent::SubmitRating {
            id,
            raw: "7".to_string(),
        });
        assert_eq!(session.take_alert().as_deref(), Some(ALERT_INVALID_RATING));
        assert_eq!(session.take_alert(), None);
        assert_eq!(session.store().find_by_id(id).unwrap().rating(), None);
    }

    #[test]
    fn search_persists_across_renders() {
        let mut session = EditorSession::default();
        add(&mut session, "Mug", "Ceramic mug", "9.99");
        add(&mut session, "Spoon", "Steel", "1");

        session.handle(UserEvent::Search("steel".to_string()));
        assert_eq!(session.view().names(), vec!["Spoon"]);

        session.handle(UserEvent::SortByPrice);
        assert_eq!(session.view().names(), vec!["Spoon"]);

        session.handle(UserEvent::Search(String::new()));
        assert_eq!(session.view().names(), vec!["Spoon", "Mug"]);
    }

    #[test]
    fn small_image_limit_is_reported_in_kilobytes() {
        let config = EditorConfig {
            max_image_bytes: 1024,
            ..EditorConfig::default()
        };
        let mut session = EditorSession::new(&config);
        session.handle(UserEvent::SelectImage(ImageCandidate::new("a.png", "image/png", 2048)));
        assert_eq!(
            session.message().unwrap().text,
            "File size exceeds 1KB! Please upload a smaller file."
        );
    }

    #[test]
    fn currency_comes_from_config() {
        let config = EditorConfig {
            currency: "£".to_string(),
            ..EditorConfig::default()
        };
        let mut session = EditorSession::new(&config);
        add(&mut session, "Mug", "Ceramic mug", "9.99");
        assert_eq!(session.view().cards[0].price, "£9.99");
    }
}
