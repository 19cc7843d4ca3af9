//! Per collection and language admin controller.
//!
//! ```text
//! List ──open_create/open_edit──▶ Create | Edit ──submit──▶ Saving
//!   ▲                                 ▲                        │
//!   └──────────── success ────────────┼────────────────────────┤
//!                                     └──── failure (toast) ───┘
//! ```
//!
//! Every gateway failure becomes an error notification. The table keeps the
//! last successful fetch, or shows a placeholder when there is none.

use std::sync::Arc;

use heritage_core::collection::Collection;
use heritage_core::language::Language;
use heritage_core::types::DbId;
use serde_json::Value;

use super::auth::Session;
use super::form::RecordForm;
use super::notify::Notifier;
use crate::api::{record_list, ContentGateway};

/// Where the panel is in its edit cycle.
#[derive(Debug, Clone)]
pub enum PanelMode {
    List,
    Create(RecordForm),
    Edit(RecordForm),
    /// A create or update is in flight.
    Saving,
}

/// Dashboard counters for one list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub total: usize,
    pub published: usize,
    pub draft: usize,
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: DbId,
    pub cells: Vec<String>,
    pub published: bool,
}

impl TableRow {
    pub fn status_label(&self) -> &'static str {
        if self.published {
            "Published"
        } else {
            "Draft"
        }
    }

    /// Lowercased row text the search box filters on.
    fn search_text(&self) -> String {
        let mut text = self.cells.join(" ");
        text.push(' ');
        text.push_str(self.status_label());
        text.to_lowercase()
    }
}

/// Plural noun used in load messages.
fn plural_label(collection: Collection) -> &'static str {
    match collection {
        Collection::Figures => "heritage figures",
        Collection::News => "news articles",
        Collection::Tips => "wellness tips",
        Collection::Podcasts => "podcasts",
        Collection::Banners => "banners",
    }
}

fn empty_placeholder(collection: Collection) -> &'static str {
    match collection {
        Collection::Figures => "No profiles yet.",
        Collection::News => "No articles yet.",
        Collection::Tips => "No wellness tips yet.",
        Collection::Podcasts => "No podcasts yet.",
        Collection::Banners => "No banners yet.",
    }
}

fn text_field<'a>(record: &'a Value, field: &str) -> &'a str {
    record.get(field).and_then(Value::as_str).unwrap_or("")
}

fn or_placeholder(text: &str, placeholder: &str) -> String {
    if text.trim().is_empty() {
        placeholder.to_string()
    } else {
        text.to_string()
    }
}

/// Tip descriptions are cut to a preview in the table.
fn preview(text: &str) -> String {
    const PREVIEW_CHARS: usize = 60;
    let cut: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{cut}...")
}

/// Table cells of a record, per collection column layout.
fn row_cells(collection: Collection, record: &Value) -> Vec<String> {
    match collection {
        Collection::Figures => vec![
            or_placeholder(text_field(record, "fullName"), "N/A"),
            or_placeholder(text_field(record, "title"), "N/A"),
            or_placeholder(text_field(record, "category"), "-"),
        ],
        Collection::News => vec![
            or_placeholder(text_field(record, "title"), "N/A"),
            or_placeholder(text_field(record, "category"), "-"),
            or_placeholder(
                text_field(record, "author"),
                heritage_core::content::DEFAULT_AUTHOR,
            ),
        ],
        Collection::Tips => vec![
            or_placeholder(text_field(record, "title"), "N/A"),
            preview(text_field(record, "description")),
        ],
        Collection::Podcasts => vec![
            or_placeholder(text_field(record, "title"), "N/A"),
            or_placeholder(text_field(record, "videoId"), "-"),
        ],
        Collection::Banners => vec![
            or_placeholder(text_field(record, "title"), "N/A"),
            record
                .get("displayOrder")
                .and_then(Value::as_i64)
                .unwrap_or(0)
                .to_string(),
        ],
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// The admin dashboard behind a demo login.
///
/// Only a [`Session`] from [`super::auth::login`] opens it. Every collection
/// panel it hands out drives the Content API on behalf of that session.
pub struct AdminPanel<G> {
    session: Session,
    gateway: Arc<G>,
}

impl<G: ContentGateway> AdminPanel<G> {
    pub fn open(session: &Session, gateway: Arc<G>) -> Self {
        tracing::info!(user = session.username(), "Admin dashboard opened");
        Self {
            session: session.clone(),
            gateway,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// A fresh panel for one collection in one language.
    pub fn collection(&self, collection: Collection, language: Language) -> CollectionPanel<G> {
        CollectionPanel::new(&self.session, Arc::clone(&self.gateway), collection, language)
    }

    /// Panels for every collection in `language`, each with its list loaded.
    pub async fn load_all(&self, language: Language) -> Vec<CollectionPanel<G>> {
        let mut panels = Vec::with_capacity(Collection::ALL.len());
        for collection in Collection::ALL {
            let mut panel = self.collection(collection, language);
            panel.refresh().await;
            panels.push(panel);
        }
        panels
    }
}

// ---------------------------------------------------------------------------
// Collection panel
// ---------------------------------------------------------------------------

/// Admin controller for one collection in one language.
pub struct CollectionPanel<G> {
    /// Username of the session the panel acts for.
    user: String,
    gateway: Arc<G>,
    collection: Collection,
    language: Language,
    records: Vec<Value>,
    /// Set when the last fetch failed and no earlier list is available.
    load_failed: bool,
    filter: String,
    mode: PanelMode,
    pending_delete: Option<DbId>,
    notifier: Notifier,
}

impl<G: ContentGateway> CollectionPanel<G> {
    pub fn new(
        session: &Session,
        gateway: Arc<G>,
        collection: Collection,
        language: Language,
    ) -> Self {
        Self {
            user: session.username().to_string(),
            gateway,
            collection,
            language,
            records: Vec::new(),
            load_failed: false,
            filter: String::new(),
            mode: PanelMode::List,
            pending_delete: None,
            notifier: Notifier::new(),
        }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn mode(&self) -> &PanelMode {
        &self.mode
    }

    pub fn records(&self) -> &[Value] {
        &self.records
    }

    pub fn notifications(&self) -> &Notifier {
        &self.notifier
    }

    pub fn notifications_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    /// The open form, if the panel is in `Create` or `Edit`.
    pub fn form_mut(&mut self) -> Option<&mut RecordForm> {
        match &mut self.mode {
            PanelMode::Create(form) | PanelMode::Edit(form) => Some(form),
            PanelMode::List | PanelMode::Saving => None,
        }
    }

    // ---------------------------------------------------------------------
    // List
    // ---------------------------------------------------------------------

    /// Re-fetch the admin list. Returns `true` on success.
    ///
    /// On failure the previous list stays on screen.
    pub async fn refresh(&mut self) -> bool {
        match self.gateway.list_admin(self.collection, self.language).await {
            Ok(body) => {
                self.records = record_list(self.collection, &body);
                self.load_failed = false;
                tracing::debug!(
                    collection = %self.collection,
                    language = %self.language,
                    count = self.records.len(),
                    "Admin list loaded",
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    collection = %self.collection,
                    language = %self.language,
                    error = %e,
                    "Failed to load admin list",
                );
                self.load_failed = self.records.is_empty();
                self.notifier
                    .error(format!("Failed to load {}", plural_label(self.collection)));
                false
            }
        }
    }

    pub fn counters(&self) -> Counters {
        let published = self
            .records
            .iter()
            .filter(|r| r.get("published").and_then(Value::as_bool).unwrap_or(false))
            .count();
        Counters {
            total: self.records.len(),
            published,
            draft: self.records.len() - published,
        }
    }

    pub fn rows(&self) -> Vec<TableRow> {
        self.records
            .iter()
            .filter_map(|record| {
                Some(TableRow {
                    id: record.get("id").and_then(Value::as_i64)?,
                    cells: row_cells(self.collection, record),
                    published: record
                        .get("published")
                        .and_then(Value::as_bool)
                        .unwrap_or(false),
                })
            })
            .collect()
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    /// Rows whose text contains the search box value, case-insensitively.
    pub fn visible_rows(&self) -> Vec<TableRow> {
        let needle = self.filter.trim().to_lowercase();
        self.rows()
            .into_iter()
            .filter(|row| needle.is_empty() || row.search_text().contains(&needle))
            .collect()
    }

    /// Message shown instead of the table body, if any.
    pub fn placeholder(&self) -> Option<String> {
        if !self.records.is_empty() {
            return None;
        }
        if self.load_failed {
            Some(format!("Failed to load {}", plural_label(self.collection)))
        } else {
            Some(empty_placeholder(self.collection).to_string())
        }
    }

    // ---------------------------------------------------------------------
    // Create / edit
    // ---------------------------------------------------------------------

    pub fn open_create(&mut self) {
        self.mode = PanelMode::Create(RecordForm::blank(self.collection, self.language));
    }

    /// Open the edit form for a record of the in-memory list.
    pub fn open_edit(&mut self, id: DbId) -> bool {
        let record = self
            .records
            .iter()
            .find(|r| r.get("id").and_then(Value::as_i64) == Some(id));

        match record {
            Some(record) => {
                self.mode = PanelMode::Edit(RecordForm::from_record(
                    self.collection,
                    self.language,
                    record,
                ));
                true
            }
            None => {
                tracing::warn!(collection = %self.collection, id, "Edit target not in list");
                self.notifier.error(format!(
                    "Failed to load {} data",
                    self.collection.entity_name().to_lowercase()
                ));
                false
            }
        }
    }

    pub fn cancel(&mut self) {
        self.mode = PanelMode::List;
    }

    /// Validate and save the open form.
    ///
    /// Success returns to `List` with the list re-fetched. Failure keeps the
    /// form open with its values and shows an error.
    pub async fn submit(&mut self) -> bool {
        let (form, editing) = match std::mem::replace(&mut self.mode, PanelMode::Saving) {
            PanelMode::Create(form) => (form, false),
            PanelMode::Edit(form) => (form, true),
            other => {
                self.mode = other;
                return false;
            }
        };
        let restore = |form: RecordForm| {
            if editing {
                PanelMode::Edit(form)
            } else {
                PanelMode::Create(form)
            }
        };

        let record = match form.to_record() {
            Ok(record) => record,
            Err(e) => {
                self.notifier.error(e.to_string());
                self.mode = restore(form);
                return false;
            }
        };

        let result = match form.id() {
            Some(id) if editing => {
                self.gateway
                    .update(self.collection, self.language, id, &record)
                    .await
            }
            _ => {
                self.gateway
                    .create(self.collection, self.language, &record)
                    .await
            }
        };

        let entity = self.collection.entity_name();
        match result {
            Ok(_) => {
                let verb = if editing { "updated" } else { "created" };
                tracing::info!(collection = %self.collection, user = %self.user, verb, "Record saved");
                self.notifier
                    .success(format!("{entity} {verb} successfully!"));
                self.mode = PanelMode::List;
                self.refresh().await;
                true
            }
            Err(e) => {
                tracing::error!(
                    collection = %self.collection,
                    user = %self.user,
                    error = %e,
                    "Save failed",
                );
                self.notifier
                    .error(format!("Failed to save {}", entity.to_lowercase()));
                self.mode = restore(form);
                false
            }
        }
    }

    // ---------------------------------------------------------------------
    // Delete
    // ---------------------------------------------------------------------

    /// First step of a delete: remember the target until confirmed.
    pub fn request_delete(&mut self, id: DbId) {
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<DbId> {
        self.pending_delete
    }

    /// Confirmation prompt text for the pending delete.
    pub fn confirm_prompt(&self) -> String {
        format!(
            "Are you sure you want to delete this {}?",
            self.collection.entity_name().to_lowercase()
        )
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Issue the confirmed delete. Without a pending target nothing is sent.
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.pending_delete.take() else {
            return false;
        };

        let entity = self.collection.entity_name();
        match self.gateway.delete(self.collection, self.language, id).await {
            Ok(()) => {
                tracing::info!(collection = %self.collection, user = %self.user, id, "Record deleted");
                self.records
                    .retain(|r| r.get("id").and_then(Value::as_i64) != Some(id));
                self.notifier
                    .success(format!("{entity} deleted successfully!"));
                true
            }
            Err(e) => {
                tracing::error!(
                    collection = %self.collection,
                    user = %self.user,
                    id,
                    error = %e,
                    "Delete failed",
                );
                self.notifier
                    .error(format!("Failed to delete {}", entity.to_lowercase()));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use assert_matches::assert_matches;
    use serde_json::json;
    use tokio::sync::Mutex;

    use super::*;
    use crate::admin::auth::login;
    use crate::admin::form::FieldValue;
    use crate::admin::notify::NotificationKind;
    use crate::error::ClientError;

    /// In-memory gateway holding one list, with a failure switch.
    #[derive(Default)]
    struct FakeGateway {
        records: Mutex<Vec<Value>>,
        fail: AtomicBool,
    }

    impl FakeGateway {
        fn with(records: Vec<Value>) -> Arc<Self> {
            Arc::new(Self {
                records: Mutex::new(records),
                fail: AtomicBool::new(false),
            })
        }

        fn fail(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }

        fn check(&self) -> Result<(), ClientError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(ClientError::Api {
                    status: 503,
                    body: "down".into(),
                });
            }
            Ok(())
        }
    }

    impl ContentGateway for FakeGateway {
        async fn list_published(
            &self,
            collection: Collection,
            _language: Language,
        ) -> Result<Value, ClientError> {
            self.check()?;
            let published: Vec<Value> = self
                .records
                .lock()
                .await
                .iter()
                .filter(|r| r["published"] == true)
                .cloned()
                .collect();
            Ok(json!({ collection.document_key(): published }))
        }

        async fn list_admin(
            &self,
            collection: Collection,
            _language: Language,
        ) -> Result<Value, ClientError> {
            self.check()?;
            let records = self.records.lock().await.clone();
            Ok(json!({ collection.document_key(): records }))
        }

        async fn create(
            &self,
            _collection: Collection,
            _language: Language,
            record: &Value,
        ) -> Result<Value, ClientError> {
            self.check()?;
            let mut records = self.records.lock().await;
            let mut stored = record.clone();
            stored["id"] = json!(records.len() as i64 + 1);
            records.push(stored.clone());
            Ok(stored)
        }

        async fn update(
            &self,
            _collection: Collection,
            _language: Language,
            id: DbId,
            record: &Value,
        ) -> Result<Value, ClientError> {
            self.check()?;
            let mut records = self.records.lock().await;
            let slot = records
                .iter_mut()
                .find(|r| r["id"] == id)
                .ok_or(ClientError::Api {
                    status: 404,
                    body: String::new(),
                })?;
            *slot = record.clone();
            Ok(record.clone())
        }

        async fn delete(
            &self,
            _collection: Collection,
            _language: Language,
            id: DbId,
        ) -> Result<(), ClientError> {
            self.check()?;
            self.records.lock().await.retain(|r| r["id"] != id);
            Ok(())
        }
    }

    fn figure(id: i64, name: &str, published: bool) -> Value {
        json!({"id": id, "fullName": name, "title": "Nghệ nhân", "category": "Âm nhạc", "published": published})
    }

    fn admin() -> Session {
        login("admin", "admin123").unwrap()
    }

    fn last_notification<G: ContentGateway>(panel: &CollectionPanel<G>) -> (NotificationKind, String) {
        let n = panel.notifications().last().unwrap();
        (n.kind, n.message.clone())
    }

    // -----------------------------------------------------------------------
    // List
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn refresh_loads_rows_and_counters() {
        let gateway = FakeGateway::with(vec![figure(1, "A", true), figure(2, "B", false)]);
        let mut panel = CollectionPanel::new(&admin(), gateway, Collection::Figures, Language::Vi);

        assert!(panel.refresh().await);
        assert_eq!(
            panel.counters(),
            Counters {
                total: 2,
                published: 1,
                draft: 1
            }
        );
        let rows = panel.rows();
        assert_eq!(rows[0].cells, vec!["A", "Nghệ nhân", "Âm nhạc"]);
        assert_eq!(rows[1].status_label(), "Draft");
        assert_eq!(panel.placeholder(), None);
    }

    #[tokio::test]
    async fn filter_matches_rendered_text() {
        let gateway = FakeGateway::with(vec![figure(1, "Trần Văn A", true), figure(2, "Lê B", false)]);
        let mut panel = CollectionPanel::new(&admin(), gateway, Collection::Figures, Language::Vi);
        panel.refresh().await;

        panel.set_filter("TRẦN");
        let visible = panel.visible_rows();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 1);

        panel.set_filter("draft");
        assert_eq!(panel.visible_rows()[0].id, 2);

        panel.set_filter("");
        assert_eq!(panel.visible_rows().len(), 2);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_last_list() {
        let gateway = FakeGateway::with(vec![figure(1, "A", true)]);
        let mut panel = CollectionPanel::new(&admin(), gateway.clone(), Collection::Figures, Language::Vi);
        panel.refresh().await;

        gateway.fail(true);
        assert!(!panel.refresh().await);
        assert_eq!(panel.records().len(), 1);
        assert_eq!(
            last_notification(&panel),
            (NotificationKind::Error, "Failed to load heritage figures".into())
        );
    }

    #[tokio::test]
    async fn placeholders_for_empty_and_failed_lists() {
        let gateway = FakeGateway::with(Vec::new());
        let mut panel = CollectionPanel::new(&admin(), gateway.clone(), Collection::Tips, Language::En);
        panel.refresh().await;
        assert_eq!(panel.placeholder().as_deref(), Some("No wellness tips yet."));

        gateway.fail(true);
        panel.refresh().await;
        assert_eq!(
            panel.placeholder().as_deref(),
            Some("Failed to load wellness tips")
        );
    }

    // -----------------------------------------------------------------------
    // Create / edit
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn create_returns_to_list_with_refetch() {
        let gateway = FakeGateway::with(Vec::new());
        let mut panel = CollectionPanel::new(&admin(), gateway, Collection::News, Language::Vi);

        panel.open_create();
        let form = panel.form_mut().unwrap();
        form.set_text("title", "Lễ hội").unwrap();
        form.set_flag("published", true).unwrap();

        assert!(panel.submit().await);
        assert_matches!(panel.mode(), PanelMode::List);
        assert_eq!(panel.records().len(), 1);
        assert_eq!(panel.records()[0]["language"], "vi");
        assert_eq!(
            last_notification(&panel),
            (NotificationKind::Success, "News article created successfully!".into())
        );
    }

    #[tokio::test]
    async fn invalid_form_stays_open() {
        let gateway = FakeGateway::with(Vec::new());
        let mut panel = CollectionPanel::new(&admin(), gateway.clone(), Collection::Figures, Language::Vi);

        panel.open_create();
        assert!(!panel.submit().await);
        assert_matches!(panel.mode(), PanelMode::Create(_));
        assert_eq!(
            last_notification(&panel),
            (NotificationKind::Error, "fullName is required".into())
        );
        assert!(gateway.records.lock().await.is_empty());
    }

    #[tokio::test]
    async fn failed_save_keeps_form_values() {
        let gateway = FakeGateway::with(vec![figure(1, "A", true)]);
        let mut panel = CollectionPanel::new(&admin(), gateway.clone(), Collection::Figures, Language::Vi);
        panel.refresh().await;

        assert!(panel.open_edit(1));
        panel
            .form_mut()
            .unwrap()
            .set_control("profileName", FieldValue::Text("A renamed".into()))
            .unwrap();

        gateway.fail(true);
        assert!(!panel.submit().await);
        assert_eq!(
            last_notification(&panel),
            (NotificationKind::Error, "Failed to save heritage figure".into())
        );
        let form = panel.form_mut().unwrap();
        assert_eq!(form.value("fullName").unwrap().as_text(), "A renamed");

        gateway.fail(false);
        assert!(panel.submit().await);
        assert_eq!(panel.records()[0]["fullName"], "A renamed");
    }

    #[tokio::test]
    async fn open_edit_of_unknown_id_notifies() {
        let gateway = FakeGateway::with(Vec::new());
        let mut panel = CollectionPanel::new(&admin(), gateway, Collection::Tips, Language::Vi);
        assert!(!panel.open_edit(9));
        assert_matches!(panel.mode(), PanelMode::List);
        assert_eq!(
            last_notification(&panel).1,
            "Failed to load wellness tip data"
        );
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let gateway = FakeGateway::with(vec![figure(1, "A", true), figure(2, "B", false)]);
        let mut panel = CollectionPanel::new(&admin(), gateway.clone(), Collection::Figures, Language::Vi);
        panel.refresh().await;

        assert!(!panel.confirm_delete().await);

        panel.request_delete(1);
        assert_eq!(
            panel.confirm_prompt(),
            "Are you sure you want to delete this heritage figure?"
        );
        panel.cancel_delete();
        assert!(!panel.confirm_delete().await);
        assert_eq!(gateway.records.lock().await.len(), 2);

        panel.request_delete(1);
        assert!(panel.confirm_delete().await);
        assert_eq!(panel.rows().len(), 1);
        assert_eq!(panel.counters().total, 1);
        assert_eq!(panel.counters().published, 0);
        assert_eq!(gateway.records.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn failed_delete_keeps_row() {
        let gateway = FakeGateway::with(vec![figure(1, "A", true)]);
        let mut panel = CollectionPanel::new(&admin(), gateway.clone(), Collection::Figures, Language::Vi);
        panel.refresh().await;

        gateway.fail(true);
        panel.request_delete(1);
        assert!(!panel.confirm_delete().await);
        assert_eq!(panel.rows().len(), 1);
        assert_eq!(
            last_notification(&panel).1,
            "Failed to delete heritage figure"
        );
    }

    // -----------------------------------------------------------------------
    // Dashboard
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn dashboard_panels_act_for_the_logged_in_user() {
        let gateway = FakeGateway::with(vec![figure(1, "A", true)]);
        let session = login("user", "user123").unwrap();
        let dashboard = AdminPanel::open(&session, gateway.clone());
        assert_eq!(dashboard.session().display_name(), "User");

        let panels = dashboard.load_all(Language::Vi).await;
        assert_eq!(panels.len(), Collection::ALL.len());
        assert!(panels.iter().all(|p| p.user() == "user"));
        assert_eq!(panels[0].records().len(), 1);

        let mut tips = dashboard.collection(Collection::Tips, Language::En);
        tips.open_create();
        tips.form_mut().unwrap().set_text("title", "Trà xanh").unwrap();
        assert!(tips.submit().await);
        assert_eq!(gateway.records.lock().await.len(), 2);
        assert_eq!(tips.language(), Language::En);
    }
}
