//! Application state, routing and event dispatch.
//!
//! The UI has three views selected by a [`Route`]. Entering a view fetches
//! what it shows; nothing is cached between views and nothing is refreshed
//! behind the user's back after a mutation.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rolodex_core::Contact;

use crate::{client::ApiClient, form::ContactForm};

const FIND_CONTACTS_FAILED: &str = "Error finding contacts.";
const CREATE_FAILED: &str = "Error creating contact.";
const FIND_CONTACT_FAILED: &str = "Some error occurred when trying to find this contact.";
const EDIT_FAILED: &str = "Some error occurred when trying to edit this contact.";
const DELETE_FAILED: &str = "Some error occurred when trying to delete this contact.";

// ─── Route ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
  /// `/` — all contacts.
  List,
  /// `/new/contact` — empty create form.
  NewContact,
  /// `/contact/:id` — one contact, read or edit.
  Contact(String),
}

impl Route {
  /// Parse a route path. Anything unrecognised redirects to [`Route::List`].
  pub fn resolve(path: &str) -> Self {
    let path = path.trim().trim_start_matches('#');
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
      ["new", "contact"] => Route::NewContact,
      ["contact", id] => Route::Contact((*id).to_owned()),
      _ => Route::List,
    }
  }

  pub fn path(&self) -> String {
    match self {
      Route::List => "/".into(),
      Route::NewContact => "/new/contact".into(),
      Route::Contact(id) => format!("/contact/{id}"),
    }
  }
}

// ─── Alert ────────────────────────────────────────────────────────────────────

/// A blocking message naming the failed operation. Any key dismisses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
  pub message: &'static str,
  pub detail:  String,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// The active view.
  pub route: Route,

  /// Contacts shown by the list view, as fetched on entry.
  pub contacts: Vec<Contact>,

  /// Cursor position within `contacts`.
  pub list_cursor: usize,

  /// The contact shown by the edit view. `None` if the server had no match.
  pub contact: Option<Contact>,

  /// Whether the edit view shows the form instead of the read display.
  pub edit_mode: bool,

  /// Form state for the create view and the edit view's form.
  pub form: ContactForm,

  /// Pending alert; blocks all other input until dismissed.
  pub alert: Option<Alert>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    Self {
      route: Route::List,
      contacts: Vec::new(),
      list_cursor: 0,
      contact: None,
      edit_mode: false,
      form: ContactForm::default(),
      alert: None,
      status_msg: String::new(),
      client: Arc::new(client),
    }
  }

  fn raise_alert(&mut self, message: &'static str, err: anyhow::Error) {
    self.alert = Some(Alert { message, detail: format!("{err:#}") });
  }

  // ── Navigation ────────────────────────────────────────────────────────────

  /// Switch to `route` and load whatever it displays.
  pub async fn navigate(&mut self, route: Route) {
    self.route = route.clone();
    self.status_msg.clear();
    self.edit_mode = false;

    match route {
      Route::List => {
        self.contact = None;
        self.list_cursor = 0;
        match self.client.list_contacts().await {
          Ok(contacts) => self.contacts = contacts,
          Err(e) => {
            self.contacts.clear();
            self.raise_alert(FIND_CONTACTS_FAILED, e);
          }
        }
      }
      Route::NewContact => {
        self.contact = None;
        self.form = ContactForm::default();
      }
      Route::Contact(id) => {
        self.contact = None;
        match self.client.get_contact(&id).await {
          Ok(contact) => self.contact = contact,
          Err(e) => self.raise_alert(FIND_CONTACT_FAILED, e),
        }
      }
    }
  }

  /// The contact under the list cursor, if any.
  pub fn cursor_contact(&self) -> Option<&Contact> { self.contacts.get(self.list_cursor) }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    if self.alert.is_some() {
      self.alert = None;
      return true;
    }

    match self.route {
      Route::List => self.handle_list_key(key).await,
      Route::NewContact => {
        self.handle_create_key(key).await;
        true
      }
      Route::Contact(_) if self.edit_mode => {
        self.handle_form_key(key).await;
        true
      }
      Route::Contact(_) => self.handle_detail_key(key).await,
    }
  }

  async fn handle_list_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,

      KeyCode::Down | KeyCode::Char('j') => {
        if self.list_cursor + 1 < self.contacts.len() {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(id) = self.cursor_contact().map(|c| c.id.to_string()) {
          self.navigate(Route::Contact(id)).await;
        }
      }

      KeyCode::Char('n') => self.navigate(Route::NewContact).await,
      KeyCode::Char('r') => self.navigate(Route::List).await,

      _ => {}
    }
    true
  }

  async fn handle_create_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => self.navigate(Route::List).await,
      KeyCode::Enter => self.save_new_contact().await,
      _ => edit_form(&mut self.form, key),
    }
  }

  /// Keys while the edit view shows its form.
  async fn handle_form_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => self.edit_mode = false,
      KeyCode::Enter => self.save_contact().await,
      _ => edit_form(&mut self.form, key),
    }
  }

  async fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => self.navigate(Route::List).await,
      KeyCode::Char('e') => {
        if let Some(contact) = &self.contact {
          self.form = ContactForm::from_contact(contact);
          self.edit_mode = true;
        }
      }
      KeyCode::Char('d') => self.delete_contact().await,
      _ => {}
    }
    true
  }

  // ── Mutations ─────────────────────────────────────────────────────────────

  async fn save_new_contact(&mut self) {
    match self.client.create_contact(&self.form.to_fields()).await {
      Ok(contact) => self.navigate(Route::Contact(contact.id.to_string())).await,
      Err(e) => self.raise_alert(CREATE_FAILED, e),
    }
  }

  /// Apply the form to the displayed contact and send it. The form closes
  /// whether or not the request succeeds.
  async fn save_contact(&mut self) {
    self.edit_mode = false;
    let Some(contact) = self.contact.as_mut() else { return };
    self.form.apply_to(contact);
    let contact = contact.clone();
    match self.client.edit_contact(&contact).await {
      Ok(()) => self.status_msg = "Contact saved.".into(),
      Err(e) => self.raise_alert(EDIT_FAILED, e),
    }
  }

  async fn delete_contact(&mut self) {
    let Route::Contact(id) = &self.route else { return };
    let id = id.clone();
    match self.client.delete_contact(&id).await {
      Ok(()) => self.status_msg = "Contact deleted.".into(),
      Err(e) => self.raise_alert(DELETE_FAILED, e),
    }
  }
}

fn edit_form(form: &mut ContactForm, key: KeyEvent) {
  match key.code {
    KeyCode::Tab | KeyCode::Down => form.next(),
    KeyCode::BackTab | KeyCode::Up => form.prev(),
    KeyCode::Backspace => form.pop(),
    KeyCode::Char(c) => form.push(c),
    _ => {}
  }
}
