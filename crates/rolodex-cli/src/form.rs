//! The contact form shared by the create and edit views.
//!
//! Only a handful of well-known fields are editable. Any other keys a contact
//! carries are left untouched when the form is applied, and so is a managed
//! key the user did not change, whatever shape its stored value has.

use rolodex_core::{Contact, ContactFields};
use serde_json::{Map, Value};

/// One editable field, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  FirstName,
  LastName,
  Email,
  MobilePhone,
  WorkPhone,
}

impl Field {
  pub const ALL: [Field; 5] = [
    Field::FirstName,
    Field::LastName,
    Field::Email,
    Field::MobilePhone,
    Field::WorkPhone,
  ];

  pub fn label(self) -> &'static str {
    match self {
      Field::FirstName => "First name",
      Field::LastName => "Last name",
      Field::Email => "Email",
      Field::MobilePhone => "Mobile",
      Field::WorkPhone => "Work phone",
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
  values:    [String; 5],
  /// Values as prefilled; a field equal to its loaded value is not written.
  loaded:    [String; 5],
  pub focus: usize,
}

impl ContactForm {
  /// Prefill from an existing contact.
  pub fn from_contact(contact: &Contact) -> Self {
    let phone = contact.extra.get("phone");
    let text = |v: Option<&Value>| v.and_then(Value::as_str).unwrap_or_default().to_owned();
    let values = [
      contact.first_name.clone().unwrap_or_default(),
      contact.last_name.clone().unwrap_or_default(),
      text(contact.extra.get("email")),
      text(phone.and_then(|p| p.get("mobile"))),
      text(phone.and_then(|p| p.get("work"))),
    ];
    Self { loaded: values.clone(), values, focus: 0 }
  }

  pub fn value(&self, field: Field) -> &str { &self.values[Self::index(field)] }

  pub fn focused(&self) -> Field { Field::ALL[self.focus] }

  pub fn next(&mut self) { self.focus = (self.focus + 1) % Field::ALL.len(); }

  pub fn prev(&mut self) {
    self.focus = (self.focus + Field::ALL.len() - 1) % Field::ALL.len();
  }

  pub fn push(&mut self, c: char) { self.values[self.focus].push(c); }

  pub fn pop(&mut self) { self.values[self.focus].pop(); }

  /// Fields for a create request. Blank inputs are omitted.
  pub fn to_fields(&self) -> ContactFields {
    let mut extra = Map::new();
    self.write_extra(&mut extra);
    ContactFields {
      first_name: self.non_empty(Field::FirstName),
      last_name: self.non_empty(Field::LastName),
      extra,
    }
  }

  /// Overwrite the form-managed fields of `contact`, keeping everything else.
  pub fn apply_to(&self, contact: &mut Contact) {
    contact.first_name = self.non_empty(Field::FirstName);
    contact.last_name = self.non_empty(Field::LastName);
    self.write_extra(&mut contact.extra);
  }

  fn index(field: Field) -> usize {
    Field::ALL
      .iter()
      .position(|f| *f == field)
      .unwrap_or_default()
  }

  fn non_empty(&self, field: Field) -> Option<String> {
    let v = self.value(field).trim();
    (!v.is_empty()).then(|| v.to_owned())
  }

  /// `Some(new value)` if the user changed `field`, `None` if untouched.
  fn edited(&self, field: Field) -> Option<Option<String>> {
    let i = Self::index(field);
    (self.values[i] != self.loaded[i]).then(|| self.non_empty(field))
  }

  fn write_extra(&self, extra: &mut Map<String, Value>) {
    if let Some(email) = self.edited(Field::Email) {
      set_or_remove(extra, "email", email);
    }

    let mobile = self.edited(Field::MobilePhone);
    let work = self.edited(Field::WorkPhone);
    if mobile.is_none() && work.is_none() {
      return;
    }

    // An edited number replaces a `phone` that is not an object.
    let mut phone = match extra.remove("phone") {
      Some(Value::Object(m)) => m,
      _ => Map::new(),
    };
    if let Some(v) = mobile {
      set_or_remove(&mut phone, "mobile", v);
    }
    if let Some(v) = work {
      set_or_remove(&mut phone, "work", v);
    }
    if !phone.is_empty() {
      extra.insert("phone".into(), Value::Object(phone));
    }
  }
}

fn set_or_remove(map: &mut Map<String, Value>, key: &str, value: Option<String>) {
  match value {
    Some(v) => {
      map.insert(key.to_owned(), Value::String(v));
    }
    None => {
      map.remove(key);
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use rolodex_core::ContactId;
  use serde_json::json;

  use super::*;

  fn type_into(form: &mut ContactForm, field: Field, text: &str) {
    while form.focused() != field {
      form.next();
    }
    text.chars().for_each(|c| form.push(c));
  }

  #[test]
  fn blank_form_produces_no_fields() {
    let fields = ContactForm::default().to_fields();
    assert_eq!(fields, ContactFields::default());
    assert!(!fields.has_name());
  }

  #[test]
  fn to_fields_nests_phone_numbers() {
    let mut form = ContactForm::default();
    type_into(&mut form, Field::FirstName, "Ada");
    type_into(&mut form, Field::Email, "ada@example.com");
    type_into(&mut form, Field::WorkPhone, "555-0199");

    let fields = form.to_fields();
    assert_eq!(fields.first_name.as_deref(), Some("Ada"));
    assert_eq!(fields.last_name, None);
    assert_eq!(
      Value::Object(fields.extra),
      json!({ "email": "ada@example.com", "phone": { "work": "555-0199" } })
    );
  }

  #[test]
  fn focus_wraps_both_ways() {
    let mut form = ContactForm::default();
    form.prev();
    assert_eq!(form.focused(), Field::WorkPhone);
    form.next();
    assert_eq!(form.focused(), Field::FirstName);
  }

  #[test]
  fn backspace_edits_focused_field() {
    let mut form = ContactForm::default();
    type_into(&mut form, Field::LastName, "Lovelacex");
    form.pop();
    assert_eq!(form.value(Field::LastName), "Lovelace");
    assert_eq!(form.value(Field::FirstName), "");
  }

  #[test]
  fn apply_keeps_unmanaged_fields() {
    let mut contact = Contact::from_fields(
      ContactId::new(),
      Utc::now(),
      serde_json::from_value(json!({
        "firstName": "Ada",
        "email": "old@example.com",
        "phone": { "mobile": "555-0100", "fax": "555-0111" },
        "note": "analytical engine",
      }))
      .unwrap(),
    );

    let mut form = ContactForm::from_contact(&contact);
    assert_eq!(form.value(Field::Email), "old@example.com");
    assert_eq!(form.value(Field::MobilePhone), "555-0100");

    type_into(&mut form, Field::LastName, "Lovelace");
    while form.focused() != Field::Email {
      form.next();
    }
    while !form.value(Field::Email).is_empty() {
      form.pop();
    }
    form.apply_to(&mut contact);

    assert_eq!(contact.last_name.as_deref(), Some("Lovelace"));
    assert!(!contact.extra.contains_key("email"));
    assert_eq!(contact.extra["phone"], json!({ "mobile": "555-0100", "fax": "555-0111" }));
    assert_eq!(contact.extra["note"], "analytical engine");
  }

  #[test]
  fn untouched_fields_of_unexpected_shape_survive() {
    let mut contact = Contact::from_fields(
      ContactId::new(),
      Utc::now(),
      serde_json::from_value(json!({
        "firstName": "Ada",
        "email": ["ada@example.com", "countess@example.com"],
        "phone": "555-0100",
      }))
      .unwrap(),
    );
    let before = contact.extra.clone();

    let form = ContactForm::from_contact(&contact);
    assert_eq!(form.value(Field::Email), "");
    form.apply_to(&mut contact);

    assert_eq!(contact.extra, before);
    assert_eq!(contact.first_name.as_deref(), Some("Ada"));
  }

  #[test]
  fn edited_number_replaces_non_object_phone() {
    let mut contact = Contact::from_fields(
      ContactId::new(),
      Utc::now(),
      serde_json::from_value(json!({
        "firstName": "Ada",
        "email": ["ada@example.com"],
        "phone": "555-0100",
      }))
      .unwrap(),
    );

    let mut form = ContactForm::from_contact(&contact);
    type_into(&mut form, Field::MobilePhone, "555-0142");
    form.apply_to(&mut contact);

    assert_eq!(contact.extra["phone"], json!({ "mobile": "555-0142" }));
    assert_eq!(contact.extra["email"], json!(["ada@example.com"]));
  }
}
