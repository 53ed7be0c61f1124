use serde::{Deserialize, Serialize};

use crate::domain::common::Fields;

/// Contact details shared by clubs, federations, associations and officials.
///
/// Flattened into the owning entity when serialized, so a written-back
/// record keeps the flat `email`/`phone` columns the tables use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
}

impl Contact {
    pub(crate) fn from_fields(fields: &Fields<'_>) -> Self {
        Self {
            email: fields.text(&["email", "contact_email", "contacto_email"]),
            phone: fields.text(&["phone", "telefone", "contact_phone", "telemovel"]),
            address: fields.text(&["address", "morada", "endereco"]),
            website: fields.text(&["website", "site", "url"]),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.website.is_none()
    }
}

/// A person's name resolved from either a single `name` field or split
/// `first_name`/`last_name` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PersonName {
    pub first: String,
    pub last: String,
    pub display: String,
}

impl PersonName {
    pub(crate) fn from_fields(fields: &Fields<'_>) -> Self {
        let first = fields.text(&["first_name", "firstname", "primeiro_nome"]);
        let last = fields.text(&["last_name", "lastname", "apelido", "ultimo_nome"]);
        let full = fields.text(&["name", "nome", "full_name", "display_name"]);

        match (first, last, full) {
            (None, None, Some(full)) => {
                let (first, last) = match full.split_once(char::is_whitespace) {
                    Some((first, last)) => (first.to_string(), last.trim().to_string()),
                    None => (full.clone(), String::new()),
                };
                Self {
                    first,
                    last,
                    display: full,
                }
            }
            (first, last, full) => {
                let first = first.unwrap_or_default();
                let last = last.unwrap_or_default();
                let display = full.unwrap_or_else(|| join_name(&first, &last));
                Self {
                    first,
                    last,
                    display,
                }
            }
        }
    }
}

fn join_name(first: &str, last: &str) -> String {
    match (first.is_empty(), last.is_empty()) {
        (false, false) => format!("{first} {last}"),
        (false, true) => first.to_string(),
        (true, false) => last.to_string(),
        (true, true) => String::new(),
    }
}
