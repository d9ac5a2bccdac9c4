//! Client-side view state.
//!
//! Everything a page shows lives in a [`ViewState`] that controllers mutate and
//! templates read. Nothing here survives the request that built it.

use crate::models::{Donation, IssuedInvite, Me, Supporter, User};

pub mod format;

pub const LOADING_TEXT: &str = "Loading…";
pub const FAILED_TEXT: &str = "Failed to load data ❌";
pub const CONNECTION_ERROR_TEXT: &str = "Error connecting to backend ❌";

/// Contents of a table's `<tbody>`.
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    Loading,
    /// Backend answered with a non-success status
    Failed,
    /// Request never completed or the body was not the expected JSON
    ConnectionError,
    Empty(&'static str),
    /// Pre-rendered cell markup, one entry per `<tr>`
    Rows(Vec<String>),
}

impl TableBody {
    pub fn html(&self, colspan: usize) -> String {
        let single = |text: &str| format!("<tr><td colspan=\"{}\">{}</td></tr>", colspan, text);
        match self {
            TableBody::Loading => single(LOADING_TEXT),
            TableBody::Failed => single(FAILED_TEXT),
            TableBody::ConnectionError => single(CONNECTION_ERROR_TEXT),
            TableBody::Empty(text) => single(text),
            TableBody::Rows(rows) => rows
                .iter()
                .map(|cells| format!("<tr>{}</tr>", cells))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table<T> {
    pub body: TableBody,
    /// Items behind the rendered rows; empty unless the load succeeded
    pub items: Vec<T>,
    pub colspan: usize,
}

impl<T> Table<T> {
    pub fn loading(colspan: usize) -> Self {
        Self {
            body: TableBody::Loading,
            items: Vec::new(),
            colspan,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.body != TableBody::Loading
    }

    pub fn html(&self) -> String {
        self.body.html(self.colspan)
    }
}

/// Donation form, shared by create and edit. A set `id` means edit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonationForm {
    pub id: Option<u64>,
    pub coins: String,
    pub income_eur: String,
    pub status: String,
}

impl DonationForm {
    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    pub fn heading(&self) -> &'static str {
        if self.is_editing() {
            "Update a donation"
        } else {
            "Add a new donation"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Update Donation"
        } else {
            "Add Donation"
        }
    }

    pub fn id_value(&self) -> String {
        self.id.map(|id| id.to_string()).unwrap_or_default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn edit(&mut self, donation: &Donation) {
        self.id = Some(donation.id);
        self.coins = donation.coins.to_string();
        self.income_eur = format::euros(donation.income_eur);
    }
}

/// Supporter form. Editing keeps the linked donation, so the income field hides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupporterForm {
    pub id: Option<u64>,
    pub name: String,
    pub income_eur: String,
    pub status: String,
}

impl SupporterForm {
    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    pub fn heading(&self) -> &'static str {
        if self.is_editing() {
            "Update Supporter"
        } else {
            "Add a new supporter"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Update Supporter"
        } else {
            "Add Supporter"
        }
    }

    pub fn show_income(&self) -> bool {
        !self.is_editing()
    }

    pub fn id_value(&self) -> String {
        self.id.map(|id| id.to_string()).unwrap_or_default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn edit(&mut self, supporter: &Supporter) {
        self.id = Some(supporter.id);
        self.name = supporter.name.clone();
        self.income_eur.clear();
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InviteForm {
    pub role: String,
    pub status: String,
}

/// Which login controls are visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthControls {
    pub signed_in: bool,
}

impl AuthControls {
    /// Email, password, sign-up and sign-in
    pub fn show_sign_in(&self) -> bool {
        !self.signed_in
    }

    pub fn show_sign_out(&self) -> bool {
        self.signed_in
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub donations: Table<Donation>,
    pub supporters: Table<Supporter>,
    pub users: Table<User>,
    pub invites: Vec<IssuedInvite>,
    pub donation_form: DonationForm,
    pub supporter_form: SupporterForm,
    pub invite_form: InviteForm,
    pub auth: AuthControls,
    /// Set once the guard has accepted the current user
    pub me: Option<Me>,
    /// Blocking messages, shown in order
    pub alerts: Vec<String>,
    pub redirect: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            donations: Table::loading(5),
            supporters: Table::loading(5),
            users: Table::loading(2),
            invites: Vec::new(),
            donation_form: DonationForm::default(),
            supporter_form: SupporterForm::default(),
            invite_form: InviteForm::default(),
            auth: AuthControls::default(),
            me: None,
            alerts: Vec::new(),
            redirect: None,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    pub fn redirect_to(&mut self, location: impl Into<String>) {
        self.redirect = Some(location.into());
    }

    /// Issued invites for the invite form's hidden field, so the next
    /// submit can show them again.
    pub fn issued_invites_field(&self) -> String {
        serde_json::to_string(&self.invites).unwrap_or_default()
    }
}
