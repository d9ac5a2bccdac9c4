use askama::Template;

use super::{log_transport, Confirm, Console, TableSpec};
use crate::api::ApiRequest;
use crate::models::{Donation, DonationRequest, CO_OP};
use crate::view::format::{euros, pretty_date};
use crate::view::{ViewState, CONNECTION_ERROR_TEXT};

pub const DONATIONS_EMPTY: &str = "No donations yet";
pub const DELETE_DONATION_PROMPT: &str = "Are you sure you want to delete this donation?";

#[derive(Template)]
#[template(path = "rows/donation.html")]
struct DonationRow<'a> {
    id: u64,
    coins: u64,
    donated: String,
    income: String,
    co_op: &'a str,
    prefix: &'a str,
}

/// Raw donation form fields, as submitted.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct DonationInput {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub coins: String,
    #[serde(default)]
    pub income_eur: String,
}

impl Console<'_> {
    /// Reload both admin tables. The supporters table reads its donation
    /// columns from the donations just loaded.
    pub async fn load_admin_tables(&mut self, view: &mut ViewState) {
        let prefix = self.config.console.hosting_prefix.clone();

        view.donations = self
            .load_table(
                TableSpec {
                    path: "/donations".to_string(),
                    empty_text: DONATIONS_EMPTY,
                    colspan: 5,
                },
                |d: &Donation| {
                    DonationRow {
                        id: d.id,
                        coins: d.coins,
                        donated: pretty_date(&d.donated_at),
                        income: euros(d.income_eur),
                        co_op: &d.co_op,
                        prefix: &prefix,
                    }
                    .render()
                },
            )
            .await;

        self.load_supporters(view).await;
    }

    pub async fn submit_donation(&mut self, view: &mut ViewState, input: DonationInput) {
        let form = &mut view.donation_form;
        form.coins = input.coins.trim().to_string();
        form.income_eur = input.income_eur.trim().to_string();

        let id = match parse_optional_id(&input.id) {
            Ok(id) => id,
            Err(()) => {
                form.status = "Failed ❌: invalid donation id".to_string();
                return;
            }
        };
        form.id = id;

        let Ok(coins) = form.coins.parse::<u64>() else {
            form.status = "Failed ❌: coins must be a whole number".to_string();
            return;
        };
        let Ok(income_eur) = form.income_eur.parse::<f64>() else {
            form.status = "Failed ❌: income must be a number".to_string();
            return;
        };

        let body = DonationRequest {
            coins,
            income_eur,
            co_op: CO_OP.to_string(),
        };
        let request = match id {
            Some(id) => ApiRequest::put(format!("/donations/{}", id)),
            None => ApiRequest::post("/donations"),
        };

        let result = match request.json(&body) {
            Ok(request) => self.send(request).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(res) if res.is_ok() => {
                tracing::info!("Donation {} saved", id.map_or("new".to_string(), |i| i.to_string()));
                view.donation_form.reset();
                view.donation_form.status = if id.is_some() {
                    "Donation updated ✅".to_string()
                } else {
                    "Donation added ✅".to_string()
                };
                self.load_admin_tables(view).await;
            }
            Ok(res) => {
                view.donation_form.status = format!("Failed ❌: {}", res.text());
            }
            Err(e) => {
                log_transport("Donation submit", &e);
                view.donation_form.status = CONNECTION_ERROR_TEXT.to_string();
            }
        }
    }

    /// Switch the donation form to update mode for a row already on the page.
    pub fn edit_donation(&self, view: &mut ViewState, id: u64) {
        match view.donations.items.iter().find(|d| d.id == id) {
            Some(donation) => view.donation_form.edit(donation),
            None => view.alert("Donation not found"),
        }
    }

    pub async fn delete_donation(&mut self, view: &mut ViewState, id: u64, confirm: &dyn Confirm) {
        if !confirm.confirm(DELETE_DONATION_PROMPT) {
            return;
        }

        match self.send(ApiRequest::delete(format!("/donations/{}", id))).await {
            Ok(res) if res.is_ok() => {
                view.alert("Donation deleted ✅");
                self.load_admin_tables(view).await;
            }
            Ok(res) => view.alert(res.text()),
            Err(e) => {
                log_transport("Donation delete", &e);
                view.alert(CONNECTION_ERROR_TEXT);
            }
        }
    }
}

/// Empty means "create"; anything else must be a numeric id.
pub(crate) fn parse_optional_id(raw: &str) -> Result<Option<u64>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| ())
}
