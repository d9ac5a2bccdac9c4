use std::collections::HashMap;

use askama::Template;

use super::donations::parse_optional_id;
use super::{log_transport, Confirm, Console, TableSpec};
use crate::api::{ApiError, ApiRequest, ApiResponse, ApiResult};
use crate::models::{Donation, DonationRequest, IdResponse, Supporter, SupporterRequest, CO_OP};
use crate::view::format::{euros, pretty_date};
use crate::view::{ViewState, CONNECTION_ERROR_TEXT};

pub const SUPPORTERS_EMPTY: &str = "No supporters yet";
pub const DELETE_SUPPORTER_PROMPT: &str = "Delete supporter?";
const NETWORK_ERROR_TEXT: &str = "Network error ❌";

/// Supporter row. The date, income and co-op columns come from the linked donation.
#[derive(Template)]
#[template(path = "rows/supporter.html")]
struct SupporterRow<'a> {
    id: u64,
    name: &'a str,
    donation: Option<DonationCells<'a>>,
    prefix: &'a str,
}

struct DonationCells<'a> {
    donated: String,
    income: String,
    co_op: &'a str,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct SupporterInput {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub income_eur: String,
}

/// Why a supporter submit stopped before finishing.
enum Halt {
    Status(&'static str),
    Transport,
}

impl Console<'_> {
    pub(super) async fn load_supporters(&mut self, view: &mut ViewState) {
        let prefix = self.config.console.hosting_prefix.clone();
        let donations: HashMap<u64, &Donation> =
            view.donations.items.iter().map(|d| (d.id, d)).collect();

        let supporters = self
            .load_table(
                TableSpec {
                    path: "/supporters".to_string(),
                    empty_text: SUPPORTERS_EMPTY,
                    colspan: 5,
                },
                |s: &Supporter| {
                    SupporterRow {
                        id: s.id,
                        name: &s.name,
                        donation: donations.get(&s.donation_id).map(|d| DonationCells {
                            donated: pretty_date(&d.donated_at),
                            income: euros(d.income_eur),
                            co_op: &d.co_op,
                        }),
                        prefix: &prefix,
                    }
                    .render()
                },
            )
            .await;

        view.supporters = supporters;
    }

    /// Create or update a supporter.
    ///
    /// Creating takes two calls: a donation carrying the income, then the
    /// supporter pointing at it. Nothing is undone if the second call fails,
    /// which leaves the donation without a supporter.
    pub async fn submit_supporter(&mut self, view: &mut ViewState, input: SupporterInput) {
        let form = &mut view.supporter_form;
        form.name = input.name.clone();
        form.income_eur = input.income_eur.trim().to_string();

        let id = match parse_optional_id(&input.id) {
            Ok(id) => id,
            Err(()) => {
                form.status = "Failed ❌: invalid supporter id".to_string();
                return;
            }
        };
        form.id = id;

        let outcome = match id {
            None => {
                let Ok(income_eur) = form.income_eur.parse::<f64>() else {
                    form.status = "Failed ❌: income must be a number".to_string();
                    return;
                };
                self.create_supporter(&input.name, income_eur).await
            }
            Some(id) => self.update_supporter(id, &input.name).await,
        };

        match outcome {
            Ok(done) => {
                view.supporter_form.reset();
                view.supporter_form.status = done.to_string();
                self.load_admin_tables(view).await;
            }
            Err(Halt::Status(status)) => view.supporter_form.status = status.to_string(),
            Err(Halt::Transport) => view.supporter_form.status = NETWORK_ERROR_TEXT.to_string(),
        }
    }

    async fn create_supporter(&mut self, name: &str, income_eur: f64) -> Result<&'static str, Halt> {
        let donation = DonationRequest {
            coins: 0,
            income_eur,
            co_op: CO_OP.to_string(),
        };
        let res = self
            .call("Donation create", ApiRequest::post("/donations").json(&donation))
            .await?;
        if !res.is_ok() {
            return Err(Halt::Status("Failed to create donation ❌"));
        }
        let donation_id = res
            .json::<IdResponse>()
            .map_err(|e| transport("Donation create", e))?
            .id;

        let supporter = SupporterRequest {
            name: name.to_string(),
            donation_id,
        };
        let res = self
            .call("Supporter create", ApiRequest::post("/supporters").json(&supporter))
            .await?;
        if !res.is_ok() {
            tracing::warn!(
                "Supporter create failed; donation {} has no supporter",
                donation_id
            );
            return Err(Halt::Status("Failed to create supporter ❌"));
        }

        Ok("Supporter added ✅")
    }

    async fn update_supporter(&mut self, id: u64, name: &str) -> Result<&'static str, Halt> {
        let path = format!("/supporters/{}", id);

        let res = self.call("Supporter fetch", Ok(ApiRequest::get(&path))).await?;
        if !res.is_ok() {
            return Err(Halt::Status("Failed to fetch supporter data ❌"));
        }
        let donation_id = res
            .json::<Supporter>()
            .map_err(|e| transport("Supporter fetch", e))?
            .donation_id;

        let supporter = SupporterRequest {
            name: name.to_string(),
            donation_id,
        };
        let res = self
            .call("Supporter update", ApiRequest::put(&path).json(&supporter))
            .await?;
        if !res.is_ok() {
            return Err(Halt::Status("Failed to update supporter ❌"));
        }

        Ok("Supporter updated ✅")
    }

    /// Send `request`, logging any failure to build or deliver it.
    async fn call(
        &mut self,
        action: &str,
        request: ApiResult<ApiRequest>,
    ) -> Result<ApiResponse, Halt> {
        let result = match request {
            Ok(request) => self.send(request).await,
            Err(e) => Err(e),
        };
        result.map_err(|e| transport(action, e))
    }

    pub fn edit_supporter(&self, view: &mut ViewState, id: u64) {
        match view.supporters.items.iter().find(|s| s.id == id) {
            Some(supporter) => view.supporter_form.edit(supporter),
            None => view.alert("Supporter not found"),
        }
    }

    pub async fn delete_supporter(&mut self, view: &mut ViewState, id: u64, confirm: &dyn Confirm) {
        if !confirm.confirm(DELETE_SUPPORTER_PROMPT) {
            return;
        }

        match self.send(ApiRequest::delete(format!("/supporters/{}", id))).await {
            Ok(res) if res.is_ok() => self.load_admin_tables(view).await,
            Ok(res) => view.alert(res.text()),
            Err(e) => {
                log_transport("Supporter delete", &e);
                view.alert(CONNECTION_ERROR_TEXT);
            }
        }
    }
}

fn transport(action: &str, err: ApiError) -> Halt {
    log_transport(action, &err);
    Halt::Transport
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::RecordingBackend;
    use crate::config::Config;
    use axum::http::{Method, StatusCode};

    fn new_supporter() -> SupporterInput {
        SupporterInput {
            id: String::new(),
            name: "Ada".to_string(),
            income_eur: "15".to_string(),
        }
    }

    #[tokio::test]
    async fn create_posts_donation_then_supporter() {
        let backend = RecordingBackend::new()
            .respond(StatusCode::CREATED, r#"{"id":31}"#)
            .respond(StatusCode::CREATED, r#"{"id":8}"#)
            .respond(StatusCode::OK, "[]")
            .respond(StatusCode::OK, "[]");
        let config = Config::default();
        let mut console = Console::new(&backend, &config, None);
        let mut view = ViewState::new();

        console.submit_supporter(&mut view, new_supporter()).await;

        let requests = backend.requests();
        let posts: Vec<_> = requests
            .iter()
            .filter(|r| r.method == Method::POST)
            .collect();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].path, "/donations");
        assert_eq!(
            posts[0].body,
            Some(serde_json::json!({ "coins": 0, "income_eur": 15.0, "co_op": "STUDIO-MATIC" }))
        );
        assert_eq!(posts[1].path, "/supporters");
        assert_eq!(
            posts[1].body,
            Some(serde_json::json!({ "name": "Ada", "donation_id": 31 }))
        );
        assert_eq!(view.supporter_form.status, "Supporter added ✅");
    }

    #[tokio::test]
    async fn failed_donation_stops_before_supporter() {
        let backend = RecordingBackend::new().respond(StatusCode::UNAUTHORIZED, "");
        let config = Config::default();
        let mut console = Console::new(&backend, &config, None);
        let mut view = ViewState::new();

        console.submit_supporter(&mut view, new_supporter()).await;

        assert_eq!(backend.calls().len(), 1);
        assert_eq!(view.supporter_form.status, "Failed to create donation ❌");
        assert_eq!(view.supporter_form.name, "Ada");
    }

    #[tokio::test]
    async fn failed_supporter_leaves_donation_behind() {
        let backend = RecordingBackend::new()
            .respond(StatusCode::CREATED, r#"{"id":31}"#)
            .respond(StatusCode::INTERNAL_SERVER_ERROR, "");
        let config = Config::default();
        let mut console = Console::new(&backend, &config, None);
        let mut view = ViewState::new();

        console.submit_supporter(&mut view, new_supporter()).await;

        assert_eq!(
            backend.calls(),
            vec![
                (Method::POST, "/donations".to_string()),
                (Method::POST, "/supporters".to_string()),
            ]
        );
        assert_eq!(view.supporter_form.status, "Failed to create supporter ❌");
    }

    #[tokio::test]
    async fn update_keeps_existing_donation_link() {
        let backend = RecordingBackend::new()
            .respond(StatusCode::OK, r#"{"id":8,"name":"Ada","donation_id":31}"#)
            .respond(StatusCode::OK, "")
            .respond(StatusCode::OK, "[]")
            .respond(StatusCode::OK, "[]");
        let config = Config::default();
        let mut console = Console::new(&backend, &config, None);
        let mut view = ViewState::new();

        let input = SupporterInput {
            id: "8".to_string(),
            name: "Ada Lovelace".to_string(),
            income_eur: String::new(),
        };
        console.submit_supporter(&mut view, input).await;

        let requests = backend.requests();
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].path, "/supporters/8");
        assert_eq!(requests[1].method, Method::PUT);
        assert_eq!(
            requests[1].body,
            Some(serde_json::json!({ "name": "Ada Lovelace", "donation_id": 31 }))
        );
        assert_eq!(view.supporter_form.status, "Supporter updated ✅");
        assert!(!view.supporter_form.is_editing());
    }

    #[tokio::test]
    async fn update_with_missing_supporter_reports_fetch_failure() {
        let backend = RecordingBackend::new().respond(StatusCode::NOT_FOUND, "");
        let config = Config::default();
        let mut console = Console::new(&backend, &config, None);
        let mut view = ViewState::new();

        let input = SupporterInput {
            id: "8".to_string(),
            name: "Ada".to_string(),
            income_eur: String::new(),
        };
        console.submit_supporter(&mut view, input).await;

        assert_eq!(view.supporter_form.status, "Failed to fetch supporter data ❌");
        assert!(view.supporter_form.is_editing());
    }

    #[tokio::test]
    async fn transport_failure_reports_network_error() {
        let backend = RecordingBackend::new().fail();
        let config = Config::default();
        let mut console = Console::new(&backend, &config, None);
        let mut view = ViewState::new();

        console.submit_supporter(&mut view, new_supporter()).await;

        assert_eq!(view.supporter_form.status, "Network error ❌");
    }

    #[tokio::test]
    async fn unreachable_backend_after_donation_reports_network_error() {
        let backend = RecordingBackend::new()
            .respond(StatusCode::CREATED, r#"{"id":31}"#)
            .fail();
        let config = Config::default();
        let mut console = Console::new(&backend, &config, None);
        let mut view = ViewState::new();

        console.submit_supporter(&mut view, new_supporter()).await;

        assert_eq!(backend.calls().len(), 2);
        assert_eq!(view.supporter_form.status, "Network error ❌");
        assert_eq!(view.supporter_form.name, "Ada");
    }

    #[tokio::test]
    async fn undecodable_donation_id_stops_before_supporter() {
        let backend = RecordingBackend::new().respond(StatusCode::CREATED, "created");
        let config = Config::default();
        let mut console = Console::new(&backend, &config, None);
        let mut view = ViewState::new();

        console.submit_supporter(&mut view, new_supporter()).await;

        assert_eq!(backend.calls(), vec![(Method::POST, "/donations".to_string())]);
        assert_eq!(view.supporter_form.status, "Network error ❌");
    }

    #[tokio::test]
    async fn supporter_rows_use_linked_donation() {
        let backend = RecordingBackend::new()
            .respond(
                StatusCode::OK,
                r#"[{"id":31,"coins":0,"income_eur":15,"co_op":"STUDIO-MATIC","donated_at":"2024-01-02T00:00:00Z"}]"#,
            )
            .respond(
                StatusCode::OK,
                r#"[{"id":8,"name":"Ada","donation_id":31},{"id":9,"name":"Orphan","donation_id":77}]"#,
            );
        let config = Config::default();
        let mut console = Console::new(&backend, &config, None);
        let mut view = ViewState::new();

        console.load_admin_tables(&mut view).await;

        let html = view.supporters.html();
        assert!(html.contains("<td>Ada</td><td>02 Jan 2024</td><td>15.00</td><td>STUDIO-MATIC</td>"));
        assert!(html.contains("<td>Orphan</td><td>-</td><td>-</td><td>-</td>"));
        assert_eq!(backend.calls().len(), 2);
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let backend = RecordingBackend::new();
        let config = Config::default();
        let mut console = Console::new(&backend, &config, None);
        let mut view = ViewState::new();

        console
            .delete_supporter(&mut view, 8, &|q: &str| q != DELETE_SUPPORTER_PROMPT)
            .await;

        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_delete_alerts_body() {
        let backend = RecordingBackend::new().respond(StatusCode::NOT_FOUND, "\"Supporter not found\"");
        let config = Config::default();
        let mut console = Console::new(&backend, &config, None);
        let mut view = ViewState::new();

        console.delete_supporter(&mut view, 8, &|_: &str| true).await;

        assert_eq!(view.alerts, vec!["Supporter not found".to_string()]);
    }
}
