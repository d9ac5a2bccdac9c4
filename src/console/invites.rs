use super::{log_transport, Console};
use crate::api::ApiRequest;
use crate::models::{InviteRequest, InviteResponse, IssuedInvite};
use crate::view::ViewState;

/// Invites issued earlier on this page, as carried in the form's hidden
/// `issued` field. Anything unreadable is dropped.
pub fn restore_invites(view: &mut ViewState, issued: &str) {
    if issued.trim().is_empty() {
        return;
    }
    match serde_json::from_str::<Vec<IssuedInvite>>(issued) {
        Ok(invites) => view.invites = invites,
        Err(e) => tracing::warn!("Ignoring unreadable issued invites: {}", e),
    }
}

impl Console<'_> {
    /// Ask the backend for an invite code and append it to the invites table.
    pub async fn invite(&mut self, view: &mut ViewState, role: &str) {
        let role = role.trim().to_string();
        view.invite_form.role = role.clone();

        if role.is_empty() {
            view.alert("Please enter a role");
            return;
        }

        let result = match ApiRequest::post("/users/auth/invite").json(&InviteRequest { role: &role }) {
            Ok(request) => self.send(request).await,
            Err(e) => Err(e),
        };

        let res = match result {
            Ok(res) => res,
            Err(e) => {
                log_transport("Invite", &e);
                view.invite_form.status = "Failed to send invite ❌".to_string();
                return;
            }
        };

        if !res.is_ok() {
            view.alert(res.text());
            return;
        }

        view.alert(format!("Invite for role \"{}\" created ✅", role));
        match res.json::<InviteResponse>() {
            Ok(InviteResponse { code }) => {
                tracing::info!("Issued invite for role {}", role);
                view.invites.push(IssuedInvite { code, role });
                view.invite_form.role.clear();
            }
            Err(e) => {
                log_transport("Invite", &e);
                view.invite_form.status = "Failed to send invite ❌".to_string();
            }
        }
    }
}
