use askama::Template;

use super::{log_transport, Confirm, Console, TableSpec};
use crate::api::ApiRequest;
use crate::models::User;
use crate::policy::can_delete;
use crate::view::{ViewState, CONNECTION_ERROR_TEXT};

pub const USERS_EMPTY: &str = "No users yet";
pub const DELETE_USER_PROMPT: &str = "Are you sure you want to delete this user?";

#[derive(Template)]
#[template(path = "rows/user.html")]
struct UserRow<'a> {
    id: u64,
    email: &'a str,
    deletable: bool,
    prefix: &'a str,
}

impl Console<'_> {
    /// Users table. Rows only get a delete control when the signed-in user
    /// outranks them.
    pub async fn load_users(&mut self, view: &mut ViewState) {
        let prefix = self.config.console.hosting_prefix.clone();
        let actor_rank = view.me.as_ref().map_or(0, |me| me.role_rank);

        view.users = self
            .load_table(
                TableSpec {
                    path: "/users".to_string(),
                    empty_text: USERS_EMPTY,
                    colspan: 2,
                },
                |u: &User| {
                    UserRow {
                        id: u.id,
                        email: &u.email,
                        deletable: can_delete(actor_rank, u.role_rank),
                        prefix: &prefix,
                    }
                    .render()
                },
            )
            .await;
    }

    pub async fn delete_user(&mut self, view: &mut ViewState, id: u64, confirm: &dyn Confirm) {
        if !confirm.confirm(DELETE_USER_PROMPT) {
            return;
        }

        match self.send(ApiRequest::delete(format!("/users/{}", id))).await {
            Ok(res) if res.is_ok() => {
                view.alert("User deleted ✅");
                self.load_users(view).await;
            }
            Ok(res) => view.alert(res.text()),
            Err(e) => {
                log_transport("User delete", &e);
                view.alert(CONNECTION_ERROR_TEXT);
            }
        }
    }
}
