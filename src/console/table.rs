use serde::de::DeserializeOwned;

use super::{log_transport, Console};
use crate::api::ApiRequest;
use crate::view::{Table, TableBody};

/// Where a table's rows come from and what it shows when there are none.
#[derive(Debug, Clone)]
pub struct TableSpec {
    pub path: String,
    pub empty_text: &'static str,
    pub colspan: usize,
}

impl Console<'_> {
    /// Fetch a JSON list and render one row per item with `columns`, which
    /// returns the cell markup for that item (usually a rendered row template).
    ///
    /// Never fails: a non-success status, an unreachable backend or an
    /// undecodable body each end up as a fixed row in the returned table.
    pub async fn load_table<T, F>(&mut self, spec: TableSpec, columns: F) -> Table<T>
    where
        T: DeserializeOwned,
        F: Fn(&T) -> askama::Result<String>,
    {
        let mut table = Table::loading(spec.colspan);

        let response = match self.send(ApiRequest::get(&spec.path)).await {
            Ok(response) => response,
            Err(e) => {
                log_transport(&format!("GET {}", spec.path), &e);
                table.body = TableBody::ConnectionError;
                return table;
            }
        };

        if !response.is_ok() {
            tracing::warn!("GET {} returned {}", spec.path, response.status);
            table.body = TableBody::Failed;
            return table;
        }

        let items: Vec<T> = match response.json() {
            Ok(items) => items,
            Err(e) => {
                log_transport(&format!("GET {}", spec.path), &e);
                table.body = TableBody::ConnectionError;
                return table;
            }
        };

        if items.is_empty() {
            table.body = TableBody::Empty(spec.empty_text);
            return table;
        }

        let rows = match items
            .iter()
            .map(&columns)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("Row render error for {}: {}", spec.path, e);
                table.body = TableBody::Failed;
                return table;
            }
        };

        table.body = TableBody::Rows(rows);
        table.items = items;
        table
    }
}
