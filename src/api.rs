//! Client for the finance REST API.
//!
//! Pages only talk to the [FinanceApi] trait so the aggregation and sync logic
//! can run against an in-memory fake in tests.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::models::{
    CardScope, CardStatement, ExpensesResponse, Filter, IncomeResponse, SyncResponse,
};
use crate::sync::SyncAction;

#[async_trait(?Send)]
pub trait FinanceApi {
    async fn expenses(&self, filter: Filter) -> Result<ExpensesResponse, ApiError>;

    async fn incomes(&self, filter: Filter) -> Result<IncomeResponse, ApiError>;

    async fn card_statement(
        &self,
        filter: Filter,
        scope: CardScope,
    ) -> Result<CardStatement, ApiError>;

    async fn sync(&self, action: SyncAction) -> Result<SyncResponse, ApiError>;
}

pub fn expenses_path(filter: Filter) -> String {
    format!("/expenses/{}/{}", filter.year, filter.month)
}

pub fn incomes_path(filter: Filter) -> String {
    format!("/incomes/{}/{}", filter.year, filter.month)
}

pub fn card_statement_path(filter: Filter, scope: CardScope) -> String {
    format!(
        "/getResumeExpenses/{}/{}/{}",
        filter.year,
        filter.month,
        scope.path_segment()
    )
}

/// Talks to the real API over `fetch`.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpFinanceApi {
    base_url: String,
}

impl HttpFinanceApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url_for(path);
        tracing::debug!("GET {url}");

        let response = Request::get(&url).send().await.map_err(|error| {
            tracing::error!("request to {url} failed: {error}");
            ApiError::from(error)
        })?;

        if !response.ok() {
            tracing::error!("{url} answered with status {}", response.status());
            return Err(ApiError::Status {
                status: response.status(),
                url,
            });
        }

        response.json::<T>().await.map_err(|error| {
            tracing::error!("could not decode the body from {url}: {error}");
            ApiError::Decode(error.to_string())
        })
    }
}

#[async_trait(?Send)]
impl FinanceApi for HttpFinanceApi {
    async fn expenses(&self, filter: Filter) -> Result<ExpensesResponse, ApiError> {
        self.get_json(&expenses_path(filter)).await
    }

    async fn incomes(&self, filter: Filter) -> Result<IncomeResponse, ApiError> {
        self.get_json(&incomes_path(filter)).await
    }

    async fn card_statement(
        &self,
        filter: Filter,
        scope: CardScope,
    ) -> Result<CardStatement, ApiError> {
        self.get_json(&card_statement_path(filter, scope)).await
    }

    async fn sync(&self, action: SyncAction) -> Result<SyncResponse, ApiError> {
        self.get_json(action.path()).await
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CardNetwork;

    #[test]
    fn builds_period_paths() {
        let filter = Filter::new(2025, 6);

        assert_eq!(expenses_path(filter), "/expenses/2025/6");
        assert_eq!(incomes_path(filter), "/incomes/2025/6");
        assert_eq!(
            card_statement_path(filter, CardScope::All),
            "/getResumeExpenses/2025/6/all"
        );
        assert_eq!(
            card_statement_path(filter, CardScope::Network(CardNetwork::Mastercard)),
            "/getResumeExpenses/2025/6/mastercard"
        );
    }

    #[test]
    fn urls_join_base_and_path() {
        let api = HttpFinanceApi::new("http://192.168.1.11:8000");

        assert_eq!(
            api.url_for(SyncAction::IncomesHistorical.path()),
            "http://192.168.1.11:8000/syncIncomes/historical"
        );
    }
}
