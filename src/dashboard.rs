//! Monthly report: totals cards plus the category chart.

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::{FinanceApi, HttpFinanceApi};
use crate::card::{CardTone, SummaryCard};
use crate::chart::CategoryChart;
use crate::config::AppConfig;
use crate::currency::amount_or_zero;
use crate::error::ApiError;
use crate::models::{CardScope, CategoryTotal, Filter};
use crate::page::{error_view, loading_view, Loadable, RequestGeneration};
use crate::routing::Route;
use crate::viewport::use_is_mobile;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Totals {
    pub expense: f64,
    pub income: f64,
    pub remaining: f64,
    pub card: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardData {
    pub totals: Totals,
    pub categories: Vec<CategoryTotal>,
}

/// Fetch expenses, incomes and card statements for `filter` concurrently.
///
/// All three must succeed; the first failure is returned and nothing partial is kept.
pub async fn load_dashboard<A>(api: &A, filter: Filter) -> Result<DashboardData, ApiError>
where
    A: FinanceApi + ?Sized,
{
    let (expenses, income, cards) = futures::try_join!(
        api.expenses(filter),
        api.incomes(filter),
        api.card_statement(filter, CardScope::All),
    )?;

    let expense = expenses.expenses.total_value();
    let income = amount_or_zero(income.income.total_ars.as_ref());

    Ok(DashboardData {
        totals: Totals {
            expense,
            income,
            remaining: income - expense,
            card: cards.total_ars(),
        },
        categories: expenses.expenses.categories(),
    })
}

#[derive(Properties, PartialEq)]
pub struct DashboardPageProps {
    pub filter: Filter,
    pub on_navigate: Callback<Route>,
}

#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardPageProps) -> Html {
    let state = use_state(|| Loadable::<DashboardData>::Loading);
    let generation = use_mut_ref(RequestGeneration::default);
    let is_mobile = use_is_mobile();
    let api = use_context::<HttpFinanceApi>()
        .unwrap_or_else(|| HttpFinanceApi::new(AppConfig::default().api_base_url));

    {
        let state = state.clone();
        let generation = generation.clone();
        use_effect_with_deps(
            move |filter: &Filter| {
                let filter = *filter;
                let request = generation.borrow_mut().next();
                state.set(Loadable::Loading);

                spawn_local(async move {
                    let result = load_dashboard(&api, filter).await;
                    if !generation.borrow().is_current(request) {
                        tracing::debug!("dropping stale dashboard data for {filter:?}");
                        return;
                    }
                    match result {
                        Ok(data) => state.set(Loadable::Ready(data)),
                        Err(error) => {
                            tracing::error!("could not load the dashboard for {filter:?}: {error}");
                            state.set(Loadable::Failed(error.to_string()));
                        }
                    }
                });
                || ()
            },
            props.filter,
        );
    }

    let data = match &*state {
        Loadable::Loading => return loading_view("Cargando datos..."),
        Loadable::Failed(message) => return error_view(message),
        Loadable::Ready(data) => data,
    };

    let go_to = |route: Route| {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_: ()| on_navigate.emit(route))
    };

    html! {
        <>
            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4 mb-8">
                <SummaryCard title="Ingreso" value={data.totals.income} tone={CardTone::Income} />
                <SummaryCard title="Balance" value={data.totals.remaining} tone={CardTone::Balance} />
                <SummaryCard title="Gastos" value={data.totals.expense} tone={CardTone::Expense} on_detail={go_to(Route::Expenses)} />
                <SummaryCard title="Tarjetas" value={data.totals.card} tone={CardTone::Cards} on_detail={go_to(Route::CardExpenses(None))} />
            </div>

            <div class="bg-white p-6 rounded-xl shadow-sm mb-8">
                <h2 class="text-xl font-semibold text-gray-700 mb-4">{"Gastos en efectivo / debito"}</h2>
                <div class="min-h-96">
                    <CategoryChart data={data.categories.clone()} {is_mobile} />
                </div>
            </div>
        </>
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::api::fake::FakeFinanceApi;

    fn june_api() -> FakeFinanceApi {
        FakeFinanceApi::new()
            .respond(
                "/expenses/2025/6",
                json!({
                    "expenses": {
                        "total": "1.000,00",
                        "total_by_expense_type": { "Servicios": "700,00", "Delivery": "300,00" },
                        "expenses": []
                    }
                }),
            )
            .respond("/incomes/2025/6", json!({ "income": { "total_ars": "500,00" } }))
            .respond(
                "/getResumeExpenses/2025/6/all",
                json!({
                    "cards": [
                        { "holders": [ { "holder": "Ana", "total_ars": "2.000,50" } ] },
                        { "holders": [ { "holder": "Luis", "total_ars": "100,00" } ] }
                    ]
                }),
            )
    }

    #[test]
    fn combines_the_three_responses() {
        let api = june_api();

        let data = block_on(load_dashboard(&api, Filter::new(2025, 6))).unwrap();

        assert_eq!(
            data.totals,
            Totals {
                expense: 1000.0,
                income: 500.0,
                remaining: -500.0,
                card: 2100.5,
            }
        );
        assert_eq!(data.categories.len(), 2);
    }

    #[test]
    fn requests_every_endpoint_for_the_filter() {
        let api = june_api();

        block_on(load_dashboard(&api, Filter::new(2025, 6))).unwrap();

        let mut calls = api.calls.borrow().clone();
        calls.sort();
        assert_eq!(
            calls,
            [
                "/expenses/2025/6",
                "/getResumeExpenses/2025/6/all",
                "/incomes/2025/6"
            ]
        );
    }

    #[test]
    fn any_failed_request_fails_the_whole_dashboard() {
        let api = june_api().fail(
            "/incomes/2025/6",
            ApiError::Status {
                status: 500,
                url: "/incomes/2025/6".to_string(),
            },
        );

        let result = block_on(load_dashboard(&api, Filter::new(2025, 6)));

        assert_eq!(
            result,
            Err(ApiError::Status {
                status: 500,
                url: "/incomes/2025/6".to_string()
            })
        );
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let api = june_api().respond("/getResumeExpenses/2025/6/all", json!({ "cards": "nope" }));

        let result = block_on(load_dashboard(&api, Filter::new(2025, 6)));

        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn missing_totals_count_as_zero() {
        let api = FakeFinanceApi::new()
            .respond("/expenses/2025/1", json!({ "expenses": {} }))
            .respond("/incomes/2025/1", json!({}))
            .respond("/getResumeExpenses/2025/1/all", json!({}));

        let data = block_on(load_dashboard(&api, Filter::new(2025, 1))).unwrap();

        assert_eq!(data, DashboardData::default());
    }
}
