mod api;
mod card;
mod card_expenses;
mod chart;
mod config;
mod currency;
mod dashboard;
mod error;
mod expenses;
mod layout;
mod logging;
mod models;
mod page;
mod routing;
mod sync;
mod toast;
mod viewport;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::api::HttpFinanceApi;
use crate::card_expenses::CardExpensesPage;
use crate::config::AppConfig;
use crate::dashboard::DashboardPage;
use crate::expenses::ExpensesPage;
use crate::layout::Layout;
use crate::models::Filter;
use crate::routing::{current_route, push_history, Route};
use crate::sync::SyncDataPage;
use crate::toast::ToastProvider;

/// Keep the route in step with the browser's back and forward buttons.
#[hook]
fn use_history_route() -> UseStateHandle<Route> {
    let route = use_state_eq(current_route);

    {
        let route = route.clone();
        use_effect_with_deps(
            move |_| {
                let window = web_sys::window();
                let listener = Closure::<dyn Fn()>::new(move || route.set(current_route()));
                if let Some(window) = &window {
                    if let Err(error) = window.add_event_listener_with_callback(
                        "popstate",
                        listener.as_ref().unchecked_ref(),
                    ) {
                        tracing::warn!("could not listen for history changes: {error:?}");
                    }
                }
                move || {
                    if let Some(window) = window {
                        let _ = window.remove_event_listener_with_callback(
                            "popstate",
                            listener.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    route
}

#[function_component(App)]
fn app() -> Html {
    let api = use_memo(
        |_| HttpFinanceApi::new(AppConfig::from_build_env().api_base_url),
        (),
    );
    let filter = use_state_eq(Filter::current);
    let route = use_history_route();

    let on_filter = {
        let filter = filter.clone();
        Callback::from(move |next: Filter| {
            tracing::debug!("filter changed to {next:?}");
            filter.set(next);
        })
    };
    let on_navigate = {
        let route = route.clone();
        Callback::from(move |next: Route| {
            if *route != next {
                push_history(next);
            }
            route.set(next);
        })
    };
    let on_back = {
        let on_navigate = on_navigate.clone();
        Callback::from(move |_: ()| on_navigate.emit(Route::Dashboard))
    };

    let page = match *route {
        Route::Dashboard => html! {
            <DashboardPage filter={*filter} on_navigate={on_navigate.clone()} />
        },
        Route::Expenses => html! { <ExpensesPage filter={*filter} /> },
        Route::CardExpenses(network) => html! {
            <CardExpensesPage filter={*filter} {network} {on_back} />
        },
        Route::SyncData => html! { <SyncDataPage /> },
    };

    html! {
        <ContextProvider<HttpFinanceApi> context={(*api).clone()}>
            <ToastProvider>
                <Layout filter={*filter} route={*route} {on_filter} {on_navigate}>
                    { page }
                </Layout>
            </ToastProvider>
        </ContextProvider<HttpFinanceApi>>
    }
}

fn main() {
    let config = AppConfig::from_build_env();
    logging::init_logging(config.log_level);
    tracing::info!("finanzas frontend starting against {}", config.api_base_url);
    yew::Renderer::<App>::new().render();
}
