//! Card statements grouped by network and cardholder.

use std::collections::{HashMap, HashSet};

use futures::future::join_all;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api::{FinanceApi, HttpFinanceApi};
use crate::config::AppConfig;
use crate::currency::{format_ars, format_usd, RawAmount};
use crate::models::{CardExpense, CardHolder, CardNetwork, CardScope, CardStatement, Filter};
use crate::page::{icon_arrow_left, icon_chevron_down, loading_view, RequestGeneration};
use crate::viewport::use_is_mobile;

/// Identifies one holder inside the statements of a network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HolderKey {
    pub network: CardNetwork,
    pub card: usize,
    pub holder: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HolderSubtotal {
    pub ars: Option<f64>,
    pub usd: Option<f64>,
}

fn matches_search(expense: &CardExpense, search: &str) -> bool {
    let search = search.trim().to_lowercase();
    search.is_empty() || expense.descriptions.to_lowercase().contains(&search)
}

pub fn filtered_expenses<'a>(holder: &'a CardHolder, search: &str) -> Vec<&'a CardExpense> {
    holder
        .expenses
        .iter()
        .filter(|expense| matches_search(expense, search))
        .collect()
}

fn sum_amounts<'a>(amounts: impl Iterator<Item = Option<&'a RawAmount>>) -> f64 {
    amounts.filter_map(|amount| amount.and_then(RawAmount::value)).sum()
}

/// The statement totals, or the sum over the filtered expenses when a search is active.
pub fn holder_subtotal(holder: &CardHolder, search: &str) -> HolderSubtotal {
    if search.trim().is_empty() {
        return HolderSubtotal {
            ars: holder.total_ars.as_ref().and_then(RawAmount::value),
            usd: holder.total_usd.as_ref().and_then(RawAmount::value),
        };
    }

    let visible = filtered_expenses(holder, search);
    HolderSubtotal {
        ars: Some(sum_amounts(visible.iter().map(|e| e.amount_pesos.as_ref()))),
        usd: Some(sum_amounts(visible.iter().map(|e| e.amount_usd.as_ref()))),
    }
}

/// Fetch each network's statement concurrently.
///
/// A failed network is logged and comes back as `None`; the others still load.
pub async fn load_card_statements<A>(
    api: &A,
    filter: Filter,
    networks: &[CardNetwork],
) -> Vec<(CardNetwork, Option<CardStatement>)>
where
    A: FinanceApi + ?Sized,
{
    let requests = networks.iter().map(|network| async move {
        match api.card_statement(filter, CardScope::Network(*network)).await {
            Ok(statement) => (*network, Some(statement)),
            Err(error) => {
                tracing::warn!("could not load the {network} statement for {filter:?}: {error}");
                (*network, None)
            }
        }
    });

    join_all(requests).await
}

fn display_or_dash(value: Option<f64>, format: fn(f64) -> String) -> String {
    value.map(format).unwrap_or_else(|| "-".to_string())
}

fn display_amount(amount: Option<&RawAmount>, format: fn(f64) -> String) -> String {
    display_or_dash(amount.and_then(RawAmount::value), format)
}

fn holder_expense_rows(expenses: &[&CardExpense], is_mobile: bool) -> Html {
    if expenses.is_empty() {
        return html! { <div class="p-3 text-sm text-gray-500">{"Sin movimientos."}</div> };
    }

    if is_mobile {
        return html! {
            <div class="p-3 space-y-2">
                { for expenses.iter().enumerate().map(|(idx, expense)| html! {
                    <div key={idx} class="border border-gray-200 rounded-lg p-2">
                        <div class="flex justify-between text-xs">
                            <span class="font-medium text-gray-700">{"Fecha:"}</span>
                            <span class="text-gray-700">{ expense.date.clone() }</span>
                        </div>
                        <p class="text-xs text-gray-700 mt-1">{ expense.descriptions.clone() }</p>
                        <div class="grid grid-cols-2 gap-1 mt-1 text-xs">
                            <span>{ format!("ARS: {}", display_amount(expense.amount_pesos.as_ref(), format_ars)) }</span>
                            <span>{ format!("USD: {}", display_amount(expense.amount_usd.as_ref(), format_usd)) }</span>
                        </div>
                    </div>
                }) }
            </div>
        };
    }

    html! {
        <div class="p-2">
            <table class="min-w-full divide-y divide-gray-200">
                <thead class="bg-gray-50">
                    <tr>
                        <th class="px-3 py-2 text-left text-xs font-medium text-gray-500 uppercase">{"Fecha"}</th>
                        <th class="px-3 py-2 text-left text-xs font-medium text-gray-500 uppercase">{"Descripción"}</th>
                        <th class="px-3 py-2 text-left text-xs font-medium text-gray-500 uppercase">{"ARS"}</th>
                        <th class="px-3 py-2 text-left text-xs font-medium text-gray-500 uppercase">{"USD"}</th>
                    </tr>
                </thead>
                <tbody class="bg-white divide-y divide-gray-200">
                    { for expenses.iter().enumerate().map(|(idx, expense)| html! {
                        <tr key={idx} class="hover:bg-gray-50">
                            <td class="px-3 py-2 whitespace-nowrap text-sm text-gray-700">{ expense.date.clone() }</td>
                            <td class="px-3 py-2 text-sm text-gray-700 max-w-xs"><div class="truncate">{ expense.descriptions.clone() }</div></td>
                            <td class="px-3 py-2 whitespace-nowrap text-sm text-gray-700">{ display_amount(expense.amount_pesos.as_ref(), format_ars) }</td>
                            <td class="px-3 py-2 whitespace-nowrap text-sm text-gray-700">{ display_amount(expense.amount_usd.as_ref(), format_usd) }</td>
                        </tr>
                    }) }
                </tbody>
            </table>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct HolderPanelProps {
    holder: CardHolder,
    expanded: bool,
    search: String,
    is_mobile: bool,
    on_toggle: Callback<()>,
    on_search: Callback<String>,
}

#[function_component(HolderPanel)]
fn holder_panel(props: &HolderPanelProps) -> Html {
    let subtotal = holder_subtotal(&props.holder, &props.search);
    let toggle = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_| on_toggle.emit(()))
    };
    let on_input = {
        let on_search = props.on_search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_search.emit(input.value());
        })
    };
    let chevron = if props.expanded {
        "text-gray-500 transition-transform rotate-180"
    } else {
        "text-gray-500 transition-transform"
    };

    html! {
        <div class="relative">
            <div class="sticky top-0 bg-gray-50 z-10 p-2 border-b border-gray-200 flex justify-between items-center cursor-pointer hover:bg-gray-100" onclick={toggle}>
                <h3 class="font-semibold text-gray-800 ml-2">{ props.holder.holder.clone() }</h3>
                <div class="flex items-center">
                    <div class="flex flex-wrap gap-2 mr-3">
                        <div class="bg-blue-50 text-blue-800 px-2 py-1 rounded-lg text-xs whitespace-nowrap">
                            { format!("ARS: {}", display_or_dash(subtotal.ars, format_ars)) }
                        </div>
                        <div class="bg-green-50 text-green-800 px-2 py-1 rounded-lg text-xs whitespace-nowrap">
                            { format!("USD: {}", display_or_dash(subtotal.usd, format_usd)) }
                        </div>
                    </div>
                    <span class={chevron}>{ icon_chevron_down() }</span>
                </div>
            </div>
            if props.expanded {
                <div class="overflow-y-auto max-h-[40vh]">
                    <div class="p-2">
                        <input
                            class="p-2 border rounded-md w-full text-sm"
                            placeholder="Filtrar consumos..."
                            value={props.search.clone()}
                            oninput={on_input}
                        />
                    </div>
                    { holder_expense_rows(&filtered_expenses(&props.holder, &props.search), props.is_mobile) }
                </div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CardExpensesPageProps {
    pub filter: Filter,
    #[prop_or_default]
    pub network: Option<CardNetwork>,
    pub on_back: Callback<()>,
}

#[function_component(CardExpensesPage)]
pub fn card_expenses_page(props: &CardExpensesPageProps) -> Html {
    let statements = use_state(|| None::<Vec<(CardNetwork, Option<CardStatement>)>>);
    let expanded = use_state(HashSet::<HolderKey>::new);
    let searches = use_state(HashMap::<HolderKey, String>::new);
    let generation = use_mut_ref(RequestGeneration::default);
    let is_mobile = use_is_mobile();
    let api = use_context::<HttpFinanceApi>()
        .unwrap_or_else(|| HttpFinanceApi::new(AppConfig::default().api_base_url));

    {
        let statements = statements.clone();
        let expanded = expanded.clone();
        let searches = searches.clone();
        let generation = generation.clone();
        use_effect_with_deps(
            move |(filter, network): &(Filter, Option<CardNetwork>)| {
                let filter = *filter;
                let networks = match network {
                    Some(network) => vec![*network],
                    None => CardNetwork::ALL.to_vec(),
                };
                let request = generation.borrow_mut().next();
                statements.set(None);
                expanded.set(HashSet::new());
                searches.set(HashMap::new());

                spawn_local(async move {
                    let loaded = load_card_statements(&api, filter, &networks).await;
                    if generation.borrow().is_current(request) {
                        statements.set(Some(loaded));
                    }
                });
                || ()
            },
            (props.filter, props.network),
        );
    }

    let back = {
        let on_back = props.on_back.clone();
        html! {
            <button type="button" class="flex items-center gap-1 text-blue-600 mb-4 hover:text-blue-800" onclick={Callback::from(move |_| on_back.emit(()))}>
                { icon_arrow_left() }
                {"Volver"}
            </button>
        }
    };

    let Some(loaded) = &*statements else {
        return html! {
            <div class="max-w-4xl mx-auto">
                { back }
                <div class="bg-white rounded-xl shadow-sm">{ loading_view("Cargando...") }</div>
            </div>
        };
    };

    let network_section = |(network, statement): &(CardNetwork, Option<CardStatement>)| {
        let network = *network;
        let holders = statement
            .iter()
            .flat_map(|statement| statement.cards.iter().enumerate())
            .flat_map(|(card, c)| {
                c.holders
                    .iter()
                    .enumerate()
                    .map(move |(holder, h)| (HolderKey { network, card, holder }, h))
            })
            .collect::<Vec<_>>();

        html! {
            <div key={network.slug()} class="bg-white rounded-xl shadow-sm overflow-hidden">
                <div class="p-4 border-b border-gray-200 bg-gray-50">
                    <h1 class="text-xl font-bold text-gray-800">{ format!("Resumen de {}", network.label()) }</h1>
                </div>
                <div class="overflow-y-auto max-h-[60vh]">
                    if holders.is_empty() {
                        <div class="p-4 text-sm text-gray-500">{"No hay datos para mostrar"}</div>
                    }
                    { for holders.into_iter().map(|(key, holder)| {
                        let on_toggle = {
                            let expanded = expanded.clone();
                            Callback::from(move |_: ()| {
                                let mut next = (*expanded).clone();
                                if !next.remove(&key) {
                                    next.insert(key);
                                }
                                expanded.set(next);
                            })
                        };
                        let on_search = {
                            let searches = searches.clone();
                            Callback::from(move |value: String| {
                                let mut next = (*searches).clone();
                                next.insert(key, value);
                                searches.set(next);
                            })
                        };
                        html! {
                            <HolderPanel
                                key={format!("{}-{}-{}", key.network, key.card, key.holder)}
                                holder={holder.clone()}
                                expanded={expanded.contains(&key)}
                                search={searches.get(&key).cloned().unwrap_or_default()}
                                {is_mobile}
                                {on_toggle}
                                {on_search}
                            />
                        }
                    }) }
                </div>
            </div>
        }
    };

    html! {
        <div class="max-w-4xl mx-auto">
            { back }
            <div class="space-y-6">
                { for loaded.iter().map(network_section) }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::api::fake::FakeFinanceApi;
    use crate::error::ApiError;

    fn ana() -> CardHolder {
        serde_json::from_value(json!({
            "holder": "Ana",
            "total_ars": "15.000,00",
            "total_usd": "20,00",
            "expenses": [
                { "date": "01/06", "descriptions": "MERPAGO*SUPERMERCADO", "amount_pesos": "10.000,00" },
                { "date": "03/06", "descriptions": "Netflix", "amount_pesos": "", "amount_usd": "20,00" },
                { "date": "05/06", "descriptions": "Supermercado Dia", "amount_pesos": "5.000,00" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn no_search_uses_statement_totals() {
        let subtotal = holder_subtotal(&ana(), "  ");

        assert_eq!(
            subtotal,
            HolderSubtotal {
                ars: Some(15_000.0),
                usd: Some(20.0)
            }
        );
    }

    #[test]
    fn search_recomputes_over_the_filtered_subset() {
        let holder = ana();

        let subtotal = holder_subtotal(&holder, "supermercado");

        assert_eq!(filtered_expenses(&holder, "supermercado").len(), 2);
        assert_eq!(
            subtotal,
            HolderSubtotal {
                ars: Some(15_000.0),
                usd: Some(0.0)
            }
        );
    }

    #[test]
    fn search_with_no_matches_sums_to_zero() {
        let subtotal = holder_subtotal(&ana(), "spotify");

        assert_eq!(subtotal.ars, Some(0.0));
        assert_eq!(subtotal.usd, Some(0.0));
    }

    #[test]
    fn missing_statement_totals_stay_missing() {
        let holder = CardHolder {
            holder: "Luis".to_string(),
            ..CardHolder::default()
        };

        assert_eq!(
            holder_subtotal(&holder, ""),
            HolderSubtotal {
                ars: None,
                usd: None
            }
        );
        assert_eq!(display_or_dash(None, format_ars), "-");
    }

    #[test]
    fn a_failed_network_does_not_hide_the_other() {
        let filter = Filter::new(2025, 6);
        let api = FakeFinanceApi::new()
            .respond(
                "/getResumeExpenses/2025/6/visa",
                json!({ "cards": [ { "holders": [ { "holder": "Ana" } ] } ] }),
            )
            .fail(
                "/getResumeExpenses/2025/6/mastercard",
                ApiError::Network("timeout".to_string()),
            );

        let loaded = block_on(load_card_statements(&api, filter, &CardNetwork::ALL));

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].0, CardNetwork::Visa);
        assert_eq!(loaded[0].1.as_ref().unwrap().cards[0].holders[0].holder, "Ana");
        assert_eq!(loaded[1], (CardNetwork::Mastercard, None));
    }

    #[test]
    fn a_single_network_only_fetches_that_network() {
        let api = FakeFinanceApi::new().respond("/getResumeExpenses/2025/6/mastercard", json!({}));

        let loaded = block_on(load_card_statements(
            &api,
            Filter::new(2025, 6),
            &[CardNetwork::Mastercard],
        ));

        assert_eq!(loaded, vec![(CardNetwork::Mastercard, Some(CardStatement::default()))]);
        assert_eq!(
            api.calls.borrow().as_slice(),
            ["/getResumeExpenses/2025/6/mastercard"]
        );
    }
}
