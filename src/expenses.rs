//! Filterable, sortable list of the month's expenses.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api::{FinanceApi, HttpFinanceApi};
use crate::config::AppConfig;
use crate::currency::{format_ars, format_datetime, format_raw_amount, parse_datetime};
use crate::models::{ExpenseRecord, Filter};
use crate::page::{error_view, loading_view, page_shell, Loadable, RequestGeneration};
use crate::viewport::use_is_mobile;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortColumn {
    Datetime,
    Description,
    Type,
    Amount,
}

impl SortColumn {
    const ALL: [SortColumn; 4] = [
        SortColumn::Datetime,
        SortColumn::Description,
        SortColumn::Type,
        SortColumn::Amount,
    ];

    fn header(&self) -> &'static str {
        match self {
            SortColumn::Datetime => "Fecha",
            SortColumn::Description => "Descripción",
            SortColumn::Type => "Tipo",
            SortColumn::Amount => "Monto",
        }
    }

    fn compare(&self, a: &ExpenseRecord, b: &ExpenseRecord) -> Ordering {
        match self {
            SortColumn::Datetime => match (parse_datetime(&a.datetime), parse_datetime(&b.datetime)) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => a.datetime.cmp(&b.datetime),
            },
            SortColumn::Description => a
                .description
                .to_lowercase()
                .cmp(&b.description.to_lowercase()),
            SortColumn::Type => a.kind.cmp(&b.kind),
            SortColumn::Amount => a.amount_value().total_cmp(&b.amount_value()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortOrder {
    pub column: SortColumn,
    pub descending: bool,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self {
            column: SortColumn::Datetime,
            descending: true,
        }
    }
}

impl SortOrder {
    /// Clicking the sorted column flips direction; any other column starts ascending.
    pub fn toggle(self, column: SortColumn) -> Self {
        if self.column == column {
            Self {
                column,
                descending: !self.descending,
            }
        } else {
            Self {
                column,
                descending: false,
            }
        }
    }

    /// Rows whose timestamp does not parse stay at the bottom in either direction.
    fn compare(&self, a: &ExpenseRecord, b: &ExpenseRecord) -> Ordering {
        if self.column == SortColumn::Datetime {
            let a_parses = parse_datetime(&a.datetime).is_some();
            let b_parses = parse_datetime(&b.datetime).is_some();
            if a_parses != b_parses {
                return b_parses.cmp(&a_parses);
            }
        }

        let ordering = self.column.compare(a, b);
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }

    fn indicator(&self, column: SortColumn) -> &'static str {
        match (self.column == column, self.descending) {
            (false, _) => "",
            (true, true) => "↓",
            (true, false) => "↑",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableFilter {
    /// Case-insensitive substring of the description.
    pub search: String,
    /// Exact category; empty means every category.
    pub kind: String,
}

impl TableFilter {
    /// The category list changes with the month, so a new period starts from every category.
    pub fn for_new_period(&self) -> Self {
        Self {
            search: self.search.clone(),
            kind: String::new(),
        }
    }

    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        let search = self.search.trim().to_lowercase();
        let matches_search =
            search.is_empty() || record.description.to_lowercase().contains(&search);
        let matches_kind = self.kind.is_empty() || record.kind == self.kind;
        matches_search && matches_kind
    }
}

pub fn visible_rows<'a>(
    records: &'a [ExpenseRecord],
    filter: &TableFilter,
    order: SortOrder,
) -> Vec<&'a ExpenseRecord> {
    let mut rows = records
        .iter()
        .filter(|record| filter.matches(record))
        .collect::<Vec<_>>();
    rows.sort_by(|a, b| order.compare(a, b));
    rows
}

pub fn visible_total(rows: &[&ExpenseRecord]) -> f64 {
    rows.iter().map(|record| record.amount_value()).sum()
}

pub fn unique_types(records: &[ExpenseRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.kind.clone())
        .filter(|kind| !kind.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn type_badge_class(kind: &str) -> &'static str {
    match kind {
        "Gatas" => "bg-red-100 text-red-800",
        "Cafe (Amelia/Posta etc)" => "bg-yellow-100 text-yellow-800",
        "Traslado (Uber - Taxi)" => "bg-blue-100 text-blue-800",
        "Comida y vivienda" => "bg-green-100 text-green-800",
        "Boludeces necesarias" => "bg-purple-100 text-purple-800",
        "Boludeces innecesarias" => "bg-pink-100 text-pink-800",
        "Regalos" => "bg-yellow-200 text-yellow-900",
        "Comida fuera de casa" => "bg-indigo-100 text-indigo-800",
        "Alquiler y expensas" => "bg-gray-200 text-gray-800",
        "Delivery" => "bg-teal-100 text-teal-800",
        "Servicios" => "bg-orange-100 text-orange-800",
        _ => "bg-gray-100 text-gray-800",
    }
}

fn type_badge(kind: &str) -> Html {
    html! {
        <span class={classes!("px-2", "py-1", "rounded-full", "text-xs", "font-medium", type_badge_class(kind))}>
            { kind.to_string() }
        </span>
    }
}

fn no_results() -> Html {
    html! { <div class="text-center py-8 text-gray-500">{"No se encontraron resultados."}</div> }
}

fn mobile_list(rows: &[&ExpenseRecord]) -> Html {
    html! {
        <div class="space-y-4">
            { for rows.iter().enumerate().map(|(idx, expense)| html! {
                <div key={expense.key().unwrap_or_else(|| idx.to_string())} class="border border-gray-200 rounded-lg p-4 bg-white shadow">
                    <div class="text-sm text-gray-500">{ format_datetime(&expense.datetime) }</div>
                    <div class="mt-2 text-sm font-medium text-gray-700">{ expense.description.clone() }</div>
                    <div class="mt-2 flex justify-between items-center">
                        { type_badge(&expense.kind) }
                        <span class="text-black font-bold text-sm">{ format_raw_amount(expense.amount.as_ref()) }</span>
                    </div>
                </div>
            }) }
        </div>
    }
}

fn desktop_table(rows: &[&ExpenseRecord], order: SortOrder, on_sort: &Callback<SortColumn>) -> Html {
    html! {
        <div class="overflow-x-auto">
            <table class="min-w-full divide-y divide-gray-200">
                <thead class="bg-gray-100 sticky top-0 z-10 shadow-sm">
                    <tr>
                        { for SortColumn::ALL.iter().map(|column| {
                            let column = *column;
                            let on_sort = on_sort.clone();
                            html! {
                                <th
                                    class="px-4 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider cursor-pointer select-none"
                                    onclick={Callback::from(move |_| on_sort.emit(column))}
                                >
                                    <div class="flex items-center">
                                        { column.header() }
                                        <span class="ml-1">{ order.indicator(column) }</span>
                                    </div>
                                </th>
                            }
                        }) }
                    </tr>
                </thead>
                <tbody class="bg-white divide-y divide-gray-100">
                    { for rows.iter().enumerate().map(|(idx, expense)| html! {
                        <tr key={expense.key().unwrap_or_else(|| idx.to_string())} class="hover:bg-blue-50 transition-colors">
                            <td class="px-4 py-3 text-sm text-gray-700">{ format_datetime(&expense.datetime) }</td>
                            <td class="px-4 py-3 text-sm text-gray-700">{ expense.description.clone() }</td>
                            <td class="px-4 py-3 text-sm text-gray-700">{ type_badge(&expense.kind) }</td>
                            <td class="px-4 py-3 text-sm font-semibold text-black">{ format_raw_amount(expense.amount.as_ref()) }</td>
                        </tr>
                    }) }
                </tbody>
            </table>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ExpensesPageProps {
    pub filter: Filter,
}

#[function_component(ExpensesPage)]
pub fn expenses_page(props: &ExpensesPageProps) -> Html {
    let records = use_state(|| Loadable::<Vec<ExpenseRecord>>::Loading);
    let table_filter = use_state(TableFilter::default);
    let order = use_state(SortOrder::default);
    let generation = use_mut_ref(RequestGeneration::default);
    let is_mobile = use_is_mobile();
    let api = use_context::<HttpFinanceApi>()
        .unwrap_or_else(|| HttpFinanceApi::new(AppConfig::default().api_base_url));

    {
        let records = records.clone();
        let table_filter = table_filter.clone();
        let generation = generation.clone();
        use_effect_with_deps(
            move |filter: &Filter| {
                let filter = *filter;
                let request = generation.borrow_mut().next();
                records.set(Loadable::Loading);
                table_filter.set(table_filter.for_new_period());

                spawn_local(async move {
                    let result = api.expenses(filter).await;
                    if !generation.borrow().is_current(request) {
                        return;
                    }
                    match result {
                        Ok(response) => records.set(Loadable::Ready(response.expenses.expenses)),
                        Err(error) => {
                            tracing::error!("could not load expenses for {filter:?}: {error}");
                            records.set(Loadable::Failed(error.to_string()));
                        }
                    }
                });
                || ()
            },
            props.filter,
        );
    }

    let on_search = {
        let table_filter = table_filter.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            table_filter.set(TableFilter {
                search: input.value(),
                ..(*table_filter).clone()
            });
        })
    };

    let on_kind = {
        let table_filter = table_filter.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            table_filter.set(TableFilter {
                kind: select.value(),
                ..(*table_filter).clone()
            });
        })
    };

    let on_sort = {
        let order = order.clone();
        Callback::from(move |column: SortColumn| order.set(order.toggle(column)))
    };

    let body = match &*records {
        Loadable::Loading => loading_view("Cargando..."),
        Loadable::Failed(message) => error_view(message),
        Loadable::Ready(all) => {
            let rows = visible_rows(all, &table_filter, *order);
            let types = unique_types(all);
            let total = visible_total(&rows);

            html! {
                <>
                    <div class="flex flex-col md:flex-row md:items-center gap-3 mb-4">
                        <input
                            class="p-2 border rounded-md w-full md:w-1/3"
                            placeholder="Buscar gasto..."
                            value={table_filter.search.clone()}
                            oninput={on_search}
                        />
                        <select class="p-2 border rounded-md w-full md:w-1/4" onchange={on_kind}>
                            <option value="" selected={table_filter.kind.is_empty()}>{"Todos los tipos"}</option>
                            { for types.iter().map(|kind| html! {
                                <option value={kind.clone()} selected={*kind == table_filter.kind}>{ kind.clone() }</option>
                            }) }
                        </select>
                    </div>

                    <div class="flex justify-end mb-4">
                        <div class="bg-blue-50 text-blue-800 px-3 py-1 rounded-lg text-sm font-semibold">
                            { format!("Total visible: {}", format_ars(total)) }
                        </div>
                    </div>

                    if rows.is_empty() {
                        { no_results() }
                    } else if is_mobile {
                        { mobile_list(&rows) }
                    } else {
                        { desktop_table(&rows, *order, &on_sort) }
                    }
                </>
            }
        }
    };

    page_shell("Listado de gastos", html! {}, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::RawAmount;

    fn record(datetime: &str, description: &str, kind: &str, amount: &str) -> ExpenseRecord {
        ExpenseRecord {
            id: None,
            datetime: datetime.to_string(),
            description: description.to_string(),
            kind: kind.to_string(),
            amount: Some(RawAmount::from(amount)),
        }
    }

    fn june() -> Vec<ExpenseRecord> {
        vec![
            record("2025-06-02T09:00:00", "Luz", "Servicios", "10.000,00"),
            record("2025-06-10T20:30:00", "Pizza", "Delivery", "8.500,50"),
            record("2025-06-05T12:00:00", "Gas", "Servicios", "4.000,00"),
            record("2025-06-01T08:15:00", "Uber al centro", "Traslado (Uber - Taxi)", "3.200,00"),
        ]
    }

    fn descriptions(rows: &[&ExpenseRecord]) -> Vec<String> {
        rows.iter().map(|r| r.description.clone()).collect()
    }

    #[test]
    fn default_sort_is_newest_first() {
        let records = june();

        let rows = visible_rows(&records, &TableFilter::default(), SortOrder::default());

        assert_eq!(descriptions(&rows), ["Pizza", "Gas", "Luz", "Uber al centro"]);
    }

    #[test]
    fn type_filter_keeps_only_that_type_and_recomputes_total() {
        let records = june();
        let filter = TableFilter {
            kind: "Servicios".to_string(),
            ..TableFilter::default()
        };

        let rows = visible_rows(&records, &filter, SortOrder::default());

        assert!(rows.iter().all(|r| r.kind == "Servicios"));
        assert_eq!(descriptions(&rows), ["Gas", "Luz"]);
        assert_eq!(visible_total(&rows), 14_000.0);
    }

    #[test]
    fn search_is_a_case_insensitive_substring_of_the_description() {
        let records = june();
        let filter = TableFilter {
            search: "  UBER ".to_string(),
            ..TableFilter::default()
        };

        let rows = visible_rows(&records, &filter, SortOrder::default());

        assert_eq!(descriptions(&rows), ["Uber al centro"]);
        assert_eq!(visible_total(&rows), 3_200.0);
    }

    #[test]
    fn both_filters_must_match() {
        let records = june();
        let filter = TableFilter {
            search: "pizza".to_string(),
            kind: "Servicios".to_string(),
        };

        let rows = visible_rows(&records, &filter, SortOrder::default());

        assert!(rows.is_empty());
        assert_eq!(visible_total(&rows), 0.0);
    }

    #[test]
    fn sorts_by_amount_numerically() {
        let records = june();
        let order = SortOrder::default().toggle(SortColumn::Amount);

        let rows = visible_rows(&records, &TableFilter::default(), order);

        assert_eq!(descriptions(&rows), ["Uber al centro", "Gas", "Pizza", "Luz"]);
    }

    #[test]
    fn toggling_the_same_column_flips_direction() {
        let order = SortOrder::default();

        assert_eq!(
            order.toggle(SortColumn::Datetime),
            SortOrder {
                column: SortColumn::Datetime,
                descending: false
            }
        );
        assert_eq!(
            order.toggle(SortColumn::Description),
            SortOrder {
                column: SortColumn::Description,
                descending: false
            }
        );
    }

    #[test]
    fn unparseable_amounts_do_not_break_the_total() {
        let mut records = june();
        records.push(ExpenseRecord {
            amount: None,
            ..record("2025-06-11T10:00:00", "Propina", "Delivery", "")
        });

        let rows = visible_rows(&records, &TableFilter::default(), SortOrder::default());

        assert_eq!(rows.len(), 5);
        assert_eq!(visible_total(&rows), 25_700.5);
    }

    #[test]
    fn type_options_are_unique_and_sorted() {
        assert_eq!(
            unique_types(&june()),
            ["Delivery", "Servicios", "Traslado (Uber - Taxi)"]
        );
    }

    #[test]
    fn unknown_types_get_the_neutral_badge() {
        assert_eq!(type_badge_class("Servicios"), "bg-orange-100 text-orange-800");
        assert_eq!(type_badge_class("Otro"), "bg-gray-100 text-gray-800");
    }

    #[test]
    fn mixed_timestamp_formats_sort_by_time_with_unparseable_rows_last() {
        let records = vec![
            record("2025-06-03 09:30", "Cena", "Delivery", "1,00"),
            record("2025-06-03 x", "Sin fecha", "Delivery", "1,00"),
            record("2025-06-03T08:00", "Desayuno", "Delivery", "1,00"),
            record("", "Vacía", "Delivery", "1,00"),
        ];

        let newest_first = visible_rows(&records, &TableFilter::default(), SortOrder::default());
        let oldest_first = visible_rows(
            &records,
            &TableFilter::default(),
            SortOrder::default().toggle(SortColumn::Datetime),
        );

        assert_eq!(
            descriptions(&newest_first),
            ["Cena", "Desayuno", "Sin fecha", "Vacía"]
        );
        assert_eq!(
            descriptions(&oldest_first),
            ["Desayuno", "Cena", "Vacía", "Sin fecha"]
        );
    }

    #[test]
    fn a_new_period_clears_the_type_but_keeps_the_search() {
        let filter = TableFilter {
            search: "luz".to_string(),
            kind: "Servicios".to_string(),
        };

        let next = filter.for_new_period();

        assert_eq!(
            next,
            TableFilter {
                search: "luz".to_string(),
                kind: String::new()
            }
        );
        let july = vec![record("2025-07-02T09:00:00", "Luz", "Impuestos", "9.000,00")];
        assert_eq!(descriptions(&visible_rows(&july, &next, SortOrder::default())), ["Luz"]);
    }
}
