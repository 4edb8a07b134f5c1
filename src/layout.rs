use chrono::Datelike;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::models::{Filter, MONTH_NAMES};
use crate::page::{icon_bar_chart, icon_credit_card, icon_list, icon_menu, icon_refresh};
use crate::routing::Route;

struct NavItem {
    route: Route,
    icon: fn() -> Html,
}

const NAV_ITEMS: [NavItem; 4] = [
    NavItem {
        route: Route::Dashboard,
        icon: icon_bar_chart,
    },
    NavItem {
        route: Route::Expenses,
        icon: icon_list,
    },
    NavItem {
        route: Route::CardExpenses(None),
        icon: icon_credit_card,
    },
    NavItem {
        route: Route::SyncData,
        icon: icon_refresh,
    },
];

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn selected_value(e: &Event) -> String {
    let select: HtmlSelectElement = e.target_unchecked_into();
    select.value()
}

#[derive(Properties, PartialEq)]
pub struct NavbarProps {
    pub filter: Filter,
    pub on_filter: Callback<Filter>,
    pub on_navigate: Callback<Route>,
    pub on_toggle_sidebar: Callback<()>,
}

#[function_component(Navbar)]
pub fn navbar(props: &NavbarProps) -> Html {
    let this_year = chrono::Local::now().year();
    let years = Filter::selectable_years(this_year);

    let on_logo = {
        let on_filter = props.on_filter.clone();
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| {
            on_filter.emit(Filter::current());
            on_navigate.emit(Route::Dashboard);
        })
    };

    let on_month = {
        let on_filter = props.on_filter.clone();
        let filter = props.filter;
        Callback::from(move |e: Event| match selected_value(&e).parse::<u32>() {
            Ok(month) => on_filter.emit(filter.with_month(month)),
            Err(error) => tracing::warn!("ignoring month selection: {error}"),
        })
    };

    let on_year = {
        let on_filter = props.on_filter.clone();
        let filter = props.filter;
        Callback::from(move |e: Event| match selected_value(&e).parse::<i32>() {
            Ok(year) => on_filter.emit(filter.with_year(year)),
            Err(error) => tracing::warn!("ignoring year selection: {error}"),
        })
    };

    let on_menu = {
        let on_toggle = props.on_toggle_sidebar.clone();
        Callback::from(move |_| on_toggle.emit(()))
    };

    html! {
        <header class="bg-white shadow-sm sticky top-0 z-30">
            <div class="max-w-7xl mx-auto px-4 h-16 flex items-center justify-between gap-4">
                <button type="button" class="flex items-center gap-2" onclick={on_logo}>
                    <div class="w-9 h-9 bg-blue-600 rounded-full flex items-center justify-center text-white font-black">{"FP"}</div>
                    <span class="hidden md:inline text-lg font-bold text-gray-800">{"Finanzas personales"}</span>
                </button>

                <div class="flex items-center gap-2">
                    <select class="p-2 border rounded-md text-sm" title={capitalize(props.filter.month_name())} onchange={on_month}>
                        { for MONTH_NAMES.iter().enumerate().map(|(idx, name)| {
                            let month = idx as u32 + 1;
                            html! {
                                <option value={month.to_string()} selected={month == props.filter.month}>
                                    { capitalize(name) }
                                </option>
                            }
                        }) }
                    </select>
                    <select class="p-2 border rounded-md text-sm" onchange={on_year}>
                        { for years.iter().map(|year| html! {
                            <option value={year.to_string()} selected={*year == props.filter.year}>
                                { year.to_string() }
                            </option>
                        }) }
                    </select>
                    <button type="button" class="p-2 rounded-md hover:bg-gray-100" aria-label="Abrir menú" onclick={on_menu}>
                        { icon_menu() }
                    </button>
                </div>
            </div>
        </header>
    }
}

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub open: bool,
    pub active: Route,
    pub on_navigate: Callback<Route>,
    pub on_close: Callback<()>,
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    let panel_class = if props.open {
        "fixed top-0 right-0 h-full w-64 bg-white shadow-lg z-50 transform transition-transform translate-x-0"
    } else {
        "fixed top-0 right-0 h-full w-64 bg-white shadow-lg z-50 transform transition-transform translate-x-full"
    };
    let on_overlay = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    html! {
        <>
            if props.open {
                <div class="fixed inset-0 bg-black/30 z-40" onclick={on_overlay}></div>
            }
            <aside class={panel_class}>
                <div class="p-4 border-b border-gray-200 font-semibold text-gray-800">{"Menú"}</div>
                <nav class="p-3 space-y-1">
                    { for NAV_ITEMS.iter().map(|item| {
                        let is_active = props.active.same_section(&item.route);
                        let class_name = if is_active {
                            "flex items-center gap-3 px-4 py-3 rounded-lg text-sm font-medium bg-blue-50 text-blue-700 w-full"
                        } else {
                            "flex items-center gap-3 px-4 py-3 rounded-lg text-sm font-medium text-gray-600 hover:bg-gray-100 w-full"
                        };
                        let on_navigate = props.on_navigate.clone();
                        let on_close = props.on_close.clone();
                        let route = item.route;
                        html! {
                            <button
                                type="button"
                                key={route.path()}
                                class={class_name}
                                onclick={Callback::from(move |_| {
                                    on_navigate.emit(route);
                                    on_close.emit(());
                                })}
                            >
                                { (item.icon)() }
                                <span>{ route.label() }</span>
                            </button>
                        }
                    }) }
                </nav>
            </aside>
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
    pub filter: Filter,
    pub route: Route,
    pub on_filter: Callback<Filter>,
    pub on_navigate: Callback<Route>,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let sidebar_open = use_state(|| false);
    let on_toggle_sidebar = {
        let sidebar_open = sidebar_open.clone();
        Callback::from(move |_: ()| sidebar_open.set(!*sidebar_open))
    };
    let on_close = {
        let sidebar_open = sidebar_open.clone();
        Callback::from(move |_: ()| sidebar_open.set(false))
    };

    html! {
        <div class="min-h-screen bg-gray-100">
            <Navbar
                filter={props.filter}
                on_filter={props.on_filter.clone()}
                on_navigate={props.on_navigate.clone()}
                {on_toggle_sidebar}
            />
            <Sidebar
                open={*sidebar_open}
                active={props.route}
                on_navigate={props.on_navigate.clone()}
                {on_close}
            />
            <main class="max-w-7xl mx-auto px-4 py-6">
                { for props.children.iter() }
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names_are_capitalized_for_display() {
        assert_eq!(capitalize("septiembre"), "Septiembre");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn every_section_has_one_entry() {
        let routes = NAV_ITEMS.iter().map(|item| item.route.label()).collect::<Vec<_>>();

        assert_eq!(
            routes,
            ["Reporte mensual", "Gastos", "Tarjetas", "Sincronizar datos"]
        );
        assert!(Route::CardExpenses(Some(crate::models::CardNetwork::Visa))
            .same_section(&NAV_ITEMS[2].route));
    }
}
