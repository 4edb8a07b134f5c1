use crate::models::CardNetwork;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Expenses,
    CardExpenses(Option<CardNetwork>),
    SyncData,
}

impl Route {
    /// Map a pathname to a page. Unknown paths show the dashboard.
    pub fn from_path(path: &str) -> Route {
        let segments = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>();

        match segments.as_slice() {
            [] => Route::Dashboard,
            ["expenses"] => Route::Expenses,
            ["card-expenses"] => Route::CardExpenses(None),
            ["card-expenses", network] => match CardNetwork::from_slug(network) {
                Some(network) => Route::CardExpenses(Some(network)),
                None => Route::CardExpenses(None),
            },
            ["sync-data"] => Route::SyncData,
            _ => Route::Dashboard,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::Expenses => "/expenses".to_string(),
            Route::CardExpenses(None) => "/card-expenses".to_string(),
            Route::CardExpenses(Some(network)) => format!("/card-expenses/{}", network.slug()),
            Route::SyncData => "/sync-data".to_string(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Dashboard => "Reporte mensual",
            Route::Expenses => "Gastos",
            Route::CardExpenses(_) => "Tarjetas",
            Route::SyncData => "Sincronizar datos",
        }
    }

    /// Whether the sidebar entry for `other` should be highlighted on this route.
    pub fn same_section(&self, other: &Route) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

pub fn current_route() -> Route {
    web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .map(|path| Route::from_path(&path))
        .unwrap_or(Route::Dashboard)
}

/// Record `route` in the browser history without reloading the page.
pub fn push_history(route: Route) {
    let Some(history) = web_sys::window().and_then(|window| window.history().ok()) else {
        return;
    };

    if let Err(error) =
        history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&route.path()))
    {
        tracing::warn!("could not push {route:?} to the history: {error:?}");
    }
}
