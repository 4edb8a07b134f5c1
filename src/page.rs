use yew::prelude::*;

pub fn page_shell(title: &'static str, actions: Html, children: Html) -> Html {
    html! {
        <div class="bg-white p-6 rounded-xl shadow-sm mb-8">
            <div class="flex items-center justify-between pb-4 mb-6 border-b border-gray-200">
                <h2 class="text-xl font-semibold text-gray-700">{ title }</h2>
                { actions }
            </div>
            { children }
        </div>
    }
}

pub fn loading_view(message: &'static str) -> Html {
    html! {
        <div class="p-6 flex items-center justify-center">
            <div class="text-xl font-semibold text-gray-700">{ message }</div>
        </div>
    }
}

pub fn error_view(message: &str) -> Html {
    html! {
        <div class="p-6 flex items-center justify-center">
            <div class="text-xl font-semibold text-red-600">{ format!("Error: {message}") }</div>
        </div>
    }
}

pub fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

pub fn icon_chevron_down() -> Html {
    icon_base("M6 9l6 6 6-6")
}
pub fn icon_arrow_left() -> Html {
    icon_base("M19 12H5M12 19l-7-7 7-7")
}
pub fn icon_menu() -> Html {
    icon_base("M4 6h16M4 12h16M4 18h16")
}
pub fn icon_bar_chart() -> Html {
    icon_base("M4 20V10M10 20V4M16 20v-6M22 20H2")
}
pub fn icon_list() -> Html {
    icon_base("M8 6h13M8 12h13M8 18h13M3 6h.01M3 12h.01M3 18h.01")
}
pub fn icon_credit_card() -> Html {
    icon_base("M3 7h18v10H3zM3 11h18")
}
pub fn icon_refresh() -> Html {
    icon_base("M23 4v6h-6M1 20v-6h6M3.51 9a9 9 0 0114.85-3.36L23 10M1 14l4.64 4.36A9 9 0 0020.49 15")
}
pub fn icon_trending_up() -> Html {
    icon_base("M3 17l6-6 4 4 7-7")
}
pub fn icon_trending_down() -> Html {
    icon_base("M3 7l6 6 4-4 7 7")
}
pub fn icon_scale() -> Html {
    icon_base("M12 3v18M5 7h14M5 7l-3 6h6zM19 7l-3 6h6z")
}

/// What a page has fetched so far.
#[derive(Clone, Debug, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Ready(T),
    Failed(String),
}

/// Tags each fetch a page starts so a response for a superseded filter can be dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestGeneration {
    current: u64,
}

impl RequestGeneration {
    /// Start a new request; every id handed out before this one goes stale.
    pub fn next(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    pub fn is_current(&self, id: u64) -> bool {
        self.current == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn older_requests_are_stale_once_a_new_one_starts() {
        let mut generation = RequestGeneration::default();

        let june = generation.next();
        assert!(generation.is_current(june));

        let july = generation.next();
        assert!(!generation.is_current(june));
        assert!(generation.is_current(july));
    }

    #[test]
    fn nothing_is_current_before_the_first_request() {
        let generation = RequestGeneration::default();

        assert!(!generation.is_current(1));
    }
}
