use yew::prelude::*;

use crate::currency::format_ars;
use crate::page::{icon_credit_card, icon_scale, icon_trending_down, icon_trending_up};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardTone {
    Income,
    Balance,
    Expense,
    Cards,
}

impl CardTone {
    fn class_name(&self) -> &'static str {
        match self {
            CardTone::Income => "bg-gradient-to-r from-[#45853d] to-[#51824b] border-[#1b5413]",
            CardTone::Balance => "bg-gradient-to-r from-[#2836a6] to-[#3945a3] border-[#2130a6]",
            CardTone::Expense => "bg-gradient-to-r from-[#b34040] to-[#b54747] border-[#ad3131]",
            CardTone::Cards => "bg-gradient-to-r from-gray-900 to-gray-800 border-gray-700",
        }
    }

    fn icon(&self) -> Html {
        match self {
            CardTone::Income => icon_trending_up(),
            CardTone::Balance => icon_scale(),
            CardTone::Expense => icon_trending_down(),
            CardTone::Cards => icon_credit_card(),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct SummaryCardProps {
    pub title: &'static str,
    pub value: f64,
    pub tone: CardTone,
    #[prop_or_default]
    pub on_detail: Option<Callback<()>>,
}

#[function_component(SummaryCard)]
pub fn summary_card(props: &SummaryCardProps) -> Html {
    let on_card_click = {
        let on_detail = props.on_detail.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(on_detail) = &on_detail {
                on_detail.emit(());
            }
        })
    };

    let clickable = if props.on_detail.is_some() {
        "cursor-pointer hover:shadow-md"
    } else {
        ""
    };

    html! {
        <div onclick={on_card_click} class={classes!("p-4", "rounded-lg", "border", "flex", "flex-col", "h-full", "transition", "text-white", props.tone.class_name(), clickable)}>
            <div class="flex justify-between items-center">
                <div>
                    <p class="text-xs font-medium uppercase tracking-wider opacity-80">{ props.title }</p>
                    <p class="text-xl font-semibold mt-1">{ format_ars(props.value) }</p>
                </div>
                <span class="opacity-90">{ props.tone.icon() }</span>
            </div>
            if let Some(on_detail) = props.on_detail.clone() {
                <button
                    type="button"
                    class="mt-3 text-xs font-medium self-start text-white hover:text-gray-200"
                    onclick={Callback::from(move |e: MouseEvent| {
                        e.stop_propagation();
                        on_detail.emit(());
                    })}
                >
                    {"Ver detalle →"}
                </button>
            }
        </div>
    }
}
