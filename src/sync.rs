//! Manual "resync" triggers for the backend.
//!
//! Only one sync runs at a time. [SyncState] is the only guard: while a call is
//! in flight every trigger is disabled and new triggers are ignored. There is
//! no queue, retry or timeout.

use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::{FinanceApi, HttpFinanceApi};
use crate::config::AppConfig;
use crate::page::page_shell;
use crate::toast::Toaster;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyncAction {
    ExpensesCurrentMonth,
    ExpensesHistorical,
    IncomesCurrentMonth,
    IncomesHistorical,
}

impl SyncAction {
    pub const EXPENSES: [SyncAction; 2] = [
        SyncAction::ExpensesCurrentMonth,
        SyncAction::ExpensesHistorical,
    ];
    pub const INCOMES: [SyncAction; 2] = [
        SyncAction::IncomesCurrentMonth,
        SyncAction::IncomesHistorical,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            SyncAction::ExpensesCurrentMonth => "/syncCurrentMonthExpenses",
            SyncAction::ExpensesHistorical => "/syncExpenses/historical",
            SyncAction::IncomesCurrentMonth => "/syncCurrentMonthIncome",
            SyncAction::IncomesHistorical => "/syncIncomes/historical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SyncAction::ExpensesCurrentMonth => "Sincronizar gastos del mes",
            SyncAction::ExpensesHistorical => "Sincronizar gastos históricos",
            SyncAction::IncomesCurrentMonth => "Sincronizar ingresos del mes",
            SyncAction::IncomesHistorical => "Sincronizar ingresos históricos",
        }
    }

    fn is_historical(&self) -> bool {
        matches!(
            self,
            SyncAction::ExpensesHistorical | SyncAction::IncomesHistorical
        )
    }

    fn default_success_message(&self) -> &'static str {
        match self {
            SyncAction::ExpensesCurrentMonth | SyncAction::ExpensesHistorical => {
                "Gastos sincronizados correctamente"
            }
            SyncAction::IncomesCurrentMonth | SyncAction::IncomesHistorical => {
                "Ingresos sincronizados correctamente"
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SyncOutcome {
    Success(String),
    Failure(String),
}

impl SyncOutcome {
    pub fn message(&self) -> &str {
        match self {
            SyncOutcome::Success(message) | SyncOutcome::Failure(message) => message,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SyncEvent {
    Started(SyncAction),
    Settled(SyncAction, SyncOutcome),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SyncState {
    pub last_outcome: Option<SyncOutcome>,
    pub active: Option<SyncAction>,
}

impl SyncState {
    pub fn is_syncing(&self) -> bool {
        self.active.is_some()
    }

    pub fn apply(&self, event: SyncEvent) -> SyncState {
        match event {
            SyncEvent::Started(action) if !self.is_syncing() => SyncState {
                last_outcome: self.last_outcome.clone(),
                active: Some(action),
            },
            SyncEvent::Settled(action, outcome) if self.active == Some(action) => SyncState {
                last_outcome: Some(outcome),
                active: None,
            },
            _ => self.clone(),
        }
    }

    /// Apply `event` in place. Returns `false` when the event was ignored.
    pub fn accept(&mut self, event: SyncEvent) -> bool {
        let next = self.apply(event);
        if next == *self {
            return false;
        }
        *self = next;
        true
    }
}

impl Reducible for SyncState {
    type Action = SyncEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

/// Call the endpoint for `action`, reporting the start and the outcome through `on_event`.
///
/// `on_event` returns whether the event was accepted. When the start is refused
/// because another sync is running, no request is sent and `None` comes back.
pub async fn run_sync<A>(
    api: &A,
    action: SyncAction,
    on_event: impl Fn(SyncEvent) -> bool,
) -> Option<SyncOutcome>
where
    A: FinanceApi + ?Sized,
{
    if !on_event(SyncEvent::Started(action)) {
        tracing::debug!("sync {action:?} refused, another sync is running");
        return None;
    }
    tracing::info!("starting sync {action:?}");

    let outcome = match api.sync(action).await {
        Ok(response) => SyncOutcome::Success(
            response
                .message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| action.default_success_message().to_string()),
        ),
        Err(error) => {
            tracing::error!("sync {action:?} failed: {error}");
            SyncOutcome::Failure(format!("Error al sincronizar: {error}"))
        }
    };

    tracing::info!("sync {action:?} finished: {}", outcome.message());
    on_event(SyncEvent::Settled(action, outcome.clone()));
    Some(outcome)
}

#[derive(Properties, PartialEq)]
struct SyncButtonProps {
    action: SyncAction,
    disabled: bool,
    loading: bool,
    on_trigger: Callback<SyncAction>,
}

#[function_component(SyncButton)]
fn sync_button(props: &SyncButtonProps) -> Html {
    let onclick = {
        let on_trigger = props.on_trigger.clone();
        let action = props.action;
        Callback::from(move |_| on_trigger.emit(action))
    };

    let icon_path = if props.action.is_historical() {
        "M8 7V3m8 4V3m-9 8h10M5 21h14a2 2 0 002-2V7a2 2 0 00-2-2H5a2 2 0 00-2 2v12a2 2 0 002 2z"
    } else {
        "M12 8v4l3 3m6-3a9 9 0 11-18 0 9 9 0 0118 0z"
    };
    let class_name = if props.disabled {
        "w-full flex items-center justify-between p-4 rounded-lg border transition-all bg-gray-100 cursor-not-allowed"
    } else {
        "w-full flex items-center justify-between p-4 rounded-lg border transition-all bg-white hover:bg-blue-50 hover:border-blue-200 hover:text-blue-700"
    };

    html! {
        <button type="button" class={class_name} disabled={props.disabled} {onclick}>
            <div class="flex items-center">
                <div class="bg-blue-100 p-2 rounded-full mr-3">
                    if props.loading {
                        <svg class="animate-spin h-6 w-6 text-blue-600" fill="none" viewBox="0 0 24 24">
                            <circle class="opacity-25" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4"></circle>
                            <path class="opacity-75" fill="currentColor" d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4z"></path>
                        </svg>
                    } else {
                        <svg class="h-6 w-6 text-blue-600" fill="none" viewBox="0 0 24 24" stroke="currentColor">
                            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d={icon_path}></path>
                        </svg>
                    }
                </div>
                <span>{ props.action.label() }</span>
            </div>
            <svg class="h-5 w-5 text-gray-400" viewBox="0 0 20 20" fill="currentColor">
                <path d="M7.293 14.707a1 1 0 010-1.414L10.586 10 7.293 6.707a1 1 0 011.414-1.414l4 4a1 1 0 010 1.414l-4 4a1 1 0 01-1.414 0z"></path>
            </svg>
        </button>
    }
}

fn sync_section(
    title: &'static str,
    actions: &[SyncAction],
    state: &SyncState,
    on_trigger: &Callback<SyncAction>,
) -> Html {
    html! {
        <div class="space-y-4">
            <h3 class="text-lg font-medium text-gray-700 border-b pb-2">{ title }</h3>
            { for actions.iter().map(|action| html! {
                <SyncButton
                    action={*action}
                    disabled={state.is_syncing()}
                    loading={state.active == Some(*action)}
                    on_trigger={on_trigger.clone()}
                />
            }) }
        </div>
    }
}

#[function_component(SyncDataPage)]
pub fn sync_data_page() -> Html {
    let state = use_reducer(SyncState::default);
    let in_flight = use_mut_ref(SyncState::default);
    let toaster = use_context::<Toaster>();
    let api = use_context::<HttpFinanceApi>()
        .unwrap_or_else(|| HttpFinanceApi::new(AppConfig::default().api_base_url));

    let on_trigger = {
        let state = state.clone();
        Callback::from(move |action: SyncAction| {
            if state.is_syncing() {
                tracing::debug!("ignoring {action:?}, {:?} is still running", state.active);
                return;
            }

            let api = api.clone();
            let dispatcher = state.dispatcher();
            let in_flight = in_flight.clone();
            let toaster = toaster.clone();
            spawn_local(async move {
                let outcome = run_sync(&api, action, |event| {
                    let accepted = in_flight.borrow_mut().accept(event.clone());
                    if accepted {
                        dispatcher.dispatch(event);
                    }
                    accepted
                })
                .await;
                match (outcome, toaster) {
                    (Some(SyncOutcome::Success(message)), Some(toaster)) => toaster.success(message),
                    (Some(SyncOutcome::Failure(message)), Some(toaster)) => toaster.error(message),
                    _ => {}
                }
            });
        })
    };

    let status = match &state.last_outcome {
        Some(SyncOutcome::Success(message)) => html! {
            <div class="p-3 rounded-lg bg-green-50 text-green-700 text-sm">{ message.clone() }</div>
        },
        Some(SyncOutcome::Failure(message)) => html! {
            <div class="p-3 rounded-lg bg-red-50 text-red-700 text-sm">{ message.clone() }</div>
        },
        None => html! {},
    };

    page_shell(
        "Sincronizar datos",
        html! {},
        html! {
            <>
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4 mb-6">
                    { sync_section("Gastos", &SyncAction::EXPENSES, &state, &on_trigger) }
                    { sync_section("Ingresos", &SyncAction::INCOMES, &state, &on_trigger) }
                </div>
                { status }
            </>
        },
    )
}
