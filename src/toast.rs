use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use yew::prelude::*;

pub const TOAST_TIMEOUT_MS: i32 = 3000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

pub enum ToastAction {
    Push(Toast),
    Dismiss(u32),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Toasts {
    pub items: Vec<Toast>,
}

impl Reducible for Toasts {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut items = self.items.clone();
        match action {
            ToastAction::Push(toast) => items.push(toast),
            ToastAction::Dismiss(id) => items.retain(|toast| toast.id != id),
        }
        Rc::new(Toasts { items })
    }
}

/// Handed to pages through context so they can raise toasts.
#[derive(Clone, PartialEq)]
pub struct Toaster(Callback<(ToastKind, String)>);

impl Toaster {
    pub fn success(&self, message: impl Into<String>) {
        self.0.emit((ToastKind::Success, message.into()));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.0.emit((ToastKind::Error, message.into()));
    }
}

fn schedule_dismiss(toasts: UseReducerDispatcher<Toasts>, id: u32) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let dismiss = Closure::once_into_js(move || toasts.dispatch(ToastAction::Dismiss(id)));
    if window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            dismiss.unchecked_ref(),
            TOAST_TIMEOUT_MS,
        )
        .is_err()
    {
        tracing::warn!("could not schedule toast {id} for dismissal");
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let toasts = use_reducer(Toasts::default);
    let next_id = use_mut_ref(|| 0u32);

    let toaster = {
        let dispatcher = toasts.dispatcher();
        let next_id = next_id.clone();
        use_memo(
            move |_| {
                Toaster(Callback::from(move |(kind, message): (ToastKind, String)| {
                    let id = {
                        let mut next = next_id.borrow_mut();
                        *next += 1;
                        *next
                    };
                    dispatcher.dispatch(ToastAction::Push(Toast { id, kind, message }));
                    schedule_dismiss(dispatcher.clone(), id);
                }))
            },
            (),
        )
    };

    html! {
        <ContextProvider<Toaster> context={(*toaster).clone()}>
            { for props.children.iter() }
            <div class="fixed left-1/2 -translate-x-1/2 bottom-24 z-50 flex flex-col gap-2 w-full max-w-sm px-4">
                { for toasts.items.iter().map(|toast| {
                    let on_close = {
                        let dispatcher = toasts.dispatcher();
                        let id = toast.id;
                        Callback::from(move |_| dispatcher.dispatch(ToastAction::Dismiss(id)))
                    };
                    let accent = match toast.kind {
                        ToastKind::Success => "border-green-300 text-green-800",
                        ToastKind::Error => "border-red-300 text-red-700",
                    };
                    html! {
                        <div key={toast.id} class={classes!("bg-white", "shadow-md", "rounded-lg", "border", "px-4", "py-3", "flex", "items-start", "justify-between", "gap-3", "font-medium", accent)}>
                            <span class="text-sm">{ toast.message.clone() }</span>
                            <button class="text-xs text-gray-400 hover:text-gray-600" onclick={on_close}>{"✕"}</button>
                        </div>
                    }
                }) }
            </div>
        </ContextProvider<Toaster>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(id: u32, message: &str) -> Toast {
        Toast {
            id,
            kind: ToastKind::Success,
            message: message.to_string(),
        }
    }

    #[test]
    fn pushes_and_dismisses_by_id() {
        let toasts = Rc::new(Toasts::default());

        let toasts = toasts.reduce(ToastAction::Push(toast(1, "uno")));
        let toasts = toasts.reduce(ToastAction::Push(toast(2, "dos")));
        let toasts = toasts.reduce(ToastAction::Dismiss(1));

        assert_eq!(toasts.items, vec![toast(2, "dos")]);
    }

    #[test]
    fn dismissing_an_unknown_toast_is_a_no_op() {
        let toasts = Rc::new(Toasts::default()).reduce(ToastAction::Push(toast(7, "x")));

        let toasts = toasts.reduce(ToastAction::Dismiss(99));

        assert_eq!(toasts.items.len(), 1);
    }
}
