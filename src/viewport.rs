use wasm_bindgen::{closure::Closure, JsCast};
use yew::prelude::*;

pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

pub fn is_mobile_width(width: f64) -> bool {
    width < MOBILE_BREAKPOINT_PX
}

fn current_is_mobile() -> bool {
    web_sys::window()
        .and_then(|window| window.inner_width().ok())
        .and_then(|width| width.as_f64())
        .map(is_mobile_width)
        .unwrap_or(false)
}

/// Tracks whether the viewport is below the mobile breakpoint.
///
/// Subscribes to `resize` once per mounted component and unsubscribes on unmount.
#[hook]
pub fn use_is_mobile() -> bool {
    let is_mobile = use_state_eq(current_is_mobile);

    {
        let is_mobile = is_mobile.clone();
        use_effect_with_deps(
            move |_| {
                let listener = Closure::<dyn Fn()>::new(move || {
                    is_mobile.set(current_is_mobile());
                });

                let window = web_sys::window();
                if let Some(window) = &window {
                    if window
                        .add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())
                        .is_err()
                    {
                        tracing::warn!("could not subscribe to window resize events");
                    }
                }

                move || {
                    if let Some(window) = window {
                        let _ = window.remove_event_listener_with_callback(
                            "resize",
                            listener.as_ref().unchecked_ref(),
                        );
                    }
                    drop(listener);
                }
            },
            (),
        );
    }

    *is_mobile
}
