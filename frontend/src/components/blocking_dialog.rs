use dioxus::prelude::*;

/// Modal message over a dimmed page. Dismissed only through its button.
#[component]
pub fn BlockingDialog(message: ReadSignal<Option<String>>, on_dismiss: Callback<()>) -> Element {
    let Some(text) = message.read().clone() else {
        return rsx! {};
    };
    rsx! {
        div {
            style: "
                position: fixed;
                top: 0px;
                left: 0px;
                width: 100vw;
                height: 100vh;
                z-index: 2000;
                background-color: rgba(0,0,0,0.3);
                display: flex;
                align-items: center;
                justify-content: center;
            ",
            div {
                role: "alertdialog",
                style: "
                    background-color: white;
                    min-width: 300px;
                    max-width: 500px;
                    border: 1px solid rgba(0,0,0,0.5);
                    border-radius: 10px;
                    padding: 20px;
                    box-shadow: 0 0 10px 0 rgba(0, 0, 0, 0.1);
                    display: flex;
                    flex-direction: column;
                    gap: 16px;
                ",
                p {
                    style: "font-size: 18px; margin: 0px;",
                    "{text}"
                }
                button {
                    style: "
                        align-self: flex-end;
                        cursor: pointer;
                        border: 1px solid blue;
                        border-radius: 5px;
                        background-color: white;
                        color: blue;
                        padding: 6px 18px;
                        font-size: 16px;
                    ",
                    onclick: move |_| on_dismiss(()),
                    "OK"
                }
            }
        }
    }
}
