use leptos::ev;
use leptos::html;
use leptos::prelude::*;

use crate::image::is_image_type;
use crate::state::AppState;
use crate::strings;

/// Drop zone and file picker for the image to analyze, with a preview of the
/// pending image.
#[component]
pub fn ImageDropZone() -> impl IntoView {
    let state = expect_context::<AppState>();
    let file_input = NodeRef::<html::Input>::new();

    let on_dragover = move |ev: ev::DragEvent| {
        ev.prevent_default();
        state.set_drag_over.set(true);
    };

    let on_drop = move |ev: ev::DragEvent| {
        ev.prevent_default();
        state.set_drag_over.set(false);
        let Some(file) = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
        else {
            return;
        };
        if is_image_type(&file.type_()) {
            state.select_file(file);
        } else {
            log::warn!("dropped file {} is not an image ({})", file.name(), file.type_());
        }
    };

    let on_pick = move |ev: ev::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            state.select_file(file);
        }
        // Lets the same file be picked again after removal.
        input.set_value("");
    };

    view! {
        <div class="image-area">
            {move || match state.image.get() {
                Some(img) => view! {
                    <div class="image-preview">
                        <img src=img.preview().to_string() alt=img.name().to_string() />
                        <span class="file-name">{img.name().to_string()}</span>
                        <button class="remove-btn" on:click=move |_| state.remove_image()>
                            {strings::REMOVE_IMAGE}
                        </button>
                    </div>
                }
                .into_any(),
                None => view! {
                    <div
                        class="drop-zone"
                        class:dragging=move || state.drag_over.get()
                        on:dragover=on_dragover
                        on:dragleave=move |_| state.set_drag_over.set(false)
                        on:drop=on_drop
                        on:click=move |_| {
                            if let Some(el) = file_input.get() {
                                el.click();
                            }
                        }
                    >
                        {strings::DROP_ZONE_HINT}
                    </div>
                }
                .into_any(),
            }}
            <input
                type="file"
                accept="image/*"
                style="display:none"
                node_ref=file_input
                on:change=on_pick
            />
        </div>
    }
}
