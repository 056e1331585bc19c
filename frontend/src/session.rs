//! The send flows of the chat UI, written against [`ChatSurface`] so they do
//! not depend on the reactive layer.
//!
//! Every failure ends up as an assistant entry in the transcript; nothing is
//! retried and nothing escapes to the caller.

use crate::api::ChatBackend;
use crate::image::PendingImage;
use crate::models::{AnalyzeImageRequest, ChatMessage, ChatRequest};
use crate::strings;

/// UI state the send flows read and write.
pub trait ChatSurface {
    fn input(&self) -> String;
    fn clear_input(&self);
    fn pending_image(&self) -> Option<PendingImage>;
    fn clear_image(&self);
    fn is_busy(&self) -> bool;
    fn mark_busy(&self, busy: bool);
    fn append(&self, message: ChatMessage);
}

/// What a send trigger ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatched {
    Nothing,
    Text,
    Image,
}

/// Holds the busy flag for its lifetime, so it is released even if the
/// owning future is dropped mid-request.
struct BusyGuard<'a, S: ChatSurface> {
    surface: &'a S,
}

impl<'a, S: ChatSurface> BusyGuard<'a, S> {
    fn engage(surface: &'a S) -> Self {
        surface.mark_busy(true);
        Self { surface }
    }
}

impl<S: ChatSurface> Drop for BusyGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.mark_busy(false);
    }
}

/// Single send trigger. A pending image takes priority over typed text;
/// triggers while a request is in flight are ignored.
pub async fn submit<S, B>(surface: &S, backend: &B) -> Dispatched
where
    S: ChatSurface,
    B: ChatBackend,
{
    if surface.is_busy() {
        log::debug!("send ignored: request already in flight");
        return Dispatched::Nothing;
    }
    if let Some(image) = surface.pending_image() {
        analyze_image(surface, backend, image).await;
        return Dispatched::Image;
    }
    if send_text(surface, backend).await {
        Dispatched::Text
    } else {
        Dispatched::Nothing
    }
}

/// Sends the trimmed input to `/chat`. Returns `false` without touching
/// anything when the input is blank.
pub async fn send_text<S, B>(surface: &S, backend: &B) -> bool
where
    S: ChatSurface,
    B: ChatBackend,
{
    let text = surface.input().trim().to_string();
    if text.is_empty() {
        return false;
    }

    surface.append(ChatMessage::user(text.clone()));
    surface.clear_input();
    let _busy = BusyGuard::engage(surface);

    let request = ChatRequest { user_message: text };
    let reply = match backend.chat(&request).await {
        Ok(response) => response.reply,
        Err(e) => {
            log::warn!("chat request failed: {e}");
            strings::chat_error(e)
        }
    };
    surface.append(ChatMessage::assistant(reply));
    true
}

/// Sends `image` to `/analyze-image` with the typed instruction, or the
/// default one when the input is blank. The image and input are cleared only
/// when the service answered.
pub async fn analyze_image<S, B>(surface: &S, backend: &B, image: PendingImage)
where
    S: ChatSurface,
    B: ChatBackend,
{
    let typed = surface.input().trim().to_string();
    let instruction = (!typed.is_empty()).then_some(typed.as_str());

    surface.append(ChatMessage::user(strings::analyzing(image.name(), instruction)));
    let _busy = BusyGuard::engage(surface);

    let request = AnalyzeImageRequest {
        image: image.to_base64(),
        prompt: instruction.unwrap_or(strings::DEFAULT_ANALYSIS_PROMPT).to_string(),
    };
    log::debug!("analyzing {} ({} bytes)", image.name(), image.size());

    match backend.analyze_image(&request).await {
        Ok(response) => {
            surface.append(ChatMessage::assistant(response.into_display_text()));
            surface.clear_image();
            surface.clear_input();
        }
        Err(e) => {
            log::warn!("image analysis failed: {e}");
            surface.append(ChatMessage::assistant(strings::image_error(e)));
        }
    }
}
