// SPDX-License-Identifier: MPL-2.0
//! Message handlers for `App::update`.
//!
//! Handlers receive an [`UpdateContext`] with mutable access to the pieces of
//! application state they touch and return the follow-up task.

use super::Message;
use crate::catalog::Catalog;
use crate::clipboard::{self, ClipboardBackend, CopyPlan};
use crate::diagnostics::{AppStateEvent, DiagnosticsHandle};
use crate::embed::{EmbedLoader, EmbedRequest, Readiness};
use crate::error::Error;
use crate::media::{Thumbnail, ThumbnailCache};
use crate::ui::gallery::{self, Effect};
use crate::ui::notifications::{self, Notification};
use iced::{task, Task};
use std::time::Instant;

pub const COPY_SUCCESS_MESSAGE: &str = "プロンプトをコピーしました";
pub const OPEN_LINK_FAILED_MESSAGE: &str = "リンクを開けませんでした";

/// Mutable view of the application state used by the handlers.
pub struct UpdateContext<'a> {
    pub catalog: &'a Catalog,
    pub gallery: &'a mut gallery::State,
    pub notifications: &'a mut notifications::Manager,
    pub diagnostics: &'a DiagnosticsHandle,
    pub loader: &'a EmbedLoader,
    pub clipboard: &'a mut dyn ClipboardBackend,
    pub thumbnails: &'a mut ThumbnailCache,
    /// Abort handle of the in-flight embed creation.
    pub embed_task: &'a mut Option<task::Handle>,
}

pub fn handle_gallery_message(
    ctx: &mut UpdateContext<'_>,
    message: gallery::Message,
    now: Instant,
) -> Task<Message> {
    let effect = ctx.gallery.update(
        message,
        gallery::UpdateContext {
            catalog: ctx.catalog,
            loader: ctx.loader,
            diagnostics: ctx.diagnostics,
            now,
        },
    );
    apply_gallery_effect(ctx, effect)
}

fn apply_gallery_effect(ctx: &mut UpdateContext<'_>, effect: Effect) -> Task<Message> {
    match effect {
        Effect::None => Task::none(),
        Effect::StartEmbed(request) => {
            abort_embed(ctx);
            match request {
                Some(request) => spawn_embed(ctx, request),
                None => Task::none(),
            }
        }
        Effect::CancelEmbed => {
            abort_embed(ctx);
            Task::none()
        }
        Effect::CopyText(text) => copy_prompt(ctx, &text),
        Effect::OpenUrl(url) => {
            if let Err(err) = open::that_detached(&url) {
                log::warn!("failed to open {}: {}", url, err);
                ctx.notifications
                    .push(Notification::warning(OPEN_LINK_FAILED_MESSAGE).from_source("browser"));
            }
            Task::none()
        }
    }
}

fn spawn_embed(ctx: &mut UpdateContext<'_>, request: EmbedRequest) -> Task<Message> {
    let session = request.session;
    log::debug!("creating embed for post {}", request.post_id);
    let (task, handle) = Task::perform(request.run(), move |result| {
        Message::Gallery(gallery::Message::EmbedCreated(session, result))
    })
    .abortable();
    *ctx.embed_task = Some(handle);
    task
}

/// Aborts the in-flight embed creation, if any.
pub fn abort_embed(ctx: &mut UpdateContext<'_>) {
    if let Some(handle) = ctx.embed_task.take() {
        handle.abort();
    }
}

/// Direct clipboard first, runtime clipboard as fallback.
fn copy_prompt(ctx: &mut UpdateContext<'_>, text: &str) -> Task<Message> {
    match clipboard::copy_text(&mut *ctx.clipboard, text) {
        CopyPlan::Copied => {
            ctx.notifications
                .push(Notification::success(COPY_SUCCESS_MESSAGE));
            Task::none()
        }
        CopyPlan::Fallback(text) => {
            iced::clipboard::write(text).chain(Task::done(Message::ClipboardFallbackDone))
        }
    }
}

pub fn handle_clipboard_fallback_done(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    ctx.notifications
        .push(Notification::success(COPY_SUCCESS_MESSAGE));
    Task::none()
}

pub fn handle_library_loaded(ctx: &mut UpdateContext<'_>, readiness: Readiness) -> Task<Message> {
    if readiness == Readiness::Ready {
        log::debug!("embed library ready via {}", ctx.loader.marker());
        ctx.diagnostics.log_state(AppStateEvent::EmbedLibraryReady);
        // Render right away instead of waiting for the next poll tick.
        return handle_gallery_message(ctx, gallery::Message::EmbedTick, Instant::now());
    }
    Task::none()
}

pub fn handle_thumbnail_loaded(
    ctx: &mut UpdateContext<'_>,
    id: &str,
    result: Result<Thumbnail, Error>,
) -> Task<Message> {
    let thumbnail = match result {
        Ok(thumbnail) => Some(thumbnail),
        Err(err) => {
            log::debug!("thumbnail for {} unavailable: {}", id, err);
            None
        }
    };
    ctx.thumbnails.finish(id, thumbnail);
    Task::none()
}
