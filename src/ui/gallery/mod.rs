// SPDX-License-Identifier: MPL-2.0
//! Gallery screen: filter bar, card grid and the detail modal.
//!
//! The component owns the filter selection, which item (if any) is open and
//! the embed renderer for the open item. Side effects that need the runtime
//! (clipboard, browser, async embed creation) are returned as [`Effect`]s.

mod filter_bar;
mod grid;
mod modal;

use crate::catalog::Catalog;
use crate::diagnostics::{AppStateEvent, DiagnosticsHandle, DismissSource, UserAction};
use crate::domain::gallery::{FilterCache, FilterMode, FilterSelection, PromptItem};
use crate::embed::{
    EmbedLoader, EmbedOptions, EmbedRequest, EmbedResult, RenderState, SessionId, TweetRenderer,
};
use crate::media::ThumbnailCache;
use crate::ui::design_tokens::spacing;
use iced::widget::{Column, Container};
use iced::{Element, Length};
use std::time::{Duration, Instant};

/// Settings the gallery is created with.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub filter_mode: FilterMode,
    pub card_prompt_chars: usize,
    pub columns: u16,
    pub embed_options: EmbedOptions,
    pub embed_max_wait: Option<Duration>,
}

#[derive(Debug)]
pub struct State {
    selection: FilterSelection,
    cache: FilterCache,
    filter_mode: FilterMode,
    /// Catalog index of the item shown in the modal.
    open_item: Option<usize>,
    renderer: TweetRenderer,
    card_prompt_chars: usize,
    columns: u16,
}

#[derive(Debug, Clone)]
pub enum Message {
    SelectCategory(Option<String>),
    SelectTag(Option<String>),
    ShowAll,
    OpenItem(usize),
    CloseModal(DismissSource),
    CopyPrompt,
    OpenLink(String),
    /// Periodic readiness check while the embed library is loading.
    EmbedTick,
    EmbedCreated(SessionId, EmbedResult),
}

/// Work the application has to perform on behalf of the gallery.
#[derive(Debug)]
pub enum Effect {
    None,
    /// Abort any in-flight embed creation, then run this one if present.
    StartEmbed(Option<EmbedRequest>),
    /// Abort any in-flight embed creation.
    CancelEmbed,
    CopyText(String),
    OpenUrl(String),
}

/// Dependencies borrowed for the duration of one update.
pub struct UpdateContext<'a> {
    pub catalog: &'a Catalog,
    pub loader: &'a EmbedLoader,
    pub diagnostics: &'a DiagnosticsHandle,
    pub now: Instant,
}

/// Data needed to render the gallery.
pub struct ViewContext<'a> {
    pub catalog: &'a Catalog,
    pub thumbnails: &'a ThumbnailCache,
}

impl State {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            selection: FilterSelection::new(),
            cache: FilterCache::new(),
            filter_mode: settings.filter_mode,
            open_item: None,
            renderer: TweetRenderer::new(settings.embed_options, settings.embed_max_wait),
            card_prompt_chars: settings.card_prompt_chars,
            columns: settings.columns.max(1),
        }
    }

    #[must_use]
    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    #[must_use]
    pub fn open_item(&self) -> Option<usize> {
        self.open_item
    }

    #[must_use]
    pub fn is_modal_open(&self) -> bool {
        self.open_item.is_some()
    }

    #[must_use]
    pub fn renderer(&self) -> &TweetRenderer {
        &self.renderer
    }

    /// Whether the readiness poll should run.
    #[must_use]
    pub fn needs_embed_poll(&self) -> bool {
        self.open_item.is_some() && self.renderer.is_awaiting_library()
    }

    /// Indices of the items passing the current filters.
    pub fn visible_indices(&mut self, items: &[PromptItem]) -> &[usize] {
        self.cache.visible_indices(items, &self.selection)
    }

    pub fn update(&mut self, message: Message, ctx: UpdateContext<'_>) -> Effect {
        match message {
            Message::SelectCategory(category) => {
                ctx.diagnostics.log_action(UserAction::SelectCategory {
                    category: category.clone(),
                });
                self.selection.select_category(category, self.filter_mode);
                self.refresh(ctx.catalog);
                Effect::None
            }
            Message::SelectTag(tag) => {
                ctx.diagnostics
                    .log_action(UserAction::SelectTag { tag: tag.clone() });
                self.selection.select_tag(tag, self.filter_mode);
                self.refresh(ctx.catalog);
                Effect::None
            }
            Message::ShowAll => {
                ctx.diagnostics.log_action(UserAction::ShowAll);
                self.selection.clear();
                self.refresh(ctx.catalog);
                Effect::None
            }
            Message::OpenItem(index) => {
                let Some(item) = ctx.catalog.get(index) else {
                    log::warn!("open requested for unknown item index {}", index);
                    return Effect::None;
                };
                ctx.diagnostics.log_action(UserAction::OpenItem {
                    id: item.id().to_string(),
                });
                self.open_item = Some(index);
                let request = self.renderer.open(item.post_url(), ctx.loader, ctx.now);
                self.record_embed_outcome(ctx.diagnostics);
                Effect::StartEmbed(request)
            }
            Message::CloseModal(via) => {
                if self.open_item.take().is_none() {
                    return Effect::None;
                }
                ctx.diagnostics.log_action(UserAction::CloseModal { via });
                self.renderer.close();
                Effect::CancelEmbed
            }
            Message::CopyPrompt => {
                let Some(item) = self.open_item.and_then(|i| ctx.catalog.get(i)) else {
                    return Effect::None;
                };
                ctx.diagnostics.log_action(UserAction::CopyPrompt {
                    id: item.id().to_string(),
                });
                Effect::CopyText(item.prompt().to_string())
            }
            Message::OpenLink(url) => {
                ctx.diagnostics.log_action(UserAction::OpenPostLink);
                Effect::OpenUrl(url)
            }
            Message::EmbedTick => {
                let was_waiting = self.renderer.is_awaiting_library();
                match self.renderer.poll(ctx.loader, ctx.now) {
                    Some(request) => Effect::StartEmbed(Some(request)),
                    None => {
                        if was_waiting {
                            self.record_embed_outcome(ctx.diagnostics);
                        }
                        Effect::None
                    }
                }
            }
            Message::EmbedCreated(session, result) => {
                if self.renderer.complete(session, result) {
                    self.record_embed_outcome(ctx.diagnostics);
                }
                Effect::None
            }
        }
    }

    /// Records a terminal renderer state. Called right after a transition.
    fn record_embed_outcome(&self, diagnostics: &DiagnosticsHandle) {
        match self.renderer.state() {
            RenderState::Rendered => {
                if let Some(post) = self.renderer.mount().post() {
                    diagnostics.log_state(AppStateEvent::EmbedRendered {
                        post_id: post.post_id.clone(),
                    });
                }
            }
            RenderState::Failed(failure) => diagnostics.log_state(AppStateEvent::EmbedFailed {
                reason: failure.to_string(),
            }),
            _ => {}
        }
    }

    fn refresh(&mut self, catalog: &Catalog) {
        self.cache.visible_indices(catalog.items(), &self.selection);
    }

    pub fn view<'a>(&'a self, ctx: ViewContext<'a>) -> Element<'a, Message> {
        let filters = filter_bar::view(filter_bar::ViewContext {
            categories: ctx.catalog.categories(),
            tags: ctx.catalog.tags(),
            selection: &self.selection,
        });

        let cards = grid::view(grid::ViewContext {
            items: ctx.catalog.items(),
            visible: self.cache.cached(),
            thumbnails: ctx.thumbnails,
            columns: self.columns,
            card_prompt_chars: self.card_prompt_chars,
        });

        Container::new(
            Column::new()
                .spacing(spacing::LG)
                .push(filters)
                .push(cards),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    /// The detail modal for the open item, layered over the whole window.
    pub fn view_modal<'a>(&'a self, catalog: &'a Catalog) -> Option<Element<'a, Message>> {
        let item = self.open_item.and_then(|i| catalog.get(i))?;
        Some(modal::view(item, self.renderer.mount()))
    }
}
