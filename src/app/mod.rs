// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! The `App` struct wires the catalog, the gallery screen, the embed loader
//! and the ambient services (notifications, diagnostics, clipboard,
//! thumbnails) together and turns component effects into Iced tasks.

mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::catalog::{self, Catalog};
use crate::clipboard::{ClipboardBackend, SystemClipboard};
use crate::config::{self, Config};
use crate::diagnostics::{AppStateEvent, BufferCapacity, DiagnosticsCollector, DismissSource};
use crate::embed::oembed::OEmbedScript;
use crate::embed::EmbedLoader;
use crate::logger;
use crate::media::{ThumbnailCache, ThumbnailLoader};
use crate::ui::gallery;
use crate::ui::notifications::{self, Notification};
use crate::ui::theming::ThemeMode;
use iced::{task, window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::Path;
use std::time::Instant;

pub const APP_TITLE: &str = "Prompt Gallery";

pub const WINDOW_DEFAULT_WIDTH: f32 = 1100.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 800.0;
pub const MIN_WINDOW_WIDTH: f32 = 480.0;
pub const MIN_WINDOW_HEIGHT: f32 = 480.0;

/// Problems repeated to the log when the window closes.
const PROBLEMS_ON_EXIT: usize = 5;

/// Root Iced application state.
pub struct App {
    catalog: Catalog,
    config: Config,
    gallery: gallery::State,
    /// Resolved once; system detection is too slow to run per frame.
    theme: Theme,
    notifications: notifications::Manager,
    diagnostics: DiagnosticsCollector,
    loader: EmbedLoader,
    /// Abort handle of the in-flight embed creation.
    embed_task: Option<task::Handle>,
    clipboard: Box<dyn ClipboardBackend>,
    thumbnails: ThumbnailCache,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("items", &self.catalog.len())
            .field("open_item", &self.gallery.open_item())
            .field("embed", &self.loader.readiness())
            .finish()
    }
}

pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        // Close requests go through `update` so in-flight work is cancelled first.
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced requires an `Fn` boot closure; flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

fn gallery_settings(config: &Config) -> gallery::Settings {
    gallery::Settings {
        filter_mode: config.gallery.filter_mode(),
        card_prompt_chars: config.gallery.card_prompt_chars(),
        columns: config.gallery.columns(),
        embed_options: config.embed.options(),
        embed_max_wait: config.embed.max_wait(),
    }
}

impl App {
    fn from_parts(
        config: Config,
        catalog: Catalog,
        loader: EmbedLoader,
        clipboard: Box<dyn ClipboardBackend>,
    ) -> Self {
        let diagnostics = DiagnosticsCollector::new(BufferCapacity::default());
        let mut notifications = notifications::Manager::new();
        notifications.set_diagnostics(diagnostics.handle());
        diagnostics.handle().log_state(AppStateEvent::CatalogLoaded {
            items: catalog.len(),
        });

        let mut gallery = gallery::State::new(gallery_settings(&config));
        gallery.visible_indices(catalog.items());
        let thumbnails = ThumbnailCache::for_catalog(catalog.len());

        Self {
            theme: config.general.theme_mode.theme(),
            gallery,
            catalog,
            config,
            notifications,
            diagnostics,
            loader,
            embed_task: None,
            clipboard,
            thumbnails,
        }
    }

    /// Loads settings and the catalog, then starts the embed library load
    /// and the thumbnail fetches.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let data_path = flags
            .data_path
            .clone()
            .or_else(|| config.gallery.data_path.clone());
        let (catalog, catalog_warning) = catalog::load(data_path.as_deref());

        let endpoint = config.embed.endpoint().to_string();
        let loader =
            EmbedLoader::global_or_init(|| EmbedLoader::new(OEmbedScript::new(endpoint))).clone();

        let mut app = App::from_parts(config, catalog, loader, Box::new(SystemClipboard::new()));
        if let Some(mode) = flags.theme {
            app.set_theme_mode(mode);
        }
        logger::attach_diagnostics(app.diagnostics.handle());

        for (source, warning) in [("config", config_warning), ("catalog", catalog_warning)] {
            if let Some(message) = warning {
                app.notifications
                    .push(Notification::warning(message).from_source(source));
            }
        }

        let mut tasks = vec![app.load_embed_library()];
        let base_dir = data_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf);
        match ThumbnailLoader::new(base_dir) {
            Ok(thumbnail_loader) => tasks.extend(app.fetch_thumbnails(&thumbnail_loader)),
            Err(err) => log::warn!("thumbnails disabled: {}", err),
        }

        (app, Task::batch(tasks))
    }

    /// Starts the one-time library load. No-op if it already started.
    fn load_embed_library(&self) -> Task<Message> {
        match self.loader.ensure_loaded() {
            Some(load) => Task::perform(load, Message::EmbedLibraryLoaded),
            None => Task::none(),
        }
    }

    fn fetch_thumbnails(&mut self, loader: &ThumbnailLoader) -> Vec<Task<Message>> {
        let mut tasks = Vec::new();
        for item in self.catalog.items() {
            if !self.thumbnails.begin(item.id()) {
                continue;
            }
            let loader = loader.clone();
            let id = item.id().to_string();
            let reference = item.image_url().to_string();
            tasks.push(Task::perform(
                async move { loader.load(&reference).await },
                move |result| Message::ThumbnailLoaded { id, result },
            ));
        }
        tasks
    }

    fn title(&self) -> String {
        match self.gallery.open_item().and_then(|i| self.catalog.get(i)) {
            Some(item) => format!("{} - {}", item.category(), APP_TITLE),
            None => APP_TITLE.to_string(),
        }
    }

    fn set_theme_mode(&mut self, mode: ThemeMode) {
        self.theme = mode.theme();
    }

    fn theme(&self) -> Theme {
        self.theme.clone()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_embed_poll_subscription(
                self.gallery.needs_embed_poll(),
                self.config.embed.poll_interval(),
            ),
            subscription::create_tick_subscription(self.notifications.has_notifications()),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        self.diagnostics.process_pending();

        let handle = self.diagnostics.handle();
        let mut ctx = update::UpdateContext {
            catalog: &self.catalog,
            gallery: &mut self.gallery,
            notifications: &mut self.notifications,
            diagnostics: &handle,
            loader: &self.loader,
            clipboard: self.clipboard.as_mut(),
            thumbnails: &mut self.thumbnails,
            embed_task: &mut self.embed_task,
        };

        match message {
            Message::Gallery(gallery_message) => {
                update::handle_gallery_message(&mut ctx, gallery_message, Instant::now())
            }
            Message::Notification(notification_message) => {
                ctx.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::EmbedLibraryLoaded(readiness) => {
                update::handle_library_loaded(&mut ctx, readiness)
            }
            Message::ThumbnailLoaded { id, result } => {
                update::handle_thumbnail_loaded(&mut ctx, &id, result)
            }
            Message::ClipboardFallbackDone => update::handle_clipboard_fallback_done(&mut ctx),
            Message::Tick(now) => {
                ctx.notifications.tick(now);
                Task::none()
            }
            Message::EscapePressed => update::handle_gallery_message(
                &mut ctx,
                gallery::Message::CloseModal(DismissSource::EscapeKey),
                Instant::now(),
            ),
            Message::WindowCloseRequested(id) => {
                update::abort_embed(&mut ctx);
                log::debug!("close requested for window {:?}", id);
                self.log_recent_problems();
                iced::exit()
            }
        }
    }

    fn log_recent_problems(&mut self) {
        self.diagnostics.process_pending();
        let problems: Vec<_> = self
            .diagnostics
            .recent_problems(PROBLEMS_ON_EXIT)
            .collect();
        if problems.is_empty() {
            return;
        }
        log::info!("{} recent problem(s) this session:", problems.len());
        for event in problems {
            if let Ok(line) = serde_json::to_string(event) {
                log::info!("  {}", line);
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            catalog: &self.catalog,
            gallery: &self.gallery,
            thumbnails: &self.thumbnails,
            notifications: &self.notifications,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSource;
    use crate::clipboard::ClipboardError;
    use crate::embed::test_support::{Answer, FakeLibrary, FakeScript};
    use crate::embed::{Readiness, RenderState};
    use std::sync::{Arc, Mutex};

    const ITEMS: &str = r#"[
        {"id": "p1", "imageUrl": "a.png", "prompt": "a cat in the rain", "category": "Portrait",
         "tags": ["soft"], "twitterUrl": "https://x.com/a/status/111"},
        {"id": "p2", "imageUrl": "b.png", "prompt": "a quiet harbor", "category": "Landscape",
         "tags": [], "twitterUrl": "https://x.com/b/status/222"}
    ]"#;

    #[derive(Clone, Default)]
    struct SharedClipboard {
        fail: bool,
        written: Arc<Mutex<Vec<String>>>,
    }

    impl ClipboardBackend for SharedClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::Unavailable("headless".into()));
            }
            self.written.lock().expect("lock").push(text.to_string());
            Ok(())
        }
    }

    fn test_app(clipboard: SharedClipboard, library_ready: bool) -> App {
        let catalog =
            Catalog::from_json(ITEMS.as_bytes(), CatalogSource::Memory).expect("catalog");
        let loader = EmbedLoader::new(FakeScript {
            library: FakeLibrary::new(Answer::Post),
            fail: !library_ready,
        });
        App::from_parts(Config::default(), catalog, loader, Box::new(clipboard))
    }

    #[test]
    fn title_names_open_item_category() {
        let mut app = test_app(SharedClipboard::default(), false);
        assert_eq!(app.title(), APP_TITLE);

        let _ = app.update(Message::Gallery(gallery::Message::OpenItem(1)));
        assert_eq!(app.title(), "Landscape - Prompt Gallery");

        let _ = app.update(Message::EscapePressed);
        assert_eq!(app.title(), APP_TITLE);
    }

    #[test]
    fn copy_writes_full_prompt_and_notifies() {
        let clipboard = SharedClipboard::default();
        let written = Arc::clone(&clipboard.written);
        let mut app = test_app(clipboard, false);

        let _ = app.update(Message::Gallery(gallery::Message::OpenItem(0)));
        let _ = app.update(Message::Gallery(gallery::Message::CopyPrompt));

        assert_eq!(
            written.lock().expect("lock").as_slice(),
            ["a cat in the rain"]
        );
        assert_eq!(app.notifications.visible_count(), 1);
    }

    #[test]
    fn failed_direct_copy_notifies_after_fallback() {
        let clipboard = SharedClipboard {
            fail: true,
            ..SharedClipboard::default()
        };
        let written = Arc::clone(&clipboard.written);
        let mut app = test_app(clipboard, false);

        let _ = app.update(Message::Gallery(gallery::Message::OpenItem(0)));
        let _ = app.update(Message::Gallery(gallery::Message::CopyPrompt));
        assert!(written.lock().expect("lock").is_empty());
        assert_eq!(app.notifications.visible_count(), 0);

        let _ = app.update(Message::ClipboardFallbackDone);
        assert_eq!(app.notifications.visible_count(), 1);
    }

    #[test]
    fn poll_subscription_only_while_waiting() {
        let mut app = test_app(SharedClipboard::default(), false);
        assert!(!app.gallery.needs_embed_poll());

        let _ = app.update(Message::Gallery(gallery::Message::OpenItem(0)));
        assert!(app.gallery.needs_embed_poll());

        let _ = app.update(Message::Gallery(gallery::Message::CloseModal(
            DismissSource::Backdrop,
        )));
        assert!(!app.gallery.needs_embed_poll());
        assert!(app.embed_task.is_none());
    }

    #[tokio::test]
    async fn library_ready_moves_open_item_to_rendering() {
        let mut app = test_app(SharedClipboard::default(), true);
        let _ = app.update(Message::Gallery(gallery::Message::OpenItem(0)));
        assert!(matches!(
            app.gallery.renderer().state(),
            RenderState::AwaitingLibrary { .. }
        ));

        if let Some(load) = app.loader.ensure_loaded() {
            assert_eq!(load.await, Readiness::Ready);
        }
        let _ = app.update(Message::EmbedLibraryLoaded(Readiness::Ready));

        assert!(matches!(
            app.gallery.renderer().state(),
            RenderState::Rendering { .. }
        ));
        assert!(app.embed_task.is_some());
    }

    #[test]
    fn theme_override_is_resolved_once() {
        let mut app = test_app(SharedClipboard::default(), false);
        app.set_theme_mode(ThemeMode::Light);
        assert_eq!(app.theme(), Theme::Light);
        app.set_theme_mode(ThemeMode::Dark);
        assert_eq!(app.theme(), Theme::Dark);
        assert_eq!(app.theme, Theme::Dark);
    }

    #[test]
    fn catalog_larger_than_default_cache_keeps_loaded_thumbnails() {
        use crate::config::defaults::THUMBNAIL_CACHE_CAPACITY;
        use crate::domain::gallery::PromptItem;
        use crate::media::{Thumbnail, ThumbnailState};
        use iced::widget::image::Handle;

        let count = THUMBNAIL_CACHE_CAPACITY + 44;
        let items = (0..count)
            .map(|i| PromptItem::new(format!("p-{}", i), "a.png", "prompt", "Video", vec![], ""))
            .collect();
        let catalog = Catalog::from_items(items).expect("catalog");
        let loader = EmbedLoader::new(FakeScript {
            library: FakeLibrary::new(Answer::Post),
            fail: true,
        });
        let mut app = App::from_parts(
            Config::default(),
            catalog,
            loader,
            Box::new(SharedClipboard::default()),
        );

        for i in 0..count {
            assert!(app.thumbnails.begin(&format!("p-{}", i)));
        }
        for i in 0..count {
            let _ = app.update(Message::ThumbnailLoaded {
                id: format!("p-{}", i),
                result: Ok(Thumbnail {
                    handle: Handle::from_rgba(1, 1, vec![0, 0, 0, 255]),
                    width: 1,
                    height: 1,
                }),
            });
        }

        let missing = app
            .catalog
            .items()
            .iter()
            .filter(|item| !matches!(app.thumbnails.peek(item.id()), Some(ThumbnailState::Ready(_))))
            .count();
        assert_eq!(missing, 0);
    }
}
