use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use jiff::Timestamp;
use ratatui::widgets::ListState;
use strum_macros::Display;

use crate::api::ApiService;
use crate::config::AppConfig;
use crate::internal::favorites::Favorites;
use crate::internal::models::{FavoriteEntry, Quote, Tip, Video};
use crate::internal::notification::Notification;
use crate::internal::prefs::{PrefKey, PrefStore};
use crate::internal::tips::{ALL_CATEGORIES, TipStore, filter_tips};
use crate::utils::theme::{Theme, ThemeMode};

/// How long the search input must stay quiet before a keystroke turns into a
/// video refetch.
const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Top-level application views.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Display)]
pub enum ViewMode {
    Home,
    Tips,
    Favorites,
}

/// Whether keystrokes edit the search query or drive the app.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InputMode {
    Normal,
    Search,
}

/// Everything the event loop can be asked to do, whether by a keystroke or
/// by a finished background fetch.
#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    NavigateUp,
    NavigateDown,
    NavigateTo(ViewMode),
    /// Two-phase refresh: `full` additionally walks the remote fetches.
    Refresh {
        full: bool,
    },
    QuoteLoaded(Quote),
    /// Video results tagged with the generation that requested them.
    VideosLoaded(u64, Vec<Video>),
    /// The debounce timer for a search edit ran out.
    SearchSettled(u64),
    ToggleFavorite,
    ToggleQuoteFavorite,
    CycleCategory,
    ToggleTheme,
    OpenVideo,
    ClearSearch,
}

/// Main application state. All durable pieces are restored from the
/// preference store at construction and written back on their own mutation
/// events; everything else lives and dies with the session.
pub struct App {
    pub running: bool,
    pub app_version: String,
    pub view_mode: ViewMode,
    pub input_mode: InputMode,
    pub quote: Option<Quote>,
    pub quote_loading: bool,
    pub videos: Vec<Video>,
    pub videos_loading: bool,
    pub tip_store: TipStore,
    pub favorites: Favorites,
    pub category: String,
    pub search_query: String,
    pub theme_mode: ThemeMode,
    pub theme: Theme,
    pub last_fetch: Option<i64>,
    pub list_state: ListState,
    pub notification: Option<Notification>,
    pub prefs: PrefStore,
    pub config: AppConfig,
    pub api_service: Arc<ApiService>,
    video_generation: u64,
    search_generation: u64,
    pub action_tx: UnboundedSender<Action>,
    pub action_rx: UnboundedReceiver<Action>,
}

impl App {
    pub fn new(config: AppConfig, prefs: PrefStore) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let api_service = Arc::new(ApiService::new(config.video_api_key.clone()));

        let favorites = Favorites::load(&prefs);
        let theme_mode: ThemeMode = prefs.get(PrefKey::Theme, ThemeMode::default());
        let category: String = prefs.get(PrefKey::Category, ALL_CATEGORIES.to_string());
        let last_fetch: Option<i64> = prefs.get(PrefKey::LastFetch, None);

        tracing::info!(
            favorites = favorites.len(),
            theme = theme_mode.as_str(),
            %category,
            "restored persisted state"
        );

        Self {
            running: true,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            view_mode: ViewMode::Home,
            input_mode: InputMode::Normal,
            quote: None,
            quote_loading: false,
            videos: Vec::new(),
            videos_loading: false,
            tip_store: TipStore::new(),
            favorites,
            category,
            search_query: String::new(),
            theme: Theme::for_mode(theme_mode),
            theme_mode,
            last_fetch,
            list_state: ListState::default(),
            notification: None,
            prefs,
            config,
            api_service,
            video_generation: 0,
            search_generation: 0,
            action_tx,
            action_rx,
        }
    }

    pub async fn run(&mut self, mut tui: crate::tui::Tui) -> Result<()> {
        // Startup is the one full refresh; view changes later only re-render
        // what is already in memory.
        let _ = self.action_tx.send(Action::Refresh { full: true });

        let mut event_interval = tokio::time::interval(std::time::Duration::from_millis(16));

        loop {
            tui.draw(|f| crate::internal::ui::view::draw(self, f))?;

            tokio::select! {
                _ = event_interval.tick() => {
                    if event::poll(std::time::Duration::from_millis(0))?
                        && let Event::Key(key) = event::read()?
                        && key.kind == KeyEventKind::Press
                    {
                        self.handle_key_event(key);
                    }
                }
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }
            }

            if let Some(notification) = &self.notification
                && notification.should_dismiss()
            {
                self.notification = None;
            }

            if !self.running {
                break;
            }
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Search => self.handle_search_input(key),
            InputMode::Normal => self.handle_normal_input(key),
        }
    }

    fn handle_search_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                self.search_query.push(c);
                // Tips narrow as the query grows, so the cursor may now sit
                // past the end of the filtered list.
                self.clamp_selection();
                self.schedule_search_refetch();
            }
            KeyCode::Backspace => {
                if self.search_query.pop().is_some() {
                    self.clamp_selection();
                    self.schedule_search_refetch();
                }
            }
            KeyCode::Enter | KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    fn handle_normal_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => match self.view_mode {
                ViewMode::Home => {
                    let _ = self.action_tx.send(Action::Quit);
                }
                ViewMode::Tips | ViewMode::Favorites => {
                    let _ = self.action_tx.send(Action::NavigateTo(ViewMode::Home));
                }
            },
            KeyCode::Char('j') | KeyCode::Down => {
                let _ = self.action_tx.send(Action::NavigateDown);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let _ = self.action_tx.send(Action::NavigateUp);
            }
            KeyCode::Char('1') => {
                let _ = self.action_tx.send(Action::NavigateTo(ViewMode::Home));
            }
            KeyCode::Char('2') => {
                let _ = self.action_tx.send(Action::NavigateTo(ViewMode::Tips));
            }
            KeyCode::Char('3') => {
                let _ = self.action_tx.send(Action::NavigateTo(ViewMode::Favorites));
            }
            KeyCode::Char('f') => {
                let _ = self.action_tx.send(Action::ToggleFavorite);
            }
            KeyCode::Char('d') => {
                let _ = self.action_tx.send(Action::ToggleQuoteFavorite);
            }
            KeyCode::Char('o') | KeyCode::Enter => {
                let _ = self.action_tx.send(Action::OpenVideo);
            }
            KeyCode::Char('c') => {
                let _ = self.action_tx.send(Action::CycleCategory);
            }
            KeyCode::Char('t') => {
                let _ = self.action_tx.send(Action::ToggleTheme);
            }
            KeyCode::Char('r') => {
                let _ = self.action_tx.send(Action::Refresh { full: true });
            }
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Search;
            }
            KeyCode::Char('C') => {
                let _ = self.action_tx.send(Action::ClearSearch);
            }
            _ => {}
        }
    }

    #[tracing::instrument(skip(self, action))]
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::NavigateUp => self.select_prev(),
            Action::NavigateDown => self.select_next(),
            Action::NavigateTo(target) => self.navigate_to(target),
            Action::Refresh { full } => self.refresh(full),
            Action::QuoteLoaded(quote) => {
                self.quote = Some(quote);
                self.quote_loading = false;
            }
            Action::VideosLoaded(generation, videos) => {
                // Only the most recently started search may land; a slower
                // response from an older query is dropped here.
                if generation == self.video_generation {
                    self.videos = videos;
                    self.videos_loading = false;
                    self.record_fetch_time();
                    if self.view_mode == ViewMode::Home {
                        self.clamp_selection();
                    }
                } else {
                    tracing::debug!(
                        generation,
                        current = self.video_generation,
                        "dropping stale video response"
                    );
                }
            }
            Action::SearchSettled(generation) => {
                if generation == self.search_generation {
                    self.spawn_video_fetch();
                }
            }
            Action::ToggleFavorite => self.toggle_selected_favorite(),
            Action::ToggleQuoteFavorite => self.toggle_quote_favorite(),
            Action::CycleCategory => self.cycle_category(),
            Action::ToggleTheme => self.toggle_theme(),
            Action::OpenVideo => self.open_selected_video(),
            Action::ClearSearch => {
                if !self.search_query.is_empty() {
                    self.search_query.clear();
                    self.clamp_selection();
                    self.spawn_video_fetch();
                }
            }
        }
    }

    /// Two-phase refresh. The cheap phase only makes sure the local tips are
    /// present; the full phase also walks the remote fetches, quote strictly
    /// before videos.
    fn refresh(&mut self, full: bool) {
        let tips_path = PathBuf::from(&self.config.tips_file);
        self.tip_store.ensure_loaded(&tips_path);

        if full {
            self.spawn_full_fetch();
        }

        if self.list_state.selected().is_none() {
            self.reset_selection();
        }
    }

    fn spawn_full_fetch(&mut self) {
        self.video_generation = self.video_generation.wrapping_add(1);
        let generation = self.video_generation;
        self.quote_loading = true;
        self.videos_loading = true;

        let api = self.api_service.clone();
        let tx = self.action_tx.clone();
        let query = self.video_query();

        tokio::spawn(async move {
            // The quote is delivered before the video search starts so its
            // region fills in as soon as it resolves.
            let quote = api.fetch_quote().await;
            let _ = tx.send(Action::QuoteLoaded(quote));

            let videos = api.fetch_videos(&query).await;
            let _ = tx.send(Action::VideosLoaded(generation, videos));
        });
    }

    fn spawn_video_fetch(&mut self) {
        self.video_generation = self.video_generation.wrapping_add(1);
        let generation = self.video_generation;
        self.videos_loading = true;

        let api = self.api_service.clone();
        let tx = self.action_tx.clone();
        let query = self.video_query();

        tokio::spawn(async move {
            let videos = api.fetch_videos(&query).await;
            let _ = tx.send(Action::VideosLoaded(generation, videos));
        });
    }

    /// Debounce boundary between search edits and the network: every edit
    /// bumps the generation, and only the probe that still matches it when
    /// the timer fires triggers a refetch.
    fn schedule_search_refetch(&mut self) {
        self.search_generation = self.search_generation.wrapping_add(1);
        let generation = self.search_generation;
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            tokio::time::sleep(SEARCH_DEBOUNCE).await;
            let _ = tx.send(Action::SearchSettled(generation));
        });
    }

    /// The query sent to the video search: the search term when present,
    /// otherwise a query derived from the active category.
    pub fn video_query(&self) -> String {
        let term = self.search_query.trim();
        if !term.is_empty() {
            return term.to_string();
        }
        match self.category.as_str() {
            ALL_CATEGORIES => "wellness tips".to_string(),
            category => format!("{category} wellness"),
        }
    }

    fn navigate_to(&mut self, target: ViewMode) {
        if target == self.view_mode {
            return;
        }
        tracing::debug!(view = %target, "view changed");
        self.view_mode = target;
        self.reset_selection();

        match target {
            // Home and Tips re-run the cheap refresh; Favorites renders
            // straight from state.
            ViewMode::Home | ViewMode::Tips => {
                let _ = self.action_tx.send(Action::Refresh { full: false });
            }
            ViewMode::Favorites => {}
        }
    }

    /// The tips surviving the current category and search filters.
    pub fn filtered_tips(&self) -> Vec<&Tip> {
        filter_tips(self.tip_store.tips(), &self.category, &self.search_query)
    }

    /// Number of rows in the active view's selectable list.
    fn selectable_len(&self) -> usize {
        match self.view_mode {
            ViewMode::Home => self.videos.len(),
            ViewMode::Tips => self.filtered_tips().len(),
            ViewMode::Favorites => self.favorites.videos().len(),
        }
    }

    fn reset_selection(&mut self) {
        match self.selectable_len() {
            0 => self.list_state.select(None),
            _ => self.list_state.select(Some(0)),
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.selectable_len();
        match (len, self.list_state.selected()) {
            (0, _) => self.list_state.select(None),
            (len, Some(idx)) if idx >= len => self.list_state.select(Some(len - 1)),
            (_, None) => self.list_state.select(Some(0)),
            _ => {}
        }
    }

    fn select_next(&mut self) {
        let len = self.selectable_len();
        if len == 0 {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn select_prev(&mut self) {
        let len = self.selectable_len();
        if len == 0 {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Add or remove the favorite for whatever the active list has selected,
    /// then persist the set. Indicators pick the change up on the next frame.
    fn toggle_selected_favorite(&mut self) {
        let entry = match (self.view_mode, self.list_state.selected()) {
            (ViewMode::Home, Some(idx)) => self.videos.get(idx).map(FavoriteEntry::from_video),
            (ViewMode::Tips, Some(idx)) => self
                .filtered_tips()
                .get(idx)
                .copied()
                .map(FavoriteEntry::from_tip),
            (ViewMode::Favorites, Some(idx)) => {
                self.favorites.videos().get(idx).copied().cloned()
            }
            _ => None,
        };

        match entry {
            Some(entry) => {
                let added = self.favorites.toggle(entry);
                self.favorites.save(&self.prefs);
                self.notify_info(match added {
                    true => "Saved to favorites",
                    false => "Removed from favorites",
                });

                // A removal can shrink the favorites list under the cursor.
                if self.view_mode == ViewMode::Favorites {
                    self.clamp_selection();
                }
            }
            None => self.notify_info("Nothing selected to favorite"),
        }
    }

    fn toggle_quote_favorite(&mut self) {
        match &self.quote {
            Some(quote) => {
                let added = self.favorites.toggle(FavoriteEntry::from_quote(quote));
                self.favorites.save(&self.prefs);
                self.notify_info(match added {
                    true => "Quote saved",
                    false => "Quote removed from favorites",
                });
            }
            None => self.notify_info("No quote loaded yet"),
        }
    }

    /// Advance to the next category, persist it, and refetch videos for it.
    /// Tips re-filter on the next frame.
    fn cycle_category(&mut self) {
        let categories = self.tip_store.categories();
        if categories.len() <= 1 {
            return;
        }

        let current = categories
            .iter()
            .position(|c| c == &self.category)
            .unwrap_or(0);
        self.category = categories[(current + 1) % categories.len()].clone();
        self.prefs.set(PrefKey::Category, &self.category);

        if self.view_mode == ViewMode::Tips {
            self.reset_selection();
        }
        self.spawn_video_fetch();
    }

    fn toggle_theme(&mut self) {
        self.theme_mode = self.theme_mode.toggle();
        self.theme = Theme::for_mode(self.theme_mode);
        self.prefs.set(PrefKey::Theme, &self.theme_mode);
    }

    fn open_selected_video(&mut self) {
        let url = match (self.view_mode, self.list_state.selected()) {
            (ViewMode::Home, Some(idx)) => self.videos.get(idx).map(Video::watch_url),
            (ViewMode::Favorites, Some(idx)) => self
                .favorites
                .videos()
                .get(idx)
                .and_then(|entry| entry.watch_url()),
            _ => None,
        };

        match url {
            Some(url) => {
                if let Err(e) = open::that(&url) {
                    tracing::warn!(%e, %url, "failed to open browser");
                    self.notify_error("Could not open a browser");
                }
            }
            None => self.notify_info("No video selected"),
        }
    }

    fn record_fetch_time(&mut self) {
        self.last_fetch = Some(Timestamp::now().as_second());
        self.prefs.set(PrefKey::LastFetch, &self.last_fetch);
    }

    pub fn notify_info(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification::info(message));
    }

    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification::error(message));
    }
}
