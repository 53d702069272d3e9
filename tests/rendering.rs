use ratatui::{Terminal, backend::TestBackend};
use tui_wellness_app::config::AppConfig;
use tui_wellness_app::internal::models::{FavoriteEntry, Quote, Tip, Video};
use tui_wellness_app::internal::prefs::PrefStore;
use tui_wellness_app::internal::tips::TipStore;
use tui_wellness_app::internal::ui::app::{App, ViewMode};
use tui_wellness_app::internal::ui::view;

fn test_app(name: &str) -> App {
    let dir = std::env::temp_dir().join(format!("wellness-rendering-{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    App::new(AppConfig::default(), PrefStore::at(dir))
}

fn draw_to_text(app: &mut App) -> String {
    let backend = TestBackend::new(100, 40);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| view::draw(app, f)).unwrap();

    let buffer = terminal.backend().buffer();
    let area = *buffer.area();
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            match buffer.cell((x, y)) {
                Some(cell) => out.push_str(cell.symbol()),
                None => out.push(' '),
            }
        }
        out.push('\n');
    }
    out
}

fn tip(id: &str, title: &str, category: &str) -> Tip {
    Tip {
        id: id.to_string(),
        title: title.to_string(),
        content: "Short actionable advice.".to_string(),
        category: category.to_string(),
        source: "unit-test".to_string(),
    }
}

#[test]
fn test_home_view_renders_all_three_regions() {
    let mut app = test_app("home");
    app.quote = Some(Quote {
        id: "quote-of-the-day".to_string(),
        text: "Well-being is a practice".to_string(),
        author: "Somebody Wise".to_string(),
    });
    app.videos = vec![Video {
        video_id: "vid42".to_string(),
        title: "Desk stretch break".to_string(),
        channel_title: "Stretchers".to_string(),
    }];
    app.tip_store = TipStore::from_tips(vec![tip("t1", "Morning sunlight", "sleep")]);

    let text = draw_to_text(&mut app);

    assert!(text.contains("Well-being is a practice"));
    assert!(text.contains("Somebody Wise"));
    assert!(text.contains("Desk stretch break"));
    assert!(text.contains("Morning sunlight"));
    assert!(text.contains("Quote of the Day"));
}

#[test]
fn test_favorites_view_shows_only_video_entries() {
    let mut app = test_app("favorites-scope");
    app.favorites.add(FavoriteEntry::from_quote(&Quote {
        id: "quote-of-the-day".to_string(),
        text: "Saved quote body".to_string(),
        author: "Quoted Person".to_string(),
    }));
    app.favorites.add(FavoriteEntry::from_tip(&tip(
        "t9",
        "Saved tip headline",
        "fitness",
    )));
    app.favorites.add(FavoriteEntry::from_video(&Video {
        video_id: "fav77".to_string(),
        title: "Saved video lesson".to_string(),
        channel_title: "Keepers".to_string(),
    }));
    app.view_mode = ViewMode::Favorites;

    let text = draw_to_text(&mut app);

    assert!(text.contains("Saved video lesson"));
    assert!(!text.contains("Saved tip headline"));
    assert!(!text.contains("Saved quote body"));
}

#[test]
fn test_empty_favorites_renders_placeholder() {
    let mut app = test_app("favorites-empty");
    app.view_mode = ViewMode::Favorites;

    let text = draw_to_text(&mut app);

    assert!(text.contains("You haven't saved any favorite videos yet."));
}

#[test]
fn test_tips_view_renders_placeholder_when_filters_exclude_everything() {
    let mut app = test_app("tips-empty");
    app.tip_store = TipStore::from_tips(vec![tip("t1", "Morning sunlight", "sleep")]);
    app.view_mode = ViewMode::Tips;
    app.search_query = "zzzzzz".to_string();

    let text = draw_to_text(&mut app);

    assert!(text.contains("No tips match your filters."));
}

#[test]
fn test_empty_video_region_points_at_configuration() {
    let mut app = test_app("videos-empty");
    app.tip_store = TipStore::from_tips(vec![tip("t1", "Morning sunlight", "sleep")]);

    let text = draw_to_text(&mut app);

    assert!(text.contains("No videos found. Check the API credential"));
}

#[test]
fn test_notification_overlay_is_titled_by_kind() {
    let mut app = test_app("notification-kind");
    app.notify_info("Saved to favorites");
    let text = draw_to_text(&mut app);
    assert!(text.contains("Info"));
    assert!(text.contains("Saved to favorites"));

    app.notify_error("Could not open a browser");
    let text = draw_to_text(&mut app);
    assert!(text.contains("Error"));
    assert!(text.contains("Could not open a browser"));
}

#[test]
fn test_persisted_category_shows_up_in_tips_title() {
    let dir = std::env::temp_dir().join("wellness-rendering-category");
    let _ = std::fs::remove_dir_all(&dir);
    let prefs = PrefStore::at(dir);
    prefs.set(
        tui_wellness_app::internal::prefs::PrefKey::Category,
        &"fitness".to_string(),
    );

    let mut app = App::new(AppConfig::default(), prefs);
    app.tip_store = TipStore::from_tips(vec![
        tip("t1", "Walking meeting", "fitness"),
        tip("t2", "Wind-down hour", "sleep"),
    ]);
    app.view_mode = ViewMode::Tips;

    let text = draw_to_text(&mut app);

    assert!(text.contains("Tips [fitness]"));
    assert!(text.contains("Walking meeting"));
    assert!(!text.contains("Wind-down hour"));
}
