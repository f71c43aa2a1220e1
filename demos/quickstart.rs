use chrono::Local;
use rcal::lunar::LunarEngine;
use rcal::{Direction, GeoPoint, NavigationAction, NavigationState};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("rcal=info".parse().unwrap()))
        .with_target(true)
        .compact()
        .init();

    let today = Local::now().date_naive();
    let mut nav = NavigationState::new(today);
    for action in [
        NavigationAction::ZoomOut,
        NavigationAction::Navigate(Direction::Next),
        NavigationAction::ZoomIn,
    ] {
        nav.apply(action);
        println!(
            "{action:?}: {} at {} / {}, showing {}",
            nav.anchor_date,
            nav.temporal,
            nav.effective_spatial_granularity(),
            nav.visible_range()
        );
    }

    let engine = LunarEngine::default();
    let month = engine.synodic_month(nav.anchor_date);
    println!("Lunation {} to {} ({:.2} days)", month.start, month.end, month.duration_days);
    for mark in &month.phases {
        println!("  {} {:<16} {}", mark.phase.emoji(), mark.phase, mark.instant);
    }

    let info = engine.phase_for_date(nav.anchor_date);
    println!(
        "{}: {} {} ({:.0}% lit, {:.1} days old)",
        nav.anchor_date,
        info.emoji(),
        info.phase,
        info.illumination * 100.0,
        info.age_days
    );

    if let Ok(greenwich) = GeoPoint::new(51.4769, 0.0) {
        let times = engine.moon_times(nav.anchor_date, greenwich);
        println!("Greenwich moonrise {:?}, moonset {:?}", times.rise, times.set);
    }
}
