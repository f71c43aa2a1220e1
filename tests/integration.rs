use chrono::NaiveDate;
use rcal::lunar::{LunarEngine, LunarPhase};
use rcal::{
    group_by_location, Direction, EventLocation, LunarConfig, LunarRequest, LunarResponse,
    NavigationAction, NavigationState, SpatialGranularity, TemporalGranularity,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn coupling_never_narrows_space_as_time_widens() {
    for pair in TemporalGranularity::ALL.windows(2) {
        let finer = pair[0].coupled_spatial();
        let coarser = pair[1].coupled_spatial();
        assert!(coarser.extent_rank() >= finer.extent_rank(), "{} -> {}", pair[0], pair[1]);
        assert!(coarser.ordinal() <= finer.ordinal());
    }
}

#[test]
fn zoom_in_undoes_zoom_out_below_decade() {
    for level in TemporalGranularity::ALL {
        if level >= TemporalGranularity::Decade {
            continue;
        }
        assert_eq!(level.zoomed_out().zoomed_in(), level);
    }
    for level in TemporalGranularity::ALL {
        let out = level.zoomed_out();
        assert!(out != TemporalGranularity::Century && out != TemporalGranularity::Cosmic);
    }
}

#[test]
fn recoupling_snaps_spatial_to_table() {
    for level in TemporalGranularity::ALL {
        let mut nav = NavigationState::new(ymd(2024, 1, 1));
        nav.set_temporal_granularity(level);
        nav.toggle_coupled();
        nav.set_spatial_granularity(Some(SpatialGranularity::Bioregion));
        nav.toggle_coupled();
        assert!(nav.coupled);
        assert_eq!(nav.effective_spatial_granularity(), level.coupled_spatial());
    }
}

#[test]
fn synodic_month_brackets_every_day_of_2024() {
    let engine = LunarEngine::default();
    for day in ymd(2024, 1, 1).iter_days().take(366) {
        let month = engine.synodic_month(day);
        let start = month.start.date_naive();
        let end = month.end.date_naive();
        assert!(start <= day && day <= end, "{day}: {start} .. {end}");
        let gap = (end - start).num_days();
        assert!((27..=31).contains(&gap), "{day}: gap {gap}");

        assert_eq!(month.phases[0].instant, month.start);
        for pair in month.phases.windows(2) {
            assert!(pair[0].instant < pair[1].instant);
        }
        let names: Vec<_> = month.phases.iter().map(|p| p.phase).collect();
        assert_eq!(names, LunarPhase::ALL.to_vec());
    }
}

#[test]
fn january_2024_new_moon() {
    let month = LunarEngine::default().synodic_month(ymd(2024, 1, 11));
    assert_eq!(month.start.date_naive(), ymd(2024, 1, 11));
    let end = month.end.date_naive();
    assert!(end == ymd(2024, 2, 9) || end == ymd(2024, 2, 10), "end {end}");
}

#[test]
fn month_zoom_session() {
    let mut nav = NavigationState::new(ymd(2024, 2, 15));
    nav.apply(NavigationAction::SetTemporal(TemporalGranularity::Month));
    assert_eq!(nav.effective_spatial_granularity(), SpatialGranularity::Country);
    for _ in 0..4 {
        nav.apply(NavigationAction::ZoomIn);
    }
    assert_eq!(nav.temporal, TemporalGranularity::Moment);
    nav.apply(NavigationAction::ZoomIn);
    assert_eq!(nav.temporal, TemporalGranularity::Moment);
}

#[test]
fn season_step_moves_three_months() {
    let nav = NavigationState::new(ymd(2024, 2, 15))
        .reduce(NavigationAction::SetTemporal(TemporalGranularity::Season))
        .reduce(NavigationAction::Navigate(Direction::Next));
    assert_eq!(nav.anchor_date, ymd(2024, 5, 15));
}

#[test]
fn visible_range_feeds_grouping() {
    let nav = NavigationState::new(ymd(2024, 6, 10));
    let range = nav.visible_range();
    assert_eq!(range.len_days(), 30);

    let events = vec![
        EventLocation {
            display: Some("Tempelhofer Feld".into()),
            breadcrumb: Some("Earth > Europe > Germany > Berlin".into()),
            ..Default::default()
        },
        EventLocation {
            display: Some("Hafen".into()),
            breadcrumb: Some("Earth > Europe > Germany > Hamburg".into()),
            ..Default::default()
        },
    ];
    let by_country = group_by_location(&events, nav.effective_spatial_granularity());
    assert_eq!(by_country.len(), 1);
    assert_eq!(by_country[0].label, "Germany");

    let by_city = group_by_location(&events, SpatialGranularity::City);
    assert_eq!(by_city.len(), 2);
}

#[test]
fn range_query_end_to_end() {
    let params = [("start", "2024-03-01"), ("end", "2024-03-31")];
    let request = LunarRequest::from_params(params, &LunarConfig::default()).unwrap();
    let engine = LunarEngine::default();
    match engine.answer(&request, ymd(2024, 1, 1)) {
        LunarResponse::Range(report) => {
            assert_eq!(report.count, 31);
            assert!(report.phases.values().all(|p| (0.0..=1.0).contains(&p.illumination)));
        }
        other => panic!("unexpected response {other:?}"),
    }
}

#[cfg(feature = "serde")]
#[test]
fn range_report_json_is_keyed_by_date() {
    let params = [("start", "2024-01-10"), ("end", "2024-01-12")];
    let engine = LunarEngine::default();
    let request = engine.parse_request(params).unwrap();
    let json = serde_json::to_value(engine.answer(&request, ymd(2024, 1, 1))).unwrap();
    assert_eq!(json["count"], 3);
    assert_eq!(json["start"], "2024-01-10");
    assert_eq!(json["phases"]["2024-01-11"]["phase"], "new_moon");
    assert_eq!(json["phases"]["2024-01-11"]["emoji"], "🌑");
}
