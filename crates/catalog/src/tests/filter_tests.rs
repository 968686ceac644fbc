use super::*;
use chrono::{TimeZone, Utc};
use shared::domain::EventId;

fn event(id: &str, category: EventCategory, day: u32, registered: u32, price: Option<u64>) -> Event {
    Event {
        id: EventId::new(id),
        title: format!("Event {id}"),
        description: String::new(),
        short_description: String::new(),
        start_date: Utc.with_ymd_and_hms(2025, 6, day, 18, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2025, 6, day, 22, 0, 0).unwrap(),
        location: "Brazzaville".into(),
        image: String::new(),
        capacity: 100,
        registered_count: registered,
        category,
        status: EventStatus::Upcoming,
        organizers: Vec::new(),
        partners: Vec::new(),
        is_published: true,
        is_featured: false,
        ticket_price: price,
        ticket_currency: None,
    }
}

fn ids(events: &[&Event]) -> Vec<String> {
    events.iter().map(|event| event.id.0.clone()).collect()
}

fn sample() -> Vec<Event> {
    vec![
        event("a", EventCategory::Music, 12, 40, Some(5000)),
        event("b", EventCategory::Art, 3, 90, None),
        event("c", EventCategory::Music, 20, 10, Some(0)),
        event("d", EventCategory::Dance, 3, 90, Some(1500)),
    ]
}

#[test]
fn empty_criteria_keep_input_order() {
    let events = sample();
    let filtered = filter_events(&events, &EventFilter::default());
    assert_eq!(ids(&filtered), ["a", "b", "c", "d"]);
}

#[test]
fn category_filter_keeps_only_selected_categories() {
    let events = sample();
    let filter = EventFilter::default().with_category(EventCategory::Music);
    let filtered = filter_events(&events, &filter);
    assert_eq!(ids(&filtered), ["a", "c"]);
    assert!(filtered
        .iter()
        .all(|event| event.category == EventCategory::Music));
}

#[test]
fn free_includes_zero_and_absent_prices() {
    let events = sample();
    let filter = EventFilter {
        price: PriceFilter::Free,
        ..EventFilter::default()
    };
    assert_eq!(ids(&filter_events(&events, &filter)), ["b", "c"]);

    let paid = EventFilter {
        price: PriceFilter::Paid,
        ..EventFilter::default()
    };
    assert_eq!(ids(&filter_events(&events, &paid)), ["a", "d"]);
}

#[test]
fn search_is_case_insensitive_across_text_fields() {
    let mut events = sample();
    events[1].description = "Peinture et SCULPTURE".into();
    events[3].location = "Pointe-Noire".into();

    let by_description = EventFilter {
        search: "sculpture".into(),
        ..EventFilter::default()
    };
    assert_eq!(ids(&filter_events(&events, &by_description)), ["b"]);

    let by_location = EventFilter {
        search: "POINTE".into(),
        ..EventFilter::default()
    };
    assert_eq!(ids(&filter_events(&events, &by_location)), ["d"]);
}

#[test]
fn location_must_match_exactly() {
    let mut events = sample();
    events[0].location = "Pointe-Noire".into();
    let filter = EventFilter {
        location: "Pointe".into(),
        ..EventFilter::default()
    };
    assert!(filter_events(&events, &filter).is_empty());

    let filter = EventFilter {
        location: "Pointe-Noire".into(),
        ..EventFilter::default()
    };
    assert_eq!(ids(&filter_events(&events, &filter)), ["a"]);
}

#[test]
fn criteria_combine_with_and() {
    let events = sample();
    let filter = EventFilter {
        price: PriceFilter::Paid,
        ..EventFilter::default()
    }
    .with_category(EventCategory::Music)
    .with_category(EventCategory::Art);
    assert_eq!(ids(&filter_events(&events, &filter)), ["a"]);
}

#[test]
fn status_filter_excludes_other_statuses() {
    let mut events = sample();
    events[2].status = EventStatus::Cancelled;
    let filter = EventFilter::default().with_status(EventStatus::Cancelled);
    assert_eq!(ids(&filter_events(&events, &filter)), ["c"]);
}

#[test]
fn date_sort_is_ascending_stable_and_idempotent() {
    let events = sample();
    let once = sort_events(events.iter().collect(), SortBy::Date);
    assert_eq!(ids(&once), ["b", "d", "a", "c"]);
    assert!(once.windows(2).all(|w| w[0].start_date <= w[1].start_date));

    let twice = sort_events(once.clone(), SortBy::Date);
    assert_eq!(ids(&twice), ids(&once));
}

#[test]
fn popularity_sort_is_descending_with_ties_in_input_order() {
    let events = sample();
    let sorted = sort_events(events.iter().collect(), SortBy::Popularity);
    assert_eq!(ids(&sorted), ["b", "d", "a", "c"]);
    assert!(sorted
        .windows(2)
        .all(|w| w[0].registered_count >= w[1].registered_count));
}

#[test]
fn price_sort_treats_absent_price_as_zero() {
    let events = sample();
    let sorted = sort_events(events.iter().collect(), SortBy::Price);
    assert_eq!(ids(&sorted), ["b", "c", "d", "a"]);
}

#[test]
fn toggling_twice_restores_the_filter() {
    let mut filter = EventFilter::default();
    filter.toggle_category(EventCategory::Art);
    filter.toggle_status(EventStatus::Ongoing);
    assert!(filter.categories.contains(&EventCategory::Art));
    assert_eq!(filter.active_count(), 2);

    filter.toggle_category(EventCategory::Art);
    filter.toggle_status(EventStatus::Ongoing);
    assert_eq!(filter, EventFilter::default());
    assert_eq!(filter.active_count(), 0);
}

#[test]
fn active_count_ignores_sort_and_counts_each_criterion_once() {
    let filter = EventFilter {
        search: "jazz".into(),
        location: "Brazzaville".into(),
        price: PriceFilter::Free,
        ..EventFilter::default()
    }
    .with_category(EventCategory::Music)
    .with_category(EventCategory::Dance);
    assert_eq!(filter.active_count(), 4);
}

#[test]
fn reset_restores_unrestricted_date_listing() {
    let mut criteria = BrowseCriteria::new(
        EventFilter::default().with_category(EventCategory::Dance),
        SortBy::Price,
    );
    criteria.reset();
    assert_eq!(criteria, BrowseCriteria::default());
    assert_eq!(criteria.sort_by, SortBy::Date);

    let events = sample();
    assert_eq!(ids(&criteria.apply(&events)), ["b", "d", "a", "c"]);
}

#[test]
fn locations_are_unique_in_first_seen_order() {
    let mut events = sample();
    events[1].location = "Dolisie".into();
    events[3].location = "Dolisie".into();
    assert_eq!(distinct_locations(&events), ["Brazzaville", "Dolisie"]);
}

#[test]
fn parses_query_values() {
    assert_eq!("".parse::<PriceFilter>().expect("price"), PriceFilter::All);
    assert_eq!("Paid".parse::<PriceFilter>().expect("price"), PriceFilter::Paid);
    assert_eq!(
        "popularity".parse::<SortBy>().expect("sort"),
        SortBy::Popularity
    );
    assert!("cheapest".parse::<SortBy>().is_err());
}
